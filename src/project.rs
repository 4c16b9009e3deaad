//! qmake project listings.
//!
//! Plain enumerations of already-collected files; no include resolution.
//!
//! - `lib/lib.pri` - headers and sources of the library group
//! - `test/testfiles.pri` - test sources whose name starts with `test`

use crate::config::{Layout, ListingConfig};
use crate::scan::SourceFile;
use crate::templates::LISTING_HEADER;

const CONTINUATION: &str = " \\\n           ";

pub struct ProjectListEmitter<'a> {
    layout: &'a Layout,
    listing: &'a ListingConfig,
}

impl<'a> ProjectListEmitter<'a> {
    pub fn new(layout: &'a Layout, listing: &'a ListingConfig) -> Self {
        Self { layout, listing }
    }

    /// Library listing. Headers are derived from the source names by
    /// swapping the extension.
    pub fn library(&self, files: &[SourceFile]) -> String {
        let names: Vec<&str> = files
            .iter()
            .map(|f| strip_dir(&f.path, &self.layout.library))
            .collect();

        let mut headers = vec![format!("$${{PWD}}/{}", self.listing.extra_header)];
        headers.extend(names.iter().filter_map(|name| {
            name.find(&self.layout.source_ext)
                .map(|idx| format!("$${{PWD}}/{}{}", &name[..idx], self.layout.header_ext))
        }));

        let sources: Vec<String> = names.iter().map(|name| format!("$${{PWD}}/{name}")).collect();

        let mut out = String::from(LISTING_HEADER);
        out.push_str("include($$PWD/pcrerules.pri)\n");
        out.push_str("include($$PWD/../externals/externals.pri)\n");
        out.push_str("INCLUDEPATH += $$PWD\n");
        out.push_str("HEADERS += ");
        out.push_str(&headers.join(CONTINUATION));
        out.push_str("\n\nSOURCES += ");
        out.push_str(&sources.join(CONTINUATION));
        out.push('\n');
        out
    }

    /// Test listing. Only files whose name starts with the test prefix are
    /// listed; helpers such as `options.cpp` are left out.
    pub fn tests(&self, files: &[SourceFile], test_dir: &str) -> String {
        let sources: Vec<String> = files
            .iter()
            .map(|f| strip_dir(&f.path, test_dir))
            .filter(|name| name.starts_with(&self.listing.test_prefix))
            .map(|name| format!("$${{BASEPATH}}/{name}"))
            .collect();

        let mut out = String::from(LISTING_HEADER);
        out.push_str("INCLUDEPATH += ../externals/tinyxml\n");
        out.push_str("\n\nSOURCES += ");
        out.push_str(&sources.join(CONTINUATION));
        out.push('\n');
        out
    }
}

fn strip_dir<'p>(path: &'p str, dir: &str) -> &'p str {
    path.strip_prefix(dir).unwrap_or(path)
}
