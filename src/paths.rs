//! Source path to object path mapping.

use crate::config::Layout;

/// Maps translation units onto the object files the Makefile builds.
pub struct OutputPathMapper<'a> {
    layout: &'a Layout,
}

impl<'a> OutputPathMapper<'a> {
    pub fn new(layout: &'a Layout) -> Self {
        Self { layout }
    }

    /// `lib/token.cpp` -> `$(SRCDIR)/token.o`, `cli/main.cpp` -> `cli/main.o`.
    pub fn object_file(&self, source: &str) -> String {
        let stem = match source.rfind('.') {
            Some(dot) if dot > source.rfind('/').map_or(0, |slash| slash + 1) => &source[..dot],
            _ => source,
        };
        self.build_dir(&format!("{}{}", stem, self.layout.object_ext))
    }

    /// Swap the library directory for the build-directory token, keeping the
    /// separator: `lib/token.cpp` -> `$(SRCDIR)/token.cpp`. Other paths are
    /// returned unchanged.
    pub fn build_dir(&self, path: &str) -> String {
        let library = self.layout.library.trim_end_matches('/');
        match path.strip_prefix(library) {
            Some(rest) if rest.starts_with('/') => {
                format!("{}{}", self.layout.build_dir_token, rest)
            }
            _ => path.to_string(),
        }
    }
}
