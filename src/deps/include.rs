const INCLUDE_DIRECTIVE: &str = "#include \"";

/// Extract the quoted payload of the first `#include "..."` on `line`.
///
/// Returns `None` when the line has no directive or the closing quote is
/// missing.
pub fn parse_quoted_include(line: &str) -> Option<&str> {
    let start = line.find(INCLUDE_DIRECTIVE)? + INCLUDE_DIRECTIVE.len();
    let len = line[start..].find('"')?;
    Some(&line[start..start + len])
}

/// Directory part of `path` including the trailing `/`, or `""`.
pub fn containing_dir(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[..=idx],
        None => "",
    }
}

/// Drop everything up to and including the first `/../`.
///
/// This is not canonicalisation: `cli/../lib/x.h` becomes `lib/x.h`, but
/// `a/b/../c.h` becomes `c.h`, and only the first marker is handled.
pub fn collapse_parent_dir(path: &str) -> String {
    match path.find("/../") {
        Some(idx) => path[idx + 4..].to_string(),
        None => path.to_string(),
    }
}
