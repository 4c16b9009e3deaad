//! Source file collection.
//!
//! Paths are kept as `/`-separated strings relative to the tree root
//! (`lib/token.cpp`), because the generated Makefile and the include
//! resolver both work on that textual form.

use crate::config::{DmakeConfig, SourceGroup};
use std::path::Path;
use walkdir::WalkDir;

/// A translation unit tagged with the group it was collected for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: String,
    pub group: String,
}

/// List files under `root/dir` whose name contains `extension`.
///
/// Only the directory itself is listed unless `recursive` is set. Symlinks
/// are followed, so a linked translation unit is listed like a file. The result
/// is sorted so the generated output does not depend on directory order. A
/// missing directory yields an empty list.
pub fn collect(root: &Path, dir: &str, extension: &str, recursive: bool) -> Vec<String> {
    let max_depth = if recursive { usize::MAX } else { 1 };

    let mut files: Vec<String> = WalkDir::new(root.join(dir))
        .min_depth(1)
        .max_depth(max_depth)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.file_name().to_string_lossy().contains(extension))
        .filter_map(|e| relative_path(root, e.path()))
        .collect();

    files.sort();
    files
}

/// Collect a group's translation units: scanned when it names a directory,
/// otherwise its explicit file list as given.
pub fn collect_group(root: &Path, group: &SourceGroup, extension: &str) -> Vec<SourceFile> {
    let paths = match &group.dir {
        Some(dir) => collect(root, dir, extension, group.recursive),
        None => group.files.clone(),
    };

    paths
        .into_iter()
        .map(|path| SourceFile {
            path,
            group: group.name.clone(),
        })
        .collect()
}

/// A group together with the files collected for it.
#[derive(Debug, Clone)]
pub struct CollectedGroup<'a> {
    pub group: &'a SourceGroup,
    pub files: Vec<SourceFile>,
}

/// Collect every configured group, in declaration order.
pub fn collect_all<'a>(root: &Path, config: &'a DmakeConfig) -> Vec<CollectedGroup<'a>> {
    config
        .groups
        .iter()
        .map(|group| CollectedGroup {
            group,
            files: collect_group(root, group, &config.layout.source_ext),
        })
        .collect()
}

/// True when every tracked group came up empty. With no tracked group
/// configured, every group is considered.
pub fn all_tracked_empty(groups: &[CollectedGroup<'_>]) -> bool {
    let mut tracked = groups.iter().filter(|c| c.group.tracked).peekable();
    if tracked.peek().is_none() {
        return groups.iter().all(|c| c.files.is_empty());
    }
    tracked.all(|c| c.files.is_empty())
}

fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Vec<_> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Some(parts.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn test_collect_is_flat_and_sorted() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "lib/token.cpp");
        touch(dir.path(), "lib/astutils.cpp");
        touch(dir.path(), "lib/token.h");
        touch(dir.path(), "lib/nested/deep.cpp");

        let files = collect(dir.path(), "lib/", ".cpp", false);
        assert_eq!(files, ["lib/astutils.cpp", "lib/token.cpp"]);
    }

    #[test]
    fn test_collect_recursive() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "lib/token.cpp");
        touch(dir.path(), "lib/nested/deep.cpp");

        let files = collect(dir.path(), "lib/", ".cpp", true);
        assert_eq!(files, ["lib/nested/deep.cpp", "lib/token.cpp"]);
    }

    #[test]
    fn test_collect_matches_substring() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "cli/main.cpp");
        touch(dir.path(), "cli/main.cpp.orig");

        let files = collect(dir.path(), "cli/", ".cpp", false);
        assert_eq!(files, ["cli/main.cpp", "cli/main.cpp.orig"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_collect_follows_symlinks() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "shared/platform.cpp");
        touch(dir.path(), "lib/token.cpp");
        std::os::unix::fs::symlink(
            dir.path().join("shared/platform.cpp"),
            dir.path().join("lib/platform.cpp"),
        )
        .unwrap();

        let files = collect(dir.path(), "lib/", ".cpp", false);
        assert_eq!(files, ["lib/platform.cpp", "lib/token.cpp"]);
    }

    #[test]
    fn test_collect_missing_dir_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(collect(dir.path(), "tools/", ".cpp", false).is_empty());
    }

    #[test]
    fn test_empty_tree_counts_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let config = DmakeConfig::default();
        let groups = collect_all(dir.path(), &config);
        assert_eq!(groups.len(), 5);
        assert!(all_tracked_empty(&groups));

        touch(dir.path(), "test/testtoken.cpp");
        let groups = collect_all(dir.path(), &config);
        assert!(!all_tracked_empty(&groups));
    }

    #[test]
    fn test_tools_only_tree_counts_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "tools/reduce.cpp");

        let config = DmakeConfig::default();
        let groups = collect_all(dir.path(), &config);
        let tools = groups.iter().find(|c| c.group.name == "tools").unwrap();
        assert_eq!(tools.files.len(), 1);
        assert!(all_tracked_empty(&groups));
    }

    #[test]
    fn test_untracked_only_config_considers_all_groups() {
        let dir = tempfile::tempdir().unwrap();
        let config = crate::config::parse_config(
            "[[group]]\nname = \"tools\"\ndir = \"tools/\"\ntracked = false\n",
        )
        .unwrap();
        assert!(all_tracked_empty(&collect_all(dir.path(), &config)));

        touch(dir.path(), "tools/reduce.cpp");
        assert!(!all_tracked_empty(&collect_all(dir.path(), &config)));
    }

    #[test]
    fn test_collect_group_explicit_files() {
        let dir = tempfile::tempdir().unwrap();
        let group = crate::config::DmakeConfig::default()
            .groups
            .get("externals")
            .cloned()
            .unwrap();

        let files = collect_group(dir.path(), &group, ".cpp");
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].path, "externals/simplecpp/simplecpp.cpp");
        assert_eq!(files[0].group, "externals");
    }
}
