use super::include::{collapse_parent_dir, containing_dir, parse_quoted_include};
use crate::config::Layout;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Headers a translation unit depends on, in discovery order.
///
/// Always starts with the bootstrap header and never holds duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencySet {
    paths: Vec<String>,
}

impl DependencySet {
    fn new(bootstrap: &str) -> Self {
        Self {
            paths: vec![bootstrap.to_string()],
        }
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.iter().any(|p| p == path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.paths.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.paths
    }
}

impl<'a> IntoIterator for &'a DependencySet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.iter()
    }
}

/// Follows quoted includes transitively from a translation unit.
///
/// Paths are resolved textually relative to the including file. A header
/// that cannot be read under a satellite directory is retried under the
/// directory the satellite table maps it to; anything still unreadable is a
/// leaf.
pub struct IncludeResolver<'a> {
    root: &'a Path,
    layout: &'a Layout,
}

impl<'a> IncludeResolver<'a> {
    pub fn new(root: &'a Path, layout: &'a Layout) -> Self {
        Self { root, layout }
    }

    /// Resolve every header reachable from `file`.
    ///
    /// The walk is depth-first in include order. Paths containing the
    /// translation-unit marker are walked but left out of the result, which
    /// also keeps `file` itself out.
    pub fn resolve(&self, file: &str) -> DependencySet {
        let bootstrap = self.layout.bootstrap_header.as_str();
        let mut deps = DependencySet::new(bootstrap);
        let mut visited: HashSet<String> = HashSet::from([bootstrap.to_string()]);
        // (path, already rewritten by the satellite table)
        let mut pending = vec![(file.to_string(), false)];

        while let Some((current, rewritten)) = pending.pop() {
            if !visited.insert(current.clone()) {
                continue;
            }

            let bytes = match fs::read(self.root.join(&current)) {
                Ok(bytes) => bytes,
                Err(_) => {
                    // At most one rewrite per include edge.
                    match self.satellite_fallback(&current).filter(|_| !rewritten) {
                        Some(canonical) => {
                            debug!(from = %current, to = %canonical, "satellite fallback");
                            pending.push((canonical, true));
                        }
                        None => debug!(path = %current, "unresolved include, treated as leaf"),
                    }
                    continue;
                }
            };

            if !current.contains(&self.layout.source_marker) {
                deps.paths.push(current.clone());
            }

            let dir = containing_dir(&current);
            let text = String::from_utf8_lossy(&bytes);
            let includes: Vec<(String, bool)> = text
                .lines()
                .filter_map(parse_quoted_include)
                .map(|payload| (collapse_parent_dir(&format!("{dir}{payload}")), false))
                .collect();

            // Reversed so the first include is walked first.
            pending.extend(includes.into_iter().rev());
        }

        deps
    }

    /// Map `path` from a satellite directory onto its canonical directory.
    fn satellite_fallback(&self, path: &str) -> Option<String> {
        self.layout
            .satellites
            .iter()
            .filter(|(satellite, _)| path.starts_with(satellite.as_str()))
            .max_by_key(|(satellite, _)| satellite.len())
            .map(|(satellite, canonical)| format!("{}{}", canonical, &path[satellite.len()..]))
    }
}
