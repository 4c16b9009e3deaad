//! Layout configuration (`dmake.toml`).
//!
//! Every field has a default matching the conventional tree:
//!
//! ```text
//! lib/        library sources (compiled into $(SRCDIR))
//! cli/        command-line front end
//! test/       test sources
//! tools/      auxiliary tools
//! externals/  vendored sources, listed explicitly
//! ```
//!
//! A `dmake.toml` only needs to mention what differs, e.g.
//!
//! ```toml
//! [layout]
//! bootstrap_header = "lib/compat.h"
//!
//! [layout.satellites]
//! "gui/" = "lib/"
//! ```

use crate::error::GenerateError;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub const CONFIG_FILE: &str = "dmake.toml";

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct DmakeConfig {
    /// Primary build file, relative to the tree root.
    pub makefile: String,
    pub layout: Layout,
    #[serde(rename = "group")]
    pub groups: Groups,
    /// Group names in the order their object lists are written. Groups with
    /// an `objects_var` that are not named here follow in declaration order.
    pub object_lists: Vec<String>,
    pub flags: FlagPresets,
    pub listing: ListingConfig,
}

impl Default for DmakeConfig {
    fn default() -> Self {
        Self {
            makefile: "Makefile".to_string(),
            layout: Layout::default(),
            groups: Groups::default(),
            object_lists: ["lib", "externals", "cli", "test"]
                .into_iter()
                .map(String::from)
                .collect(),
            flags: FlagPresets::default(),
            listing: ListingConfig::default(),
        }
    }
}

/// Path conventions shared by the resolver, the path mapper and the emitters.
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Layout {
    /// Directory prefix of the library group, with trailing `/`.
    pub library: String,
    pub source_ext: String,
    /// Substring that marks a path as a translation unit for the
    /// prerequisite exclusion. Matched anywhere in the path.
    pub source_marker: String,
    pub header_ext: String,
    pub object_ext: String,
    /// Header every unit depends on unconditionally (force-included).
    pub bootstrap_header: String,
    /// Replaces the library directory in object paths.
    pub build_dir_token: String,
    /// Satellite directory prefix -> canonical directory prefix.
    pub satellites: BTreeMap<String, String>,
}

impl Default for Layout {
    fn default() -> Self {
        let mut satellites = BTreeMap::new();
        satellites.insert("cli/".to_string(), "lib/".to_string());
        satellites.insert("test/".to_string(), "lib/".to_string());
        Self {
            library: "lib/".to_string(),
            source_ext: ".cpp".to_string(),
            source_marker: ".c".to_string(),
            header_ext: ".h".to_string(),
            object_ext: ".o".to_string(),
            bootstrap_header: "lib/cxx11emu.h".to_string(),
            build_dir_token: "$(SRCDIR)".to_string(),
            satellites,
        }
    }
}

/// One logical group of translation units.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SourceGroup {
    pub name: String,
    /// Directory to scan, with trailing `/`. Takes precedence over `files`.
    #[serde(default)]
    pub dir: Option<String>,
    /// Explicit file list for groups that are not scanned.
    #[serde(default)]
    pub files: Vec<String>,
    #[serde(default)]
    pub recursive: bool,
    /// Include-path argument placed right after `$(CXX)`.
    #[serde(default)]
    pub include_flags: String,
    /// Aggregate object variable, e.g. `LIBOBJ`.
    #[serde(default)]
    pub objects_var: Option<String>,
    /// Compile with warnings suppressed (`-w`).
    #[serde(default)]
    pub vendored: bool,
    /// Counts toward the "no source files" check.
    #[serde(default = "default_tracked")]
    pub tracked: bool,
}

fn default_tracked() -> bool {
    true
}

impl SourceGroup {
    fn scanned(name: &str, dir: &str, include_flags: &str, objects_var: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            dir: Some(dir.to_string()),
            files: Vec::new(),
            recursive: false,
            include_flags: include_flags.to_string(),
            objects_var: objects_var.map(str::to_string),
            vendored: false,
            tracked: true,
        }
    }
}

/// Ordered list of groups; compile rules follow declaration order.
#[derive(Deserialize, Debug, Clone)]
#[serde(transparent)]
pub struct Groups(pub Vec<SourceGroup>);

impl Default for Groups {
    fn default() -> Self {
        Self(vec![
            SourceGroup::scanned("lib", "lib/", "${INCLUDE_FOR_LIB}", Some("LIBOBJ")),
            SourceGroup::scanned("cli", "cli/", "${INCLUDE_FOR_CLI}", Some("CLIOBJ")),
            SourceGroup::scanned("test", "test/", "${INCLUDE_FOR_TEST}", Some("TESTOBJ")),
            SourceGroup {
                name: "externals".to_string(),
                dir: None,
                files: vec![
                    "externals/simplecpp/simplecpp.cpp".to_string(),
                    "externals/tinyxml/tinyxml2.cpp".to_string(),
                ],
                recursive: false,
                include_flags: String::new(),
                objects_var: Some("EXTOBJ".to_string()),
                vendored: true,
                tracked: false,
            },
            SourceGroup {
                tracked: false,
                ..SourceGroup::scanned("tools", "tools/", "${INCLUDE_FOR_LIB}", None)
            },
        ])
    }
}

impl Groups {
    pub fn iter(&self) -> std::slice::Iter<'_, SourceGroup> {
        self.0.iter()
    }

    pub fn get(&self, name: &str) -> Option<&SourceGroup> {
        self.0.iter().find(|g| g.name == name)
    }
}

/// Default `CXXFLAGS` for the two presets.
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct FlagPresets {
    pub release: String,
    pub debug: String,
}

impl Default for FlagPresets {
    fn default() -> Self {
        Self {
            release: "-std=c++0x -O2 -include lib/cxx11emu.h -DNDEBUG -Wall -Wno-sign-compare"
                .to_string(),
            debug: [
                "-include lib/cxx11emu.h",
                "-pedantic",
                "-Wall",
                "-Wextra",
                "-Wabi",
                "-Wcast-qual",
                "-Wfloat-equal",
                "-Wmissing-declarations",
                "-Wmissing-format-attribute",
                "-Wno-long-long",
                "-Wpacked",
                "-Wredundant-decls",
                "-Wshadow",
                "-Wno-missing-field-initializers",
                "-Wno-missing-braces",
                "-Wno-sign-compare",
                "-Wno-multichar",
                "$(CPPCHK_GLIBCXX_DEBUG)",
                "-g",
            ]
            .join(" "),
        }
    }
}

impl FlagPresets {
    pub fn select(&self, release: bool) -> &str {
        if release { &self.release } else { &self.debug }
    }
}

/// Project-listing (qmake include) outputs.
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ListingConfig {
    /// Library listing, written when a group scans the library directory.
    pub library_file: String,
    /// Test listing, written when the test group exists.
    pub test_file: String,
    /// Name of the group the test listing enumerates.
    pub test_group: String,
    /// Header listed ahead of the per-source headers.
    pub extra_header: String,
    /// Only test files whose name starts with this prefix are listed.
    pub test_prefix: String,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            library_file: "lib/lib.pri".to_string(),
            test_file: "test/testfiles.pri".to_string(),
            test_group: "test".to_string(),
            extra_header: "check.h".to_string(),
            test_prefix: "test".to_string(),
        }
    }
}

/// Load `dmake.toml` from `root`, or the explicit `path` if given.
///
/// A missing default file yields the built-in layout; a missing explicit file
/// is an error.
pub fn load_config(root: &Path, path: Option<&Path>) -> Result<DmakeConfig, GenerateError> {
    let (config_path, required) = match path {
        Some(p) => (p.to_path_buf(), true),
        None => (root.join(CONFIG_FILE), false),
    };

    if !config_path.exists() {
        if required {
            return Err(GenerateError::Config {
                path: config_path,
                message: "file not found".to_string(),
            });
        }
        return Ok(DmakeConfig::default());
    }

    let config_str = fs::read_to_string(&config_path).map_err(|e| GenerateError::Config {
        path: config_path.clone(),
        message: e.to_string(),
    })?;
    parse_config(&config_str).map_err(|message| GenerateError::Config {
        path: config_path,
        message,
    })
}

pub fn parse_config(content: &str) -> Result<DmakeConfig, String> {
    let config: DmakeConfig = toml::from_str(content).map_err(|e| e.to_string())?;
    if config.layout.library.is_empty() {
        return Err("layout.library must not be empty".to_string());
    }
    for group in config.groups.iter() {
        if group.dir.is_none() && group.files.is_empty() {
            return Err(format!(
                "group '{}' needs either `dir` or `files`",
                group.name
            ));
        }
    }
    Ok(config)
}
