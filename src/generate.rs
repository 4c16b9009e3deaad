//! Generation run: collect, render, write.
//!
//! All outputs are rendered before the first file is opened. They are then
//! written one at a time, in order: library listing, test listing, Makefile.
//! Listings are optional (a failure is reported and skipped); the Makefile is
//! required.

use crate::config::DmakeConfig;
use crate::error::GenerateError;
use crate::makefile;
use crate::project::ProjectListEmitter;
use crate::scan::{self, CollectedGroup};
use colored::*;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// A rendered output waiting to be written.
#[derive(Debug, Clone)]
pub struct OutputFile {
    /// Relative to the tree root.
    pub path: PathBuf,
    pub contents: String,
    pub required: bool,
}

/// What a run produced.
#[derive(Debug, Default)]
pub struct Report {
    pub rules: usize,
    pub written: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

/// Collect sources and render every output without touching the disk.
pub fn plan(
    root: &Path,
    config: &DmakeConfig,
    release: bool,
) -> Result<(Vec<OutputFile>, usize), GenerateError> {
    let groups = scan::collect_all(root, config);
    if scan::all_tracked_empty(&groups) {
        return Err(GenerateError::NoSourceFiles);
    }

    for collected in &groups {
        tracing::debug!(
            group = %collected.group.name,
            files = collected.files.len(),
            "collected sources"
        );
    }

    let mut outputs = listings(config, &groups);
    outputs.push(OutputFile {
        path: PathBuf::from(&config.makefile),
        contents: makefile::render(root, config, &groups, release),
        required: true,
    });

    let rules = groups.iter().map(|c| c.files.len()).sum();
    Ok((outputs, rules))
}

fn listings(config: &DmakeConfig, groups: &[CollectedGroup<'_>]) -> Vec<OutputFile> {
    let emitter = ProjectListEmitter::new(&config.layout, &config.listing);
    let mut outputs = Vec::new();

    let library = groups
        .iter()
        .find(|c| c.group.dir.as_deref() == Some(config.layout.library.as_str()));
    if let Some(lib) = library {
        outputs.push(OutputFile {
            path: PathBuf::from(&config.listing.library_file),
            contents: emitter.library(&lib.files),
            required: false,
        });
    }

    let tests = groups
        .iter()
        .find(|c| c.group.name == config.listing.test_group);
    if let Some(test) = tests
        && let Some(dir) = &test.group.dir
    {
        outputs.push(OutputFile {
            path: PathBuf::from(&config.listing.test_file),
            contents: emitter.tests(&test.files, dir),
            required: false,
        });
    }

    outputs
}

/// Write `outputs` under `root`, in order.
///
/// A required output that cannot be written aborts the run; optional ones
/// are reported and skipped.
pub fn write_outputs(root: &Path, outputs: &[OutputFile]) -> Result<Report, GenerateError> {
    let mut report = Report::default();

    for output in outputs {
        let path = root.join(&output.path);
        match write_file(&path, &output.contents) {
            Ok(()) => {
                println!("   {} Wrote {}", "+".green(), output.path.display());
                report.written.push(output.path.clone());
            }
            Err(source) if !output.required => {
                println!(
                    "   {} Skipping {} ({})",
                    "!".yellow(),
                    output.path.display(),
                    source
                );
                report.skipped.push(output.path.clone());
            }
            Err(source) => return Err(GenerateError::OutputOpen { path, source }),
        }
    }

    Ok(report)
}

/// Create or truncate `path` and write `contents`. The handle is dropped on
/// every return path.
fn write_file(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(contents.as_bytes())?;
    writer.flush()
}

/// Full run: plan, then write unless `dry_run`.
pub fn generate(
    root: &Path,
    config: &DmakeConfig,
    release: bool,
    dry_run: bool,
) -> Result<Report, GenerateError> {
    let (outputs, rules) = plan(root, config, release)?;

    if dry_run {
        for output in &outputs {
            println!(
                "   {} Would write {} ({} bytes)",
                "~".cyan(),
                output.path.display(),
                output.contents.len()
            );
        }
        return Ok(Report {
            rules,
            ..Report::default()
        });
    }

    let mut report = write_outputs(root, &outputs)?;
    report.rules = rules;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_empty_tree_fails_without_output() {
        let dir = tempfile::tempdir().unwrap();
        let config = DmakeConfig::default();

        let err = generate(dir.path(), &config, false, false).unwrap_err();
        assert!(matches!(err, GenerateError::NoSourceFiles));
        assert!(!dir.path().join("Makefile").exists());
    }

    #[test]
    fn test_tools_only_tree_fails() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "tools/reduce.cpp", "");

        let err = generate(dir.path(), &DmakeConfig::default(), false, false).unwrap_err();
        assert!(matches!(err, GenerateError::NoSourceFiles));
        assert!(!dir.path().join("Makefile").exists());
    }

    #[test]
    fn test_outputs_in_order() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "lib/token.cpp", "");
        write(dir.path(), "test/testtoken.cpp", "");

        let config = DmakeConfig::default();
        let (outputs, rules) = plan(dir.path(), &config, false).unwrap();
        let paths: Vec<_> = outputs.iter().map(|o| o.path.clone()).collect();
        assert_eq!(
            paths,
            [
                PathBuf::from("lib/lib.pri"),
                PathBuf::from("test/testfiles.pri"),
                PathBuf::from("Makefile")
            ]
        );
        assert!(outputs[2].required);
        // lib, test and the two externals
        assert_eq!(rules, 4);
    }

    #[test]
    fn test_generate_writes_files() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "lib/token.cpp", "#include \"token.h\"\n");
        write(dir.path(), "lib/token.h", "");
        write(dir.path(), "test/testtoken.cpp", "");

        let config = DmakeConfig::default();
        let report = generate(dir.path(), &config, false, false).unwrap();
        assert_eq!(report.written.len(), 3);
        assert!(report.skipped.is_empty());

        let makefile = fs::read_to_string(dir.path().join("Makefile")).unwrap();
        assert!(makefile.starts_with("# This file is generated by dmake, do not edit."));
        assert!(makefile.contains("$(SRCDIR)/token.o: lib/token.cpp lib/cxx11emu.h lib/token.h\n"));

        let listing = fs::read_to_string(dir.path().join("lib/lib.pri")).unwrap();
        assert!(listing.contains("$${PWD}/token.h"));
    }

    #[test]
    fn test_missing_listing_dir_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "cli/main.cpp", "");

        let config = DmakeConfig::default();
        let report = generate(dir.path(), &config, false, false).unwrap();
        assert_eq!(report.written, [PathBuf::from("Makefile")]);
        assert_eq!(report.skipped.len(), 2);
    }

    #[test]
    fn test_unwritable_makefile_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "lib/a.cpp", "");
        // A directory where the Makefile should go.
        fs::create_dir(dir.path().join("Makefile")).unwrap();

        let config = DmakeConfig::default();
        let err = generate(dir.path(), &config, false, false).unwrap_err();
        assert!(matches!(err, GenerateError::OutputOpen { .. }));
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "lib/a.cpp", "");

        let config = DmakeConfig::default();
        let report = generate(dir.path(), &config, false, true).unwrap();
        assert!(report.written.is_empty());
        assert_eq!(report.rules, 3);
        assert!(!dir.path().join("Makefile").exists());
        assert!(!dir.path().join("lib/lib.pri").exists());
    }
}
