use std::path::PathBuf;

/// Error type for generation runs
#[derive(Debug)]
pub enum GenerateError {
    /// Every scanned source group came back empty
    NoSourceFiles,
    /// A required output file could not be created or written
    OutputOpen {
        path: PathBuf,
        source: std::io::Error,
    },
    /// `dmake.toml` is missing, unreadable or malformed
    Config { path: PathBuf, message: String },
}

impl std::fmt::Display for GenerateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerateError::NoSourceFiles => {
                write!(f, "No files found. Are you in the correct directory?")
            }
            GenerateError::OutputOpen { path, source } => write!(
                f,
                "An error occurred while trying to open {}: {}",
                path.display(),
                source
            ),
            GenerateError::Config { path, message } => {
                write!(f, "Invalid config {}: {}", path.display(), message)
            }
        }
    }
}

impl std::error::Error for GenerateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GenerateError::OutputOpen { source, .. } => Some(source),
            _ => None,
        }
    }
}
