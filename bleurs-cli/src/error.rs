//! Error handling for the CLI application

use std::fmt;
use std::path::PathBuf;

/// Custom error type for CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// No file matched a pattern
    FileNotFound(String),
    /// Invalid file pattern
    InvalidPattern(String),
    /// Configuration error
    ConfigError(String),
    /// A sentence was given without any reference
    NoReferences,
    /// A reference file is not line-aligned with the hypotheses
    LineCountMismatch {
        /// Offending reference file
        path: PathBuf,
        /// Number of hypothesis lines
        expected: usize,
        /// Number of lines in the reference file
        found: usize,
    },
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::FileNotFound(pattern) => write!(f, "No files found matching: {pattern}"),
            CliError::InvalidPattern(pattern) => write!(f, "Invalid file pattern: {pattern}"),
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
            CliError::NoReferences => write!(f, "At least one reference is required"),
            CliError::LineCountMismatch {
                path,
                expected,
                found,
            } => write!(
                f,
                "Reference file {} has {found} lines but the hypothesis file has {expected}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for CliError {}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_not_found_error_display() {
        let error = CliError::FileNotFound("refs/*.txt".to_string());
        assert_eq!(error.to_string(), "No files found matching: refs/*.txt");
    }

    #[test]
    fn test_invalid_pattern_error_display() {
        let error = CliError::InvalidPattern("[invalid".to_string());
        assert_eq!(error.to_string(), "Invalid file pattern: [invalid");
    }

    #[test]
    fn test_config_error_display() {
        let error = CliError::ConfigError("precision too large".to_string());
        assert_eq!(error.to_string(), "Configuration error: precision too large");
    }

    #[test]
    fn test_line_count_mismatch_display() {
        let error = CliError::LineCountMismatch {
            path: PathBuf::from("ref.de"),
            expected: 3,
            found: 2,
        };
        assert_eq!(
            error.to_string(),
            "Reference file ref.de has 2 lines but the hypothesis file has 3"
        );
    }

    #[test]
    fn test_error_converts_to_anyhow() {
        let failure: CliResult<()> = Err(CliError::NoReferences.into());
        let err = failure.unwrap_err();
        assert!(err.downcast_ref::<CliError>().is_some());
        assert_eq!(err.to_string(), "At least one reference is required");
    }
}
