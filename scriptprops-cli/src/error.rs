//! Error handling for the CLI application

use std::fmt;

/// CLI-specific failures
#[derive(Debug)]
pub enum CliError {
    /// Malformed CLI configuration file
    ConfigError(String),
    /// Unreadable or malformed corpus info file
    CorpusInfoError(String),
    /// Analysis failure reported by the core library
    AnalysisError(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
            CliError::CorpusInfoError(msg) => write!(f, "Corpus info error: {msg}"),
            CliError::AnalysisError(msg) => write!(f, "Analysis error: {msg}"),
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
    fn test_error_display() {
        assert_eq!(
            CliError::ConfigError("bad key".to_string()).to_string(),
            "Configuration error: bad key"
        );
        assert_eq!(
            CliError::CorpusInfoError("info.json: expected value".to_string()).to_string(),
            "Corpus info error: info.json: expected value"
        );
        assert_eq!(
            CliError::AnalysisError("missing file".to_string()).to_string(),
            "Analysis error: missing file"
        );
    }

    #[test]
    fn test_converts_into_anyhow() {
        let failure: CliResult<()> = Err(CliError::ConfigError("x".to_string()).into());
        let err = failure.unwrap_err();
        assert!(err.downcast_ref::<CliError>().is_some());
    }
}
