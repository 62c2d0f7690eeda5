//! Error types for corpus analysis

use std::path::PathBuf;
use thiserror::Error;

/// Error type for analysis operations
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Input file missing or unreadable
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// The file that could not be read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Input bytes are not valid UTF-8
    #[error("encoding error: {0}")]
    Encoding(String),

    /// A candidate quotation pair names a character outside the candidate set
    #[error("candidate pair ({open}, {close}) references a character that is not a quotation candidate")]
    InvalidCandidatePair {
        /// Opening side of the pair
        open: char,
        /// Closing side of the pair
        close: char,
    },

    /// Invalid threshold configuration
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl From<toml::de::Error> for AnalysisError {
    fn from(err: toml::de::Error) -> Self {
        AnalysisError::Configuration(err.to_string())
    }
}

/// Result type for analysis operations
pub type Result<T> = std::result::Result<T, AnalysisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display_names_path() {
        let err = AnalysisError::Io {
            path: PathBuf::from("/missing/corpus.txt"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/missing/corpus.txt"));
        assert!(msg.contains("not found"));
    }

    #[test]
    fn test_invalid_pair_display() {
        let err = AnalysisError::InvalidCandidatePair {
            open: '[',
            close: ']',
        };
        assert!(err.to_string().contains("([, ])"));
    }

    #[test]
    fn test_toml_error_maps_to_configuration() {
        let toml_err = toml::from_str::<toml::Table>("= broken").unwrap_err();
        let err: AnalysisError = toml_err.into();
        assert!(matches!(err, AnalysisError::Configuration(_)));
    }
}
