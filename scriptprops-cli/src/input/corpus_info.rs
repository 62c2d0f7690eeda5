//! Corpus metadata file (`info.json`)

use crate::error::CliError;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Default corpus info file name, looked up in the working directory
pub const INFO_FILE_NAME: &str = "info.json";

/// Language metadata describing a corpus
///
/// Other keys of the file (`id`, `short`, `full`, ...) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CorpusInfo {
    /// Language code
    pub lc: Option<String>,
    /// Language name
    pub lang: Option<String>,
}

impl CorpusInfo {
    /// Read corpus info, returning `None` when the file does not exist
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.is_file() {
            return Ok(None);
        }
        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read corpus info: {}", path.display()))?;
        let info = serde_json::from_str(&source)
            .map_err(|e| CliError::CorpusInfoError(format!("{}: {e}", path.display())))?;
        Ok(Some(info))
    }
}

/// Fill in language metadata from `info_path` when neither value was given
///
/// A missing info file leaves both values unset; an unreadable or malformed
/// one is logged and otherwise ignored.
pub fn resolve_language(
    lang_code: Option<String>,
    lang_name: Option<String>,
    info_path: &Path,
) -> (Option<String>, Option<String>) {
    if lang_code.is_some() || lang_name.is_some() {
        return (lang_code, lang_name);
    }
    match CorpusInfo::load(info_path) {
        Ok(Some(info)) => {
            log::info!(
                "language from {}: code {:?}, name {:?}",
                info_path.display(),
                info.lc,
                info.lang
            );
            (info.lc, info.lang)
        }
        Ok(None) => (None, None),
        Err(e) => {
            log::warn!("ignoring corpus info: {e:#}");
            (None, None)
        }
    }
}
