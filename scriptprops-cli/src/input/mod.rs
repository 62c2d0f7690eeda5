//! Input handling module

pub mod corpus_info;

pub use corpus_info::{resolve_language, CorpusInfo, INFO_FILE_NAME};
