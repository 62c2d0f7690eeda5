//! Corpus analysis orchestration
//!
//! Feeds every fragment of an [`Input`] to the direction, quotation and
//! number accumulators, finalizes each once and assembles an
//! [`AnalysisResult`]. Analysis is all-or-nothing: the whole input is read
//! before counting starts, so a read failure never yields partial results.

use crate::accumulate::Accumulate;
use crate::config::{defaults, InferenceThresholds};
use crate::direction::{DirectionClassifier, DirectionMonitor};
use crate::error::{AnalysisError, Result};
use crate::number::NumberStyleInferrer;
use crate::quotation::{CandidateTable, QuotationStyleInferrer};
use crate::result::{AnalysisResult, DirectionSummary};
use std::io::Read;
use std::path::{Path, PathBuf};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Source of corpus text
pub enum Input {
    /// Literal text, analyzed as a single fragment
    Text(String),
    /// Newline-delimited corpus file, analyzed line by line
    File(PathBuf),
    /// Reader over a newline-delimited corpus, analyzed line by line
    Reader(Box<dyn Read + Send>),
}

impl std::fmt::Debug for Input {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Input::Text(text) => f
                .debug_struct("Input::Text")
                .field("length", &text.len())
                .finish(),
            Input::File(path) => f.debug_struct("Input::File").field("path", path).finish(),
            Input::Reader(_) => f.debug_struct("Input::Reader").finish(),
        }
    }
}

impl Input {
    /// Create input from text
    pub fn from_text(text: impl Into<String>) -> Self {
        Input::Text(text.into())
    }

    /// Create input from a file path
    pub fn from_file(path: impl AsRef<Path>) -> Self {
        Input::File(path.as_ref().to_path_buf())
    }

    /// Create input from a reader
    pub fn from_reader(reader: impl Read + Send + 'static) -> Self {
        Input::Reader(Box::new(reader))
    }

    /// Load the full content, noting whether it should be split into lines
    fn load(self) -> Result<(String, bool)> {
        match self {
            Input::Text(text) => Ok((text, false)),
            Input::File(path) => {
                let bytes = std::fs::read(&path).map_err(|source| AnalysisError::Io {
                    path: path.clone(),
                    source,
                })?;
                let text = String::from_utf8(bytes).map_err(|e| {
                    AnalysisError::Encoding(format!("{}: {e}", path.display()))
                })?;
                Ok((normalize_newlines(text), true))
            }
            Input::Reader(mut reader) => {
                let mut bytes = Vec::new();
                reader
                    .read_to_end(&mut bytes)
                    .map_err(|source| AnalysisError::Io {
                        path: PathBuf::from("<reader>"),
                        source,
                    })?;
                let text = String::from_utf8(bytes)
                    .map_err(|e| AnalysisError::Encoding(format!("<reader>: {e}")))?;
                Ok((normalize_newlines(text), true))
            }
        }
    }
}

/// Translate `\r\n` and lone `\r` line endings to `\n`
fn normalize_newlines(text: String) -> String {
    if !text.contains('\r') {
        return text;
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// The three accumulators fed in lockstep
#[derive(Debug, Clone)]
struct Accumulators {
    direction: DirectionClassifier,
    quotation: QuotationStyleInferrer,
    number: NumberStyleInferrer,
}

impl Accumulate for Accumulators {
    fn identity() -> Self {
        Self {
            direction: DirectionClassifier::identity(),
            quotation: QuotationStyleInferrer::identity(),
            number: NumberStyleInferrer::identity(),
        }
    }

    fn combine(&mut self, other: &Self) {
        self.direction.combine(&other.direction);
        self.quotation.combine(&other.quotation);
        self.number.combine(&other.number);
    }
}

/// Corpus analyzer
#[derive(Debug, Clone)]
pub struct Analyzer {
    lang_code: Option<String>,
    lang_name: Option<String>,
    thresholds: InferenceThresholds,
    candidates: CandidateTable,
    monitor: Option<DirectionMonitor>,
    parallel_threshold: usize,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self {
            lang_code: None,
            lang_name: None,
            thresholds: InferenceThresholds::default(),
            candidates: CandidateTable::default(),
            monitor: None,
            parallel_threshold: defaults::PARALLEL_THRESHOLD_LINES,
        }
    }
}

impl Analyzer {
    /// Create an analyzer with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an analyzer builder
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::default()
    }

    /// Analyze a literal string
    pub fn analyze_text(&self, text: &str) -> Result<AnalysisResult> {
        self.analyze(Input::from_text(text))
    }

    /// Analyze a newline-delimited corpus file
    pub fn analyze_file(&self, path: impl AsRef<Path>) -> Result<AnalysisResult> {
        self.analyze(Input::from_file(path))
    }

    /// Analyze an input source
    pub fn analyze(&self, input: Input) -> Result<AnalysisResult> {
        log::debug!("loading {input:?}");
        let (content, split_lines) = input.load()?;
        let fragments: Vec<&str> = if split_lines {
            content.split_inclusive('\n').collect()
        } else {
            vec![content.as_str()]
        };

        log::debug!("analyzing {} fragment(s)", fragments.len());
        let mut acc = self.accumulate_all(&fragments);
        Ok(self.conclude(&mut acc))
    }

    fn empty_accumulators(&self) -> Accumulators {
        let mut direction =
            DirectionClassifier::with_language(self.lang_code.clone(), self.lang_name.clone());
        direction.set_monitor(self.monitor.clone());
        Accumulators {
            direction,
            quotation: QuotationStyleInferrer::new(self.candidates.clone(), self.thresholds),
            number: NumberStyleInferrer::new(),
        }
    }

    fn accumulate(&self, fragments: &[&str], first_line: usize) -> Accumulators {
        let mut acc = self.empty_accumulators();
        for (i, fragment) in fragments.iter().enumerate() {
            let location = self
                .monitor
                .as_ref()
                .map(|_| format!("line {}", first_line + i + 1));
            acc.direction.record_at(fragment, 1, location.as_deref());
            acc.quotation.record(fragment);
            acc.number.record(fragment);
        }
        acc
    }

    #[cfg(feature = "parallel")]
    fn accumulate_all(&self, fragments: &[&str]) -> Accumulators {
        if fragments.len() <= self.parallel_threshold {
            return self.accumulate(fragments, 0);
        }

        let workers = rayon::current_num_threads().max(1);
        let chunk_size = fragments.len().div_ceil(workers);
        log::debug!("splitting {} lines across {workers} workers", fragments.len());

        let partials: Vec<Accumulators> = fragments
            .par_chunks(chunk_size)
            .enumerate()
            .map(|(i, chunk)| self.accumulate(chunk, i * chunk_size))
            .collect();
        // Start from the first partial so the custom candidate table is kept.
        Accumulators::reduce(partials)
    }

    #[cfg(not(feature = "parallel"))]
    fn accumulate_all(&self, fragments: &[&str]) -> Accumulators {
        self.accumulate(fragments, 0)
    }

    fn conclude(&self, acc: &mut Accumulators) -> AnalysisResult {
        acc.quotation.finalize();
        acc.number.finalize();
        let value = acc.direction.classify();
        log::debug!(
            "direction {value}, {} confirmed quotation pair(s)",
            acc.quotation.confirmed_pairs().len()
        );

        AnalysisResult {
            direction: DirectionSummary {
                value,
                bidi_counts: acc.direction.bidi_counts().clone(),
                report_text: acc.direction.report(true),
            },
            quotation_style: acc.quotation.report(),
            number_style: acc.number.report(),
            total_characters_seen: acc.quotation.total_chars_seen(),
            lang_code: self.lang_code.clone(),
            lang_name: self.lang_name.clone(),
        }
    }
}

/// Fluent builder for [`Analyzer`]
#[derive(Debug, Default)]
pub struct AnalyzerBuilder {
    lang_code: Option<String>,
    lang_name: Option<String>,
    thresholds: Option<InferenceThresholds>,
    candidates: Option<CandidateTable>,
    monitor: Option<DirectionMonitor>,
    parallel_threshold: Option<usize>,
}

impl AnalyzerBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the language code passed through to the result
    pub fn lang_code(mut self, code: impl Into<String>) -> Self {
        self.lang_code = Some(code.into());
        self
    }

    /// Set the language name passed through to the result
    pub fn lang_name(mut self, name: impl Into<String>) -> Self {
        self.lang_name = Some(name.into());
        self
    }

    /// Set the inference thresholds
    pub fn thresholds(mut self, thresholds: InferenceThresholds) -> Self {
        self.thresholds = Some(thresholds);
        self
    }

    /// Replace the candidate characters and pairs
    pub fn candidates(mut self, chars: &[char], pairs: &[(char, char)]) -> Result<Self> {
        self.candidates = Some(CandidateTable::new(chars, pairs)?);
        Ok(self)
    }

    /// Report characters contradicting an expected direction
    pub fn direction_monitor(mut self, monitor: DirectionMonitor) -> Self {
        self.monitor = Some(monitor);
        self
    }

    /// Line count above which analysis runs in parallel
    pub fn parallel_threshold(mut self, lines: usize) -> Self {
        self.parallel_threshold = Some(lines);
        self
    }

    /// Build the analyzer
    pub fn build(self) -> Result<Analyzer> {
        let thresholds = self.thresholds.unwrap_or_default();
        thresholds.validate()?;

        let mut analyzer = Analyzer {
            lang_code: self.lang_code,
            lang_name: self.lang_name,
            thresholds,
            monitor: self.monitor,
            ..Analyzer::default()
        };
        if let Some(candidates) = self.candidates {
            analyzer.candidates = candidates;
        }
        if let Some(lines) = self.parallel_threshold {
            analyzer.parallel_threshold = lines;
        }
        Ok(analyzer)
    }
}

/// Analyze `input`, attaching optional language metadata
pub fn analyze(
    input: Input,
    lang_code: Option<&str>,
    lang_name: Option<&str>,
) -> Result<AnalysisResult> {
    let mut builder = Analyzer::builder();
    if let Some(code) = lang_code {
        builder = builder.lang_code(code);
    }
    if let Some(name) = lang_name {
        builder = builder.lang_name(name);
    }
    builder.build()?.analyze(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direction::{BidiCategory, Direction};
    use std::io::Cursor;

    #[test]
    fn test_empty_text() {
        let result = Analyzer::new().analyze_text("").unwrap();
        assert_eq!(result.direction.value, Direction::LeftToRight);
        assert!(result.confirmed_pairs().is_empty());
        assert_eq!(result.total_characters_seen, 0);
    }

    #[test]
    fn test_metadata_passthrough() {
        let result = analyze(Input::from_text("abc"), Some("eng"), Some("English")).unwrap();
        assert_eq!(result.lang_code.as_deref(), Some("eng"));
        assert_eq!(result.lang_name.as_deref(), Some("English"));
        assert!(result.direction.report_text.contains("English"));
    }

    #[test]
    fn test_reader_input_split_into_lines() {
        let reader = Cursor::new("«a»\n«b»\n".as_bytes().to_vec());
        let result = Analyzer::new().analyze(Input::from_reader(reader)).unwrap();
        assert_eq!(result.quotation_style.pair_counts[&'«'][&'»'], 2);
        assert_eq!(result.total_characters_seen, 8);
    }

    #[test]
    fn test_crlf_line_endings_normalized() {
        let reader = Cursor::new("«a»\r\n«b»\r\n".as_bytes().to_vec());
        let result = Analyzer::new().analyze(Input::from_reader(reader)).unwrap();
        assert_eq!(result.total_characters_seen, 8);
        assert_eq!(
            result.direction.bidi_counts.get(BidiCategory::ParagraphSeparator),
            2
        );
        assert_eq!(result.quotation_style.pair_counts[&'«'][&'»'], 2);
    }

    #[test]
    fn test_crlf_file_matches_lf_file() {
        let dir = tempfile::tempdir().unwrap();
        let crlf = dir.path().join("crlf.txt");
        let lf = dir.path().join("lf.txt");
        std::fs::write(&crlf, "He said “yes”.\r\nShe said “no”.\rEnd\r\n").unwrap();
        std::fs::write(&lf, "He said “yes”.\nShe said “no”.\nEnd\n").unwrap();

        let from_crlf = Analyzer::new().analyze_file(&crlf).unwrap();
        let from_lf = Analyzer::new().analyze_file(&lf).unwrap();
        assert_eq!(from_crlf.total_characters_seen, from_lf.total_characters_seen);
        assert_eq!(from_crlf.direction.bidi_counts, from_lf.direction.bidi_counts);
        assert_eq!(from_crlf.quotation_style, from_lf.quotation_style);
    }

    #[test]
    fn test_invalid_utf8_reader() {
        let reader = Cursor::new(vec![0xff, 0xfe, b'a']);
        let err = Analyzer::new()
            .analyze(Input::from_reader(reader))
            .unwrap_err();
        assert!(matches!(err, AnalysisError::Encoding(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = Analyzer::new()
            .analyze_file("/definitely/not/here.txt")
            .unwrap_err();
        assert!(matches!(err, AnalysisError::Io { .. }));
    }

    #[test]
    fn test_builder_rejects_bad_candidates() {
        let result = Analyzer::builder().candidates(&['“'], &[('“', '”')]);
        assert!(matches!(
            result,
            Err(AnalysisError::InvalidCandidatePair { .. })
        ));
    }

    #[test]
    fn test_builder_rejects_bad_thresholds() {
        let thresholds = InferenceThresholds {
            balance_min: 3.0,
            ..Default::default()
        };
        assert!(Analyzer::builder().thresholds(thresholds).build().is_err());
    }

    #[test]
    fn test_custom_candidates() {
        let analyzer = Analyzer::builder()
            .candidates(&['「', '」'], &[('「', '」')])
            .unwrap()
            .build()
            .unwrap();
        let result = analyzer.analyze_text("「はい」。「いいえ」。").unwrap();
        assert!(result.confirms('「', '」'));
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let line = "He said “yes” and she said ‘no’ — 1,234 times.\n";
        let text = line.repeat(64);

        let sequential = Analyzer::builder()
            .parallel_threshold(usize::MAX)
            .build()
            .unwrap();
        let parallel = Analyzer::builder().parallel_threshold(1).build().unwrap();

        let reader = |s: &str| Input::from_reader(Cursor::new(s.as_bytes().to_vec()));
        let a = sequential.analyze(reader(&text)).unwrap();
        let b = parallel.analyze(reader(&text)).unwrap();
        assert_eq!(a, b);
        assert!(a.confirms('“', '”'));
    }
}
