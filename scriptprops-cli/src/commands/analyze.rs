//! Analyze command implementation

use crate::config::CliConfig;
use crate::error::CliError;
use crate::input::{resolve_language, INFO_FILE_NAME};
use crate::output::{code_point, JsonFormatter, OutputFormatter, TextFormatter};
use anyhow::{Context, Result};
use clap::Args;
use scriptprops_core::{AnalysisResult, Analyzer, Direction, DirectionMonitor, Input};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

/// Arguments for corpus analysis
#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Newline-delimited corpus file
    #[arg(
        short = 'i',
        long = "input",
        visible_alias = "input_filename",
        value_name = "FILE",
        conflicts_with = "string",
        required_unless_present = "string"
    )]
    pub input: Option<PathBuf>,

    /// Literal text, analyzed as a single fragment
    #[arg(
        short = 's',
        long = "string",
        visible_alias = "input_string",
        value_name = "TEXT"
    )]
    pub string: Option<String>,

    /// Output file (default: stdout)
    #[arg(
        short = 'j',
        long = "output",
        visible_alias = "json_out_filename",
        value_name = "FILE"
    )]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Language code (e.g. eng, heb)
    #[arg(long, visible_alias = "lang_code", value_name = "CODE")]
    pub lang_code: Option<String>,

    /// Language name used in the direction report
    #[arg(long, visible_alias = "lang_name", value_name = "NAME")]
    pub lang_name: Option<String>,

    /// Threshold configuration file (TOML)
    #[arg(short, long, value_name = "FILE", env = "SCRIPTPROPS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Warn about characters contradicting this direction
    #[arg(long, value_enum, value_name = "DIRECTION")]
    pub expect_direction: Option<ExpectedDirection>,

    /// Suppress log output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON object
    Json,
    /// Human-readable report
    Text,
}

/// Direction expected by `--expect-direction`
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExpectedDirection {
    /// Left-to-right
    Ltr,
    /// Right-to-left
    Rtl,
}

impl From<ExpectedDirection> for Direction {
    fn from(expected: ExpectedDirection) -> Self {
        match expected {
            ExpectedDirection::Ltr => Direction::LeftToRight,
            ExpectedDirection::Rtl => Direction::RightToLeft,
        }
    }
}

impl AnalyzeArgs {
    /// Execute the analysis
    pub fn execute(&self) -> Result<()> {
        self.init_logging()?;

        log::info!("Starting corpus analysis");
        log::debug!("Arguments: {:?}", self);

        let result = self.run(Path::new(INFO_FILE_NAME))?;
        self.write_output(&result)
    }

    /// Analyze the selected input, falling back to `info_path` for language metadata
    pub fn run(&self, info_path: &Path) -> Result<AnalysisResult> {
        let analyzer = self.build_analyzer(info_path)?;
        let input = match (&self.input, &self.string) {
            (Some(path), _) => Input::from_file(path),
            (None, Some(text)) => Input::from_text(text.as_str()),
            (None, None) => anyhow::bail!("either --input or --string is required"),
        };

        let result = analyzer
            .analyze(input)
            .map_err(|e| CliError::AnalysisError(e.to_string()))?;
        log::info!("{}", result.direction.report_text);
        Ok(result)
    }

    fn build_analyzer(&self, info_path: &Path) -> Result<Analyzer> {
        let config = match &self.config {
            Some(path) => CliConfig::load(path)?,
            None => CliConfig::default(),
        };
        let (lang_code, lang_name) =
            resolve_language(self.lang_code.clone(), self.lang_name.clone(), info_path);

        let mut builder = Analyzer::builder()
            .thresholds(config.thresholds)
            .parallel_threshold(config.analysis.parallel_threshold_lines);
        if let Some(code) = lang_code {
            builder = builder.lang_code(code);
        }
        if let Some(name) = lang_name {
            builder = builder.lang_name(name);
        }
        if let Some(expected) = self.expect_direction {
            builder = builder.direction_monitor(warning_monitor(expected.into()));
        }
        builder.build().context("Failed to configure analyzer")
    }

    fn write_output(&self, result: &AnalysisResult) -> Result<()> {
        match &self.output {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("Failed to create output file: {}", path.display()))?;
                self.render(BufWriter::new(file), result)?;
                log::info!("Wrote output to {}", path.display());
                Ok(())
            }
            None => self.render(io::stdout().lock(), result),
        }
    }

    fn render<W: io::Write>(&self, writer: W, result: &AnalysisResult) -> Result<()> {
        match self.format {
            OutputFormat::Json => JsonFormatter::new(writer).write_result(result),
            OutputFormat::Text => TextFormatter::new(writer).write_result(result),
        }
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) -> Result<()> {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            // A logger may already be installed when running in-process.
            let _ = env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or(log_level),
            )
            .try_init();
        }

        Ok(())
    }
}

/// Monitor logging each contradicting character as a warning
fn warning_monitor(expected: Direction) -> DirectionMonitor {
    DirectionMonitor::new(expected, move |anomaly| {
        log::warn!(
            "{}: {} ({}, bidi {}) contradicts expected {expected} direction",
            anomaly.location.as_deref().unwrap_or("input"),
            anomaly.ch,
            code_point(anomaly.ch),
            anomaly.category.label()
        );
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn args() -> AnalyzeArgs {
        AnalyzeArgs {
            input: None,
            string: None,
            output: None,
            format: OutputFormat::Json,
            lang_code: None,
            lang_name: None,
            config: None,
            expect_direction: None,
            quiet: true,
            verbose: 0,
        }
    }

    #[test]
    fn test_run_on_string() {
        let temp_dir = TempDir::new().unwrap();
        let args = AnalyzeArgs {
            string: Some("שלום עולם".to_string()),
            lang_code: Some("heb".to_string()),
            ..args()
        };
        let result = args.run(&temp_dir.path().join(INFO_FILE_NAME)).unwrap();
        assert_eq!(result.direction.value, Direction::RightToLeft);
        assert_eq!(result.lang_code.as_deref(), Some("heb"));
        assert!(result.lang_name.is_none());
    }

    #[test]
    fn test_run_uses_corpus_info() {
        let temp_dir = TempDir::new().unwrap();
        let info = temp_dir.path().join(INFO_FILE_NAME);
        fs::write(&info, r#"{"lc": "tam", "lang": "Tamil"}"#).unwrap();

        let args = AnalyzeArgs {
            string: Some("வணக்கம்".to_string()),
            ..args()
        };
        let result = args.run(&info).unwrap();
        assert_eq!(result.lang_code.as_deref(), Some("tam"));
        assert_eq!(result.lang_name.as_deref(), Some("Tamil"));
        assert!(result.direction.report_text.contains("for Tamil to be"));
    }

    #[test]
    fn test_run_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let args = AnalyzeArgs {
            input: Some(temp_dir.path().join("absent.txt")),
            ..args()
        };
        let err = args.run(&temp_dir.path().join(INFO_FILE_NAME)).unwrap_err();
        assert!(err.downcast_ref::<CliError>().is_some());
    }

    #[test]
    fn test_write_text_to_file() {
        let temp_dir = TempDir::new().unwrap();
        let out = temp_dir.path().join("report.txt");
        let args = AnalyzeArgs {
            string: Some("He said “yes” and left.".to_string()),
            output: Some(out.clone()),
            format: OutputFormat::Text,
            ..args()
        };
        let result = args.run(&temp_dir.path().join(INFO_FILE_NAME)).unwrap();
        args.write_output(&result).unwrap();

        let written = fs::read_to_string(&out).unwrap();
        assert!(written.contains("(U+201C U+201D)"));
    }

    #[test]
    fn test_expected_direction_conversion() {
        assert_eq!(Direction::from(ExpectedDirection::Ltr), Direction::LeftToRight);
        assert_eq!(Direction::from(ExpectedDirection::Rtl), Direction::RightToLeft);
    }
}
