use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use pdftab_core::{OcrMode, RowAnchor};

/// Rebuild spreadsheet tables from PDF text fragment dumps and OCR text.
#[derive(Debug, Parser)]
#[command(name = "pdftab", about, version)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). Overrides PDFTAB_LOG
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Reconstruct one table per page from a JSON fragment dump
    Tables {
        /// Path to the fragment dump (JSON)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Page range (e.g. '1,3-5', '4-'). Default: all pages
        #[arg(long)]
        pages: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Maximum y-distance for fragments on the same row (default: 5.0)
        #[arg(long, default_value_t = 5.0, value_parser = parse_tolerance)]
        row_tolerance: f64,

        /// Maximum x-distance for fragments in the same column (default: 10.0)
        #[arg(long, default_value_t = 10.0, value_parser = parse_tolerance)]
        column_tolerance: f64,

        /// Reference position a forming row is compared against
        #[arg(long, value_enum, default_value_t = RowAnchorArg::Last)]
        row_anchor: RowAnchorArg,

        /// When to use OCR text instead of fragments
        #[arg(long, value_enum, default_value_t = OcrModeArg::Auto)]
        ocr: OcrModeArg,

        /// OCR output for the same document, pages separated by form feeds
        #[arg(long, value_name = "FILE")]
        ocr_text: Option<PathBuf>,

        /// Print per-page fragment statistics to stderr
        #[arg(long)]
        stats: bool,
    },

    /// Split OCR text into a single table on whitespace runs
    Ocr {
        /// Path to the OCR text file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

/// Output format for table subcommands.
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Aligned grid with | separators
    Text,
    /// JSON, one worksheet per table
    Json,
    /// CSV, tables separated by a blank line
    Csv,
}

/// Row anchor choice.
#[derive(Debug, Clone, ValueEnum)]
pub enum RowAnchorArg {
    /// Most recently added fragment
    Last,
    /// First fragment of the row
    First,
    /// Mean of the row's fragments
    Mean,
}

impl From<RowAnchorArg> for RowAnchor {
    fn from(arg: RowAnchorArg) -> Self {
        match arg {
            RowAnchorArg::Last => RowAnchor::LastSeen,
            RowAnchorArg::First => RowAnchor::First,
            RowAnchorArg::Mean => RowAnchor::Mean,
        }
    }
}

/// OCR mode choice.
#[derive(Debug, Clone, ValueEnum)]
pub enum OcrModeArg {
    /// Fall back to OCR text for pages whose fragments are unavailable
    Auto,
    /// Always use OCR text
    Force,
    /// Never use OCR text
    Off,
}

impl From<OcrModeArg> for OcrMode {
    fn from(arg: OcrModeArg) -> Self {
        match arg {
            OcrModeArg::Auto => OcrMode::Auto,
            OcrModeArg::Force => OcrMode::Force,
            OcrModeArg::Off => OcrMode::Off,
        }
    }
}

fn parse_tolerance(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err("tolerance must be a positive finite number".to_string())
    }
}
