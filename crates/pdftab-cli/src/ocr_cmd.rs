use std::fs;
use std::io;
use std::path::Path;

use pdftab_core::{ExtractionMethod, ExtractionStats, PageTable, text_to_table};

use crate::cli::OutputFormat;
use crate::shared::write_tables;

/// Convert a whole OCR text file into one table.
pub fn run(file: &Path, format: &OutputFormat) -> Result<(), i32> {
    if !file.exists() {
        eprintln!("Error: file not found: {}", file.display());
        return Err(1);
    }
    let text = fs::read_to_string(file).map_err(|e| {
        eprintln!("Error: failed to read {}: {e}", file.display());
        1
    })?;

    // Page breaks carry no structure for a single table.
    let text = text.replace('\u{c}', "\n");
    let table = PageTable {
        page: 1,
        method: ExtractionMethod::Ocr,
        table: text_to_table(&text),
        stats: ExtractionStats::default(),
    };
    tracing::debug!(rows = table.table.row_count(), "converted OCR text");

    let stdout = io::stdout();
    write_tables(&mut stdout.lock(), &[table], format).map_err(|e| {
        eprintln!("Error: failed to write output: {e}");
        1
    })
}
