use std::io::{self, Write};

use pdftab_core::{ExtractionMethod, PageTable, Table};
use tracing_subscriber::EnvFilter;

use crate::cli::OutputFormat;
use crate::page_range::parse_page_range;

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "PDFTAB_LOG";

/// Install the stderr log subscriber.
///
/// `-v` flags take precedence over the `PDFTAB_LOG` directive; without either
/// only warnings are shown.
pub fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Resolve an optional page range string into 0-indexed page indices.
pub fn resolve_pages(pages: Option<&str>, page_count: usize) -> Result<Vec<usize>, i32> {
    match pages {
        Some(range) => parse_page_range(range, page_count).map_err(|e| {
            eprintln!("Error: {e}");
            1
        }),
        None => Ok((0..page_count).collect()),
    }
}

/// Escape a string for CSV output.
pub fn csv_escape(text: &str) -> String {
    if text.contains(',') || text.contains('"') || text.contains('\n') {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text.to_string()
    }
}

/// Worksheet name for the n-th table (0-based), as a spreadsheet writer would use.
pub fn sheet_name(index: usize) -> String {
    format!("Sheet{}", index + 1)
}

fn method_str(method: ExtractionMethod) -> &'static str {
    match method {
        ExtractionMethod::Structural => "structural",
        ExtractionMethod::Ocr => "ocr",
    }
}

/// Write page tables in the requested format.
pub fn write_tables(
    out: &mut impl Write,
    tables: &[PageTable],
    format: &OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Text => write_grid(out, tables),
        OutputFormat::Json => write_json(out, tables),
        OutputFormat::Csv => write_csv(out, tables),
    }
}

fn write_grid(out: &mut impl Write, tables: &[PageTable]) -> io::Result<()> {
    if tables.iter().all(|t| t.table.is_empty()) {
        return writeln!(out, "No tables found.");
    }

    for page_table in tables {
        writeln!(
            out,
            "--- Table (page {}, {}) ---",
            page_table.page,
            method_str(page_table.method)
        )?;
        write_aligned(out, &page_table.table)?;
        writeln!(out)?;
    }
    Ok(())
}

/// Print rows with `|` separators, padding every column to its widest cell.
pub fn write_aligned(out: &mut impl Write, table: &Table) -> io::Result<()> {
    let col_count = table.column_count();
    let mut col_widths = vec![1usize; col_count];
    for row in table.rows() {
        for (ci, cell) in row.iter().enumerate() {
            col_widths[ci] = col_widths[ci].max(cell.chars().count());
        }
    }

    for row in table.rows() {
        let cells: Vec<String> = (0..col_count)
            .map(|ci| {
                let text = row.get(ci).map(String::as_str).unwrap_or("");
                format!("{:<width$}", text, width = col_widths[ci])
            })
            .collect();
        writeln!(out, "| {} |", cells.join(" | "))?;
    }
    Ok(())
}

fn write_json(out: &mut impl Write, tables: &[PageTable]) -> io::Result<()> {
    let sheets: Vec<serde_json::Value> = tables
        .iter()
        .enumerate()
        .map(|(i, t)| {
            serde_json::json!({
                "sheet": sheet_name(i),
                "page": t.page,
                "method": t.method,
                "rows": t.table,
            })
        })
        .collect();
    serde_json::to_writer(&mut *out, &sheets)?;
    writeln!(out)
}

fn write_csv(out: &mut impl Write, tables: &[PageTable]) -> io::Result<()> {
    for (i, page_table) in tables.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        write_csv_rows(out, &page_table.table)?;
    }
    Ok(())
}

pub fn write_csv_rows(out: &mut impl Write, table: &Table) -> io::Result<()> {
    for row in table.rows() {
        let cells: Vec<String> = row.iter().map(|c| csv_escape(c)).collect();
        writeln!(out, "{}", cells.join(","))?;
    }
    Ok(())
}

/// Print one stats line per page to stderr.
pub fn report_stats(tables: &[PageTable]) {
    for t in tables {
        let s = &t.stats;
        eprintln!(
            "page {}: {} rows, {} fragments, {} placed, {} dropped, {} overwritten, {} unplaceable",
            t.page,
            t.table.row_count(),
            s.fragments,
            s.placed(),
            s.dropped,
            s.collisions,
            s.unplaceable,
        );
    }
}
