use std::io;
use std::path::Path;

use pdftab_core::{
    DocumentExtractor, FragmentSource, OcrMode, PageTable, PdftabError, RowAnchor, TableExtractor,
    TableSettings,
};

use crate::cli::OutputFormat;
use crate::shared::{report_stats, resolve_pages, write_tables};
use crate::source::{FragmentDump, read_ocr_pages};

/// Options for the `tables` subcommand.
pub struct TablesArgs<'a> {
    pub file: &'a Path,
    pub pages: Option<&'a str>,
    pub format: &'a OutputFormat,
    pub settings: TableSettings,
    pub ocr_mode: OcrMode,
    pub ocr_text: Option<&'a Path>,
    pub stats: bool,
}

pub fn build_settings(
    row_tolerance: f64,
    column_tolerance: f64,
    row_anchor: RowAnchor,
) -> TableSettings {
    TableSettings {
        row_tolerance,
        column_tolerance,
        row_anchor,
    }
}

pub fn run(args: TablesArgs<'_>) -> Result<(), i32> {
    let usable = |t: f64| t > 0.0 && t.is_finite();
    if !usable(args.settings.row_tolerance) || !usable(args.settings.column_tolerance) {
        eprintln!("Error: tolerances must be positive finite numbers");
        return Err(1);
    }

    let dump = open_dump(args.file)?;
    let page_indices = resolve_pages(args.pages, dump.page_count())?;

    let ocr_pages = match args.ocr_text {
        Some(path) => Some(read_ocr_pages(path).map_err(|e| {
            eprintln!("Error: {e}");
            1
        })?),
        None => None,
    };
    if args.ocr_mode == OcrMode::Force && ocr_pages.is_none() {
        eprintln!("Error: --ocr force requires --ocr-text");
        return Err(1);
    }

    let extractor = TableExtractor::new(args.settings);
    let mut doc = DocumentExtractor::new(&dump, extractor).with_mode(args.ocr_mode);
    if let Some(pages) = ocr_pages.as_ref() {
        doc = doc.with_ocr(pages, args.ocr_mode);
    }

    let results = extract(&doc, &page_indices);
    let (tables, failures) = split_results(results);

    for err in &failures {
        eprintln!("Error: {err}");
    }

    if args.stats {
        report_stats(&tables);
    }

    let stdout = io::stdout();
    write_tables(&mut stdout.lock(), &tables, args.format).map_err(|e| {
        eprintln!("Error: failed to write output: {e}");
        1
    })?;

    if failures.is_empty() { Ok(()) } else { Err(1) }
}

fn open_dump(file: &Path) -> Result<FragmentDump, i32> {
    if !file.exists() {
        eprintln!("Error: file not found: {}", file.display());
        return Err(1);
    }
    FragmentDump::open(file).map_err(|e| {
        eprintln!("Error: {e}");
        1
    })
}

#[cfg(not(feature = "parallel"))]
fn extract(
    doc: &DocumentExtractor<'_, FragmentDump, Vec<String>>,
    page_indices: &[usize],
) -> Vec<Result<PageTable, PdftabError>> {
    doc.extract_pages(page_indices)
}

#[cfg(feature = "parallel")]
fn extract(
    doc: &DocumentExtractor<'_, FragmentDump, Vec<String>>,
    page_indices: &[usize],
) -> Vec<Result<PageTable, PdftabError>> {
    doc.extract_pages_parallel(page_indices)
}

fn split_results(
    results: Vec<Result<PageTable, PdftabError>>,
) -> (Vec<PageTable>, Vec<PdftabError>) {
    let mut tables = Vec::with_capacity(results.len());
    let mut failures = Vec::new();
    for result in results {
        match result {
            Ok(table) => tables.push(table),
            Err(err) => failures.push(err),
        }
    }
    (tables, failures)
}
