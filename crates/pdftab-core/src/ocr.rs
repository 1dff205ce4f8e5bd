//! Low-fidelity table reconstruction from OCR text.
//!
//! Used when positioned fragments are unavailable. There is no geometry to
//! work with, so columns are guessed from runs of whitespace.

use std::sync::LazyLock;

use regex::Regex;

use crate::table::Table;

static CELL_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("cell separator pattern is valid"));

/// Split OCR text into a variable-width table.
///
/// Each line becomes a row; each run of two or more whitespace characters
/// inside a line separates two cells. Blank lines become single empty cells.
pub fn text_to_table(text: &str) -> Table {
    let rows: Vec<Vec<String>> = text
        .lines()
        .map(|line| CELL_SEPARATOR.split(line).map(str::to_string).collect())
        .collect();

    tracing::debug!(rows = rows.len(), "split OCR text into rows");

    Table::new(rows)
}
