//! Table types, settings, and the single-page reconstruction pipeline.
//!
//! A page goes through four stages in strict order: fragment normalization,
//! row clustering, column location, and grid assembly.

use crate::columns::{ColumnSet, locate_columns};
use crate::fragment::PageFragments;
use crate::grid::assemble_grid;
use crate::normalize::normalize_fragments;
use crate::rows::{RowAnchor, cluster_rows};

/// Configuration for table reconstruction.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct TableSettings {
    /// Maximum y-distance (exclusive) for a fragment to join the current row.
    pub row_tolerance: f64,
    /// Maximum gap between x-values inside one column cluster, and the
    /// exclusive distance within which a fragment is snapped to a column.
    pub column_tolerance: f64,
    /// Reference y-position a forming row is compared against.
    pub row_anchor: RowAnchor,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            row_tolerance: 5.0,
            column_tolerance: 10.0,
            row_anchor: RowAnchor::default(),
        }
    }
}

/// A reconstructed table: rows of cell strings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(transparent))]
pub struct Table {
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Vec<String>> {
        self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Width of the widest row.
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Counts describing what happened to a page's fragments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExtractionStats {
    /// Fragments received for the page.
    pub fragments: usize,
    /// Fragments excluded because a coordinate was not finite.
    pub unplaceable: usize,
    /// Fragments with no column anchor in range.
    pub dropped: usize,
    /// Fragments that overwrote an already filled cell.
    pub collisions: usize,
}

impl ExtractionStats {
    /// Fragments that ended up as the final content of a cell.
    pub fn placed(&self) -> usize {
        self.fragments
            .saturating_sub(self.unplaceable + self.dropped + self.collisions)
    }
}

/// Result of reconstructing one page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageExtraction {
    pub table: Table,
    pub columns: ColumnSet,
    pub stats: ExtractionStats,
}

/// Runs the reconstruction pipeline with fixed settings.
#[derive(Debug, Clone, Default)]
pub struct TableExtractor {
    settings: TableSettings,
}

impl TableExtractor {
    pub fn new(settings: TableSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &TableSettings {
        &self.settings
    }

    /// Reconstruct the table of a single page.
    ///
    /// Never fails: an empty page yields an empty table, and fragments that
    /// cannot be placed are only reflected in the stats.
    pub fn extract_page(&self, page: &PageFragments) -> PageExtraction {
        let fragment_count = page.fragments.len();
        let normalized = normalize_fragments(page.fragments.clone(), page.height);
        let clustering = cluster_rows(
            normalized,
            self.settings.row_tolerance,
            self.settings.row_anchor,
        );
        let columns = locate_columns(&clustering.rows, self.settings.column_tolerance);
        let (table, mut stats) =
            assemble_grid(&clustering.rows, &columns, self.settings.column_tolerance);

        stats.fragments = fragment_count;
        stats.unplaceable += clustering.unplaceable;

        tracing::debug!(
            fragments = stats.fragments,
            rows = table.row_count(),
            columns = columns.len(),
            dropped = stats.dropped,
            collisions = stats.collisions,
            "reconstructed page table"
        );

        PageExtraction {
            table,
            columns,
            stats,
        }
    }
}

/// Reconstruct one page's table with the given settings.
pub fn extract_table(page: &PageFragments, settings: &TableSettings) -> PageExtraction {
    TableExtractor::new(settings.clone()).extract_page(page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fragment::TextFragment;

    fn strings(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|r| r.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    #[test]
    fn table_settings_default_values() {
        let settings = TableSettings::default();
        assert_eq!(settings.row_tolerance, 5.0);
        assert_eq!(settings.column_tolerance, 10.0);
        assert_eq!(settings.row_anchor, RowAnchor::LastSeen);
    }

    #[test]
    fn table_settings_custom_construction() {
        let settings = TableSettings {
            row_tolerance: 2.0,
            ..TableSettings::default()
        };
        assert_eq!(settings.row_tolerance, 2.0);
        assert_eq!(settings.column_tolerance, 10.0);
    }

    #[test]
    fn table_dimensions() {
        let table = Table::new(strings(&[&["a", "b", "c"], &["d"]]));
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 3);
        assert!(!table.is_empty());
        assert!(Table::default().is_empty());
        assert_eq!(Table::default().column_count(), 0);
    }

    #[test]
    fn stats_placed_count() {
        let stats = ExtractionStats {
            fragments: 10,
            unplaceable: 1,
            dropped: 2,
            collisions: 3,
        };
        assert_eq!(stats.placed(), 4);
    }

    #[test]
    fn extract_page_runs_whole_pipeline() {
        // Baselines in bottom-up PDF coordinates on a 792pt page.
        let page = PageFragments::new(
            792.0,
            vec![
                TextFragment::at("Alice", 72.0, 680.0),
                TextFragment::at("Name", 72.0, 700.0),
                TextFragment::at("Age", 200.0, 700.0),
                TextFragment::at("30", 201.0, 680.0),
                TextFragment::at("Bob", 73.0, 660.0),
            ],
        );
        let result = TableExtractor::default().extract_page(&page);
        assert_eq!(
            result.table.rows(),
            strings(&[&["Name", "Age"], &["Alice", "30"], &["Bob", ""]]).as_slice()
        );
        assert_eq!(result.columns.len(), 2);
        assert_eq!(result.stats.fragments, 5);
        assert_eq!(result.stats.placed(), 5);
    }

    #[test]
    fn extract_page_counts_unplaceable() {
        let page = PageFragments::new(
            100.0,
            vec![
                TextFragment::at("ok", 0.0, 50.0),
                TextFragment::at("lost", f64::NAN, 50.0),
            ],
        );
        let result = extract_table(&page, &TableSettings::default());
        assert_eq!(result.table.rows(), strings(&[&["ok"]]).as_slice());
        assert_eq!(result.stats.unplaceable, 1);
    }

    #[test]
    fn empty_page_gives_empty_table() {
        let result = extract_table(&PageFragments::new(792.0, Vec::new()), &TableSettings::default());
        assert!(result.table.is_empty());
        assert!(result.columns.is_empty());
    }
}
