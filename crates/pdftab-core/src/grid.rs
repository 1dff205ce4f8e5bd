use crate::columns::ColumnSet;
use crate::rows::Row;
use crate::table::{ExtractionStats, Table};

/// Place every fragment of every row into its column cell.
///
/// Each output row has exactly `columns.len()` cells, initialized empty. A
/// fragment goes to the nearest anchor closer than `column_tolerance`; if a
/// cell is already filled the later fragment overwrites it. Fragments with
/// no anchor in range are left out of the table, as are fragments with a
/// non-finite position.
///
/// The returned stats carry `unplaceable`, `dropped` and `collisions`
/// counts; callers fill in `fragments`.
pub fn assemble_grid(
    rows: &[Row],
    columns: &ColumnSet,
    column_tolerance: f64,
) -> (Table, ExtractionStats) {
    let mut stats = ExtractionStats::default();
    let mut grid = Vec::with_capacity(rows.len());

    for (row_idx, row) in rows.iter().enumerate() {
        let mut cells = vec![String::new(); columns.len()];
        let mut filled = vec![false; columns.len()];

        for fragment in &row.fragments {
            if !fragment.is_placeable() {
                tracing::trace!(row = row_idx, text = %fragment.text, "fragment has no finite position");
                stats.unplaceable += 1;
                continue;
            }
            let Some(col) = columns.nearest(fragment.x, column_tolerance) else {
                tracing::trace!(row = row_idx, x = fragment.x, text = %fragment.text, "fragment outside every column");
                stats.dropped += 1;
                continue;
            };
            if filled[col] {
                tracing::trace!(row = row_idx, col, text = %fragment.text, "cell overwritten");
                stats.collisions += 1;
            }
            cells[col] = fragment.text.clone();
            filled[col] = true;
        }

        grid.push(cells);
    }

    (Table::new(grid), stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fragment::TextFragment;

    fn row(items: &[(&str, f64)]) -> Row {
        Row {
            fragments: items
                .iter()
                .map(|&(t, x)| TextFragment::at(t, x, 0.0))
                .collect(),
        }
    }

    fn cols(anchors: &[f64]) -> ColumnSet {
        ColumnSet::from_anchors(anchors.to_vec()).unwrap()
    }

    #[test]
    fn places_fragments_by_column() {
        let rows = vec![row(&[("A", 0.0), ("B", 100.0)]), row(&[("C", 101.0)])];
        let (table, stats) = assemble_grid(&rows, &cols(&[0.0, 100.0]), 10.0);
        assert_eq!(
            table.rows(),
            &[
                vec!["A".to_string(), "B".to_string()],
                vec![String::new(), "C".to_string()],
            ]
        );
        assert_eq!(stats.dropped, 0);
        assert_eq!(stats.collisions, 0);
    }

    #[test]
    fn far_fragment_is_dropped_and_width_unchanged() {
        let rows = vec![row(&[("A", 0.0), ("far", 500.0), ("B", 100.0)])];
        let (table, stats) = assemble_grid(&rows, &cols(&[0.0, 100.0]), 10.0);
        assert_eq!(table.rows(), &[vec!["A".to_string(), "B".to_string()]]);
        assert_eq!(table.column_count(), 2);
        assert_eq!(stats.dropped, 1);
    }

    #[test]
    fn last_writer_wins_on_collision() {
        let rows = vec![row(&[("first", 0.0), ("second", 3.0)])];
        let (table, stats) = assemble_grid(&rows, &cols(&[1.0]), 10.0);
        assert_eq!(table.rows(), &[vec!["second".to_string()]]);
        assert_eq!(stats.collisions, 1);
    }

    #[test]
    fn empty_text_claims_cell_without_content() {
        let rows = vec![row(&[("A", 0.0), ("", 1.0)])];
        let (table, stats) = assemble_grid(&rows, &cols(&[0.0]), 10.0);
        assert_eq!(table.rows(), &[vec![String::new()]]);
        assert_eq!(stats.collisions, 1);
    }

    #[test]
    fn every_row_has_column_count_cells() {
        let rows = vec![row(&[("A", 0.0)]), row(&[]), row(&[("Z", 300.0)])];
        let (table, _) = assemble_grid(&rows, &cols(&[0.0, 150.0, 300.0]), 10.0);
        assert!(table.rows().iter().all(|r| r.len() == 3));
        assert_eq!(table.row_count(), 3);
    }

    #[test]
    fn non_finite_fragment_is_counted_not_placed() {
        let rows = vec![row(&[("A", 0.0), ("ghost", f64::NAN)])];
        let (table, stats) = assemble_grid(&rows, &cols(&[0.0, 100.0]), 10.0);
        assert_eq!(table.rows(), &[vec!["A".to_string(), String::new()]]);
        assert_eq!(stats.unplaceable, 1);
        assert_eq!(stats.dropped, 0);
        assert_eq!(stats.collisions, 0);
    }

    #[test]
    fn no_rows_gives_empty_table() {
        let (table, stats) = assemble_grid(&[], &ColumnSet::default(), 10.0);
        assert!(table.is_empty());
        assert_eq!(stats, ExtractionStats::default());
    }
}
