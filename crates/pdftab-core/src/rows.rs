use crate::fragment::TextFragment;

/// Which y-position a forming row is compared against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum RowAnchor {
    /// The y of the most recently added fragment. Rows can drift further
    /// than the tolerance from their first member when fragments step
    /// gradually down the page.
    #[default]
    LastSeen,
    /// The y of the row's first fragment.
    First,
    /// The running mean y of the row's fragments.
    Mean,
}

/// Fragments judged to lie on the same horizontal text line.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    /// Members in reading order.
    pub fragments: Vec<TextFragment>,
}

impl Row {
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}

/// Output of [`cluster_rows`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RowClustering {
    /// Row clusters, top to bottom.
    pub rows: Vec<Row>,
    /// Fragments excluded because a coordinate was not finite.
    pub unplaceable: usize,
}

/// Group normalized fragments into horizontal bands.
///
/// Fragments are walked in the given order. A fragment joins the current row
/// when `|y - anchor| < row_tolerance`; otherwise the row is closed and a new
/// one starts with that fragment.
pub fn cluster_rows(
    fragments: Vec<TextFragment>,
    row_tolerance: f64,
    anchor: RowAnchor,
) -> RowClustering {
    let mut rows = Vec::new();
    let mut unplaceable = 0;
    let mut current: Vec<TextFragment> = Vec::new();
    let mut anchor_y = 0.0;
    let mut y_sum = 0.0;

    for fragment in fragments {
        if !fragment.is_placeable() {
            unplaceable += 1;
            continue;
        }

        let y = fragment.y;
        let joins = (y - anchor_y).abs() < row_tolerance;
        if !current.is_empty() && !joins {
            rows.push(Row {
                fragments: std::mem::take(&mut current),
            });
        }

        if current.is_empty() {
            anchor_y = y;
            y_sum = 0.0;
        }
        current.push(fragment);
        y_sum += y;

        anchor_y = match anchor {
            RowAnchor::LastSeen => y,
            RowAnchor::First => anchor_y,
            RowAnchor::Mean => y_sum / current.len() as f64,
        };
    }

    if !current.is_empty() {
        rows.push(Row { fragments: current });
    }

    tracing::debug!(rows = rows.len(), unplaceable, "clustered rows");

    RowClustering { rows, unplaceable }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_texts(clustering: &RowClustering) -> Vec<Vec<&str>> {
        clustering
            .rows
            .iter()
            .map(|r| r.fragments.iter().map(|f| f.text.as_str()).collect())
            .collect()
    }

    #[test]
    fn default_anchor_is_last_seen() {
        assert_eq!(RowAnchor::default(), RowAnchor::LastSeen);
    }

    #[test]
    fn empty_input_gives_no_rows() {
        let out = cluster_rows(Vec::new(), 5.0, RowAnchor::LastSeen);
        assert!(out.rows.is_empty());
        assert_eq!(out.unplaceable, 0);
    }

    #[test]
    fn splits_bands_beyond_tolerance() {
        let input = vec![
            TextFragment::at("A", 0.0, 10.0),
            TextFragment::at("B", 100.0, 12.0),
            TextFragment::at("C", 0.0, 30.0),
        ];
        let out = cluster_rows(input, 5.0, RowAnchor::LastSeen);
        assert_eq!(row_texts(&out), vec![vec!["A", "B"], vec!["C"]]);
    }

    #[test]
    fn gap_equal_to_tolerance_starts_new_row() {
        let input = vec![
            TextFragment::at("A", 0.0, 10.0),
            TextFragment::at("B", 0.0, 15.0),
        ];
        let out = cluster_rows(input, 5.0, RowAnchor::LastSeen);
        assert_eq!(out.rows.len(), 2);
    }

    #[test]
    fn last_seen_anchor_drifts() {
        // Each step is under the tolerance, the total span is not.
        let input = vec![
            TextFragment::at("a", 0.0, 0.0),
            TextFragment::at("b", 10.0, 4.0),
            TextFragment::at("c", 20.0, 8.0),
            TextFragment::at("d", 30.0, 12.0),
        ];
        let out = cluster_rows(input, 5.0, RowAnchor::LastSeen);
        assert_eq!(row_texts(&out), vec![vec!["a", "b", "c", "d"]]);
    }

    #[test]
    fn first_anchor_does_not_drift() {
        let input = vec![
            TextFragment::at("a", 0.0, 0.0),
            TextFragment::at("b", 10.0, 4.0),
            TextFragment::at("c", 20.0, 8.0),
            TextFragment::at("d", 30.0, 12.0),
        ];
        let out = cluster_rows(input, 5.0, RowAnchor::First);
        assert_eq!(row_texts(&out), vec![vec!["a", "b"], vec!["c", "d"]]);
    }

    #[test]
    fn mean_anchor_tracks_row_average() {
        // Mean after a,b is 2; c at 8 is 6 away.
        let input = vec![
            TextFragment::at("a", 0.0, 0.0),
            TextFragment::at("b", 10.0, 4.0),
            TextFragment::at("c", 20.0, 8.0),
        ];
        let out = cluster_rows(input, 5.0, RowAnchor::Mean);
        assert_eq!(row_texts(&out), vec![vec!["a", "b"], vec!["c"]]);
    }

    #[test]
    fn non_finite_fragments_are_excluded() {
        let input = vec![
            TextFragment::at("A", 0.0, 10.0),
            TextFragment::at("bad", f64::NAN, 10.0),
            TextFragment::at("worse", 0.0, f64::INFINITY),
            TextFragment::at("B", 100.0, 10.0),
        ];
        let out = cluster_rows(input, 5.0, RowAnchor::LastSeen);
        assert_eq!(row_texts(&out), vec![vec!["A", "B"]]);
        assert_eq!(out.unplaceable, 2);
    }

    #[test]
    fn input_order_is_preserved_within_row() {
        let input = vec![
            TextFragment::at("x", 50.0, 10.0),
            TextFragment::at("y", 10.0, 11.0),
        ];
        let out = cluster_rows(input, 5.0, RowAnchor::LastSeen);
        assert_eq!(row_texts(&out), vec![vec!["x", "y"]]);
    }

    #[test]
    fn nan_tolerance_merges_nothing() {
        let input = vec![
            TextFragment::at("a", 0.0, 0.0),
            TextFragment::at("b", 0.0, 0.0),
        ];
        let out = cluster_rows(input, f64::NAN, RowAnchor::LastSeen);
        assert_eq!(row_texts(&out), vec![vec!["a"], vec!["b"]]);
    }
}
