use crate::rows::Row;

/// Canonical x-positions of the detected columns, strictly increasing.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnSet {
    anchors: Vec<f64>,
}

impl ColumnSet {
    /// Build a column set from anchors that are already strictly increasing.
    ///
    /// Returns `None` if the anchors are out of order, repeated, or not finite.
    pub fn from_anchors(anchors: Vec<f64>) -> Option<Self> {
        let finite = anchors.iter().all(|a| a.is_finite());
        let increasing = anchors.windows(2).all(|w| w[0] < w[1]);
        (finite && increasing).then_some(Self { anchors })
    }

    pub fn anchors(&self) -> &[f64] {
        &self.anchors
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    /// Index of the anchor nearest to `x` at a distance below `tolerance`.
    ///
    /// On equal distance the lower anchor wins. A non-finite `x` or
    /// `tolerance` matches nothing.
    pub fn nearest(&self, x: f64, tolerance: f64) -> Option<usize> {
        if !x.is_finite() {
            return None;
        }
        let mut best: Option<(usize, f64)> = None;
        for (i, &anchor) in self.anchors.iter().enumerate() {
            let distance = (x - anchor).abs();
            let in_range = distance < tolerance;
            if !in_range {
                continue;
            }
            match best {
                Some((_, d)) if d <= distance => {}
                _ => best = Some((i, distance)),
            }
        }
        best.map(|(i, _)| i)
    }
}

/// Derive the column anchors from the x-positions of every fragment in `rows`.
///
/// Distinct x values are scanned in ascending order; a new cluster starts
/// whenever the gap to the previous value exceeds `column_tolerance`. Each
/// cluster collapses to its median.
pub fn locate_columns(rows: &[Row], column_tolerance: f64) -> ColumnSet {
    let mut xs: Vec<f64> = rows
        .iter()
        .flat_map(|r| r.fragments.iter().map(|f| f.x))
        .filter(|x| x.is_finite())
        .collect();
    xs.sort_by(f64::total_cmp);
    xs.dedup();

    let mut anchors = Vec::new();
    let mut cluster: Vec<f64> = Vec::new();

    for x in xs {
        if let Some(&last) = cluster.last() {
            let same_cluster = x - last <= column_tolerance;
            if !same_cluster {
                anchors.push(median(&cluster));
                cluster.clear();
            }
        }
        cluster.push(x);
    }
    if !cluster.is_empty() {
        anchors.push(median(&cluster));
    }

    tracing::debug!(columns = anchors.len(), "located columns");

    ColumnSet { anchors }
}

/// Median of a slice; the mean of the two middle values for even lengths.
///
/// Returns 0.0 for an empty slice.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[mid]
    } else {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    }
}
