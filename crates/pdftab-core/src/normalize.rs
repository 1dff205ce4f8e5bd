use std::cmp::Ordering;

use crate::fragment::TextFragment;

/// Convert a page's raw fragments into top-down reading order.
///
/// Every `y` is flipped to a top-down coordinate (`page_height - y`) and the
/// list is stably sorted top of page first, then left to right. No fragment
/// is dropped or merged here, including empty, zero-width and non-finite ones.
pub fn normalize_fragments(fragments: Vec<TextFragment>, page_height: f64) -> Vec<TextFragment> {
    let mut normalized: Vec<TextFragment> = fragments
        .into_iter()
        .map(|mut f| {
            f.y = page_height - f.y;
            f
        })
        .collect();

    // Descending baseline y is ascending top-down y.
    normalized.sort_by(reading_order);
    normalized
}

fn reading_order(a: &TextFragment, b: &TextFragment) -> Ordering {
    a.y.total_cmp(&b.y).then_with(|| a.x.total_cmp(&b.x))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(fragments: &[TextFragment]) -> Vec<&str> {
        fragments.iter().map(|f| f.text.as_str()).collect()
    }

    #[test]
    fn flips_y_to_top_down() {
        let out = normalize_fragments(vec![TextFragment::at("A", 0.0, 700.0)], 792.0);
        assert_eq!(out[0].y, 92.0);
    }

    #[test]
    fn sorts_top_of_page_first() {
        let input = vec![
            TextFragment::at("bottom", 0.0, 100.0),
            TextFragment::at("top", 0.0, 700.0),
            TextFragment::at("middle", 0.0, 400.0),
        ];
        let out = normalize_fragments(input, 792.0);
        assert_eq!(texts(&out), vec!["top", "middle", "bottom"]);
    }

    #[test]
    fn sorts_left_to_right_within_same_y() {
        let input = vec![
            TextFragment::at("C", 200.0, 500.0),
            TextFragment::at("A", 0.0, 500.0),
            TextFragment::at("B", 100.0, 500.0),
        ];
        let out = normalize_fragments(input, 792.0);
        assert_eq!(texts(&out), vec!["A", "B", "C"]);
    }

    #[test]
    fn ties_keep_input_order() {
        let input = vec![
            TextFragment::at("first", 10.0, 500.0),
            TextFragment::at("second", 10.0, 500.0),
        ];
        let out = normalize_fragments(input, 792.0);
        assert_eq!(texts(&out), vec!["first", "second"]);
    }

    #[test]
    fn retains_empty_and_zero_width_fragments() {
        let input = vec![
            TextFragment::new("", 0.0, 500.0, 0.0, 0.0),
            TextFragment::new(" ", 5.0, 500.0, 0.0, 10.0),
        ];
        let out = normalize_fragments(input, 792.0);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn retains_non_finite_fragments_without_panicking() {
        let input = vec![
            TextFragment::at("nan", f64::NAN, 500.0),
            TextFragment::at("ok", 0.0, 500.0),
            TextFragment::at("inf", 0.0, f64::INFINITY),
        ];
        let out = normalize_fragments(input, 792.0);
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn empty_input() {
        assert!(normalize_fragments(Vec::new(), 792.0).is_empty());
    }
}
