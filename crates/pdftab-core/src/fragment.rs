/// One positioned run of extracted text on a page.
///
/// Coordinates are in the units of the text-extraction backend (PDF points
/// for most backends). Before normalization `y` is the baseline measured from
/// the bottom of the page; after [`normalize_fragments`](crate::normalize_fragments)
/// it is measured from the top.
///
/// A missing coordinate in serialized input deserializes as NaN, which marks
/// the fragment as unplaceable.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextFragment {
    /// The text content of this fragment.
    #[cfg_attr(feature = "serde", serde(default))]
    pub text: String,
    /// Left edge of the fragment.
    #[cfg_attr(feature = "serde", serde(default = "missing_coordinate"))]
    pub x: f64,
    /// Baseline y-coordinate.
    #[cfg_attr(feature = "serde", serde(default = "missing_coordinate"))]
    pub y: f64,
    /// Advance width of the run.
    #[cfg_attr(feature = "serde", serde(default))]
    pub width: f64,
    /// Height of the run.
    #[cfg_attr(feature = "serde", serde(default))]
    pub height: f64,
}

#[cfg(feature = "serde")]
fn missing_coordinate() -> f64 {
    f64::NAN
}

impl TextFragment {
    pub fn new(text: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            width,
            height,
        }
    }

    /// Fragment with the given position and no extent.
    pub fn at(text: impl Into<String>, x: f64, y: f64) -> Self {
        Self::new(text, x, y, 0.0, 0.0)
    }

    /// Whether both coordinates are finite, so the fragment can be placed in a grid.
    pub fn is_placeable(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// The fragments of a single page together with the page height.
///
/// This is the per-page contract of the text-extraction collaborator.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageFragments {
    /// Page height in the same units as the fragment coordinates.
    pub height: f64,
    /// Raw fragments in content-stream order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub fragments: Vec<TextFragment>,
}

impl PageFragments {
    pub fn new(height: f64, fragments: Vec<TextFragment>) -> Self {
        Self { height, fragments }
    }
}
