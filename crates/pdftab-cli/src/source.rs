//! File-backed collaborators: fragment dumps and OCR text.

use std::fs;
use std::path::Path;

use pdftab_core::{FragmentSource, PageFragments, SourceError};
use serde::Deserialize;

/// One entry of a fragment dump's `pages` array.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum DumpPage {
    /// The extractor could not read this page.
    Failed { error: String },
    Page(PageFragments),
}

#[derive(Debug, Deserialize)]
struct DumpFile {
    pages: Vec<DumpPage>,
}

/// Fragments produced by an external text extractor, loaded from JSON.
///
/// ```json
/// { "pages": [ { "height": 792, "fragments": [ { "text": "A", "x": 72, "y": 700 } ] },
///              { "error": "encrypted" } ] }
/// ```
#[derive(Debug, Clone)]
pub struct FragmentDump {
    pages: Vec<DumpPage>,
}

impl FragmentDump {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let file: DumpFile = serde_json::from_str(json)?;
        Ok(Self { pages: file.pages })
    }

    pub fn open(path: &Path) -> Result<Self, String> {
        let json = fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
        Self::from_json(&json).map_err(|e| format!("invalid fragment dump {}: {e}", path.display()))
    }
}

impl FragmentSource for FragmentDump {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_fragments(&self, index: usize) -> Result<PageFragments, SourceError> {
        match self.pages.get(index) {
            Some(DumpPage::Page(page)) => Ok(page.clone()),
            Some(DumpPage::Failed { error }) => Err(classify_failure(error)),
            None => Err(SourceError::PageOutOfRange {
                index,
                count: self.pages.len(),
            }),
        }
    }
}

fn classify_failure(message: &str) -> SourceError {
    let lower = message.to_ascii_lowercase();
    if lower.contains("encrypt") || lower.contains("password") {
        SourceError::Encrypted
    } else {
        SourceError::Corrupt(message.to_string())
    }
}

/// Split OCR output into pages on form feed characters.
///
/// A trailing form feed (as OCR engines emit after the last page) does not
/// start an extra page.
pub fn split_ocr_pages(text: &str) -> Vec<String> {
    let text = text.strip_suffix('\u{c}').unwrap_or(text);
    if text.is_empty() {
        return Vec::new();
    }
    text.split('\u{c}').map(str::to_string).collect()
}

pub fn read_ocr_pages(path: &Path) -> Result<Vec<String>, String> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    Ok(split_ocr_pages(&text))
}
