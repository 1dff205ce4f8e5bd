//! Document-level extraction across pages, with OCR fallback.
//!
//! Pages are independent: a failure on one page never affects another, and
//! with the `parallel` feature pages are processed concurrently.

use crate::error::{PdftabError, SourceError};
use crate::fragment::PageFragments;
use crate::ocr::text_to_table;
use crate::table::{ExtractionStats, Table, TableExtractor};

/// Supplies positioned text fragments per page.
pub trait FragmentSource {
    /// Number of pages in the document.
    fn page_count(&self) -> usize;

    /// Fragments and height of the page at 0-based `index`.
    fn page_fragments(&self, index: usize) -> Result<PageFragments, SourceError>;
}

/// Supplies recognized text per page.
pub trait OcrEngine {
    /// Recognized text of the page at 0-based `index`.
    fn recognize_page(&self, index: usize) -> Result<String, SourceError>;
}

/// When the OCR path is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum OcrMode {
    /// Use fragments; fall back to OCR when the page cannot be read.
    #[default]
    Auto,
    /// Always use OCR.
    Force,
    /// Never use OCR.
    Off,
}

/// How a page's table was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum ExtractionMethod {
    /// Spatial reconstruction from positioned fragments.
    Structural,
    /// Whitespace splitting of OCR text.
    Ocr,
}

/// The table of one page.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageTable {
    /// 1-indexed page number.
    pub page: usize,
    pub method: ExtractionMethod,
    pub table: Table,
    /// Fragment counts; all zero for OCR tables.
    pub stats: ExtractionStats,
}

/// Extracts tables from every selected page of a document.
pub struct DocumentExtractor<'a, S: ?Sized, O: ?Sized> {
    source: &'a S,
    ocr: Option<&'a O>,
    mode: OcrMode,
    extractor: TableExtractor,
}

impl<'a, S, O> DocumentExtractor<'a, S, O>
where
    S: FragmentSource + ?Sized,
    O: OcrEngine + ?Sized,
{
    pub fn new(source: &'a S, extractor: TableExtractor) -> Self {
        Self {
            source,
            ocr: None,
            mode: OcrMode::Auto,
            extractor,
        }
    }

    /// Attach an OCR engine used according to `mode`.
    pub fn with_ocr(mut self, ocr: &'a O, mode: OcrMode) -> Self {
        self.ocr = Some(ocr);
        self.mode = mode;
        self
    }

    /// Set the OCR mode without an engine; only `Off` and `Auto` are useful here.
    pub fn with_mode(mut self, mode: OcrMode) -> Self {
        self.mode = mode;
        self
    }

    /// Extract a single page (0-based `index`).
    pub fn extract_page(&self, index: usize) -> Result<PageTable, PdftabError> {
        let page = index + 1;

        if self.mode == OcrMode::Force {
            return self
                .ocr_page(index)
                .map_err(|source| PdftabError::Ocr { page, source });
        }

        let structural = match self.source.page_fragments(index) {
            Ok(fragments) => {
                let result = self.extractor.extract_page(&fragments);
                return Ok(PageTable {
                    page,
                    method: ExtractionMethod::Structural,
                    table: result.table,
                    stats: result.stats,
                });
            }
            Err(e) => e,
        };

        if self.mode == OcrMode::Off {
            return Err(PdftabError::Structural {
                page,
                source: structural,
            });
        }

        tracing::warn!(page, error = %structural, "text extraction failed, falling back to OCR");
        self.ocr_page(index).map_err(|ocr| PdftabError::Fallback {
            page,
            structural,
            ocr,
        })
    }

    /// Extract the given 0-based pages, in order.
    pub fn extract_pages(&self, indices: &[usize]) -> Vec<Result<PageTable, PdftabError>> {
        indices.iter().map(|&i| self.extract_page(i)).collect()
    }

    /// Extract every page of the source.
    pub fn extract_all(&self) -> Vec<Result<PageTable, PdftabError>> {
        let indices: Vec<usize> = (0..self.source.page_count()).collect();
        self.extract_pages(&indices)
    }

    fn ocr_page(&self, index: usize) -> Result<PageTable, SourceError> {
        let engine = self
            .ocr
            .ok_or_else(|| SourceError::Unavailable("no OCR engine configured".to_string()))?;
        let text = engine.recognize_page(index)?;
        Ok(PageTable {
            page: index + 1,
            method: ExtractionMethod::Ocr,
            table: text_to_table(&text),
            stats: ExtractionStats::default(),
        })
    }
}

#[cfg(feature = "parallel")]
impl<S, O> DocumentExtractor<'_, S, O>
where
    S: FragmentSource + Sync + ?Sized,
    O: OcrEngine + Sync + ?Sized,
{
    /// Extract the given pages concurrently. Results are in the order of `indices`.
    pub fn extract_pages_parallel(
        &self,
        indices: &[usize],
    ) -> Vec<Result<PageTable, PdftabError>> {
        use rayon::prelude::*;

        indices
            .par_iter()
            .map(|&i| self.extract_page(i))
            .collect()
    }
}

/// A source with no pages, for OCR-only documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFragments;

impl FragmentSource for NoFragments {
    fn page_count(&self) -> usize {
        0
    }

    fn page_fragments(&self, _index: usize) -> Result<PageFragments, SourceError> {
        Err(SourceError::Unavailable("no text layer".to_string()))
    }
}

impl FragmentSource for [PageFragments] {
    fn page_count(&self) -> usize {
        self.len()
    }

    fn page_fragments(&self, index: usize) -> Result<PageFragments, SourceError> {
        self.get(index).cloned().ok_or(SourceError::PageOutOfRange {
            index,
            count: self.len(),
        })
    }
}

impl FragmentSource for Vec<PageFragments> {
    fn page_count(&self) -> usize {
        self.as_slice().page_count()
    }

    fn page_fragments(&self, index: usize) -> Result<PageFragments, SourceError> {
        self.as_slice().page_fragments(index)
    }
}

/// OCR text already split into pages.
impl OcrEngine for [String] {
    fn recognize_page(&self, index: usize) -> Result<String, SourceError> {
        self.get(index).cloned().ok_or(SourceError::PageOutOfRange {
            index,
            count: self.len(),
        })
    }
}

impl OcrEngine for Vec<String> {
    fn recognize_page(&self, index: usize) -> Result<String, SourceError> {
        self.as_slice().recognize_page(index)
    }
}
