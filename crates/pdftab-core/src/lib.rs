//! pdftab-core: Backend-independent table reconstruction.
//!
//! Turns the positioned text fragments of a PDF page into a rectangular grid
//! of cell strings by clustering fragments into rows by y-proximity and into
//! columns by x-proximity. A coarser OCR path splits recognized text on
//! whitespace runs when no fragments are available.
//!
//! PDF parsing and OCR recognition are supplied by the caller through the
//! [`FragmentSource`] and [`OcrEngine`] traits.

pub mod columns;
pub mod error;
pub mod extract;
pub mod fragment;
pub mod grid;
pub mod normalize;
pub mod ocr;
pub mod rows;
pub mod table;

pub use columns::{ColumnSet, locate_columns, median};
pub use error::{PdftabError, SourceError};
pub use extract::{
    DocumentExtractor, ExtractionMethod, FragmentSource, NoFragments, OcrEngine, OcrMode,
    PageTable,
};
pub use fragment::{PageFragments, TextFragment};
pub use grid::assemble_grid;
pub use normalize::normalize_fragments;
pub use ocr::text_to_table;
pub use rows::{Row, RowAnchor, RowClustering, cluster_rows};
pub use table::{
    ExtractionStats, PageExtraction, Table, TableExtractor, TableSettings, extract_table,
};
