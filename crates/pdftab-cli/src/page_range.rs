use thiserror::Error;

/// Reasons a page range string is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageRangeError {
    #[error("invalid page number: '{0}'")]
    InvalidNumber(String),
    #[error("page 0 is invalid (pages start at 1)")]
    PageZero,
    #[error("page {page} exceeds document page count ({page_count})")]
    ExceedsPageCount { page: usize, page_count: usize },
    #[error("range {start}-{end} is reversed")]
    Reversed { start: usize, end: usize },
}

/// Parse a page range string like "1,3-5" into a sorted list of 0-indexed page numbers.
///
/// Input is 1-indexed. `a-` runs to the last page and `-b` starts at page 1.
/// A range end past the last page is clamped to it; any other page past the
/// end is an error.
pub fn parse_page_range(input: &str, page_count: usize) -> Result<Vec<usize>, PageRangeError> {
    let mut pages = Vec::new();

    for part in input.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }

        let (start, end) = match part.split_once('-') {
            Some((start_str, end_str)) => {
                let start = parse_bound(start_str)?;
                let end = parse_bound(end_str)?;
                if start == Some(0) || end == Some(0) {
                    return Err(PageRangeError::PageZero);
                }
                let start = start.unwrap_or(1);
                let end = end.unwrap_or(page_count);
                if start > page_count {
                    return Err(PageRangeError::ExceedsPageCount {
                        page: start,
                        page_count,
                    });
                }
                if start > end {
                    return Err(PageRangeError::Reversed { start, end });
                }
                (start, end.min(page_count))
            }
            None => {
                let page = parse_bound(part)?
                    .ok_or_else(|| PageRangeError::InvalidNumber(part.to_string()))?;
                if page == 0 {
                    return Err(PageRangeError::PageZero);
                }
                if page > page_count {
                    return Err(PageRangeError::ExceedsPageCount { page, page_count });
                }
                (page, page)
            }
        };

        pages.extend((start..=end).map(|p| p - 1));
    }

    pages.sort_unstable();
    pages.dedup();
    Ok(pages)
}

/// Parse one side of a range; an empty side is `None`.
fn parse_bound(text: &str) -> Result<Option<usize>, PageRangeError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    text.parse()
        .map(Some)
        .map_err(|_| PageRangeError::InvalidNumber(text.to_string()))
}
