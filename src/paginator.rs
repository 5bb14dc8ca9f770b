use crate::parser::Entry;

/// One fixed-size slice of the globally sorted entry sequence.
#[derive(Debug)]
pub struct Page<'a> {
    /// 1-based page number
    pub number: usize,
    pub total_pages: usize,
    pub entries: &'a [Entry],
}

/// Slice sorted entries into pages.
///
/// `total_pages = min(ceil(len / items_per_page), max_pages)`; entries
/// beyond the page cap are dropped. An empty input produces no pages.
pub fn paginate(entries: &[Entry], items_per_page: usize, max_pages: usize) -> Vec<Page<'_>> {
    if entries.is_empty() || items_per_page == 0 {
        return Vec::new();
    }

    let total_pages = entries.len().div_ceil(items_per_page).min(max_pages);

    (1..=total_pages)
        .map(|number| {
            let start = (number - 1) * items_per_page;
            let end = (start + items_per_page).min(entries.len());
            Page {
                number,
                total_pages,
                entries: &entries[start..end],
            }
        })
        .collect()
}
