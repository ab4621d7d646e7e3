pub const DEFAULT_PAGE_SIZE: usize = 10;
const WINDOW: usize = 5;

/// Records on page `page` (1-based). Page 0 is read as page 1; pages past the
/// end are empty.
pub fn paginate<T>(records: &[T], page_size: usize, page: usize) -> &[T] {
    let size = page_size.max(1);
    let page = page.max(1);
    let start = (page - 1).saturating_mul(size);
    if start >= records.len() {
        return &[];
    }
    let end = start.saturating_add(size).min(records.len());
    &records[start..end]
}

/// Navigation state for a paginated table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow {
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
    /// 1-based index of the first row shown, 0 when nothing is shown.
    pub first_item: usize,
    pub last_item: usize,
    pub visible: Vec<usize>,
}

impl PageWindow {
    pub fn new(total_items: usize, page_size: usize, page: usize) -> Self {
        let page_size = page_size.max(1);
        let page = page.max(1);
        let total_pages = total_items.div_ceil(page_size);

        let start = (page - 1).saturating_mul(page_size);
        let (first_item, last_item) = if start < total_items {
            (start + 1, start.saturating_add(page_size).min(total_items))
        } else {
            (0, 0)
        };

        let visible = if total_pages == 0 {
            Vec::new()
        } else {
            let centre = page.min(total_pages);
            let mut lo = centre.saturating_sub(WINDOW / 2).max(1);
            let hi = (lo + WINDOW - 1).min(total_pages);
            lo = hi.saturating_sub(WINDOW - 1).max(1);
            (lo..=hi).collect()
        };

        Self {
            page,
            page_size,
            total_items,
            total_pages,
            first_item,
            last_item,
            visible,
        }
    }

    pub fn has_prev(&self) -> bool {
        self.total_pages > 0 && self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.total_pages > 0 && self.page < self.total_pages
    }

    /// Records exist, but none of them on this page.
    pub fn is_past_end(&self) -> bool {
        self.total_items > 0 && self.page > self.total_pages
    }

    /// "Showing 11-20 of 42 records"
    pub fn summary(&self) -> String {
        if self.is_past_end() {
            return format!(
                "Page {} is past the last page ({} of {} records)",
                self.page, self.total_pages, self.total_items
            );
        }
        format!(
            "Showing {}-{} of {} records",
            self.first_item, self.last_item, self.total_items
        )
    }
}
