use crate::features::shared::Page;

/// Client-side page arithmetic shared by the list views. Pages are 1-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    page: u32,
    size: u32,
    total_elements: u64,
    /// Unknown until the first page has loaded.
    total_pages: Option<u32>,
}

impl Pagination {
    #[must_use]
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page: page.max(1),
            size: size.max(1),
            total_elements: 0,
            total_pages: None,
        }
    }

    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    #[must_use]
    pub const fn total_elements(&self) -> u64 {
        self.total_elements
    }

    #[must_use]
    pub fn total_pages(&self) -> u32 {
        self.total_pages.unwrap_or(1)
    }

    /// Records the counters of a freshly loaded page and pulls the current page
    /// back into `1..=total_pages`. Returns whether the page moved, in which
    /// case the caller's list is stale.
    pub fn update_from<T>(&mut self, page: &Page<T>) -> bool {
        self.total_elements = page.total_elements();
        self.total_pages = Some(page.total_pages(self.size));
        self.set_page(self.page)
    }

    /// Moves to `page`, clamped to `1..=total_pages` once the total is known.
    /// Returns whether the page changed.
    pub fn set_page(&mut self, page: u32) -> bool {
        let upper = self.total_pages.unwrap_or(u32::MAX);
        let page = page.clamp(1, upper.max(1));
        let changed = page != self.page;
        self.page = page;
        changed
    }

    /// Accounts for an item removed locally without a refetch.
    pub fn forget_one(&mut self) {
        self.total_elements = self.total_elements.saturating_sub(1);
    }

    /// 1-based bounds of the `len` items currently shown; `(0, 0)` when empty.
    #[must_use]
    pub fn range(&self, len: usize) -> (u64, u64) {
        if len == 0 {
            return (0, 0);
        }
        let offset = u64::from(self.page - 1) * u64::from(self.size);
        let from = offset + 1;
        let to = (u64::from(self.page) * u64::from(self.size)).min(offset + len as u64);
        (from, to)
    }

    #[must_use]
    pub fn summary(&self, len: usize) -> String {
        let (from, to) = self.range(len);
        format!(
            "Showing {from} - {to} of {} results (page {} of {})",
            self.total_elements,
            self.page,
            self.total_pages()
        )
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, 10)
    }
}
