/// Default number of translations per page.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Upper bound on the page size a client may request.
pub const MAX_PAGE_SIZE: u32 = 500;

/// A validated, 1-based offset pagination request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    per_page: u32,
}

impl PageRequest {
    /// Creates a page request, clamping out-of-range values.
    ///
    /// Missing or zero `page` becomes 1; `per_page` defaults to
    /// [`DEFAULT_PAGE_SIZE`] and is clamped to `1..=MAX_PAGE_SIZE`.
    pub fn new(page: Option<u32>, per_page: Option<u32>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            per_page: per_page
                .unwrap_or(DEFAULT_PAGE_SIZE)
                .clamp(1, MAX_PAGE_SIZE),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Number of rows to skip.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.per_page)
    }

    /// Number of rows to take.
    pub fn limit(&self) -> u64 {
        u64::from(self.per_page)
    }

    /// Last page number for a given total. Never less than 1.
    pub fn last_page(&self, total: u64) -> u32 {
        let pages = total.div_ceil(u64::from(self.per_page)).max(1);
        u32::try_from(pages).unwrap_or(u32::MAX)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}
