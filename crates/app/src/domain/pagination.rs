//! Pagination

use thiserror::Error;

/// Largest page size a caller may request.
pub const MAX_PAGE_LIMIT: u32 = 100;

/// Page size for listings that do not choose their own.
pub const DEFAULT_PAGE_LIMIT: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageRequestError {
    #[error("page must be at least 1")]
    PageOutOfRange,

    #[error("limit must be between 1 and 100")]
    LimitOutOfRange,
}

/// A validated page request. Pages are numbered from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    /// Build a page request.
    ///
    /// # Errors
    ///
    /// Returns an error when `page` is zero or `limit` is outside `1..=MAX_PAGE_LIMIT`.
    pub fn new(page: u32, limit: u32) -> Result<Self, PageRequestError> {
        if page == 0 {
            return Err(PageRequestError::PageOutOfRange);
        }

        if limit == 0 || limit > MAX_PAGE_LIMIT {
            return Err(PageRequestError::LimitOutOfRange);
        }

        Ok(Self { page, limit })
    }

    /// First page with the given limit, clamped into range.
    #[must_use]
    pub fn first(limit: u32) -> Self {
        Self {
            page: 1,
            limit: limit.clamp(1, MAX_PAGE_LIMIT),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub(crate) fn sql_limit(&self) -> i64 {
        i64::from(self.limit)
    }

    pub(crate) fn sql_offset(&self) -> i64 {
        (i64::from(self.page) - 1) * i64::from(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first(DEFAULT_PAGE_LIMIT)
    }
}

/// One page of results plus the total number of matching rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub limit: u32,
    pub total: u64,
}

impl<T> Page<T> {
    #[must_use]
    pub fn new(items: Vec<T>, request: PageRequest, total: u64) -> Self {
        Self {
            items,
            page: request.page,
            limit: request.limit,
            total,
        }
    }

    /// Number of pages needed to show `total` rows.
    pub fn pages(&self) -> u64 {
        self.total.div_ceil(u64::from(self.limit.max(1)))
    }

    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            limit: self.limit,
            total: self.total,
        }
    }
}

pub(crate) fn count_from_sql(count: i64) -> u64 {
    u64::try_from(count).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn rejects_page_zero() {
        assert_eq!(
            PageRequest::new(0, 10),
            Err(PageRequestError::PageOutOfRange)
        );
    }

    #[test]
    fn rejects_limits_outside_range() {
        assert_eq!(
            PageRequest::new(1, 0),
            Err(PageRequestError::LimitOutOfRange)
        );
        assert_eq!(
            PageRequest::new(1, MAX_PAGE_LIMIT + 1),
            Err(PageRequestError::LimitOutOfRange)
        );
    }

    #[test]
    fn offset_skips_previous_pages() -> TestResult {
        let request = PageRequest::new(3, 12)?;

        assert_eq!(request.sql_offset(), 24);
        assert_eq!(request.sql_limit(), 12);

        Ok(())
    }

    #[test]
    fn pages_rounds_up() -> TestResult {
        let page = Page::new(vec![1, 2], PageRequest::new(1, 12)?, 25);

        assert_eq!(page.pages(), 3);

        Ok(())
    }

    #[test]
    fn pages_is_zero_without_results() -> TestResult {
        let page: Page<u8> = Page::new(vec![], PageRequest::new(1, 10)?, 0);

        assert_eq!(page.pages(), 0);

        Ok(())
    }

    #[test]
    fn first_clamps_limit() {
        assert_eq!(PageRequest::first(500).limit(), MAX_PAGE_LIMIT);
        assert_eq!(PageRequest::first(0).limit(), 1);
    }
}
