use serde::Serialize;

/// Page size used when the client does not request one.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;
/// Upper bound for a client-requested page size.
pub const MAX_ITEMS_PER_PAGE: usize = 100;

/// Page window requested for a list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page number.
    pub page: usize,
    /// Number of items per page.
    pub per_page: usize,
}

impl Pagination {
    /// Resolve the client-supplied `page` and `page_size` parameters.
    ///
    /// A missing or zero page size falls back to [`DEFAULT_ITEMS_PER_PAGE`];
    /// larger values are capped at [`MAX_ITEMS_PER_PAGE`].
    pub fn new(page: Option<usize>, page_size: Option<usize>) -> Self {
        let per_page = match page_size {
            Some(size) if size > 0 => size.min(MAX_ITEMS_PER_PAGE),
            _ => DEFAULT_ITEMS_PER_PAGE,
        };

        Self {
            page: page.unwrap_or(1),
            per_page,
        }
    }

    /// Number of rows to skip, or `None` when the page lies beyond what an
    /// SQL `OFFSET` can address.
    pub fn offset(&self) -> Option<i64> {
        self.page
            .saturating_sub(1)
            .checked_mul(self.per_page)
            .and_then(|offset| i64::try_from(offset).ok())
    }

    pub fn limit(&self) -> i64 {
        self.per_page as i64
    }

    pub fn total_pages(&self, total: usize) -> usize {
        total.div_ceil(self.per_page)
    }

    /// Whether the requested page exists for `total` items. The first page
    /// always exists, even when there is nothing to show.
    pub fn is_within(&self, total: usize) -> bool {
        self.page == 1 || (self.page > 1 && self.page <= self.total_pages(total))
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// One page of results together with the totals a client needs to navigate.
#[derive(Debug, Clone, Serialize)]
pub struct Paginated<T> {
    pub count: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub results: Vec<T>,
}

impl<T> Paginated<T> {
    pub fn new(results: Vec<T>, total: usize, pagination: Pagination) -> Self {
        Self {
            count: total,
            page: pagination.page,
            page_size: pagination.per_page,
            total_pages: pagination.total_pages(total),
            results,
        }
    }

    pub fn map<U, F>(self, f: F) -> Paginated<U>
    where
        F: FnMut(T) -> U,
    {
        Paginated {
            count: self.count,
            page: self.page,
            page_size: self.page_size,
            total_pages: self.total_pages,
            results: self.results.into_iter().map(f).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_first_page_of_ten() {
        let pagination = Pagination::new(None, None);

        assert_eq!(pagination.page, 1);
        assert_eq!(pagination.per_page, DEFAULT_ITEMS_PER_PAGE);
        assert_eq!(pagination.offset(), Some(0));
        assert_eq!(pagination.limit(), 10);
    }

    #[test]
    fn page_size_is_capped() {
        let pagination = Pagination::new(Some(2), Some(500));

        assert_eq!(pagination.per_page, MAX_ITEMS_PER_PAGE);
        assert_eq!(pagination.offset(), Some(100));
    }

    #[test]
    fn zero_page_size_uses_default() {
        let pagination = Pagination::new(Some(1), Some(0));

        assert_eq!(pagination.per_page, DEFAULT_ITEMS_PER_PAGE);
    }

    #[test]
    fn page_bounds() {
        let pagination = Pagination::new(Some(3), Some(10));
        assert!(pagination.is_within(21));
        assert!(!pagination.is_within(20));

        assert!(Pagination::new(Some(1), None).is_within(0));
        assert!(!Pagination::new(Some(0), None).is_within(50));
        assert!(!Pagination::new(Some(2), None).is_within(0));
    }

    #[test]
    fn huge_page_has_no_offset() {
        assert_eq!(Pagination::new(Some(usize::MAX), None).offset(), None);
        assert_eq!(Pagination::new(Some(usize::MAX / 10), Some(10)).offset(), None);
    }

    #[test]
    fn paginated_reports_total_pages() {
        let page = Paginated::new(vec![1, 2, 3], 45, Pagination::new(Some(2), Some(10)));

        assert_eq!(page.count, 45);
        assert_eq!(page.page, 2);
        assert_eq!(page.total_pages, 5);

        let mapped = page.map(|value| value * 2);
        assert_eq!(mapped.results, vec![2, 4, 6]);
        assert_eq!(mapped.total_pages, 5);
    }
}
