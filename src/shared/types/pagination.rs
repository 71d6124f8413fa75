const MAX_SQL_INT: u64 = i64::MAX as u64;

/// A normalized page request.
///
/// `page` is 1-based and never below 1. `per_page` is never below 1 and
/// carries no upper bound unless one is applied with [`PageRequest::capped`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub per_page: u32,
}

impl PageRequest {
    /// Build a request from raw caller input. A non-positive `page` becomes 1;
    /// a non-positive `per_page` falls back to `default_per_page`.
    pub fn new(page: i64, per_page: i64, default_per_page: u32) -> Self {
        let page = page.clamp(1, u32::MAX as i64) as u32;
        let per_page = if per_page < 1 {
            default_per_page.max(1)
        } else {
            per_page.min(u32::MAX as i64) as u32
        };
        Self { page, per_page }
    }

    pub fn capped(self, max_per_page: Option<u32>) -> Self {
        match max_per_page {
            Some(max) => Self {
                per_page: self.per_page.min(max.max(1)),
                ..self
            },
            None => self,
        }
    }

    /// Rows to skip. Saturates at `i64::MAX`, the largest offset SQLite
    /// binds; anything that far out is past the end of the table anyway.
    pub fn offset(&self) -> u64 {
        let offset = (self.page as u64 - 1) * self.per_page as u64;
        offset.min(MAX_SQL_INT)
    }

    pub fn limit(&self) -> u64 {
        (self.per_page as u64).min(MAX_SQL_INT)
    }
}

/// Paginated response wrapper
#[derive(Debug)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
    pub total_pages: u64,
}

impl<T> PaginatedResult<T> {
    pub fn new(items: Vec<T>, total: u64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            page: request.page,
            per_page: request.per_page,
            total_pages: total_pages(total, request.per_page),
        }
    }
}

pub fn total_pages(total: u64, per_page: u32) -> u64 {
    total.div_ceil(per_page.max(1) as u64)
}
