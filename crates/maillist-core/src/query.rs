// ABOUTME: Pagination parameters for batch listing and the validation rules callers apply.
// ABOUTME: Pages are 1-based; both page and count must be strictly positive.

use thiserror::Error;

/// Caller-supplied input that cannot be turned into a store query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Page and Count fields are required and must be > 0 (got page={page}, count={count})")]
    BatchBounds { page: i64, count: i64 },

    #[error("timestamp {0} is outside the representable range")]
    TimestampOutOfRange(i64),
}

/// A validated page request over the active (not opted-out) entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchQuery {
    page: u32,
    count: u32,
}

impl BatchQuery {
    /// Validate raw page/count values from either front end.
    pub fn new(page: i64, count: i64) -> Result<Self, ValidationError> {
        let bounds = || ValidationError::BatchBounds { page, count };
        if page <= 0 || count <= 0 {
            return Err(bounds());
        }
        let page = u32::try_from(page).map_err(|_| bounds())?;
        let count = u32::try_from(count).map_err(|_| bounds())?;
        Ok(Self { page, count })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    /// Number of active rows skipped before this page: `(page - 1) * count`.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.count)
    }
}
