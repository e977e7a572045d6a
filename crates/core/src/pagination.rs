//! Page/limit arithmetic for paginated listings.
//!
//! Query values arrive as raw strings and are parsed leniently: anything
//! missing, non-numeric or below 1 falls back to the default instead of
//! producing an error.

/// Page number used when the client does not supply a usable one.
pub const DEFAULT_PAGE: i64 = 1;

/// Page size used when the client does not supply a usable one.
pub const DEFAULT_LIMIT: i64 = 10;

/// A resolved `(page, limit)` pair. Both are always `>= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl PageRequest {
    /// Resolve raw query values, applying defaults where needed.
    pub fn from_raw(page: Option<&str>, limit: Option<&str>) -> Self {
        Self {
            page: parse_positive(page).unwrap_or(DEFAULT_PAGE),
            limit: parse_positive(limit).unwrap_or(DEFAULT_LIMIT),
        }
    }

    /// Number of rows to skip: `(page - 1) * limit`.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// `ceil(total / limit)`. Returns 0 for an empty table.
pub fn total_pages(total: i64, limit: i64) -> i64 {
    if total <= 0 || limit <= 0 {
        return 0;
    }
    total / limit + i64::from(total % limit != 0)
}

fn parse_positive(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|n| *n >= 1)
}
