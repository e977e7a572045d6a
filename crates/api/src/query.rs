//! Query parameter types for the hero endpoints.

use heroes_core::pagination::PageRequest;
use serde::Deserialize;

/// Pagination parameters (`?page=&limit=`).
///
/// Kept as raw strings so that garbage values fall back to the defaults
/// instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl PageParams {
    pub fn resolve(&self) -> PageRequest {
        PageRequest::from_raw(self.page.as_deref(), self.limit.as_deref())
    }
}

/// Name search parameters (`?name=`).
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub name: Option<String>,
}
