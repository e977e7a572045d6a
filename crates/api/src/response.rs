//! Response body types for the hero endpoints.

use heroes_core::document::Document;
use heroes_core::pagination::{total_pages, PageRequest};
use heroes_core::types::DbId;
use serde::Serialize;

/// One page of a listing plus the numbers needed to walk the rest.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T: Serialize> {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
    pub data: Vec<T>,
}

impl<T: Serialize> PageResponse<T> {
    pub fn new(request: PageRequest, total: i64, data: Vec<T>) -> Self {
        Self {
            page: request.page,
            limit: request.limit,
            total,
            total_pages: total_pages(total, request.limit),
            data,
        }
    }
}

/// `{ "message": ... }` acknowledgement.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Result of a single create.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: DbId,
    /// Present only when an image was uploaded with the hero.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Document>,
}

/// Result of a bulk create.
#[derive(Debug, Serialize)]
pub struct BulkInsertResponse {
    pub inserted: u64,
}
