//! Shared response body types for API handlers.
//!
//! Resources are returned as bare JSON objects and arrays. Operations with
//! nothing to return respond with [`SuccessResponse`].

use serde::Serialize;

/// `{ "success": true }` body for deletes and other bodiless operations.
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
