//! Paginated read-result envelope.

use serde::{Deserialize, Serialize};

/// The shape every paginated search returns (and the shape stored in the
/// cache for search keys).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub total_items: i64,
    pub total_pages: i64,
    pub page: i64,
    pub limit: i64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, total_items: i64, page: i64, limit: i64) -> Self {
        let total_pages = if limit > 0 {
            (total_items + limit - 1) / limit
        } else {
            0
        };
        Self {
            data,
            total_items,
            total_pages,
            page,
            limit,
            has_next_page: page < total_pages,
            has_prev_page: page > 1,
        }
    }
}
