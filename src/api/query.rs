//! Query parameter structs for pagination and search

use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

/// Helper to deserialize numbers from query string (which are always strings)
fn deserialize_from_str<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + Default,
    T::Err: std::fmt::Display,
{
    use serde::de::Error;
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if !s.is_empty() => s.parse().map_err(D::Error::custom),
        _ => Ok(T::default()),
    }
}

/// Pagination parameters for list endpoints
#[derive(Debug, Deserialize, Clone)]
pub struct PaginationParams {
    /// Max items to return (default: 50, max: 100)
    #[serde(default = "default_limit", deserialize_with = "deserialize_from_str")]
    pub limit: usize,
    /// Items to skip (default: 0)
    #[serde(default, deserialize_with = "deserialize_from_str")]
    pub offset: usize,
    /// "desc" = newest first (default), "asc" = oldest first
    #[serde(default = "default_sort_order")]
    pub sort_order: String,
}

fn default_limit() -> usize {
    50
}

fn default_sort_order() -> String {
    "desc".to_string()
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            offset: 0,
            sort_order: default_sort_order(),
        }
    }
}

impl PaginationParams {
    /// Validate pagination parameters
    pub fn validate(&self) -> Result<(), String> {
        if self.limit > 100 {
            return Err("limit cannot exceed 100".to_string());
        }
        if !["asc", "desc"].contains(&self.sort_order.as_str()) {
            return Err("sort_order must be 'asc' or 'desc'".to_string());
        }
        Ok(())
    }

    /// Get validated limit (capped at 100)
    pub fn validated_limit(&self) -> usize {
        self.limit.min(100)
    }

    pub fn newest_first(&self) -> bool {
        self.sort_order != "asc"
    }

    /// Cut one page out of `items`, wrapped with its totals
    pub fn page<T>(&self, items: Vec<T>) -> PaginatedResponse<T> {
        let total = items.len();
        let limit = self.validated_limit();
        let page = items.into_iter().skip(self.offset).take(limit).collect();
        PaginatedResponse::new(page, total, limit, self.offset)
    }
}

/// Search filter for text-based queries
#[derive(Debug, Deserialize, Default, Clone)]
pub struct SearchFilter {
    /// Search query string
    pub search: Option<String>,
}

impl SearchFilter {
    /// Check if search filter is set
    pub fn is_set(&self) -> bool {
        self.search.as_ref().is_some_and(|s| !s.trim().is_empty())
    }
}

/// Paginated response wrapper
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    /// Items in the current page
    pub items: Vec<T>,
    /// Total count of items matching the filter
    pub total: usize,
    /// Maximum items per page (as requested)
    pub limit: usize,
    /// Number of items skipped
    pub offset: usize,
    /// Whether there are more items after this page
    pub has_more: bool,
}

impl<T> PaginatedResponse<T> {
    /// Create a new paginated response
    pub fn new(items: Vec<T>, total: usize, limit: usize, offset: usize) -> Self {
        Self {
            has_more: offset + items.len() < total,
            items,
            total,
            limit,
            offset,
        }
    }
}
