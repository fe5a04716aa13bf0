//! Trait abstractions over the Shopify Admin API
//!
//! Every surface that reads or writes notes goes through `NoteStore`, so the
//! metafield read/write lives in exactly one place.

use super::models::ProductPage;
use crate::notes::{NoteList, ProductId};
use anyhow::Result;
use async_trait::async_trait;

/// Per-product note list persistence.
///
/// Writes replace the whole list; there is no version check, so the last
/// writer wins.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Read a product's notes. An absent or malformed metafield yields an
    /// empty list; only remote failures are errors.
    async fn get_notes(&self, product_id: &ProductId) -> Result<NoteList>;

    /// Overwrite a product's notes with `notes`
    async fn set_notes(&self, product_id: &ProductId, notes: &NoteList) -> Result<()>;
}

/// Cursor-paginated product listing, notes included.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Fetch one page of at most `first` products, starting after `after`
    async fn products_page(&self, first: usize, after: Option<&str>) -> Result<ProductPage>;
}
