//! Product data returned by the catalog

use crate::notes::{NoteList, ProductId};
use serde::Serialize;

/// First media preview image of a product
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductImage {
    pub url: String,
    pub alt_text: Option<String>,
}

/// A product with its parsed note list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductSummary {
    pub id: ProductId,
    pub title: String,
    pub image: Option<ProductImage>,
    pub notes: NoteList,
}

/// One page of the products connection
#[derive(Debug, Clone, Default)]
pub struct ProductPage {
    pub products: Vec<ProductSummary>,
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}
