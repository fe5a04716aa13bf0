//! Shopify Admin API access: GraphQL client and the note store built on it

pub mod client;
mod impl_note_store;
pub mod models;
pub mod queries;
pub mod traits;

pub use client::{AdminClient, AdminClientConfig, MetafieldLocation, ShopifyError};
pub use models::{ProductImage, ProductPage, ProductSummary};
pub use traits::{NoteStore, ProductCatalog};

#[cfg(test)]
pub(crate) mod mock;
