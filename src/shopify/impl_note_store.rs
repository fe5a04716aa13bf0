//! NoteStore and ProductCatalog implementations for AdminClient

use super::client::AdminClient;
use super::models::ProductPage;
use super::traits::{NoteStore, ProductCatalog};
use crate::notes::{NoteList, ProductId};
use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
impl NoteStore for AdminClient {
    async fn get_notes(&self, product_id: &ProductId) -> Result<NoteList> {
        let value = self.fetch_notes_value(product_id).await?;
        Ok(NoteList::parse(value.as_deref()))
    }

    async fn set_notes(&self, product_id: &ProductId, notes: &NoteList) -> Result<()> {
        self.write_notes_value(product_id, notes.to_json()).await?;
        tracing::debug!(product_id = %product_id, notes = notes.len(), "Notes metafield written");
        Ok(())
    }
}

#[async_trait]
impl ProductCatalog for AdminClient {
    async fn products_page(&self, first: usize, after: Option<&str>) -> Result<ProductPage> {
        Ok(self.fetch_products_page(first, after).await?)
    }
}
