//! In-memory mock of the Admin API for testing without a shop.

use super::client::ShopifyError;
use super::models::{ProductImage, ProductPage, ProductSummary};
use super::traits::{NoteStore, ProductCatalog};
use crate::notes::{NoteList, ProductId};
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::RwLock;

struct MockProduct {
    id: ProductId,
    title: String,
    image: Option<ProductImage>,
    /// Raw metafield value, exactly as stored
    value: Option<String>,
}

/// In-memory implementation of `NoteStore` and `ProductCatalog`.
///
/// Products keep insertion order; cursors are `cursor-<index>`. Writes can be
/// made to fail per product, and the whole store can be taken offline.
pub struct MockAdminStore {
    products: RwLock<Vec<MockProduct>>,
    failing_writes: RwLock<HashSet<ProductId>>,
    offline: AtomicBool,
    writes: AtomicUsize,
    page_requests: AtomicUsize,
}

impl MockAdminStore {
    /// Create a new empty mock store.
    pub fn new() -> Self {
        Self {
            products: RwLock::new(Vec::new()),
            failing_writes: RwLock::new(HashSet::new()),
            offline: AtomicBool::new(false),
            writes: AtomicUsize::new(0),
            page_requests: AtomicUsize::new(0),
        }
    }

    /// Seed a product with a raw metafield value (`None` = metafield absent).
    pub fn with_product(mut self, id: &str, title: &str, value: Option<&str>) -> Self {
        let id: ProductId = id.parse().expect("valid product id");
        self.products.get_mut().push(MockProduct {
            id,
            title: title.to_string(),
            image: None,
            value: value.map(str::to_string),
        });
        self
    }

    /// Seed a product with a preview image
    pub fn with_image(mut self, id: &str, url: &str, alt_text: Option<&str>) -> Self {
        let id: ProductId = id.parse().expect("valid product id");
        if let Some(p) = self.products.get_mut().iter_mut().find(|p| p.id == id) {
            p.image = Some(ProductImage {
                url: url.to_string(),
                alt_text: alt_text.map(str::to_string),
            });
        }
        self
    }

    /// Make every write to `id` fail
    pub fn with_failing_writes(mut self, id: &str) -> Self {
        let id: ProductId = id.parse().expect("valid product id");
        self.failing_writes.get_mut().insert(id);
        self
    }

    /// Simulate the Admin API being unreachable
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Raw stored metafield value of a product
    pub async fn raw_value(&self, id: &ProductId) -> Option<String> {
        let products = self.products.read().await;
        products
            .iter()
            .find(|p| &p.id == id)
            .and_then(|p| p.value.clone())
    }

    /// Number of successful metafield writes
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Number of product pages served
    pub fn page_requests(&self) -> usize {
        self.page_requests.load(Ordering::SeqCst)
    }

    fn check_online(&self) -> Result<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(ShopifyError::Transport("connection refused".to_string()).into());
        }
        Ok(())
    }
}

impl Default for MockAdminStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NoteStore for MockAdminStore {
    async fn get_notes(&self, product_id: &ProductId) -> Result<NoteList> {
        self.check_online()?;
        let products = self.products.read().await;
        let product = products
            .iter()
            .find(|p| &p.id == product_id)
            .ok_or_else(|| ShopifyError::ProductNotFound(product_id.to_string()))?;
        Ok(NoteList::parse(product.value.as_deref()))
    }

    async fn set_notes(&self, product_id: &ProductId, notes: &NoteList) -> Result<()> {
        self.check_online()?;
        if self.failing_writes.read().await.contains(product_id) {
            return Err(ShopifyError::Http {
                status: 500,
                body: "write failed".to_string(),
            }
            .into());
        }
        let mut products = self.products.write().await;
        let product = products
            .iter_mut()
            .find(|p| &p.id == product_id)
            .ok_or_else(|| ShopifyError::ProductNotFound(product_id.to_string()))?;
        product.value = Some(notes.to_json());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[async_trait]
impl ProductCatalog for MockAdminStore {
    async fn products_page(&self, first: usize, after: Option<&str>) -> Result<ProductPage> {
        self.check_online()?;
        self.page_requests.fetch_add(1, Ordering::SeqCst);

        let start = match after {
            Some(cursor) => {
                let index: usize = cursor
                    .strip_prefix("cursor-")
                    .and_then(|n| n.parse().ok())
                    .ok_or_else(|| ShopifyError::GraphQl(format!("invalid cursor {}", cursor)))?;
                index + 1
            }
            None => 0,
        };

        let products = self.products.read().await;
        let page: Vec<ProductSummary> = products
            .iter()
            .skip(start)
            .take(first)
            .map(|p| ProductSummary {
                id: p.id.clone(),
                title: p.title.clone(),
                image: p.image.clone(),
                notes: NoteList::parse(p.value.as_deref()),
            })
            .collect();

        let end = start + page.len();
        Ok(ProductPage {
            has_next_page: end < products.len(),
            end_cursor: (!page.is_empty()).then(|| format!("cursor-{}", end - 1)),
            products: page,
        })
    }
}
