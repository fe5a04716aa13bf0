//! Loads every product of the shop, following the products cursor

use super::models::Overview;
use crate::shopify::{ProductCatalog, ProductSummary};
use anyhow::Result;

/// Largest page the Admin API serves
pub const PRODUCTS_PAGE_SIZE: usize = 250;

/// Page through the whole catalog, `page_size` products at a time.
pub async fn load_all_products(
    catalog: &dyn ProductCatalog,
    page_size: usize,
) -> Result<Vec<ProductSummary>> {
    let mut products = Vec::new();
    let mut cursor: Option<String> = None;

    loop {
        let page = catalog.products_page(page_size, cursor.as_deref()).await?;
        products.extend(page.products);

        match page.end_cursor {
            Some(next) if page.has_next_page => cursor = Some(next),
            _ => break,
        }
    }

    tracing::debug!(products = products.len(), "Loaded product catalog");
    Ok(products)
}

/// Build the overview; a failing catalog yields an empty overview.
///
/// The failure is logged, never returned: the page renders its empty state.
pub async fn load_overview(catalog: &dyn ProductCatalog) -> Overview {
    match load_all_products(catalog, PRODUCTS_PAGE_SIZE).await {
        Ok(products) => Overview::new(products),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load product notes");
            Overview::default()
        }
    }
}
