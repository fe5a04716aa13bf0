//! API handler for the products overview

use super::handlers::{AppError, NotesApiState};
use super::SearchFilter;
use crate::overview::{load_all_products, Overview, OverviewStats, ProductRow, PRODUCTS_PAGE_SIZE};
use axum::{
    extract::{Query, State},
    Json,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct OverviewResponse {
    pub stats: OverviewStats,
    /// Products with notes matching the search, in catalog order
    pub products: Vec<ProductRow>,
    pub search: Option<String>,
}

/// Every product with notes, optionally filtered by title.
///
/// Unlike the admin page, a failing catalog is reported (502) instead of
/// rendering as an empty overview.
pub async fn get_overview(
    State(state): State<NotesApiState>,
    Query(filter): Query<SearchFilter>,
) -> Result<Json<OverviewResponse>, AppError> {
    let products = load_all_products(state.catalog.as_ref(), PRODUCTS_PAGE_SIZE)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to load product notes");
            AppError::BadGateway(e.to_string())
        })?;
    let overview = Overview::new(products);

    let search = if filter.is_set() { filter.search } else { None };
    let rows = overview.rows(&state.config.shop_domain, search.as_deref().unwrap_or(""));

    Ok(Json(OverviewResponse {
        stats: overview.stats(),
        products: rows,
        search,
    }))
}
