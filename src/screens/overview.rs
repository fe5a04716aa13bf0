//! Home page: searchable table of products with notes and a notes modal per row

use crate::overview::{load_overview, Overview, OverviewStats, ProductRow};
use crate::shopify::ProductCatalog;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverviewState {
    pub shop_domain: String,
    /// `None` while loading
    pub overview: Option<Overview>,
    pub search: String,
    /// Modal id of the open notes modal
    pub open_modal: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverviewMsg {
    Loaded(Overview),
    SearchChanged(String),
    OpenNotes(String),
    CloseNotes,
    Refresh,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverviewEffect {
    LoadOverview,
}

impl OverviewState {
    pub fn open(shop_domain: impl Into<String>) -> (Self, Vec<OverviewEffect>) {
        let state = Self {
            shop_domain: shop_domain.into(),
            overview: None,
            search: String::new(),
            open_modal: None,
        };
        (state, vec![OverviewEffect::LoadOverview])
    }

    pub fn loading(&self) -> bool {
        self.overview.is_none()
    }

    /// No product has notes; the page shows its call to action instead of the table
    pub fn show_empty_state(&self) -> bool {
        self.overview.as_ref().is_some_and(Overview::is_empty)
    }

    pub fn stats(&self) -> OverviewStats {
        self.overview
            .as_ref()
            .map(Overview::stats)
            .unwrap_or_default()
    }

    pub fn rows(&self) -> Vec<ProductRow> {
        self.overview
            .as_ref()
            .map(|o| o.rows(&self.shop_domain, &self.search))
            .unwrap_or_default()
    }

    /// Row whose modal is open
    pub fn open_row(&self) -> Option<ProductRow> {
        let modal = self.open_modal.as_deref()?;
        self.rows().into_iter().find(|r| r.modal_id == modal)
    }
}

pub fn update(state: OverviewState, msg: OverviewMsg) -> (OverviewState, Vec<OverviewEffect>) {
    match msg {
        OverviewMsg::Loaded(overview) => (
            OverviewState {
                overview: Some(overview),
                ..state
            },
            vec![],
        ),
        OverviewMsg::SearchChanged(search) => (
            OverviewState {
                search,
                open_modal: None,
                ..state
            },
            vec![],
        ),
        OverviewMsg::OpenNotes(modal_id) => (
            OverviewState {
                open_modal: Some(modal_id),
                ..state
            },
            vec![],
        ),
        OverviewMsg::CloseNotes => (
            OverviewState {
                open_modal: None,
                ..state
            },
            vec![],
        ),
        OverviewMsg::Refresh => (
            OverviewState {
                overview: None,
                open_modal: None,
                ..state
            },
            vec![OverviewEffect::LoadOverview],
        ),
    }
}

pub async fn run_effect(catalog: &dyn ProductCatalog, effect: OverviewEffect) -> OverviewMsg {
    match effect {
        OverviewEffect::LoadOverview => OverviewMsg::Loaded(load_overview(catalog).await),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shopify::mock::MockAdminStore;

    const NOTE: &str = r#"[{"id":1,"title":"Restock","description":"Friday"}]"#;

    fn store() -> MockAdminStore {
        MockAdminStore::new()
            .with_product("1", "Red Shirt", Some(NOTE))
            .with_product("2", "Blue Hat", Some(NOTE))
            .with_product("3", "Plain Sock", None)
    }

    async fn loaded(store: &MockAdminStore) -> OverviewState {
        let (state, effects) = OverviewState::open("demo.myshopify.com");
        assert!(state.loading());
        let msg = run_effect(store, effects[0]).await;
        let (state, _) = update(state, msg);
        state
    }

    #[tokio::test]
    async fn test_load_and_search() {
        let state = loaded(&store()).await;
        assert!(!state.loading());
        assert!(!state.show_empty_state());
        assert_eq!(state.stats().total_products, 3);
        assert_eq!(state.rows().len(), 2);

        let (state, _) = update(state, OverviewMsg::SearchChanged("SHIRT".into()));
        let rows = state.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].admin_url, "https://demo.myshopify.com/admin/products/1");
    }

    #[tokio::test]
    async fn test_modal_follows_row() {
        let state = loaded(&store()).await;
        let (state, _) = update(state, OverviewMsg::OpenNotes("modal-2".into()));
        let row = state.open_row().unwrap();
        assert_eq!(row.title, "Blue Hat");
        assert_eq!(row.notes[0].position, 1);

        let (state, _) = update(state, OverviewMsg::CloseNotes);
        assert!(state.open_row().is_none());
    }

    #[tokio::test]
    async fn test_empty_state_when_catalog_unreachable() {
        let store = store();
        store.set_offline(true);
        let state = loaded(&store).await;
        assert!(state.show_empty_state());
        assert!(state.rows().is_empty());
    }

    #[tokio::test]
    async fn test_refresh_reloads() {
        let state = loaded(&store()).await;
        let (state, effects) = update(state, OverviewMsg::Refresh);
        assert!(state.loading());
        assert_eq!(effects, vec![OverviewEffect::LoadOverview]);
    }
}
