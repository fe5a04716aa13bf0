//! Admin overview: every product with its notes, aggregates and title search

pub mod loader;
pub mod models;

pub use loader::{load_all_products, load_overview, PRODUCTS_PAGE_SIZE};
pub use models::{NumberedNote, Overview, OverviewStats, ProductRow};
