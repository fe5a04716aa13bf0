//! HTTP API over product notes

pub mod handlers;
pub mod note_handlers;
pub mod overview_handlers;
pub mod query;
pub mod routes;

pub use query::*;
pub use routes::create_router;
