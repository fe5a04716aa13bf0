//! Product notes
//!
//! Notes are short title/description pairs attached to a product. A product's
//! notes are stored together as one JSON array in a product metafield.

pub mod manager;
pub mod models;

pub use manager::{BatchItem, BatchOutcome, BatchReport, NoteError, NoteManager};
pub use models::*;
