//! Note Manager - read-modify-write operations on product notes
//!
//! Every mutation reads the product's full list, changes it in memory and
//! writes the whole list back through the `NoteStore`.

use super::models::*;
use crate::shopify::{NoteStore, ShopifyError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Errors from note operations
#[derive(Debug, Error)]
pub enum NoteError {
    #[error("invalid note: {0}")]
    Validation(FieldErrors),
    #[error("note {note_id} not found on {product_id}")]
    NoteNotFound {
        product_id: ProductId,
        note_id: NoteId,
    },
    #[error("{unreadable} stored note(s) on {product_id} could not be read; refusing to overwrite them")]
    UnreadableNotes {
        product_id: ProductId,
        unreadable: usize,
    },
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl NoteError {
    /// True when the store reported that the product does not exist
    pub fn is_product_not_found(&self) -> bool {
        matches!(
            self,
            Self::Store(e) if matches!(e.downcast_ref::<ShopifyError>(), Some(ShopifyError::ProductNotFound(_)))
        )
    }
}

/// Result of creating a note on one product of a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BatchOutcome {
    Created { note: Note },
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchItem {
    pub product_id: ProductId,
    #[serde(flatten)]
    pub outcome: BatchOutcome,
}

/// Per-product outcome of a multi-product note creation.
///
/// Products are processed in order; a failure does not undo earlier writes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    pub items: Vec<BatchItem>,
}

impl BatchReport {
    pub fn succeeded(&self) -> impl Iterator<Item = &BatchItem> {
        self.items
            .iter()
            .filter(|i| matches!(i.outcome, BatchOutcome::Created { .. }))
    }

    pub fn failed(&self) -> impl Iterator<Item = &BatchItem> {
        self.items
            .iter()
            .filter(|i| matches!(i.outcome, BatchOutcome::Failed { .. }))
    }

    pub fn is_complete_success(&self) -> bool {
        !self.items.is_empty() && self.failed().next().is_none()
    }
}

/// Manager for product note operations
pub struct NoteManager {
    store: Arc<dyn NoteStore>,
    clock: fn() -> DateTime<Utc>,
}

impl NoteManager {
    /// Create a new NoteManager
    pub fn new(store: Arc<dyn NoteStore>) -> Self {
        Self {
            store,
            clock: Utc::now,
        }
    }

    /// Replace the time source (builder pattern).
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    pub fn store(&self) -> &Arc<dyn NoteStore> {
        &self.store
    }

    fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    /// Read a product's notes for a read-modify-write cycle.
    async fn notes_for_write(&self, product_id: &ProductId) -> Result<NoteList, NoteError> {
        let notes = self.store.get_notes(product_id).await?;
        ensure_writable(product_id, &notes)?;
        Ok(notes)
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Notes of a product in stored order
    pub async fn list_notes(&self, product_id: &ProductId) -> Result<NoteList, NoteError> {
        Ok(self.store.get_notes(product_id).await?)
    }

    pub async fn get_note(&self, product_id: &ProductId, id: NoteId) -> Result<Note, NoteError> {
        let notes = self.list_notes(product_id).await?;
        notes.find(id).cloned().ok_or_else(|| NoteError::NoteNotFound {
            product_id: product_id.clone(),
            note_id: id,
        })
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Append a note to a product
    pub async fn create_note(
        &self,
        product_id: &ProductId,
        draft: &NoteDraft,
    ) -> Result<Note, NoteError> {
        let input = draft.validate().map_err(NoteError::Validation)?;
        self.append_validated(product_id, input).await
    }

    /// Update title and description of an existing note
    pub async fn update_note(
        &self,
        product_id: &ProductId,
        id: NoteId,
        draft: &NoteDraft,
    ) -> Result<Note, NoteError> {
        let input = draft.validate().map_err(NoteError::Validation)?;

        let mut notes = self.notes_for_write(product_id).await?;
        let note = notes
            .replace(id, input, self.now())
            .ok_or_else(|| NoteError::NoteNotFound {
                product_id: product_id.clone(),
                note_id: id,
            })?;
        self.store.set_notes(product_id, &notes).await?;

        tracing::info!(product_id = %product_id, note_id = %id, "Note updated");
        Ok(note)
    }

    /// Create when `id` is `None`, update otherwise
    pub async fn save_note(
        &self,
        product_id: &ProductId,
        id: Option<NoteId>,
        draft: &NoteDraft,
    ) -> Result<Note, NoteError> {
        match id {
            Some(id) => self.update_note(product_id, id, draft).await,
            None => self.create_note(product_id, draft).await,
        }
    }

    /// Delete a note. Returns `false` (and writes nothing) if no note matched.
    pub async fn delete_note(&self, product_id: &ProductId, id: NoteId) -> Result<bool, NoteError> {
        let mut notes = self.notes_for_write(product_id).await?;
        if notes.remove(id).is_none() {
            return Ok(false);
        }
        self.store.set_notes(product_id, &notes).await?;

        tracing::info!(product_id = %product_id, note_id = %id, "Note deleted");
        Ok(true)
    }

    /// Overwrite a product's list with one computed by a screen
    pub async fn write_notes(&self, product_id: &ProductId, notes: &NoteList) -> Result<(), NoteError> {
        ensure_writable(product_id, notes)?;
        self.store.set_notes(product_id, notes).await?;
        Ok(())
    }

    /// Add the same note to several products, one after another.
    ///
    /// Only validation fails the whole call; per-product failures are
    /// recorded in the report and the loop moves on.
    pub async fn create_for_products(
        &self,
        product_ids: &[ProductId],
        draft: &NoteDraft,
    ) -> Result<BatchReport, NoteError> {
        let input = draft.validate().map_err(NoteError::Validation)?;

        let mut report = BatchReport::default();
        for product_id in product_ids {
            let outcome = match self.append_validated(product_id, input.clone()).await {
                Ok(note) => BatchOutcome::Created { note },
                Err(e) => {
                    tracing::error!(product_id = %product_id, error = %e, "Failed to add note");
                    BatchOutcome::Failed {
                        error: e.to_string(),
                    }
                }
            };
            report.items.push(BatchItem {
                product_id: product_id.clone(),
                outcome,
            });
        }

        tracing::info!(
            products = product_ids.len(),
            failed = report.failed().count(),
            "Batch note creation finished"
        );
        Ok(report)
    }

    async fn append_validated(
        &self,
        product_id: &ProductId,
        input: ValidNote,
    ) -> Result<Note, NoteError> {
        let mut notes = self.notes_for_write(product_id).await?;
        let note = notes.append(input, self.now());
        self.store.set_notes(product_id, &notes).await?;

        tracing::info!(product_id = %product_id, note_id = %note.id, "Note created");
        Ok(note)
    }
}

/// A list with unreadable entries would lose them when written back.
fn ensure_writable(product_id: &ProductId, notes: &NoteList) -> Result<(), NoteError> {
    if notes.is_lossy() {
        tracing::warn!(
            product_id = %product_id,
            unreadable = notes.unreadable(),
            "Refusing to overwrite notes that could not be read"
        );
        return Err(NoteError::UnreadableNotes {
            product_id: product_id.clone(),
            unreadable: notes.unreadable(),
        });
    }
    Ok(())
}
