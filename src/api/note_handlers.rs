//! API handlers for product notes

use super::handlers::{parse_note_id, parse_product_id, AppError, NotesApiState};
use super::{PaginatedResponse, PaginationParams};
use crate::notes::{BatchReport, Note, NoteDraft, ProductId};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

// ============================================================================
// Request Types
// ============================================================================

/// Title and description of a note, as typed into the form
#[derive(Debug, Deserialize)]
pub struct NoteBody {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl From<NoteBody> for NoteDraft {
    fn from(body: NoteBody) -> Self {
        NoteDraft::new(body.title, body.description)
    }
}

/// Request to add one note to several products
#[derive(Debug, Deserialize)]
pub struct BatchCreateBody {
    pub product_ids: Vec<String>,
    #[serde(flatten)]
    pub note: NoteBody,
}

// ============================================================================
// Handlers
// ============================================================================

/// List a product's notes, newest first unless `sort_order=asc`
pub async fn list_product_notes(
    State(state): State<NotesApiState>,
    Path(product_id): Path<String>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<PaginatedResponse<Note>>, AppError> {
    pagination.validate().map_err(AppError::BadRequest)?;
    let product_id = parse_product_id(&product_id)?;

    let notes = state.notes.list_notes(&product_id).await?;
    let notes = if pagination.newest_first() {
        notes.sorted_newest_first().into_vec()
    } else {
        notes.into_vec()
    };

    Ok(Json(pagination.page(notes)))
}

/// Add a note to a product
pub async fn create_note(
    State(state): State<NotesApiState>,
    Path(product_id): Path<String>,
    Json(body): Json<NoteBody>,
) -> Result<(StatusCode, Json<Note>), AppError> {
    let product_id = parse_product_id(&product_id)?;
    let note = state
        .notes
        .create_note(&product_id, &body.into())
        .await?;
    Ok((StatusCode::CREATED, Json(note)))
}

/// Replace title and description of a note
pub async fn update_note(
    State(state): State<NotesApiState>,
    Path((product_id, note_id)): Path<(String, String)>,
    Json(body): Json<NoteBody>,
) -> Result<Json<Note>, AppError> {
    let product_id = parse_product_id(&product_id)?;
    let note_id = parse_note_id(&note_id)?;
    let note = state
        .notes
        .update_note(&product_id, note_id, &body.into())
        .await?;
    Ok(Json(note))
}

/// Delete a note
pub async fn delete_note(
    State(state): State<NotesApiState>,
    Path((product_id, note_id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    let product_id = parse_product_id(&product_id)?;
    let note_id = parse_note_id(&note_id)?;
    if state.notes.delete_note(&product_id, note_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!(
            "note {} not found on {}",
            note_id, product_id
        )))
    }
}

/// Add one note to every listed product; failures are reported per product
pub async fn create_batch(
    State(state): State<NotesApiState>,
    Json(body): Json<BatchCreateBody>,
) -> Result<Json<BatchReport>, AppError> {
    if body.product_ids.is_empty() {
        return Err(AppError::BadRequest(
            "product_ids must not be empty".to_string(),
        ));
    }
    let product_ids = body
        .product_ids
        .iter()
        .map(|id| parse_product_id(id))
        .collect::<Result<Vec<ProductId>, _>>()?;

    let report = state
        .notes
        .create_for_products(&product_ids, &body.note.into())
        .await?;
    Ok(Json(report))
}
