//! Shared API state, error mapping and health check

use crate::notes::{FieldErrors, NoteError, NoteId, NoteManager, ProductId};
use crate::shopify::ProductCatalog;
use crate::{AppState, Config};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use std::sync::Arc;

/// Shared server state
pub struct ServerState {
    pub notes: Arc<NoteManager>,
    pub catalog: Arc<dyn ProductCatalog>,
    pub config: Arc<Config>,
}

impl ServerState {
    pub fn new(app: AppState) -> Self {
        Self {
            notes: app.notes,
            catalog: app.catalog,
            config: app.config,
        }
    }
}

/// State handed to every handler
pub type NotesApiState = Arc<ServerState>;

// ============================================================================
// Health check
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub shop_domain: String,
}

/// Liveness only; the Admin API is not contacted.
pub async fn health(State(state): State<NotesApiState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        shop_domain: state.config.shop_domain.clone(),
    })
}

// ============================================================================
// Path parsing
// ============================================================================

pub(crate) fn parse_product_id(raw: &str) -> Result<ProductId, AppError> {
    raw.parse()
        .map_err(|e| AppError::BadRequest(format!("Invalid product id {:?}: {}", raw, e)))
}

pub(crate) fn parse_note_id(raw: &str) -> Result<NoteId, AppError> {
    raw.parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid note id {:?}", raw)))
}

// ============================================================================
// Error handling
// ============================================================================

/// Application error type
#[derive(Debug)]
pub enum AppError {
    Internal(anyhow::Error),
    NotFound(String),
    BadRequest(String),
    Validation(FieldErrors),
    /// Stored data prevents the change
    Conflict(String),
    /// The Admin API failed or was unreachable
    BadGateway(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            AppError::Internal(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::json!({ "error": e.to_string() }),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, serde_json::json!({ "error": msg })),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, serde_json::json!({ "error": msg }))
            }
            AppError::Validation(fields) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                serde_json::json!({ "error": fields.to_string(), "fields": fields }),
            ),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, serde_json::json!({ "error": msg })),
            AppError::BadGateway(msg) => {
                (StatusCode::BAD_GATEWAY, serde_json::json!({ "error": msg }))
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

impl From<NoteError> for AppError {
    fn from(err: NoteError) -> Self {
        if err.is_product_not_found() {
            return AppError::NotFound(err.to_string());
        }
        match err {
            NoteError::Validation(fields) => AppError::Validation(fields),
            NoteError::NoteNotFound { .. } => AppError::NotFound(err.to_string()),
            NoteError::UnreadableNotes { .. } => AppError::Conflict(err.to_string()),
            NoteError::Store(e) => {
                tracing::error!(error = %e, "Admin API call failed");
                AppError::BadGateway(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notes::FieldError;
    use crate::shopify::ShopifyError;
    use crate::test_helpers::response_json;

    #[tokio::test]
    async fn test_validation_error_lists_fields() {
        let err = AppError::Validation(FieldErrors {
            title: Some(FieldError::Missing),
            description: Some(FieldError::TooLong { max: 300 }),
        });
        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let json = response_json(resp).await;
        assert_eq!(json["fields"]["title"]["reason"], "missing");
        assert_eq!(json["fields"]["description"]["max"], 300);
        assert!(json["error"].as_str().unwrap().contains("title is required"));
    }

    #[test]
    fn test_note_error_mapping() {
        let pid: ProductId = "1".parse().unwrap();
        let not_found = NoteError::NoteNotFound {
            product_id: pid.clone(),
            note_id: NoteId(5),
        };
        assert!(matches!(AppError::from(not_found), AppError::NotFound(_)));

        let missing_product =
            NoteError::Store(ShopifyError::ProductNotFound(pid.to_string()).into());
        assert!(matches!(AppError::from(missing_product), AppError::NotFound(_)));

        let unreadable = NoteError::UnreadableNotes {
            product_id: pid.clone(),
            unreadable: 2,
        };
        assert!(matches!(AppError::from(unreadable), AppError::Conflict(_)));

        let remote = NoteError::Store(ShopifyError::Transport("timeout".into()).into());
        assert!(matches!(AppError::from(remote), AppError::BadGateway(_)));
    }

    #[test]
    fn test_parse_ids() {
        assert!(parse_product_id("gid://shopify/Product/9").is_ok());
        assert!(matches!(
            parse_product_id("gid://shopify/ProductVariant/9"),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(parse_note_id("abc"), Err(AppError::BadRequest(_))));
        assert_eq!(parse_note_id("17").unwrap(), NoteId(17));
    }
}
