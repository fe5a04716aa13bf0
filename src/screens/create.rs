//! Note creation page: pick products, write one note, add it to all of them

use crate::i18n;
use crate::notes::{BatchReport, FieldErrors, NoteDraft, NoteError, NoteManager, ProductId};

/// A resource as returned by the admin product picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedResource {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedProduct {
    pub id: ProductId,
    pub title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateState {
    pub selected: Vec<SelectedProduct>,
    pub draft: NoteDraft,
    pub errors: FieldErrors,
    /// Submit was attempted with nothing selected
    pub missing_products: bool,
    pub pending: bool,
    pub report: Option<BatchReport>,
    pub failure: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateMsg {
    ProductsPicked(Vec<PickedResource>),
    TitleChanged(String),
    DescriptionChanged(String),
    Submit,
    SubmitFinished(BatchReport),
    SubmitRejected(FieldErrors),
    SubmitFailed(String),
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateEffect {
    SubmitBatch {
        product_ids: Vec<ProductId>,
        draft: NoteDraft,
    },
    NavigateHome,
}

impl CreateState {
    /// Read-only text of the product field
    pub fn selected_label(&self) -> String {
        self.selected
            .iter()
            .map(|p| p.title.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn can_submit(&self) -> bool {
        !self.pending
    }

    /// Translation keys of the title and description labels
    pub fn field_label_keys(&self) -> [&'static str; 2] {
        i18n::NOTE_FIELD_LABELS
    }

    /// Translation keys of the submit and cancel buttons
    pub fn button_keys(&self) -> [&'static str; 2] {
        [i18n::NOTE_CREATE_BUTTON, i18n::NOTE_CANCEL_BUTTON]
    }
}

/// Keep product picks, drop variants and anything else that is not a product.
fn select_products(picked: Vec<PickedResource>) -> Vec<SelectedProduct> {
    picked
        .into_iter()
        .filter_map(|r| match r.id.parse::<ProductId>() {
            Ok(id) => Some(SelectedProduct { id, title: r.title }),
            Err(e) => {
                tracing::warn!(id = %r.id, error = %e, "Ignoring picked resource");
                None
            }
        })
        .collect()
}

pub fn update(state: CreateState, msg: CreateMsg) -> (CreateState, Vec<CreateEffect>) {
    match msg {
        CreateMsg::ProductsPicked(picked) => {
            let selected = select_products(picked);
            if selected.is_empty() {
                // closing the picker without a choice keeps the old selection
                return (state, vec![]);
            }
            (
                CreateState {
                    selected,
                    missing_products: false,
                    ..state
                },
                vec![],
            )
        }
        CreateMsg::TitleChanged(title) => (
            CreateState {
                draft: NoteDraft { title, ..state.draft },
                ..state
            },
            vec![],
        ),
        CreateMsg::DescriptionChanged(description) => (
            CreateState {
                draft: NoteDraft {
                    description,
                    ..state.draft
                },
                ..state
            },
            vec![],
        ),
        CreateMsg::Submit => {
            if state.pending {
                return (state, vec![]);
            }
            let errors = state.draft.validate().err().unwrap_or_default();
            let missing_products = state.selected.is_empty();
            if !errors.is_empty() || missing_products {
                return (
                    CreateState {
                        errors,
                        missing_products,
                        ..state
                    },
                    vec![],
                );
            }
            let effect = CreateEffect::SubmitBatch {
                product_ids: state.selected.iter().map(|p| p.id.clone()).collect(),
                draft: state.draft.clone(),
            };
            (
                CreateState {
                    errors,
                    missing_products,
                    pending: true,
                    failure: None,
                    ..state
                },
                vec![effect],
            )
        }
        CreateMsg::SubmitFinished(report) => {
            let effects = if report.is_complete_success() {
                vec![CreateEffect::NavigateHome]
            } else {
                vec![]
            };
            (
                CreateState {
                    pending: false,
                    report: Some(report),
                    ..state
                },
                effects,
            )
        }
        CreateMsg::SubmitRejected(errors) => (
            CreateState {
                pending: false,
                errors,
                ..state
            },
            vec![],
        ),
        CreateMsg::SubmitFailed(reason) => (
            CreateState {
                pending: false,
                failure: Some(reason),
                ..state
            },
            vec![],
        ),
        CreateMsg::Cancel => (CreateState::default(), vec![]),
    }
}

/// Perform an effect against the store; returns the message to feed back.
pub async fn run_effect(manager: &NoteManager, effect: CreateEffect) -> Option<CreateMsg> {
    match effect {
        CreateEffect::SubmitBatch { product_ids, draft } => {
            match manager.create_for_products(&product_ids, &draft).await {
                Ok(report) => Some(CreateMsg::SubmitFinished(report)),
                Err(NoteError::Validation(errors)) => Some(CreateMsg::SubmitRejected(errors)),
                Err(e) => {
                    tracing::error!(error = %e, "Note creation failed");
                    Some(CreateMsg::SubmitFailed(e.to_string()))
                }
            }
        }
        CreateEffect::NavigateHome => None,
    }
}
