//! Action extension: modal form creating or editing one note of a product

use super::navigation::ExtensionLink;
use crate::i18n;
use crate::notes::{FieldErrors, NoteDraft, NoteId, NoteList, NoteManager, ProductId};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionMode {
    Create,
    Edit(NoteId),
}

impl ActionMode {
    /// Mode requested by the launch URL; a missing or unreadable `noteId` means create.
    pub fn from_launch_url(url: Option<&str>) -> Self {
        let Some(url) = url else {
            return Self::Create;
        };
        match url.parse::<ExtensionLink>() {
            Ok(ExtensionLink {
                note_id: Some(id), ..
            }) => Self::Edit(id),
            Ok(_) => Self::Create,
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Unreadable launch URL, opening blank form");
                Self::Create
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionState {
    pub product_id: ProductId,
    pub mode: ActionMode,
    /// `None` until the product's notes are loaded
    pub notes: Option<NoteList>,
    pub draft: NoteDraft,
    pub errors: FieldErrors,
    pub pending: bool,
    pub load_error: Option<String>,
    pub save_error: Option<String>,
    pub closed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionMsg {
    NotesLoaded(NoteList),
    LoadFailed(String),
    TitleChanged(String),
    DescriptionChanged(String),
    Submit { now: DateTime<Utc> },
    SaveFinished(Result<(), String>),
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionEffect {
    LoadNotes(ProductId),
    SaveNotes {
        product_id: ProductId,
        notes: NoteList,
    },
    Close,
}

impl ActionState {
    /// Open the form for `product_id`; the notes are fetched once.
    pub fn open(product_id: ProductId, mode: ActionMode) -> (Self, Vec<ActionEffect>) {
        let state = Self {
            product_id: product_id.clone(),
            mode,
            notes: None,
            draft: NoteDraft::default(),
            errors: FieldErrors::default(),
            pending: false,
            load_error: None,
            save_error: None,
            closed: false,
        };
        (state, vec![ActionEffect::LoadNotes(product_id)])
    }

    pub fn heading_key(&self) -> &'static str {
        match self.mode {
            ActionMode::Edit(_) => i18n::EDIT_NOTE_HEADING,
            ActionMode::Create => i18n::ADD_NOTE_BUTTON,
        }
    }

    pub fn submit_label_key(&self) -> &'static str {
        match self.mode {
            ActionMode::Edit(_) => i18n::EDIT_NOTE_BUTTON,
            ActionMode::Create => i18n::NOTE_CREATE_BUTTON,
        }
    }

    pub fn cancel_label_key(&self) -> &'static str {
        i18n::NOTE_CANCEL_BUTTON
    }

    /// Translation keys of the title and description labels
    pub fn field_label_keys(&self) -> [&'static str; 2] {
        i18n::NOTE_FIELD_LABELS
    }

    pub fn can_submit(&self) -> bool {
        self.notes.is_some() && !self.pending && !self.closed
    }
}

pub fn update(state: ActionState, msg: ActionMsg) -> (ActionState, Vec<ActionEffect>) {
    match msg {
        ActionMsg::NotesLoaded(notes) => {
            let (mode, draft) = match state.mode {
                ActionMode::Edit(id) => match notes.find(id) {
                    Some(note) => (ActionMode::Edit(id), NoteDraft::from(note)),
                    None => {
                        tracing::warn!(product_id = %state.product_id, note_id = %id, "Note to edit not found, creating instead");
                        (ActionMode::Create, state.draft.clone())
                    }
                },
                ActionMode::Create => (ActionMode::Create, state.draft.clone()),
            };
            (
                ActionState {
                    mode,
                    draft,
                    notes: Some(notes),
                    load_error: None,
                    ..state
                },
                vec![],
            )
        }
        ActionMsg::LoadFailed(reason) => {
            tracing::error!(product_id = %state.product_id, error = %reason, "Failed to load notes");
            (
                ActionState {
                    load_error: Some(reason),
                    ..state
                },
                vec![],
            )
        }
        ActionMsg::TitleChanged(title) => (
            ActionState {
                draft: NoteDraft { title, ..state.draft },
                ..state
            },
            vec![],
        ),
        ActionMsg::DescriptionChanged(description) => (
            ActionState {
                draft: NoteDraft {
                    description,
                    ..state.draft
                },
                ..state
            },
            vec![],
        ),
        ActionMsg::Submit { now } => {
            if !state.can_submit() {
                return (state, vec![]);
            }
            let input = match state.draft.validate() {
                Ok(input) => input,
                Err(errors) => return (ActionState { errors, ..state }, vec![]),
            };

            let mut notes = state.notes.clone().unwrap_or_default();
            if let ActionMode::Edit(id) = state.mode {
                if notes.replace(id, input.clone(), now).is_none() {
                    notes.append(input, now);
                }
            } else {
                notes.append(input, now);
            }

            let effect = ActionEffect::SaveNotes {
                product_id: state.product_id.clone(),
                notes,
            };
            (
                ActionState {
                    errors: FieldErrors::default(),
                    pending: true,
                    save_error: None,
                    ..state
                },
                vec![effect],
            )
        }
        ActionMsg::SaveFinished(Ok(())) => (
            ActionState {
                pending: false,
                closed: true,
                ..state
            },
            vec![ActionEffect::Close],
        ),
        ActionMsg::SaveFinished(Err(reason)) => {
            tracing::error!(product_id = %state.product_id, error = %reason, "Failed to save note");
            (
                ActionState {
                    pending: false,
                    save_error: Some(reason),
                    ..state
                },
                vec![],
            )
        }
        ActionMsg::Cancel => (
            ActionState {
                closed: true,
                ..state
            },
            vec![ActionEffect::Close],
        ),
    }
}

/// Perform an effect against the store; returns the message to feed back.
pub async fn run_effect(manager: &NoteManager, effect: ActionEffect) -> Option<ActionMsg> {
    match effect {
        ActionEffect::LoadNotes(product_id) => Some(match manager.list_notes(&product_id).await {
            Ok(notes) => ActionMsg::NotesLoaded(notes),
            Err(e) => ActionMsg::LoadFailed(e.to_string()),
        }),
        ActionEffect::SaveNotes { product_id, notes } => Some(ActionMsg::SaveFinished(
            manager
                .write_notes(&product_id, &notes)
                .await
                .map_err(|e| e.to_string()),
        )),
        ActionEffect::Close => None,
    }
}
