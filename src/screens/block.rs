//! Block extension: paginated note table on the product page, with edit
//! links into the action extension and a confirm-then-delete step.

use super::navigation::ExtensionLink;
use crate::i18n;
use crate::notes::{Note, NoteId, NoteList, NoteManager, ProductId};
use chrono::{DateTime, Utc};

/// Rows per page unless configured otherwise
pub const DEFAULT_PAGE_SIZE: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockState {
    pub product_id: ProductId,
    /// Extension opened by the add and edit buttons
    pub action_extension: String,
    pub loading: bool,
    /// Stored order; the table shows them newest first
    pub notes: NoteList,
    /// 1-based
    pub page: usize,
    pub page_size: usize,
    pub confirm_delete: Option<NoteId>,
    pub load_error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockMsg {
    NotesLoaded(NoteList),
    LoadFailed(String),
    NextPage,
    PreviousPage,
    Add,
    Edit(NoteId),
    RequestDelete(NoteId),
    CancelDelete,
    ConfirmDelete,
    SaveFinished(Result<(), String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockEffect {
    LoadNotes(ProductId),
    SaveNotes {
        product_id: ProductId,
        notes: NoteList,
    },
    Navigate(String),
}

/// One table row as displayed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockRow {
    pub note: Note,
    /// "Last updated ..." badge text
    pub last_updated: Option<String>,
    /// Row is showing its delete confirmation
    pub confirming: bool,
    /// Shortened title shown in the confirmation
    pub chip: String,
}

impl BlockState {
    pub fn open(
        product_id: ProductId,
        action_extension: impl Into<String>,
        page_size: usize,
    ) -> (Self, Vec<BlockEffect>) {
        let state = Self {
            product_id: product_id.clone(),
            action_extension: action_extension.into(),
            loading: true,
            notes: NoteList::new(),
            page: 1,
            page_size: page_size.max(1),
            confirm_delete: None,
            load_error: None,
        };
        (state, vec![BlockEffect::LoadNotes(product_id)])
    }

    pub fn total_pages(&self) -> usize {
        self.notes.len().div_ceil(self.page_size)
    }

    pub fn paginate(&self) -> bool {
        self.notes.len() > self.page_size
    }

    pub fn has_next_page(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn has_previous_page(&self) -> bool {
        self.page > 1
    }

    /// Notes on the current page, newest first
    pub fn visible_notes(&self) -> Vec<Note> {
        let sorted = self.notes.sorted_newest_first();
        if !self.paginate() {
            return sorted.into_vec();
        }
        sorted
            .into_iter()
            .skip((self.page - 1) * self.page_size)
            .take(self.page_size)
            .collect()
    }

    pub fn rows(&self, now: DateTime<Utc>) -> Vec<BlockRow> {
        self.visible_notes()
            .into_iter()
            .map(|note| BlockRow {
                last_updated: note.last_modified().map(|ts| relative_time(ts, now)),
                confirming: self.confirm_delete == Some(note.id),
                chip: title_chip(&note.title),
                note,
            })
            .collect()
    }

    /// Translation keys of the add, edit and delete buttons
    pub fn button_keys(&self) -> [&'static str; 3] {
        [
            i18n::ADD_NOTE_BUTTON,
            i18n::EDIT_NOTE_BUTTON,
            i18n::DELETE_NOTE_BUTTON,
        ]
    }

    fn clamp_page(mut self) -> Self {
        self.page = self.page.clamp(1, self.total_pages().max(1));
        self
    }
}

pub fn update(state: BlockState, msg: BlockMsg) -> (BlockState, Vec<BlockEffect>) {
    match msg {
        BlockMsg::NotesLoaded(notes) => (
            BlockState {
                loading: false,
                notes,
                load_error: None,
                ..state
            }
            .clamp_page(),
            vec![],
        ),
        BlockMsg::LoadFailed(reason) => {
            tracing::error!(product_id = %state.product_id, error = %reason, "Failed to load notes");
            (
                BlockState {
                    loading: false,
                    load_error: Some(reason),
                    ..state
                },
                vec![],
            )
        }
        BlockMsg::NextPage if state.has_next_page() => (
            BlockState {
                page: state.page + 1,
                ..state
            },
            vec![],
        ),
        BlockMsg::PreviousPage if state.has_previous_page() => (
            BlockState {
                page: state.page - 1,
                ..state
            },
            vec![],
        ),
        BlockMsg::NextPage | BlockMsg::PreviousPage => (state, vec![]),
        BlockMsg::Add => {
            let link = ExtensionLink::new(state.action_extension.clone(), None);
            (state, vec![BlockEffect::Navigate(link.to_string())])
        }
        BlockMsg::Edit(id) => {
            let link = ExtensionLink::new(state.action_extension.clone(), Some(id));
            (state, vec![BlockEffect::Navigate(link.to_string())])
        }
        BlockMsg::RequestDelete(id) if state.notes.find(id).is_some() => (
            BlockState {
                confirm_delete: Some(id),
                ..state
            },
            vec![],
        ),
        BlockMsg::RequestDelete(_) => (state, vec![]),
        BlockMsg::CancelDelete => (
            BlockState {
                confirm_delete: None,
                ..state
            },
            vec![],
        ),
        BlockMsg::ConfirmDelete => {
            let Some(id) = state.confirm_delete else {
                return (state, vec![]);
            };
            let mut notes = state.notes.clone();
            notes.remove(id);
            let effect = BlockEffect::SaveNotes {
                product_id: state.product_id.clone(),
                notes: notes.clone(),
            };
            (
                BlockState {
                    notes,
                    confirm_delete: None,
                    ..state
                }
                .clamp_page(),
                vec![effect],
            )
        }
        BlockMsg::SaveFinished(Ok(())) => (state, vec![]),
        BlockMsg::SaveFinished(Err(reason)) => {
            // the table already dropped the row; reload what is actually stored
            tracing::error!(product_id = %state.product_id, error = %reason, "Failed to delete note");
            let effect = BlockEffect::LoadNotes(state.product_id.clone());
            (state, vec![effect])
        }
    }
}

/// Perform an effect against the store; returns the message to feed back.
pub async fn run_effect(manager: &NoteManager, effect: BlockEffect) -> Option<BlockMsg> {
    match effect {
        BlockEffect::LoadNotes(product_id) => Some(match manager.list_notes(&product_id).await {
            Ok(notes) => BlockMsg::NotesLoaded(notes),
            Err(e) => BlockMsg::LoadFailed(e.to_string()),
        }),
        BlockEffect::SaveNotes { product_id, notes } => Some(BlockMsg::SaveFinished(
            manager
                .write_notes(&product_id, &notes)
                .await
                .map_err(|e| e.to_string()),
        )),
        BlockEffect::Navigate(_) => None,
    }
}

/// "Just now", "5 minutes ago", "3 hours ago", or the date after a day.
pub fn relative_time(ts: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(ts);
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();

    if minutes < 1 {
        "Just now".to_string()
    } else if minutes < 60 {
        format!("{} minute{} ago", minutes, if minutes > 1 { "s" } else { "" })
    } else if hours < 24 {
        format!("{} hour{} ago", hours, if hours > 1 { "s" } else { "" })
    } else {
        ts.format("%b %-d, %Y, %-I:%M %p").to_string()
    }
}

/// First three words of a title, with an ellipsis when there are more
fn title_chip(title: &str) -> String {
    let words: Vec<&str> = title.split_whitespace().collect();
    if words.len() > 3 {
        format!("{}...", words[..3].join(" "))
    } else {
        words.join(" ")
    }
}
