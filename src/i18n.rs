//! Translation keys used by the admin surfaces.
//!
//! The admin host resolves these through its own translation catalogue;
//! this crate only ever hands keys around.

pub const NOTE_TITLE_LABEL: &str = "note-title-label";
pub const NOTE_DESCRIPTION_LABEL: &str = "note-description-label";
pub const NOTE_TITLE_ERROR: &str = "note-title-error";
pub const NOTE_DESCRIPTION_ERROR: &str = "note-description-error";
pub const NOTE_CREATE_BUTTON: &str = "note-create-button";
pub const NOTE_CANCEL_BUTTON: &str = "note-cancel-button";
pub const EDIT_NOTE_HEADING: &str = "edit-note-heading";
pub const ADD_NOTE_BUTTON: &str = "add-note-button";
pub const EDIT_NOTE_BUTTON: &str = "edit-note-button";
pub const DELETE_NOTE_BUTTON: &str = "delete-note-button";

/// Labels of the title and description fields, in form order
pub const NOTE_FIELD_LABELS: [&str; 2] = [NOTE_TITLE_LABEL, NOTE_DESCRIPTION_LABEL];
