//! Product note models
//!
//! A product's notes live as one JSON array inside a single product metafield.
//! `NoteList` is that array: it is read in full, mutated in memory and written
//! back in full.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Maximum title length, in characters
pub const TITLE_MAX_CHARS: usize = 50;

/// Maximum description length, in characters
pub const DESCRIPTION_MAX_CHARS: usize = 300;

// ============================================================================
// Identifiers
// ============================================================================

/// Note identifier: the creation time in milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(pub i64);

impl NoteId {
    /// Mint an id for a new note appended to `existing`.
    ///
    /// Uses the current millisecond, bumped past the largest existing id so
    /// two notes created within the same millisecond never collide.
    pub fn mint(now: DateTime<Utc>, existing: &NoteList) -> Self {
        let taken: HashSet<NoteId> = existing.iter().map(|n| n.id).collect();
        Self::fresh(&taken, now.timestamp_millis())
    }

    /// The larger of `floor` and `max(taken) + 1`. Once the taken ids reach
    /// `i64::MAX`, `floor` if free, else the lowest free positive id.
    fn fresh(taken: &HashSet<NoteId>, floor: i64) -> Self {
        let next = match taken.iter().max() {
            None => Some(floor),
            Some(max) => max.0.checked_add(1).map(|next| next.max(floor)),
        };
        match next {
            Some(id) => Self(id),
            None => std::iter::once(floor)
                .chain(1..=i64::MAX)
                .map(Self)
                .find(|id| !taken.contains(id))
                .unwrap_or_default(),
        }
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NoteId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| format!("Invalid note id: {}", s))
    }
}

/// Errors produced while parsing a product identifier
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProductIdError {
    #[error("empty product id")]
    Empty,
    #[error("variant ids are not accepted, pick the product instead: {0}")]
    Variant(String),
    #[error("not a product id: {0}")]
    NotAProduct(String),
}

/// Shopify product GID (`gid://shopify/Product/<n>`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProductId(String);

const PRODUCT_GID_PREFIX: &str = "gid://shopify/Product/";
const VARIANT_GID_PREFIX: &str = "gid://shopify/ProductVariant/";

impl ProductId {
    /// Full GID, as expected by the Admin API
    pub fn as_gid(&self) -> &str {
        &self.0
    }

    /// Trailing numeric part of the GID, used in admin URLs
    pub fn numeric(&self) -> &str {
        &self.0[PRODUCT_GID_PREFIX.len()..]
    }
}

impl FromStr for ProductId {
    type Err = ProductIdError;

    /// Accepts either a full product GID or the bare numeric id.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ProductIdError::Empty);
        }
        if s.starts_with(VARIANT_GID_PREFIX) {
            return Err(ProductIdError::Variant(s.to_string()));
        }
        let numeric = s.strip_prefix(PRODUCT_GID_PREFIX).unwrap_or(s);
        if numeric.is_empty() || !numeric.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ProductIdError::NotAProduct(s.to_string()));
        }
        Ok(Self(format!("{}{}", PRODUCT_GID_PREFIX, numeric)))
    }
}

impl TryFrom<String> for ProductId {
    type Error = ProductIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ProductId> for String {
    fn from(id: ProductId) -> Self {
        id.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Note
// ============================================================================

/// A single note, as stored inside the metafield JSON array.
///
/// Older writers omitted `id` and `createdAt`, so both tolerate absence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    #[serde(default)]
    pub id: NoteId,
    pub title: String,
    pub description: String,
    #[serde(default, with = "js_timestamp", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "js_timestamp", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Note {
    /// Build a new note from validated input
    pub fn new(id: NoteId, input: ValidNote, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: input.title,
            description: input.description,
            created_at: Some(now),
            updated_at: None,
        }
    }

    /// Most recent modification time (`updatedAt`, else `createdAt`)
    pub fn last_modified(&self) -> Option<DateTime<Utc>> {
        self.updated_at.or(self.created_at)
    }
}

/// Timestamps in the `Date.prototype.toISOString` shape the admin UI writes
/// (`2025-01-31T09:15:00.000Z`); any RFC 3339 string or a bare date
/// (midnight UTC) is accepted on read.
mod js_timestamp {
    use super::*;

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(ts) => serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error;
        let raw: Option<String> = Option::deserialize(deserializer)?;
        let Some(s) = raw.filter(|s| !s.is_empty()) else {
            return Ok(None);
        };
        if let Ok(ts) = DateTime::parse_from_rfc3339(&s) {
            return Ok(Some(ts.with_timezone(&Utc)));
        }
        chrono::NaiveDate::parse_from_str(&s, "%Y-%m-%d")
            .ok()
            .and_then(|day| day.and_hms_opt(0, 0, 0))
            .map(|midnight| Some(midnight.and_utc()))
            .ok_or_else(|| D::Error::custom(format!("invalid timestamp: {}", s)))
    }
}

// ============================================================================
// Draft & validation
// ============================================================================

/// Why a single form field was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum FieldError {
    Missing,
    TooLong { max: usize },
}

/// Per-field validation outcome for a note form
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<FieldError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<FieldError>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none()
    }

    pub fn title_invalid(&self) -> bool {
        self.title.is_some()
    }

    pub fn description_invalid(&self) -> bool {
        self.description.is_some()
    }

    /// Translation key for the title error, if any
    pub fn title_message_key(&self) -> Option<&'static str> {
        self.title.map(|_| crate::i18n::NOTE_TITLE_ERROR)
    }

    /// Translation key for the description error, if any
    pub fn description_message_key(&self) -> Option<&'static str> {
        self.description.map(|_| crate::i18n::NOTE_DESCRIPTION_ERROR)
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        for (name, err) in [("title", self.title), ("description", self.description)] {
            match err {
                Some(FieldError::Missing) => parts.push(format!("{} is required", name)),
                Some(FieldError::TooLong { max }) => {
                    parts.push(format!("{} must be at most {} characters", name, max))
                }
                None => {}
            }
        }
        f.write_str(&parts.join(", "))
    }
}

/// Unvalidated note form input
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteDraft {
    pub title: String,
    pub description: String,
}

/// Note input that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidNote {
    pub title: String,
    pub description: String,
}

fn check_field(value: &str, max: usize) -> Option<FieldError> {
    if value.trim().is_empty() {
        Some(FieldError::Missing)
    } else if value.chars().count() > max {
        Some(FieldError::TooLong { max })
    } else {
        None
    }
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    /// Check both fields; every failing field is reported, not just the first.
    pub fn validate(&self) -> Result<ValidNote, FieldErrors> {
        let errors = FieldErrors {
            title: check_field(&self.title, TITLE_MAX_CHARS),
            description: check_field(&self.description, DESCRIPTION_MAX_CHARS),
        };
        if errors.is_empty() {
            Ok(ValidNote {
                title: self.title.clone(),
                description: self.description.clone(),
            })
        } else {
            Err(errors)
        }
    }
}

impl From<&Note> for NoteDraft {
    fn from(note: &Note) -> Self {
        Self::new(note.title.clone(), note.description.clone())
    }
}

// ============================================================================
// NoteList
// ============================================================================

/// The full, ordered note list of one product.
///
/// Every note in a list has a distinct id: notes stored without one (or
/// repeating one) get a fresh id when the list is read, and keep it from the
/// next write on. Stored entries that do not decode as a note are counted in
/// `unreadable`; such a list must not be written back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteList {
    notes: Vec<Note>,
    unreadable: usize,
}

impl NoteList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a metafield value that must be a JSON array.
    ///
    /// Elements are decoded one by one; the ones that fail are skipped and
    /// counted.
    pub fn from_json(value: &str) -> serde_json::Result<Self> {
        let items: Vec<serde_json::Value> = serde_json::from_str(value)?;
        Ok(Self::from_values(items))
    }

    /// Parse a metafield value, treating absence and malformed JSON as empty.
    ///
    /// Malformed data is logged and never propagated. Valid JSON of another
    /// shape also reads as empty, but is counted as unreadable.
    pub fn parse(value: Option<&str>) -> Self {
        let Some(raw) = value.filter(|v| !v.trim().is_empty()) else {
            return Self::new();
        };
        match Self::from_json(raw) {
            Ok(list) => list,
            Err(e) if e.is_data() => {
                tracing::warn!(error = %e, "Notes metafield is not a list, treating as empty");
                Self {
                    notes: Vec::new(),
                    unreadable: 1,
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Malformed notes metafield, treating as empty");
                Self::new()
            }
        }
    }

    fn from_values(items: Vec<serde_json::Value>) -> Self {
        let mut notes = Vec::with_capacity(items.len());
        let mut without_id = HashSet::new();
        let mut unreadable = 0;

        for item in items {
            let has_id = item.get("id").is_some_and(|id| !id.is_null());
            match serde_json::from_value::<Note>(item) {
                Ok(note) => {
                    if !has_id {
                        without_id.insert(notes.len());
                    }
                    notes.push(note);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping unreadable stored note");
                    unreadable += 1;
                }
            }
        }

        let mut list = Self { notes, unreadable };
        list.assign_ids(&without_id);
        list
    }

    /// Give a fresh id to the notes at `without_id` and to every later
    /// repeat of an id.
    fn assign_ids(&mut self, without_id: &HashSet<usize>) {
        let mut taken = HashSet::new();
        let mut pending = Vec::new();
        for (index, note) in self.notes.iter().enumerate() {
            if without_id.contains(&index) || !taken.insert(note.id) {
                pending.push(index);
            }
        }
        for index in pending {
            let id = NoteId::fresh(&taken, 1);
            taken.insert(id);
            self.notes[index].id = id;
        }
    }

    /// Serialize to the metafield JSON value
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.notes).unwrap_or_else(|_| "[]".to_string())
    }

    /// Number of stored entries that could not be read
    pub fn unreadable(&self) -> usize {
        self.unreadable
    }

    /// True when writing this list back would drop stored entries
    pub fn is_lossy(&self) -> bool {
        self.unreadable > 0
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Note> {
        self.notes.iter()
    }

    pub fn as_slice(&self) -> &[Note] {
        &self.notes
    }

    pub fn into_vec(self) -> Vec<Note> {
        self.notes
    }

    pub fn find(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    /// Append a new note minted from `input`; returns the stored note.
    pub fn append(&mut self, input: ValidNote, now: DateTime<Utc>) -> Note {
        let note = Note::new(NoteId::mint(now, self), input, now);
        self.notes.push(note.clone());
        note
    }

    /// Replace title/description of the note with `id`, stamping `updatedAt`.
    ///
    /// Every other note is left untouched. Returns `None` if no note matches.
    pub fn replace(&mut self, id: NoteId, input: ValidNote, now: DateTime<Utc>) -> Option<Note> {
        let note = self.notes.iter_mut().find(|n| n.id == id)?;
        note.title = input.title;
        note.description = input.description;
        note.updated_at = Some(now);
        Some(note.clone())
    }

    /// Remove the note with `id`, preserving the order of the rest.
    pub fn remove(&mut self, id: NoteId) -> Option<Note> {
        let index = self.notes.iter().position(|n| n.id == id)?;
        Some(self.notes.remove(index))
    }

    /// Newest first by `createdAt`, then by id. Notes without a timestamp
    /// sort after every timestamped one.
    pub fn sorted_newest_first(&self) -> Self {
        let mut notes = self.notes.clone();
        notes.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Self {
            notes,
            unreadable: self.unreadable,
        }
    }
}

impl From<Vec<Note>> for NoteList {
    fn from(notes: Vec<Note>) -> Self {
        Self {
            notes,
            unreadable: 0,
        }
    }
}

impl Serialize for NoteList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.notes.serialize(serializer)
    }
}

impl IntoIterator for NoteList {
    type Item = Note;
    type IntoIter = std::vec::IntoIter<Note>;

    fn into_iter(self) -> Self::IntoIter {
        self.notes.into_iter()
    }
}

impl<'a> IntoIterator for &'a NoteList {
    type Item = &'a Note;
    type IntoIter = std::slice::Iter<'a, Note>;

    fn into_iter(self) -> Self::IntoIter {
        self.notes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn valid(title: &str, description: &str) -> ValidNote {
        NoteDraft::new(title, description).validate().unwrap()
    }

    fn two_notes() -> NoteList {
        NoteList::from_json(
            r#"[{"id":1,"title":"one","description":"first","createdAt":"2025-01-01T00:00:00.000Z"},
                {"id":2,"title":"two","description":"second","createdAt":"2025-01-02T00:00:00.000Z"}]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_parse_absent_is_empty() {
        assert!(NoteList::parse(None).is_empty());
        assert!(NoteList::parse(Some("")).is_empty());
    }

    #[test]
    fn test_parse_malformed_is_empty() {
        assert!(NoteList::parse(Some("[{\"title\":")).is_empty());
        assert!(NoteList::parse(Some("{\"not\":\"an array\"}")).is_empty());
    }

    #[test]
    fn test_json_round_trip() {
        let list = two_notes();
        let reparsed = NoteList::from_json(&list.to_json()).unwrap();
        assert_eq!(reparsed, list);
    }

    #[test]
    fn test_serialized_shape_is_camel_case_js_timestamps() {
        let mut list = NoteList::new();
        list.append(valid("A", "B"), ts(1_700_000_000));
        let json: serde_json::Value = serde_json::from_str(&list.to_json()).unwrap();
        assert_eq!(json[0]["id"], 1_700_000_000_000_i64);
        assert_eq!(json[0]["createdAt"], "2023-11-14T22:13:20.000Z");
        assert!(json[0].get("updatedAt").is_none());
    }

    #[test]
    fn test_legacy_note_without_id_or_timestamps() {
        let list = NoteList::parse(Some(r#"[{"title":"t","description":"d"}]"#));
        assert_eq!(list.len(), 1);
        assert_eq!(list.as_slice()[0].id, NoteId(1));
        assert!(list.as_slice()[0].created_at.is_none());
        assert!(!list.is_lossy());
    }

    #[test]
    fn test_notes_without_id_get_distinct_ids() {
        let raw = r#"[{"title":"keep me","description":"a"},
                      {"id":7,"title":"has id","description":"b"},
                      {"title":"delete me","description":"c"},
                      {"id":7,"title":"repeat","description":"d"}]"#;
        let list = NoteList::parse(Some(raw));
        let ids: Vec<i64> = list.iter().map(|n| n.id.0).collect();
        assert_eq!(ids, vec![8, 7, 9, 10]);

        // same input, same ids
        assert_eq!(NoteList::parse(Some(raw)), list);

        // assigned ids are written out, so the next read keeps them
        let reread = NoteList::parse(Some(&list.to_json()));
        assert_eq!(reread, list);

        let mut list = list;
        let removed = list.remove(NoteId(9)).unwrap();
        assert_eq!(removed.title, "delete me");
        let titles: Vec<&str> = list.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["keep me", "has id", "repeat"]);
    }

    #[test]
    fn test_unreadable_elements_are_skipped_and_counted() {
        let list = NoteList::parse(Some(
            r#"[{"id":1,"title":"one","description":"a","createdAt":"2025-01-01T00:00:00.000Z"},
                {"id":"7","title":"string id","description":"b"},
                {"id":2,"title":"two","description":"c","createdAt":"yesterday"},
                {"id":3,"title":"three","description":"d","createdAt":"2025-01-02"}]"#,
        ));
        let ids: Vec<i64> = list.iter().map(|n| n.id.0).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(list.unreadable(), 2);
        assert!(list.is_lossy());
        assert_eq!(
            list.find(NoteId(3)).unwrap().created_at,
            Some(Utc.with_ymd_and_hms(2025, 1, 2, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_wrong_shape_reads_empty_but_lossy() {
        let list = NoteList::parse(Some(r#"{"title":"t","description":"d"}"#));
        assert!(list.is_empty());
        assert!(list.is_lossy());

        let list = NoteList::parse(Some("[{\"title\":"));
        assert!(list.is_empty());
        assert!(!list.is_lossy());
    }

    #[test]
    fn test_mint_past_largest_id_does_not_overflow() {
        let now = ts(1_800_000_000);
        let mut list = NoteList::parse(Some(
            r#"[{"id":9223372036854775807,"title":"max","description":"d"}]"#,
        ));
        let note = list.append(valid("a", "b"), now);
        assert_eq!(note.id, NoteId(now.timestamp_millis()));

        let again = list.append(valid("c", "d"), now);
        assert_eq!(again.id, NoteId(1));
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_append_adds_last_with_distinct_id() {
        let mut list = two_notes();
        let before: Vec<NoteId> = list.iter().map(|n| n.id).collect();
        let note = list.append(valid("A", "B"), ts(1_800_000_000));

        assert_eq!(list.len(), 3);
        let last = list.as_slice().last().unwrap();
        assert_eq!(last.title, "A");
        assert_eq!(last.description, "B");
        assert_eq!(last, &note);
        assert!(!before.contains(&note.id));
    }

    #[test]
    fn test_mint_same_millisecond_does_not_collide() {
        let now = ts(1_800_000_000);
        let mut list = NoteList::new();
        let a = list.append(valid("a", "a"), now);
        let b = list.append(valid("b", "b"), now);
        assert_ne!(a.id, b.id);
        assert_eq!(b.id.0, a.id.0 + 1);
    }

    #[test]
    fn test_replace_touches_only_target() {
        let mut list = two_notes();
        let untouched = list.find(NoteId(1)).unwrap().clone();
        let now = ts(1_900_000_000);

        let updated = list.replace(NoteId(2), valid("new", "body"), now).unwrap();

        assert_eq!(updated.title, "new");
        assert_eq!(updated.description, "body");
        assert_eq!(updated.updated_at, Some(now));
        assert_eq!(updated.created_at, two_notes().find(NoteId(2)).unwrap().created_at);
        assert_eq!(list.find(NoteId(1)).unwrap(), &untouched);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_replace_unknown_id() {
        let mut list = two_notes();
        assert!(list.replace(NoteId(99), valid("x", "y"), ts(0)).is_none());
        assert_eq!(list, two_notes());
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut list = NoteList::from(vec![
            Note::new(NoteId(1), valid("a", "a"), ts(1)),
            Note::new(NoteId(2), valid("b", "b"), ts(2)),
            Note::new(NoteId(3), valid("c", "c"), ts(3)),
        ]);
        let removed = list.remove(NoteId(2)).unwrap();
        assert_eq!(removed.title, "b");
        let ids: Vec<i64> = list.iter().map(|n| n.id.0).collect();
        assert_eq!(ids, vec![1, 3]);
        assert!(list.remove(NoteId(2)).is_none());
    }

    #[test]
    fn test_sorted_newest_first() {
        let sorted = two_notes().sorted_newest_first();
        let ids: Vec<i64> = sorted.iter().map(|n| n.id.0).collect();
        assert_eq!(ids, vec![2, 1]);

        let legacy = NoteList::parse(Some(
            r#"[{"id":5,"title":"a","description":"a"},{"id":9,"title":"b","description":"b"}]"#,
        ));
        let ids: Vec<i64> = legacy.sorted_newest_first().iter().map(|n| n.id.0).collect();
        assert_eq!(ids, vec![9, 5]);
    }

    #[test]
    fn test_validate_reports_every_field() {
        let errors = NoteDraft::new("", "  ").validate().unwrap_err();
        assert_eq!(errors.title, Some(FieldError::Missing));
        assert_eq!(errors.description, Some(FieldError::Missing));
        assert!(errors.title_invalid() && errors.description_invalid());
        assert_eq!(errors.title_message_key(), Some("note-title-error"));
    }

    #[test]
    fn test_validate_lengths() {
        let ok = NoteDraft::new("é".repeat(50), "d".repeat(300));
        assert!(ok.validate().is_ok());

        let errors = NoteDraft::new("t".repeat(51), "d".repeat(301))
            .validate()
            .unwrap_err();
        assert_eq!(errors.title, Some(FieldError::TooLong { max: 50 }));
        assert_eq!(errors.description, Some(FieldError::TooLong { max: 300 }));
    }

    #[test]
    fn test_product_id_parsing() {
        let gid: ProductId = "gid://shopify/Product/123".parse().unwrap();
        let bare: ProductId = "123".parse().unwrap();
        assert_eq!(gid, bare);
        assert_eq!(gid.numeric(), "123");

        assert_eq!("".parse::<ProductId>(), Err(ProductIdError::Empty));
        assert!(matches!(
            "gid://shopify/ProductVariant/9".parse::<ProductId>(),
            Err(ProductIdError::Variant(_))
        ));
        assert!(matches!(
            "gid://shopify/Order/9".parse::<ProductId>(),
            Err(ProductIdError::NotAProduct(_))
        ));
    }

    #[test]
    fn test_note_id_from_str() {
        assert_eq!("42".parse::<NoteId>(), Ok(NoteId(42)));
        assert!("abc".parse::<NoteId>().is_err());
    }
}
