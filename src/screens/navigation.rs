//! Deep links between admin extensions (`extension:<name>?noteId=<id>`)

use crate::notes::NoteId;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const SCHEME: &str = "extension:";
const NOTE_ID_PARAM: &str = "noteId";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkError {
    #[error("not an extension link: {0}")]
    NotAnExtensionLink(String),
    #[error("missing extension name")]
    MissingName,
    #[error("invalid noteId: {0}")]
    InvalidNoteId(String),
}

/// Link to another extension, optionally targeting a note
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionLink {
    pub extension: String,
    pub note_id: Option<NoteId>,
}

impl ExtensionLink {
    pub fn new(extension: impl Into<String>, note_id: Option<NoteId>) -> Self {
        Self {
            extension: extension.into(),
            note_id,
        }
    }
}

impl fmt::Display for ExtensionLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", SCHEME, urlencoding::encode(&self.extension))?;
        if let Some(id) = self.note_id {
            write!(f, "?{}={}", NOTE_ID_PARAM, id)?;
        }
        Ok(())
    }
}

impl FromStr for ExtensionLink {
    type Err = LinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s
            .strip_prefix(SCHEME)
            .ok_or_else(|| LinkError::NotAnExtensionLink(s.to_string()))?;
        let (name, query) = rest.split_once('?').unwrap_or((rest, ""));
        let extension = urlencoding::decode(name)
            .map_err(|_| LinkError::MissingName)?
            .into_owned();
        if extension.is_empty() {
            return Err(LinkError::MissingName);
        }

        let mut note_id = None;
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            if key != NOTE_ID_PARAM {
                continue;
            }
            let value = urlencoding::decode(value)
                .map_err(|_| LinkError::InvalidNoteId(value.to_string()))?;
            note_id = Some(
                value
                    .parse::<NoteId>()
                    .map_err(|_| LinkError::InvalidNoteId(value.to_string()))?,
            );
        }

        Ok(Self {
            extension,
            note_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_with_and_without_note() {
        assert_eq!(
            ExtensionLink::new("Note-Added-Action", None).to_string(),
            "extension:Note-Added-Action"
        );
        assert_eq!(
            ExtensionLink::new("Note-Added-Action", Some(NoteId(1717171717000))).to_string(),
            "extension:Note-Added-Action?noteId=1717171717000"
        );
    }

    #[test]
    fn test_parse() {
        let link: ExtensionLink = "extension:Note-Added-Action?noteId=42".parse().unwrap();
        assert_eq!(link.extension, "Note-Added-Action");
        assert_eq!(link.note_id, Some(NoteId(42)));

        let link: ExtensionLink = "extension:Note-Added-Action?foo=bar".parse().unwrap();
        assert_eq!(link.note_id, None);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            "https://example.com".parse::<ExtensionLink>(),
            Err(LinkError::NotAnExtensionLink(_))
        ));
        assert_eq!("extension:?noteId=1".parse::<ExtensionLink>(), Err(LinkError::MissingName));
        assert!(matches!(
            "extension:X?noteId=abc".parse::<ExtensionLink>(),
            Err(LinkError::InvalidNoteId(_))
        ));
    }
}
