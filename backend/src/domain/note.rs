//! Note data model.
//!
//! A note belongs to exactly one owner for its whole lifetime; the id is
//! assigned by the note store at creation and never changes. Updates go
//! through [`NotePatch`], whose absent fields keep the stored value.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::user::Username;

/// Validation errors returned by the note value-object constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteValidationError {
    EmptyTitle,
    TitleTooLong { max: usize },
}

impl fmt::Display for NoteValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::TitleTooLong { max } => {
                write!(f, "title must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for NoteValidationError {}

/// Store-assigned note identifier, immutable after creation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct NoteId(i64);

impl NoteId {
    /// Wrap a raw identifier produced by the note store.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw integer value.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Maximum allowed length for a note title.
pub const TITLE_MAX: usize = 100;

/// Required, non-empty note title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NoteTitle(String);

impl NoteTitle {
    /// Validate and construct a [`NoteTitle`] from owned input.
    pub fn new(title: impl Into<String>) -> Result<Self, NoteValidationError> {
        Self::from_owned(title.into())
    }

    fn from_owned(title: String) -> Result<Self, NoteValidationError> {
        if title.trim().is_empty() {
            return Err(NoteValidationError::EmptyTitle);
        }
        if title.chars().count() > TITLE_MAX {
            return Err(NoteValidationError::TitleTooLong { max: TITLE_MAX });
        }
        Ok(Self(title))
    }
}

impl AsRef<str> for NoteTitle {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for NoteTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<NoteTitle> for String {
    fn from(value: NoteTitle) -> Self {
        value.0
    }
}

impl TryFrom<String> for NoteTitle {
    type Error = NoteValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Content and title for a note that does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
    title: NoteTitle,
    content: String,
}

impl NoteDraft {
    /// Build a draft; content may be empty, the title may not.
    pub fn new(title: NoteTitle, content: impl Into<String>) -> Self {
        Self {
            title,
            content: content.into(),
        }
    }

    /// Title for the new note.
    pub fn title(&self) -> &NoteTitle {
        &self.title
    }

    /// Body text for the new note.
    pub fn content(&self) -> &str {
        self.content.as_str()
    }
}

/// Partial update for an existing note.
///
/// `None` fields keep the stored value, so a client can change the
/// title and content independently.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotePatch {
    title: Option<NoteTitle>,
    content: Option<String>,
}

impl NotePatch {
    /// Build a patch from optional replacement values.
    pub fn new(title: Option<NoteTitle>, content: Option<String>) -> Self {
        Self { title, content }
    }

    /// Replacement title, if any.
    pub fn title(&self) -> Option<&NoteTitle> {
        self.title.as_ref()
    }

    /// Replacement content, if any.
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }
}

/// Persisted note owned by exactly one user.
///
/// ## Invariants
/// - `id` and `owner` never change after creation; notes are not
///   transferable between accounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    id: NoteId,
    title: NoteTitle,
    content: String,
    owner: Username,
}

impl Note {
    /// Build a [`Note`] from validated components.
    pub fn new(id: NoteId, title: NoteTitle, content: impl Into<String>, owner: Username) -> Self {
        Self {
            id,
            title,
            content: content.into(),
            owner,
        }
    }

    /// Store-assigned identifier.
    pub fn id(&self) -> NoteId {
        self.id
    }

    /// Current title.
    pub fn title(&self) -> &NoteTitle {
        &self.title
    }

    /// Current body text.
    pub fn content(&self) -> &str {
        self.content.as_str()
    }

    /// Owning account.
    pub fn owner(&self) -> &Username {
        &self.owner
    }

    /// Apply a patch in place; absent fields keep their stored values.
    pub fn apply(&mut self, patch: &NotePatch) {
        if let Some(title) = patch.title() {
            self.title = title.clone();
        }
        if let Some(content) = patch.content() {
            self.content = content.to_owned();
        }
    }
}
