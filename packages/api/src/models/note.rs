//! # Notes and note requests
//!
//! [`Note`] is the record owned by the remote service. The remote may omit
//! `tags` (or send `null`) and either timestamp; both decode to empty values.
//! [`NoteInput`] is the body of `POST /notes`, [`NotePatch`] the partial body
//! of `PUT /notes/:id`, and [`NoteQuery`] the `q`/`tag` filter of the listing,
//! which also travels along page links so the list can be restored.

use serde::{Deserialize, Deserializer, Serialize};

/// A note as returned by the notes service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Note {
    #[serde(deserialize_with = "super::id_string")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Note {
    pub const UNTITLED: &'static str = "Untitled";

    /// Title for display, `"Untitled"` when blank.
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            Self::UNTITLED
        } else {
            &self.title
        }
    }

    /// Most recent timestamp the service reported.
    pub fn last_modified(&self) -> Option<&str> {
        self.updated_at.as_deref().or(self.created_at.as_deref())
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body of a note creation.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NoteInput {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
}

/// Partial note update; absent fields are left untouched by the service.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct NotePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl From<NoteInput> for NotePatch {
    fn from(input: NoteInput) -> Self {
        Self {
            title: Some(input.title),
            content: Some(input.content),
            tags: Some(input.tags),
        }
    }
}

/// Free-text and tag filter for the notes listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NoteQuery {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub tag: String,
}

impl NoteQuery {
    pub fn new(q: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            q: q.into(),
            tag: tag.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.q.is_empty() && self.tag.is_empty()
    }

    /// `?q=..&tag=..` with empty filters left out, or `""` when there are none.
    pub fn to_query_string(&self) -> String {
        let params: Vec<String> = [("q", &self.q), ("tag", &self.tag)]
            .into_iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
            .collect();

        if params.is_empty() {
            String::new()
        } else {
            format!("?{}", params.join("&"))
        }
    }
}
