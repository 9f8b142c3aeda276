//! Wire types exchanged with the notes service.

mod note;
mod user;

pub use note::{Note, NoteInput, NotePatch, NoteQuery};
pub use user::{AuthResponse, AuthUser, Credentials};

use serde::{Deserialize, Deserializer};

/// Accept identifiers sent either as JSON strings or as JSON numbers.
pub(crate) fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(text) => text,
        Id::Number(number) => number.to_string(),
    })
}
