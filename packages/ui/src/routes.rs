//! Paths the rendered pages link and post to.

use api::NoteQuery;

pub const HOME: &str = "/";
pub const LOGIN: &str = "/login";
pub const LOGOUT: &str = "/logout";
pub const NOTES: &str = "/notes";
pub const NEW_NOTE: &str = "/notes/new";

/// `/notes` with the listing filter preserved.
pub fn notes(filter: &NoteQuery) -> String {
    format!("{NOTES}{}", filter.to_query_string())
}

/// `/notes/<id>` with the id percent-encoded and the listing filter preserved.
pub fn note(id: &str, filter: &NoteQuery) -> String {
    format!("{NOTES}/{}{}", urlencoding::encode(id), filter.to_query_string())
}
