use api::Note;
use dioxus::prelude::*;

use crate::format::{preview, short_date};
use crate::page::NoteListView;
use crate::routes;

/// Listing with search, tag filter and quick-add. Each entry links to its
/// detail page carrying the active filter along.
#[component]
pub fn NoteListPage(view: NoteListView) -> Element {
    let NoteListView {
        notes,
        filter,
        error,
        ..
    } = view;
    let q = filter.q.clone();
    let tag = filter.tag.clone();

    rsx! {
        div {
            class: "columns",
            aside {
                class: "card",
                form {
                    method: "get",
                    action: routes::NOTES,
                    class: "search",
                    input { r#type: "search", name: "q", placeholder: "Search notes", value: "{q}" }
                    input { r#type: "text", name: "tag", placeholder: "Filter by tag", value: "{tag}" }
                    button { r#type: "submit", "Search" }
                }
                div {
                    class: "list-header",
                    h2 { "Notes" }
                    a { class: "button primary", href: routes::NEW_NOTE, "New" }
                }
                if let Some(error) = error {
                    div { class: "error", role: "alert", {error} }
                }
                ul {
                    class: "note-list",
                    if notes.is_empty() {
                        li { class: "empty", "No notes found." }
                    }
                    for note in notes.iter() {
                        NoteListItem { href: routes::note(&note.id, &filter), note: note.clone() }
                    }
                }
                form {
                    method: "post",
                    action: routes::NOTES,
                    class: "quick-add",
                    input { r#type: "text", name: "title", placeholder: "Quick note title", required: true }
                    button { r#type: "submit", "Add" }
                }
            }
            section {
                class: "card placeholder",
                h2 { "Select a note to view or edit" }
                p { "Or start a new one with the New button." }
            }
        }
    }
}

#[component]
fn NoteListItem(note: Note, href: String) -> Element {
    let title = note.display_title().to_string();
    let date = note.last_modified().map(short_date);
    let excerpt = preview(&note.content);
    let tags = note.tags;

    rsx! {
        li {
            a {
                class: "note-link",
                href: "{href}",
                div {
                    class: "note-row",
                    h3 { {title} }
                    if let Some(date) = date {
                        span { class: "badge", {date} }
                    }
                }
                if !excerpt.is_empty() {
                    p { class: "preview", {excerpt} }
                }
                if !tags.is_empty() {
                    div {
                        class: "tags",
                        for tag in tags {
                            span { class: "tag", {tag} }
                        }
                    }
                }
            }
        }
    }
}
