use dioxus::prelude::*;

use crate::page::NewNoteView;
use crate::routes;
use crate::views::NoteFields;

#[component]
pub fn NewNotePage(view: NewNoteView) -> Element {
    let NewNoteView { draft, error, .. } = view;

    rsx! {
        div {
            class: "card",
            h1 { "New note" }
            if let Some(error) = error {
                div { class: "error", role: "alert", {error} }
            }
            form {
                method: "post",
                action: routes::NEW_NOTE,
                class: "stack",
                NoteFields { draft, require_title: true }
                div {
                    class: "actions",
                    button { r#type: "submit", class: "primary", "Create note" }
                    a { class: "button", href: routes::NOTES, "Cancel" }
                }
            }
        }
    }
}
