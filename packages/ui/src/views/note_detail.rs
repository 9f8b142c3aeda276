use dioxus::prelude::*;

use crate::page::NoteDetailView;
use crate::routes;
use crate::views::NoteFields;

/// Edit form for a single note. Save and delete share the form and are told
/// apart by the `_intent` value of the button pressed.
#[component]
pub fn NoteDetailPage(view: NoteDetailView) -> Element {
    let NoteDetailView {
        id,
        heading,
        draft,
        filter,
        error,
        saved,
        ..
    } = view;
    let action = routes::note(&id, &filter);
    let back = routes::notes(&filter);

    rsx! {
        div {
            class: "columns",
            aside {
                class: "card",
                p { a { href: "{back}", "← Back to list" } }
                p { class: "muted", "Editing" }
                h2 { {heading} }
            }
            section {
                class: "card",
                if saved {
                    div { class: "success", role: "status", "Saved." }
                }
                if let Some(error) = error {
                    div { class: "error", role: "alert", {error} }
                }
                form {
                    method: "post",
                    action: "{action}",
                    class: "stack",
                    NoteFields { draft }
                    div {
                        class: "actions",
                        button { r#type: "submit", name: "_intent", value: "save", class: "primary", "Save" }
                        button { r#type: "submit", name: "_intent", value: "delete", class: "danger", "Delete" }
                        a { class: "button", href: "{back}", "Cancel" }
                    }
                }
            }
        }
    }
}
