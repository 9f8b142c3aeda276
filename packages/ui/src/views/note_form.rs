use dioxus::prelude::*;

use crate::page::NoteDraft;

/// Title, tags and content inputs shared by the create and edit forms.
///
/// The edit form leaves the title optional so a cleared title still lets the
/// delete button submit.
#[component]
pub fn NoteFields(draft: NoteDraft, #[props(default)] require_title: bool) -> Element {
    let NoteDraft {
        title,
        content,
        tags,
    } = draft;

    rsx! {
        label {
            "Title"
            input { r#type: "text", name: "title", required: require_title, value: "{title}" }
        }
        label {
            "Tags"
            input {
                r#type: "text",
                name: "tags",
                placeholder: "comma, separated, tags",
                value: "{tags}",
            }
        }
        label {
            "Content"
            textarea { name: "content", rows: "14", {content} }
        }
    }
}
