use dioxus::prelude::*;

use crate::page::ErrorView;
use crate::routes;

#[component]
pub fn ErrorPage(view: ErrorView) -> Element {
    let ErrorView { user, title, message } = view;
    let (back_href, back_label) = if user.is_some() {
        (routes::NOTES, "Back to notes")
    } else {
        (routes::HOME, "Back home")
    };

    rsx! {
        div {
            class: "card narrow",
            h1 { {title} }
            div { class: "error", role: "alert", {message} }
            p { a { href: back_href, {back_label} } }
        }
    }
}
