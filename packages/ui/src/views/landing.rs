use dioxus::prelude::*;

use crate::routes;

#[component]
pub fn LandingPage() -> Element {
    rsx! {
        section {
            class: "hero",
            h1 { "Simple Notes" }
            p { class: "muted", "Capture your thoughts quickly. Sign in to get started." }
            a { class: "button primary", href: routes::LOGIN, "Sign in" }
        }
    }
}
