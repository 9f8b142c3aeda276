use api::AuthUser;
use dioxus::prelude::*;

use crate::routes;

/// Top bar: brand link plus either the signed-in user's email and a logout
/// button, or a sign-in link.
#[component]
pub fn Navbar(#[props(!optional)] user: Option<AuthUser>) -> Element {
    rsx! {
        header {
            class: "navbar",
            a { class: "brand", href: routes::HOME, "Simple Notes" }
            nav {
                class: "navbar-actions",
                if let Some(user) = user {
                    a { href: routes::NOTES, "Notes" }
                    span { class: "muted", {user.email} }
                    form {
                        method: "post",
                        action: routes::LOGOUT,
                        class: "inline",
                        button { r#type: "submit", class: "link", "Log out" }
                    }
                } else {
                    a { href: routes::LOGIN, "Sign in" }
                }
            }
        }
    }
}
