use dioxus::prelude::*;

use crate::page::LoginView;
use crate::routes;

/// One form, two submit buttons: `_intent=login` signs in, `_intent=register`
/// creates the account first.
#[component]
pub fn LoginPage(view: LoginView) -> Element {
    let LoginView {
        email,
        error,
        notice,
    } = view;

    rsx! {
        div {
            class: "card narrow",
            h1 { "Welcome" }
            p { class: "muted", "Sign in, or create an account to start taking notes." }
            if let Some(notice) = notice {
                div { class: "notice", role: "status", {notice} }
            }
            if let Some(error) = error {
                div { class: "error", role: "alert", {error} }
            }
            form {
                method: "post",
                action: routes::LOGIN,
                class: "stack",
                label {
                    "Email"
                    input {
                        r#type: "email",
                        name: "email",
                        autocomplete: "email",
                        placeholder: "you@example.com",
                        required: true,
                        value: "{email}",
                    }
                }
                label {
                    "Password"
                    input {
                        r#type: "password",
                        name: "password",
                        autocomplete: "current-password",
                        required: true,
                    }
                }
                div {
                    class: "actions",
                    button { r#type: "submit", name: "_intent", value: "login", class: "primary", "Sign in" }
                    button { r#type: "submit", name: "_intent", value: "register", "Create account" }
                }
            }
        }
    }
}
