//! This crate contains all the pages the web server renders.
//!
//! Pages are plain Dioxus components rendered to HTML on the server with
//! `dioxus-ssr`. They carry no event handlers: every interaction is a link or
//! a form submission handled by the `web` crate, which builds a [`Page`] and
//! passes it to [`render_page`].

use dioxus::prelude::*;

mod format;

pub mod page;
pub use page::{
    ErrorView, LoginView, NewNoteView, NoteDetailView, NoteDraft, NoteListView, Page,
};

pub mod routes;

pub mod views;
use views::{ErrorPage, LandingPage, LoginPage, NewNotePage, NoteDetailPage, NoteListPage};

mod navbar;
pub use navbar::Navbar;

mod layout;
pub use layout::{DocumentHead, Layout};

/// Render a complete HTML document for `page`.
///
/// The document, `head` and `body` tags are written here; Dioxus renders
/// what goes inside them.
pub fn render_page(page: &Page) -> String {
    let head = dioxus_ssr::render_element(rsx! {
        DocumentHead { page_title: page.title() }
    });
    let body = dioxus_ssr::render_element(rsx! {
        App { page: page.clone() }
    });
    format!(
        "<!DOCTYPE html><html lang=\"en\"><head>{head}</head><body>{body}</body></html>"
    )
}

#[component]
fn App(page: Page) -> Element {
    let user = page.user().cloned();

    let content = match page {
        Page::Landing => rsx! { LandingPage {} },
        Page::Login(view) => rsx! { LoginPage { view } },
        Page::NoteList(view) => rsx! { NoteListPage { view } },
        Page::NewNote(view) => rsx! { NewNotePage { view } },
        Page::NoteDetail(view) => rsx! { NoteDetailPage { view } },
        Page::Error(view) => rsx! { ErrorPage { view } },
    };

    rsx! {
        Layout { user, {content} }
    }
}
