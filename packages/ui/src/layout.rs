use api::AuthUser;
use dioxus::prelude::*;

use crate::Navbar;

// Rendered as escaped text, so no child combinators, ampersands or quotes.
const STYLES: &str = "
:root { color-scheme: light; font-family: system-ui, sans-serif; }
body { margin: 0; background: #f5f5f4; color: #1c1917; }
a { color: #1d4ed8; text-decoration: none; }
a:hover { text-decoration: underline; }
.navbar { display: flex; align-items: center; justify-content: space-between; padding: 0.75rem 1.5rem; background: #fff; border-bottom: 1px solid #e7e5e4; }
.brand { font-weight: 600; color: #1c1917; }
.navbar-actions { display: flex; align-items: center; gap: 1rem; }
.container { max-width: 1100px; margin: 2rem auto; padding: 0 1.5rem; }
.card { background: #fff; border: 1px solid #e7e5e4; border-radius: 0.5rem; padding: 1.5rem; }
.narrow { max-width: 420px; margin: 0 auto; }
.columns { display: grid; grid-template-columns: 340px 1fr; gap: 1.5rem; }
.stack { display: flex; flex-direction: column; gap: 0.75rem; }
.actions { display: flex; gap: 0.5rem; align-items: center; }
.inline { display: inline; margin: 0; }
label { display: flex; flex-direction: column; gap: 0.25rem; font-size: 0.9rem; }
input, textarea { font: inherit; padding: 0.5rem; border: 1px solid #d6d3d1; border-radius: 0.375rem; }
textarea { min-height: 16rem; resize: vertical; }
button, .button { font: inherit; padding: 0.45rem 0.9rem; border-radius: 0.375rem; border: 1px solid #d6d3d1; background: #fff; cursor: pointer; }
.primary { background: #1d4ed8; border-color: #1d4ed8; color: #fff; }
.danger { background: #b91c1c; border-color: #b91c1c; color: #fff; }
.link { border: none; background: none; color: #1d4ed8; padding: 0; }
.muted { color: #78716c; }
.error { background: #fef2f2; color: #b91c1c; border: 1px solid #fecaca; border-radius: 0.375rem; padding: 0.6rem 0.8rem; }
.notice { background: #fffbeb; color: #92400e; border: 1px solid #fde68a; border-radius: 0.375rem; padding: 0.6rem 0.8rem; }
.success { background: #f0fdf4; color: #166534; border: 1px solid #bbf7d0; border-radius: 0.375rem; padding: 0.6rem 0.8rem; }
.search { display: flex; flex-direction: column; gap: 0.5rem; margin-bottom: 1rem; }
.list-header { display: flex; align-items: center; justify-content: space-between; }
.note-list { list-style: none; margin: 0 0 1rem; padding: 0; }
.note-list li { border-top: 1px solid #e7e5e4; }
.note-link { display: block; padding: 0.75rem 0; color: inherit; }
.note-row { display: flex; justify-content: space-between; gap: 0.5rem; }
.note-row h3 { margin: 0; font-size: 1rem; }
.preview { margin: 0.25rem 0 0; color: #57534e; font-size: 0.9rem; }
.badge { font-size: 0.75rem; color: #78716c; white-space: nowrap; }
.tags { display: flex; flex-wrap: wrap; gap: 0.25rem; margin-top: 0.35rem; }
.tag { font-size: 0.75rem; background: #e0e7ff; color: #3730a3; border-radius: 999px; padding: 0.1rem 0.5rem; }
.empty { padding: 1rem 0; color: #78716c; }
.quick-add { display: flex; gap: 0.5rem; }
.quick-add input { flex: 1; }
.placeholder { display: flex; flex-direction: column; align-items: center; justify-content: center; color: #57534e; }
.hero { text-align: center; padding: 4rem 1rem; }
";

/// Contents of `<head>`: charset, viewport, title and the stylesheet.
#[component]
pub fn DocumentHead(page_title: String) -> Element {
    rsx! {
        meta { charset: "utf-8" }
        meta { name: "viewport", content: "width=device-width, initial-scale=1" }
        title { "{page_title}" }
        style { {STYLES} }
    }
}

/// Contents of `<body>` shared by every page.
#[component]
pub fn Layout(#[props(!optional)] user: Option<AuthUser>, children: Element) -> Element {
    rsx! {
        Navbar { user }
        main { class: "container", {children} }
    }
}
