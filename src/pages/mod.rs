//! Server-rendered HTML pages.
//!
//! Pages are fixed markup wrapped in the shared [`layout`]. Only the canonical
//! link and echoed request paths are interpolated, and both are escaped.

pub mod layout;
pub mod public;

use crate::config::AppConfig;

/// 404 page for paths no route matched.
pub fn not_found(config: &AppConfig, path: &str) -> String {
    let main = format!(
        concat!(
            "<main class=\"mx-auto min-h-screen max-w-5xl px-6 py-16\">",
            "<h1 class=\"text-3xl font-semibold tracking-tight\">Page not found</h1>",
            "<p class=\"mt-4 text-slate-700\">Nothing is served at <code>{}</code>.</p>",
            "</main>",
        ),
        layout::escape(path)
    );
    layout::render(config, path, &main)
}
