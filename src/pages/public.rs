//! Public-facing pages.

use axum::{extract::State, response::Html};

use crate::http::AppState;
use crate::pages::layout;

pub async fn home(State(state): State<AppState>) -> Html<String> {
    let main = concat!(
        "<main class=\"mx-auto min-h-screen max-w-5xl px-6 py-16\">",
        "<h1 class=\"text-4xl font-bold tracking-tight\">NLC Website</h1>",
        "<p class=\"mt-4 text-lg text-slate-700\">Public-facing pages are served from the site root.</p>",
        "</main>",
    );
    Html(layout::render(&state.config, "/", main))
}
