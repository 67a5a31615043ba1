use axum::{extract::State, response::Html};

use crate::http::AppState;
use crate::pages::layout;

pub async fn home(State(state): State<AppState>) -> Html<String> {
    let main = concat!(
        "<main class=\"mx-auto min-h-screen max-w-5xl px-6 py-16\">",
        "<h1 class=\"text-3xl font-semibold tracking-tight\">Admin Dashboard</h1>",
        "<p class=\"mt-4 text-slate-700\">Admin routes are mounted under /admin.</p>",
        "</main>",
    );
    Html(layout::render(&state.config, "/admin", main))
}
