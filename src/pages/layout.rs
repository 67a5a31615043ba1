//! Root HTML layout shared by every page.

use crate::config::AppConfig;

pub const SITE_TITLE: &str = "NLC Website";
pub const SITE_DESCRIPTION: &str = "NLC public site and admin portal";

/// Wrap `main` (already-escaped markup) in the document shell.
///
/// `path` is the request path the canonical link points at.
pub fn render(config: &AppConfig, path: &str, main: &str) -> String {
    let canonical = config.public_app_url().link(path);
    format!(
        concat!(
            "<!DOCTYPE html>\n",
            "<html lang=\"en\">\n",
            "<head>\n",
            "<meta charset=\"utf-8\">\n",
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n",
            "<title>{title}</title>\n",
            "<meta name=\"description\" content=\"{description}\">\n",
            "<link rel=\"canonical\" href=\"{canonical}\">\n",
            "</head>\n",
            "<body>{main}</body>\n",
            "</html>\n",
        ),
        title = SITE_TITLE,
        description = SITE_DESCRIPTION,
        canonical = escape(&canonical),
        main = main,
    )
}

/// Escape text for HTML element content and attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}
