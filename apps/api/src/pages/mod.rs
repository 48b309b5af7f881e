//! Server-rendered pages: landing, candidate submission form, candidate search.
//!
//! Each page is a static body fragment wrapped in the shared layout. Form validation on
//! these pages is advisory only; the API does not repeat it.

use axum::response::Html;

const LANDING_BODY: &str = include_str!("templates/landing.html");
const FORM_BODY: &str = include_str!("templates/form.html");
const SEARCH_BODY: &str = include_str!("templates/search.html");
const STYLES: &str = include_str!("templates/styles.css");

const NAV_LINKS: &[(&str, &str)] = &[("Home", "/"), ("Form", "/form"), ("Search", "/search")];

/// Wraps a body fragment in the document shell and navbar, highlighting `active_path`.
pub fn layout(title: &str, active_path: &str, body: &str) -> String {
    let nav = NAV_LINKS
        .iter()
        .map(|(label, href)| {
            let class = if *href == active_path {
                "nav-link active"
            } else {
                "nav-link"
            };
            format!(r#"<a class="{class}" href="{href}">{label}</a>"#)
        })
        .collect::<Vec<_>>()
        .join("\n        ");

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title} · SkillScan</title>
  <style>{STYLES}</style>
</head>
<body>
  <header class="navbar">
    <div class="navbar-inner">
      <h1>SkillScan</h1>
      <nav>
        {nav}
      </nav>
    </div>
  </header>
  <main>
{body}
  </main>
</body>
</html>
"#
    )
}

/// GET /
pub async fn landing_page() -> Html<String> {
    Html(layout("Home", "/", LANDING_BODY))
}

/// GET /form
pub async fn form_page() -> Html<String> {
    Html(layout("Add Candidate", "/form", FORM_BODY))
}

/// GET /search
pub async fn search_page() -> Html<String> {
    Html(layout("Search Candidates", "/search", SEARCH_BODY))
}
