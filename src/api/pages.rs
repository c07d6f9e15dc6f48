//! Server-rendered HTML for the single-page shell.

use std::fmt::Write;

use crate::models::Recommendation;

pub const APP_TITLE: &str = "Movie Recommendation App";

/// Navigation entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    About,
}

impl Page {
    const ALL: [Page; 2] = [Page::Home, Page::About];

    fn label(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::About => "About",
        }
    }

    fn path(self) -> &'static str {
        match self {
            Page::Home => "/",
            Page::About => "/about",
        }
    }
}

/// Banner shown above the results
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Info(String),
    Warning(String),
    Error(String),
}

impl Notice {
    fn class(&self) -> &'static str {
        match self {
            Notice::Success(_) => "success",
            Notice::Info(_) => "info",
            Notice::Warning(_) => "warning",
            Notice::Error(_) => "error",
        }
    }

    fn message(&self) -> &str {
        match self {
            Notice::Success(m) | Notice::Info(m) | Notice::Warning(m) | Notice::Error(m) => m,
        }
    }
}

/// Everything the home page needs to render
#[derive(Debug, Default)]
pub struct HomeView<'a> {
    pub genres: &'a [String],
    pub query: &'a str,
    pub selected_genre: Option<&'a str>,
    pub notices: Vec<Notice>,
    pub rows: Vec<Recommendation>,
    pub search_url: &'a str,
}

pub fn home(view: &HomeView<'_>) -> String {
    let mut body = String::from("<h2>Home</h2>\n");
    body.push_str(&search_form(view));

    for notice in &view.notices {
        let _ = writeln!(
            body,
            r#"<div class="notice {}">{}</div>"#,
            notice.class(),
            escape_html(notice.message())
        );
    }

    if !view.rows.is_empty() {
        body.push_str(&results_table(&view.rows, view.search_url));
    }

    layout(Page::Home, &body)
}

pub fn about() -> String {
    layout(
        Page::About,
        "<h2>About</h2>\n<p>Find a movie by title and get recommendations from people who loved it.</p>\n",
    )
}

fn search_form(view: &HomeView<'_>) -> String {
    let mut form = String::from(r#"<form method="post" action="/" class="search">"#);
    let _ = write!(
        form,
        r#"<label>Movie Title <input type="text" name="title" value="{}"></label>"#,
        escape_html(view.query)
    );

    form.push_str(r#"<label>Genre <select name="genre">"#);
    for (i, genre) in view.genres.iter().enumerate() {
        let selected = match view.selected_genre {
            Some(choice) => choice == genre,
            None => i == 0,
        };
        let _ = write!(
            form,
            r#"<option value="{0}"{1}>{0}</option>"#,
            escape_html(genre),
            if selected { " selected" } else { "" }
        );
    }
    form.push_str("</select></label>");

    form.push_str(r#"<button type="submit">Search</button></form>"#);
    form.push('\n');
    form
}

fn results_table(rows: &[Recommendation], search_url: &str) -> String {
    let mut table = String::from(
        "<table class=\"results\">\n<thead><tr><th>Title</th><th>Genres</th><th>Score</th></tr></thead>\n<tbody>\n",
    );
    for row in rows {
        let _ = writeln!(
            table,
            r#"<tr><td><a href="{}" target="_blank" rel="noopener">{}</a></td><td>{}</td><td>{:.4}</td></tr>"#,
            escape_html(&search_link(search_url, &row.display_title)),
            escape_html(&row.display_title),
            escape_html(&row.display_genres),
            row.score
        );
    }
    table.push_str("</tbody>\n</table>\n");
    table
}

/// External web search for a title
///
/// `q` is appended to any query string `search_url` already carries.
pub fn search_link(search_url: &str, title: &str) -> String {
    let separator = match search_url.find('?') {
        None => "?",
        Some(_) if search_url.ends_with(['?', '&']) => "",
        Some(_) => "&",
    };
    format!(
        "{}{}q={}",
        search_url,
        separator,
        urlencoding::encode(title)
    )
}

fn layout(active: Page, body: &str) -> String {
    let mut nav = String::new();
    for page in Page::ALL {
        let _ = write!(
            nav,
            r#"<a href="{}"{}>{}</a>"#,
            page.path(),
            if page == active { r#" class="active""# } else { "" },
            page.label()
        );
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
body {{ font-family: sans-serif; margin: 0; display: flex; }}
nav {{ width: 12rem; padding: 1rem; background: #f0f2f6; min-height: 100vh; }}
nav a {{ display: block; padding: .4rem 0; color: #31333f; }}
nav a.active {{ font-weight: bold; }}
main {{ padding: 1rem 2rem; flex: 1; }}
form.search {{ display: flex; gap: 1rem; align-items: end; }}
.notice {{ margin: 1rem 0; padding: .75rem; border-radius: .25rem; }}
.success {{ background: #dff0d8; }}
.info {{ background: #e7f0fb; }}
.warning {{ background: #fcf8e3; }}
.error {{ background: #f8d7da; }}
table.results {{ border-collapse: collapse; }}
table.results td, table.results th {{ border: 1px solid #ddd; padding: .4rem .8rem; }}
</style>
</head>
<body>
<nav><strong>Menu</strong>{nav}</nav>
<main>
<h1>{title}</h1>
{body}</main>
</body>
</html>
"#,
        title = APP_TITLE,
        nav = nav,
        body = body,
    )
}

/// Escapes text for use in HTML content and quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
