//! View rendering
//!
//! The presenter hands a finished [`ViewModel`] to a [`Renderer`]. The
//! default [`HtmlRenderer`] produces a self-contained search page; every
//! value taken from the view model is HTML-escaped.

use std::fmt::Write;

use crate::models::ViewModel;

/// Turns a view model into a response body
pub trait Renderer: Send + Sync {
    fn render(&self, view: &ViewModel) -> String;
}

/// Escape text for use in HTML content and quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Built-in HTML search page
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    title: String,
}

impl HtmlRenderer {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new("Search")
    }
}

impl Renderer for HtmlRenderer {
    fn render(&self, view: &ViewModel) -> String {
        let base = escape_html(&view.base);
        let query = escape_html(&view.query);
        let title = escape_html(&self.title);

        // Writing into a String cannot fail
        let mut html = String::with_capacity(4096);
        let _ = write!(
            html,
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <link rel="stylesheet" href="{base}/static/quarry.css">
</head>
<body>
<main class="container">
    <form class="search-form" action="{base}/" method="get">
        <input type="search" name="q" value="{query}" placeholder="Search" autofocus>
        <button type="submit">Search</button>
    </form>
"#
        );

        if view.no_results {
            let _ = writeln!(
                html,
                r#"    <p class="no-results">No results found for <strong>{query}</strong>.</p>"#
            );
        }

        if !view.results.is_empty() {
            html.push_str("    <ul class=\"results\">\n");
            for result in &view.results {
                let _ = writeln!(
                    html,
                    r#"        <li><a href="{}">{}</a></li>"#,
                    escape_html(&result.url),
                    escape_html(&result.title)
                );
            }
            html.push_str("    </ul>\n");
        }

        if let Some(pagination) = &view.pagination {
            html.push_str("    <nav aria-label=\"Search result pages\">\n        <ul class=\"pagination\">\n");

            let prev = pagination.prev_link.as_deref().unwrap_or("#");
            let _ = writeln!(
                html,
                r#"            <li class="page-item{}"><a class="page-link" href="{}">&laquo;</a></li>"#,
                if pagination.no_prev { " disabled" } else { "" },
                escape_html(prev)
            );

            for page in &pagination.pages {
                let class = if page.is_ellipsis() {
                    " disabled"
                } else if page.disabled {
                    " active"
                } else {
                    ""
                };
                let _ = writeln!(
                    html,
                    r#"            <li class="page-item{}"><a class="page-link" href="{}">{}</a></li>"#,
                    class,
                    escape_html(&page.link),
                    escape_html(&page.text)
                );
            }

            let next = pagination.next_link.as_deref().unwrap_or("#");
            let _ = writeln!(
                html,
                r#"            <li class="page-item{}"><a class="page-link" href="{}">&raquo;</a></li>"#,
                if pagination.no_next { " disabled" } else { "" },
                escape_html(next)
            );

            html.push_str("        </ul>\n    </nav>\n");
        }

        html.push_str("</main>\n</body>\n</html>\n");
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PageLink, PaginationView, ResultEntry};

    fn view() -> ViewModel {
        ViewModel {
            query: "<script>".to_string(),
            base: "/search".to_string(),
            results: vec![ResultEntry {
                url: "https://example.org/a?x=1&y=2".to_string(),
                title: "Tom & Jerry".to_string(),
            }],
            no_results: false,
            pagination: None,
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"<a href="x">'&'</a>"#), "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;");
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_values_escaped() {
        let html = HtmlRenderer::default().render(&view());

        assert!(html.contains(r#"value="&lt;script&gt;""#));
        assert!(!html.contains("<script>"));
        assert!(html.contains(r#"<a href="https://example.org/a?x=1&amp;y=2">Tom &amp; Jerry</a>"#));
        assert!(html.contains(r#"action="/search/""#));
    }

    #[test]
    fn test_no_results_notice() {
        let mut view = view();
        view.results.clear();
        view.no_results = true;

        let html = HtmlRenderer::default().render(&view);
        assert!(html.contains("No results found"));
        assert!(!html.contains("class=\"results\""));
    }

    #[test]
    fn test_pagination_markup() {
        let mut view = view();
        view.pagination = Some(PaginationView {
            no_prev: true,
            prev_link: None,
            no_next: false,
            next_link: Some("/search/?q=x&p=2".to_string()),
            pages: vec![
                PageLink {
                    disabled: true,
                    link: "#".to_string(),
                    text: "1".to_string(),
                },
                PageLink {
                    disabled: false,
                    link: "/search/?q=x&p=2".to_string(),
                    text: "2".to_string(),
                },
                PageLink::ellipsis(),
            ],
        });

        let html = HtmlRenderer::default().render(&view);
        assert!(html.contains(r##"<li class="page-item active"><a class="page-link" href="#">1</a></li>"##));
        assert!(html.contains(r#"<li class="page-item"><a class="page-link" href="/search/?q=x&amp;p=2">2</a></li>"#));
        assert!(html.contains(r##"<li class="page-item disabled"><a class="page-link" href="#">...</a></li>"##));
        assert!(html.contains(r##"<li class="page-item disabled"><a class="page-link" href="#">&laquo;</a></li>"##));
    }

    #[test]
    fn test_no_pagination_markup_without_pagination() {
        let html = HtmlRenderer::default().render(&view());
        assert!(!html.contains("class=\"pagination\""));
    }
}
