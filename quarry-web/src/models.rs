//! Backend payload and view-model types
//!
//! The backend speaks Solr's JSON response format:
//! `{"response": {"numFound": N, "start": S, "docs": [...]}}`.
//! Anything that does not match this shape is rejected as a whole; there is
//! no best-effort rendering of partial payloads.

use serde::{Deserialize, Serialize};

/// Top-level backend response body
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub response: SearchResult,
}

impl SearchResponse {
    /// Parse a backend response body
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }
}

/// Result set for one backend query
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResult {
    /// Total matches across all pages
    #[serde(rename = "numFound")]
    pub num_found: u64,
    /// Offset of the first returned document
    pub start: u64,
    /// Documents on this page, in rank order
    pub docs: Vec<Document>,
}

/// A single backend document
#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    pub id: String,
    #[serde(default)]
    pub title: Option<Title>,
}

/// Document title: Solr returns stored fields either as a scalar or as a
/// multi-valued array
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Title {
    Single(String),
    Multi(Vec<String>),
}

impl Document {
    /// Title to display, if the document carries a non-empty one
    ///
    /// For multi-valued titles only the first value is considered.
    pub fn display_title(&self) -> Option<&str> {
        let title = match self.title.as_ref()? {
            Title::Single(title) => title.as_str(),
            Title::Multi(values) => values.first()?.as_str(),
        };
        (!title.is_empty()).then_some(title)
    }
}

/// Rendered result entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultEntry {
    pub url: String,
    pub title: String,
}

/// Text of the ellipsis slot in the pagination bar
pub const ELLIPSIS: &str = "...";

/// Link target for disabled slots
pub const NO_LINK: &str = "#";

/// One slot in the pagination bar
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageLink {
    pub disabled: bool,
    pub link: String,
    pub text: String,
}

impl PageLink {
    /// Disabled `...` separator
    pub fn ellipsis() -> Self {
        Self {
            disabled: true,
            link: NO_LINK.to_string(),
            text: ELLIPSIS.to_string(),
        }
    }

    /// Whether this slot is a separator rather than a page number
    pub fn is_ellipsis(&self) -> bool {
        self.disabled && self.text == ELLIPSIS
    }
}

/// Pagination controls, present only when results span several pages
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationView {
    pub no_prev: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_link: Option<String>,
    pub no_next: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_link: Option<String>,
    pub pages: Vec<PageLink>,
}

/// Everything the renderer needs for one search page
///
/// Serializes flat: a `pagination` flag, and the pagination fields beside it
/// only when the flag is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModel {
    pub query: String,
    pub base: String,
    pub results: Vec<ResultEntry>,
    pub no_results: bool,
    /// `None` when every match fits on one page
    pub pagination: Option<PaginationView>,
}

impl ViewModel {
    /// Whether the pagination bar should be shown
    pub fn has_pagination(&self) -> bool {
        self.pagination.is_some()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FlatViewModel<'a> {
    query: &'a str,
    base: &'a str,
    results: &'a [ResultEntry],
    no_results: bool,
    pagination: bool,
    #[serde(flatten)]
    controls: Option<&'a PaginationView>,
}

impl Serialize for ViewModel {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        FlatViewModel {
            query: &self.query,
            base: &self.base,
            results: &self.results,
            no_results: self.no_results,
            pagination: self.has_pagination(),
            controls: self.pagination.as_ref(),
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_solr_response() {
        let body = r#"{
            "responseHeader": {"status": 0, "QTime": 3},
            "response": {
                "numFound": 2,
                "start": 0,
                "docs": [
                    {"id": "/srv/a.html", "title": ["Alpha", "ignored"]},
                    {"id": "/srv/b.html", "title": "Beta", "score": 1.5}
                ]
            }
        }"#;

        let parsed = SearchResponse::from_json(body).unwrap();
        assert_eq!(parsed.response.num_found, 2);
        assert_eq!(parsed.response.docs.len(), 2);
        assert_eq!(parsed.response.docs[0].display_title(), Some("Alpha"));
        assert_eq!(parsed.response.docs[1].display_title(), Some("Beta"));
    }

    #[test]
    fn test_missing_or_empty_titles() {
        let body = r#"{"response": {"numFound": 4, "start": 0, "docs": [
            {"id": "a"},
            {"id": "b", "title": null},
            {"id": "c", "title": ""},
            {"id": "d", "title": []}
        ]}}"#;

        let parsed = SearchResponse::from_json(body).unwrap();
        for doc in &parsed.response.docs {
            assert_eq!(doc.display_title(), None, "doc {}", doc.id);
        }
    }

    #[test]
    fn test_malformed_payloads_rejected() {
        let bodies = [
            "not json",
            r#"{}"#,
            r#"{"response": {"numFound": 1, "start": 0, "docs": {}}}"#,
            r#"{"response": {"start": 0, "docs": []}}"#,
            r#"{"response": {"numFound": 1, "start": 0, "docs": [{"title": "no id"}]}}"#,
            r#"{"response": {"numFound": -1, "start": 0, "docs": []}}"#,
        ];

        for body in bodies {
            assert!(SearchResponse::from_json(body).is_err(), "accepted {}", body);
        }
    }

    #[test]
    fn test_view_model_serialization() {
        let view = ViewModel {
            query: "rust".to_string(),
            base: "/search".to_string(),
            results: vec![],
            no_results: true,
            pagination: Some(PaginationView {
                no_prev: true,
                prev_link: None,
                no_next: false,
                next_link: Some("/search/?q=rust&p=2".to_string()),
                pages: vec![PageLink::ellipsis()],
            }),
        };

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["noResults"], true);
        assert_eq!(json["pagination"], true);
        assert_eq!(json["noPrev"], true);
        assert!(json.get("prevLink").is_none());
        assert_eq!(json["noNext"], false);
        assert_eq!(json["nextLink"], "/search/?q=rust&p=2");
        assert_eq!(json["pages"][0]["text"], "...");
    }

    #[test]
    fn test_view_model_without_pagination_serialization() {
        let view = ViewModel {
            query: "rust".to_string(),
            base: "/search".to_string(),
            results: vec![ResultEntry {
                url: "https://example.org/a.html".to_string(),
                title: "A".to_string(),
            }],
            no_results: false,
            pagination: None,
        };

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["pagination"], false);
        assert_eq!(json["results"][0]["url"], "https://example.org/a.html");
        for key in ["noPrev", "prevLink", "noNext", "nextLink", "pages"] {
            assert!(json.get(key).is_none(), "unexpected {}", key);
        }
    }
}
