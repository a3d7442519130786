//! Result presenter
//!
//! Maps a backend result set onto the view model: display URL and title per
//! document, plus the pagination bar when matches span several pages.
//! Pure function of its inputs; identical inputs give identical views.

use quarry_common::{IdRewrite, SearchConfig};

use crate::models::{PageLink, PaginationView, ResultEntry, SearchResult, ViewModel, NO_LINK};
use crate::pagination::{self, Slot};
use crate::query::{encode_query_term, page_on};

/// View for a request without a query (no backend call)
pub fn empty_view(config: &SearchConfig) -> ViewModel {
    ViewModel {
        query: String::new(),
        base: config.base.clone(),
        results: Vec::new(),
        no_results: false,
        pagination: None,
    }
}

/// Build the view model using the configured id rewrite
pub fn present(q: &str, result: &SearchResult, config: &SearchConfig) -> ViewModel {
    present_with(q, result, config, &config.rewrite)
}

/// Build the view model with an explicit id rewrite
pub fn present_with(
    q: &str,
    result: &SearchResult,
    config: &SearchConfig,
    rewrite: &dyn IdRewrite,
) -> ViewModel {
    let results = result
        .docs
        .iter()
        .map(|doc| ResultEntry {
            url: rewrite.to_url(&doc.id),
            title: doc
                .display_title()
                .map(str::to_string)
                .unwrap_or_else(|| rewrite.to_title(&doc.id)),
        })
        .collect();

    let pagination = (result.num_found > config.page_size)
        .then(|| pagination_view(q, result, config));

    ViewModel {
        query: q.to_string(),
        base: config.base.clone(),
        results,
        no_results: result.num_found == 0,
        pagination,
    }
}

fn pagination_view(q: &str, result: &SearchResult, config: &SearchConfig) -> PaginationView {
    let total_pages = pagination::total_pages(result.num_found, config.page_size);
    let current = page_on(result.start, config.page_size);
    let links = PageLinks::new(&config.base, q);

    let no_prev = current <= 1;
    let no_next = current >= total_pages;

    let pages = pagination::window(
        current,
        total_pages,
        config.pagination_steps,
        config.pagination_bubble,
    )
    .into_iter()
    .map(|slot| match slot {
        Slot::Page(page) => links.page_link(page, current),
        Slot::Ellipsis => PageLink::ellipsis(),
    })
    .collect();

    PaginationView {
        no_prev,
        prev_link: (!no_prev).then(|| links.href(current - 1)),
        no_next,
        next_link: (!no_next).then(|| links.href(current + 1)),
        pages,
    }
}

/// Link builder for one query
struct PageLinks {
    prefix: String,
}

impl PageLinks {
    fn new(base: &str, q: &str) -> Self {
        Self {
            prefix: format!("{}/?q={}&p=", base, encode_query_term(q)),
        }
    }

    fn href(&self, page: u64) -> String {
        format!("{}{}", self.prefix, page)
    }

    fn page_link(&self, page: u64, current: u64) -> PageLink {
        let disabled = page == current;
        PageLink {
            disabled,
            link: if disabled {
                NO_LINK.to_string()
            } else {
                self.href(page)
            },
            text: pagination::group_thousands(page),
        }
    }
}
