use serde::{Deserialize, Serialize};

use crate::params::QueryParams;

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_LIMIT: usize = 10;

/// The slice of results a request asks for.
///
/// `page` and `limit` are always at least 1; absent, non-numeric, zero or
/// negative inputs fall back to the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationWindow {
    pub page: usize,
    pub limit: usize,
    pub start_index: usize,
    pub end_index: usize,
}

impl PaginationWindow {
    pub fn new(page: usize, limit: usize) -> Self {
        let page = page.max(1);
        let limit = limit.max(1);
        Self {
            page,
            limit,
            start_index: (page - 1).saturating_mul(limit),
            end_index: page.saturating_mul(limit),
        }
    }

    pub fn from_params(params: &QueryParams) -> Self {
        Self::new(
            positive(params.get("page")).unwrap_or(DEFAULT_PAGE),
            positive(params.get("limit")).unwrap_or(DEFAULT_LIMIT),
        )
    }
}

impl Default for PaginationWindow {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE, DEFAULT_LIMIT)
    }
}

fn positive(raw: Option<&str>) -> Option<usize> {
    raw.and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|n| *n >= 1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLink {
    pub page: usize,
    pub limit: usize,
}

/// Links to the neighbouring pages, present only when those pages exist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<PageLink>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<PageLink>,
}

impl Pagination {
    pub fn compute(window: &PaginationWindow, total: u64) -> Self {
        let next = ((window.end_index as u64) < total).then(|| PageLink {
            page: window.page + 1,
            limit: window.limit,
        });
        let prev = (window.start_index > 0).then(|| PageLink {
            page: window.page - 1,
            limit: window.limit,
        });
        Self { next, prev }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(pairs: &[(&str, &str)]) -> PaginationWindow {
        PaginationWindow::from_params(&QueryParams::from_pairs(pairs.iter().copied()))
    }

    #[test]
    fn defaults_when_absent() {
        let w = window(&[]);
        assert_eq!((w.page, w.limit, w.start_index, w.end_index), (1, 10, 0, 10));
    }

    #[test]
    fn defaults_when_invalid() {
        for bad in ["abc", "0", "-3", "", "1.5"] {
            let w = window(&[("page", bad), ("limit", bad)]);
            assert_eq!((w.page, w.limit), (1, 10), "input {bad:?}");
        }
    }

    #[test]
    fn second_page_of_ten() {
        let w = window(&[("page", "2"), ("limit", "10")]);
        assert_eq!((w.start_index, w.end_index), (10, 20));
    }

    #[test]
    fn middle_page_has_both_links() {
        let w = PaginationWindow::new(2, 10);
        let p = Pagination::compute(&w, 25);
        assert_eq!(p.next, Some(PageLink { page: 3, limit: 10 }));
        assert_eq!(p.prev, Some(PageLink { page: 1, limit: 10 }));
    }

    #[test]
    fn last_page_has_no_next() {
        let w = PaginationWindow::new(3, 10);
        let p = Pagination::compute(&w, 25);
        assert_eq!(p.next, None);
        assert!(p.prev.is_some());
    }

    #[test]
    fn exact_fit_has_no_next() {
        let p = Pagination::compute(&PaginationWindow::new(1, 10), 10);
        assert_eq!(p, Pagination::default());
    }

    #[test]
    fn empty_collection_has_no_links() {
        let p = Pagination::compute(&PaginationWindow::default(), 0);
        assert_eq!(serde_json::to_value(p).unwrap(), serde_json::json!({}));
    }
}
