use serde::Serialize;

use crate::rating::Rating;

/// One rated news hit. Built once per matched container; only `rating` is
/// filled in after construction, by the per-result model call. Lives for a
/// single search request.
#[derive(Serialize, Debug, Clone)]
pub struct SearchResult {
    /// 1-based position in document order.
    pub num: usize,
    pub title: String,
    pub link: String,
    pub summary: String,
    /// Mirrors `summary`; the consuming UI reads both fields.
    pub body: String,
    pub rating: Rating,
}

impl SearchResult {
    pub fn new(num: usize, title: String, link: String, summary: String) -> SearchResult {
        SearchResult {
            num,
            title,
            body: summary.clone(),
            summary,
            link,
            rating: Rating::Unrated, // will be populated by the rating pass
        }
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SearchStatus {
    Success,
    Error,
}

/// What a search request resolves to: either a non-empty rated result list,
/// or a uniform error with nothing in it. Callers never see the underlying
/// fetch/parse failure.
#[derive(Serialize, Debug, Clone)]
pub struct SearchOutcome {
    pub status: SearchStatus,
    pub results: Vec<SearchResult>,
}

impl SearchOutcome {
    pub fn success(results: Vec<SearchResult>) -> SearchOutcome {
        SearchOutcome {
            status: SearchStatus::Success,
            results,
        }
    }

    pub fn error() -> SearchOutcome {
        SearchOutcome {
            status: SearchStatus::Error,
            results: Vec::new(),
        }
    }
}
