use anyhow::Result;
use futures::StreamExt;
use nanoid::nanoid;
use scraper::Html;
use std::sync::Arc;
use std::time::Duration;
use tracing::{Instrument, error, info, info_span, warn};

use crate::config::CONFIG;
use crate::extractor::{Extractor, RawSearchHit};
use crate::fetcher::{PageFetcher, build_search_url};
use crate::llm::ModelInvoker;
use crate::models::{SearchOutcome, SearchResult};
use crate::rating::{Rating, parse_rating};

/// Drives a news search end to end: build the engine URL, fetch the rendered
/// markup, extract records, rate each one, assemble the outcome.
pub struct NewsSearcher {
    fetcher: Arc<dyn PageFetcher>,
    invoker: Arc<dyn ModelInvoker>,
    extractor: Extractor,
}

impl NewsSearcher {
    pub fn new(fetcher: Arc<dyn PageFetcher>, invoker: Arc<dyn ModelInvoker>) -> NewsSearcher {
        NewsSearcher {
            fetcher,
            invoker,
            extractor: Extractor::new(),
        }
    }

    /// Never propagates fetch/parse failures: anything that goes wrong inside
    /// the pipeline is logged with detail and collapses to an `error` outcome
    /// with an empty result list.
    pub async fn search(
        &self,
        query: &str,
        num: usize,
        location: &str,
        time_filter: &str,
    ) -> SearchOutcome {
        let request_id = nanoid!(10);
        let span = info_span!("news_search", request_id = %request_id, query = %query);
        async move {
            match self.search_inner(query, num, location, time_filter).await {
                Ok(results) if !results.is_empty() => {
                    info!(count = results.len(), "search completed");
                    SearchOutcome::success(results)
                }
                Ok(_) => {
                    warn!("search returned no results");
                    SearchOutcome::error()
                }
                Err(e) => {
                    error!(error = format!("{e:#}").as_str(), "search failed");
                    SearchOutcome::error()
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn search_inner(
        &self,
        query: &str,
        num: usize,
        location: &str,
        time_filter: &str,
    ) -> Result<Vec<SearchResult>> {
        let url = build_search_url(&CONFIG.search_base_url, query, location, time_filter);
        let markup = self.fetcher.fetch(&url).await?;

        // parse and extract in one scope: the parsed document is not Send,
        // so it must not live across the rating awaits below
        let hits: Vec<RawSearchHit> = {
            let document = Html::parse_document(&markup);
            self.extractor.extract(&document, num).collect()
        };
        info!(extracted = hits.len(), requested = num, "extracted search hits");

        // Ordered rating pass. Concurrency 1 (the default) rates strictly
        // one result at a time; higher values overlap the model calls while
        // keeping document order in the output.
        let concurrency = CONFIG.rating_concurrency.max(1);
        let results = futures::stream::iter(hits.into_iter().enumerate().map(|(idx, hit)| {
            let invoker = self.invoker.clone();
            async move {
                let rating = rate_article(invoker.as_ref(), &hit.title, &hit.summary).await;
                let mut result = SearchResult::new(idx + 1, hit.title, hit.link, hit.summary);
                result.rating = rating;
                result
            }
        }))
        .buffered(concurrency)
        .collect::<Vec<SearchResult>>()
        .await;

        Ok(results)
    }
}

/// Ask the model for a 1-5 relevance score. Failures never abort the batch;
/// a failed call degrades this one record to `Unrated`.
pub async fn rate_article(invoker: &dyn ModelInvoker, title: &str, content: &str) -> Rating {
    let excerpt: String = content.chars().take(1000).collect();
    let prompt = format!(
        "Rate this article from 1–5 based on relevance and quality.\n\
         Title: {title}\nContent: {excerpt}\nOnly return a number."
    );
    match invoker
        .invoke(
            &prompt,
            Duration::from_secs(CONFIG.article_rating_timeout_secs),
            CONFIG.model_max_attempts,
        )
        .await
    {
        Ok(raw) => parse_rating(&raw),
        Err(e) => {
            warn!(title = %title, %e, "article rating failed, leaving unrated");
            Rating::Unrated
        }
    }
}

/// Stable descending re-sort for presentation: highest rating first, unrated
/// last, ties keep their original document order.
pub fn rank_by_rating(results: &mut [SearchResult]) {
    results.sort_by(|a, b| a.rating.cmp_desc(&b.rating));
}
