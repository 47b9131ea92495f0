use percent_encoding::percent_decode_str;
use scraper::{ElementRef, Html, Selector};

/// One search hit pulled out of the results markup, before rating.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSearchHit {
    pub title: String,
    pub link: String,
    pub summary: String,
}

pub const NO_SUMMARY: &str = "No summary available.";

/// Pulls structured records out of search-result markup.
///
/// The selectors are coupled to the search engine's current class names
/// (`result__body`, `result__a`, `result__snippet`); each field is an
/// ordered strategy chain so an upstream markup change degrades to the
/// fallback instead of an empty scrape.
pub struct Extractor {
    containers: Selector,
    title_strategies: Vec<Selector>,
    snippet_strategies: Vec<Selector>,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor {
    pub fn new() -> Self {
        // static selectors, parse failures are programmer errors
        Self {
            containers: Selector::parse("div.result__body").unwrap(),
            title_strategies: vec![
                Selector::parse("a.result__a").unwrap(),
                Selector::parse("a").unwrap(),
            ],
            snippet_strategies: vec![
                Selector::parse("a.result__snippet").unwrap(),
                Selector::parse("div.result__snippet").unwrap(),
            ],
        }
    }

    /// Lazy, one-shot walk over the first `max_results` result containers in
    /// document order. Containers without a usable anchor or with an empty
    /// title are skipped and still consume their slot, so the iterator may
    /// yield fewer than `max_results` records.
    pub fn extract<'a>(
        &'a self,
        document: &'a Html,
        max_results: usize,
    ) -> impl Iterator<Item = RawSearchHit> + 'a {
        document
            .select(&self.containers)
            .take(max_results)
            .filter_map(move |container| self.extract_one(container))
    }

    fn extract_one(&self, container: ElementRef<'_>) -> Option<RawSearchHit> {
        let anchor = first_match(container, &self.title_strategies)?;

        let title = collect_text(anchor);
        if title.is_empty() {
            log::debug!("skipping result container with empty title");
            return None;
        }

        let href = anchor.value().attr("href").unwrap_or_default();
        let link = decode_redirect_link(href);

        let summary = first_match(container, &self.snippet_strategies)
            .map(collect_text)
            .unwrap_or_else(|| NO_SUMMARY.to_string());

        Some(RawSearchHit {
            title,
            link,
            summary,
        })
    }
}

fn first_match<'a>(container: ElementRef<'a>, strategies: &[Selector]) -> Option<ElementRef<'a>> {
    strategies
        .iter()
        .find_map(|selector| container.select(selector).next())
}

fn collect_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// The search engine proxies outbound clicks through redirect links like
/// `//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com&rut=...`; extract and
/// percent-decode the embedded destination. Anything else passes through
/// verbatim.
pub fn decode_redirect_link(href: &str) -> String {
    if let Some(pos) = href.find("uddg=") {
        let start = pos + 5;
        let end = href[start..]
            .find('&')
            .map(|i| start + i)
            .unwrap_or(href.len());
        let encoded = &href[start..end];
        if !encoded.is_empty() {
            return percent_decode_str(encoded)
                .decode_utf8_lossy()
                .into_owned();
        }
    }
    href.to_string()
}
