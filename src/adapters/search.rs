//! DuckDuckGo place search.
//!
//! Queries the HTML endpoint for `best <category> in <city>` and joins the
//! first few result snippets into one free-text blob, which is what the
//! fan-out stage feeds into the quality gate and the itinerary prompt.

use async_trait::async_trait;
use scraper::{Html, Selector};
use tracing::instrument;

use super::{AdapterError, PlaceSearch};

/// Default DuckDuckGo HTML endpoint.
pub const DEFAULT_BASE_URL: &str = "https://html.duckduckgo.com/html";

/// How many result snippets to keep per query.
const MAX_SNIPPETS: usize = 4;

const SNIPPET_SELECTOR: &str = ".result__snippet";

/// Reqwest + scraper backed [`PlaceSearch`].
///
/// Stateless; safe for concurrent independent use. The base URL is injectable
/// so tests can serve canned result pages.
pub struct DuckDuckGoSearch {
    http: reqwest::Client,
    base_url: String,
}

impl DuckDuckGoSearch {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a client against a custom endpoint (used by tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

impl Default for DuckDuckGoSearch {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlaceSearch for DuckDuckGoSearch {
    #[instrument(skip(self))]
    async fn find_places(&self, city: &str, category: &str) -> Result<String, AdapterError> {
        let query = format!("best {category} in {city}");
        let body = self
            .http
            .get(&self.base_url)
            .header(
                reqwest::header::USER_AGENT,
                "Mozilla/5.0 (compatible; tripsmith/0.1)",
            )
            .query(&[("q", query.as_str())])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let snippets = extract_snippets(&body)?;
        if snippets.is_empty() {
            return Err(AdapterError::Provider {
                provider: "duckduckgo",
                message: format!("no results for query {query:?}"),
            });
        }
        Ok(snippets.join(" "))
    }
}

// Parsing is kept out of the async path; `Html` is not `Send`.
fn extract_snippets(body: &str) -> Result<Vec<String>, AdapterError> {
    let selector = Selector::parse(SNIPPET_SELECTOR).map_err(|e| AdapterError::Provider {
        provider: "duckduckgo",
        message: format!("bad snippet selector: {e}"),
    })?;
    let document = Html::parse_document(body);
    Ok(document
        .select(&selector)
        .take(MAX_SNIPPETS)
        .map(|element| {
            element
                .text()
                .collect::<String>()
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|snippet| !snippet.is_empty())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snippets_are_extracted_in_document_order() {
        let body = r#"
            <div class="result"><a class="result__snippet">Fushimi Inari  Shrine,
                famous torii gates</a></div>
            <div class="result"><a class="result__snippet">Kinkaku-ji golden pavilion</a></div>
        "#;
        let snippets = extract_snippets(body).unwrap();
        assert_eq!(
            snippets,
            vec![
                "Fushimi Inari Shrine, famous torii gates",
                "Kinkaku-ji golden pavilion"
            ]
        );
    }

    #[test]
    fn empty_page_yields_no_snippets() {
        let snippets = extract_snippets("<html><body></body></html>").unwrap();
        assert!(snippets.is_empty());
    }
}
