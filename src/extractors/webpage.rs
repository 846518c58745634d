use crate::core::{ExtractedDocument, ExtractionMethod, PipelineError, UrlClassification};
use crate::extractors::ContentExtractor;
use async_trait::async_trait;
use scraper::{Html, Selector};
use std::time::Duration;

/// Extracts readable text from an arbitrary web page by collecting the inner
/// text of its paragraph elements. Headings, lists, navigation, and scripts
/// are ignored.
pub struct WebPageExtractor {
    client: reqwest::Client,
}

impl WebPageExtractor {
    pub fn new(timeout: Duration, user_agent: &str) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }

    /// Builds a document from already-fetched HTML. Fails with
    /// [`PipelineError::NoReadableContent`] when the page has no paragraph
    /// text; an empty document is never reported as success.
    pub fn document_from_html(url: &str, html: &str) -> Result<ExtractedDocument, PipelineError> {
        let raw_text = extract_paragraphs(html).join(" ");
        if raw_text.trim().is_empty() {
            return Err(PipelineError::NoReadableContent);
        }

        Ok(ExtractedDocument {
            source_url: url.to_string(),
            raw_text,
            method: ExtractionMethod::HtmlParagraphs,
        })
    }
}

/// Returns the inner text of every `<p>` element, in document order. Empty
/// paragraphs yield empty strings so spacing between blocks stays uniform.
pub fn extract_paragraphs(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let paragraphs = Selector::parse("p").expect("static selector");

    document
        .select(&paragraphs)
        .map(|p| p.text().collect::<String>())
        .collect()
}

#[async_trait]
impl ContentExtractor for WebPageExtractor {
    fn name(&self) -> &'static str {
        "webpage"
    }

    fn suitable(&self, classification: &UrlClassification) -> bool {
        matches!(classification, UrlClassification::WebPage)
    }

    async fn extract(
        &self,
        url: &str,
        _classification: &UrlClassification,
    ) -> Result<ExtractedDocument, PipelineError> {
        // Any transport failure surfaces as FetchFailed. The status code is
        // deliberately not checked: an error page still gets its paragraphs
        // extracted, and a page without them fails as unreadable below.
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| PipelineError::FetchFailed(e.to_string()))?;

        tracing::debug!("Fetched {} with HTTP {}", url, response.status());

        let body = response
            .text()
            .await
            .map_err(|e| PipelineError::FetchFailed(e.to_string()))?;

        Self::document_from_html(url, &body)
    }
}
