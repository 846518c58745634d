use crate::config::Config;
use crate::core::classify::{classify, UrlClassification};
use crate::core::document::{prepare, SourceKind, MAX_SUMMARY_INPUT_CHARS};
use crate::core::error::PipelineError;
use crate::extractors::ContentExtractor;
use crate::summarize::{Summarizer, SummaryRequest};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use url::Url;

/// Everything one summarization run needs, passed by value. Nothing here
/// outlives the invocation.
#[derive(Debug)]
pub struct SummarizeRequest {
    pub url: String,
    pub api_key: SecretString,
    /// Sampling temperature, already validated to [0, 1] by the caller.
    pub temperature: f32,
    /// Completion budget, already validated to a positive range.
    pub max_tokens: u32,
}

/// Successful pipeline result.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub summary: String,
    pub source: SourceKind,
    /// Whether the extracted text was cut before summarization.
    pub truncated: bool,
}

/// Runs one URL through classification, extraction, preparation, and
/// summarization.
///
/// Extractors are registered in order and the first one suitable for the
/// URL's classification wins; there is no fallback from one path to another
/// when extraction fails.
pub struct SummaryPipeline {
    config: Config,
    extractors: Vec<Box<dyn ContentExtractor>>,
    summarizer: Box<dyn Summarizer>,
}

impl SummaryPipeline {
    pub fn new(config: Config, summarizer: Box<dyn Summarizer>) -> Self {
        Self {
            config,
            extractors: Vec::new(),
            summarizer,
        }
    }

    pub fn register_extractor(&mut self, extractor: Box<dyn ContentExtractor>) {
        self.extractors.push(extractor);
    }

    pub async fn run(&self, request: SummarizeRequest) -> Result<Summary, PipelineError> {
        let parsed = Url::parse(&request.url)
            .map_err(|e| PipelineError::InvalidUrl(format!("{}: {}", request.url, e)))?;
        if parsed.host_str().is_none() {
            return Err(PipelineError::InvalidUrl(format!(
                "{}: missing host",
                request.url
            )));
        }
        if request.api_key.expose_secret().trim().is_empty() {
            return Err(PipelineError::Unexpected(
                "API key must not be empty".to_string(),
            ));
        }

        let classification = classify(&request.url, self.config.strict_video_ids);
        let source = match &classification {
            UrlClassification::Video { id } => {
                tracing::info!("Classified as video (id {})", id);
                SourceKind::Video
            }
            UrlClassification::WebPage => {
                tracing::info!("Classified as web page");
                SourceKind::Website
            }
        };

        let extractor = self
            .extractors
            .iter()
            .find(|e| e.suitable(&classification))
            .ok_or_else(|| {
                PipelineError::Unexpected(format!("no extractor registered for {} URLs", source))
            })?;

        tracing::debug!("Extracting with {}", extractor.name());
        let document = extractor.extract(&request.url, &classification).await?;
        tracing::debug!("Extracted {} characters", document.raw_text.chars().count());

        let prepared = prepare(&document.raw_text);
        if prepared.truncated {
            tracing::debug!("Input truncated to {} characters", MAX_SUMMARY_INPUT_CHARS);
        }

        let summary_request = SummaryRequest {
            text: prepared.text,
            model: self.config.model.clone(),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            api_key: request.api_key,
        };
        let summary = self.summarizer.summarize(&summary_request).await?;

        Ok(Summary {
            summary,
            source,
            truncated: prepared.truncated,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct NoCallSummarizer;

    #[async_trait]
    impl Summarizer for NoCallSummarizer {
        async fn summarize(&self, _request: &SummaryRequest) -> Result<String, PipelineError> {
            panic!("summarizer must not be invoked");
        }
    }

    fn request(url: &str, key: &str) -> SummarizeRequest {
        SummarizeRequest {
            url: url.to_string(),
            api_key: SecretString::from(key.to_string()),
            temperature: 0.3,
            max_tokens: 512,
        }
    }

    #[test]
    fn test_invalid_url_is_rejected_before_any_work() {
        let pipeline = SummaryPipeline::new(Config::default(), Box::new(NoCallSummarizer));
        let err = tokio_test::block_on(pipeline.run(request("not a url", "key"))).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidUrl(_)));
    }

    #[test]
    fn test_url_without_host_is_rejected() {
        let pipeline = SummaryPipeline::new(Config::default(), Box::new(NoCallSummarizer));
        let err =
            tokio_test::block_on(pipeline.run(request("mailto:someone@example.com", "key")))
                .unwrap_err();
        assert!(matches!(err, PipelineError::InvalidUrl(_)));
    }

    #[test]
    fn test_blank_api_key_is_rejected() {
        let pipeline = SummaryPipeline::new(Config::default(), Box::new(NoCallSummarizer));
        let err =
            tokio_test::block_on(pipeline.run(request("https://example.com", "  "))).unwrap_err();
        assert!(matches!(err, PipelineError::Unexpected(_)));
    }
}
