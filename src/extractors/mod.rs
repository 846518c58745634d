pub mod transcript;
pub mod webpage;

pub use transcript::TranscriptExtractor;
pub use webpage::WebPageExtractor;

use crate::core::{ExtractedDocument, PipelineError, UrlClassification};
use async_trait::async_trait;

#[async_trait]
pub trait ContentExtractor: Send + Sync {
    fn name(&self) -> &'static str;
    fn suitable(&self, classification: &UrlClassification) -> bool;
    async fn extract(
        &self,
        url: &str,
        classification: &UrlClassification,
    ) -> Result<ExtractedDocument, PipelineError>;
}
