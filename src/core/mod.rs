pub mod classify;
pub mod document;
pub mod error;
pub mod pipeline;

pub use classify::{classify, UrlClassification};
pub use document::{
    prepare, CaptionSegment, ExtractedDocument, ExtractionMethod, PreparedText, SourceKind,
    MAX_SUMMARY_INPUT_CHARS,
};
pub use error::PipelineError;
pub use pipeline::{SummarizeRequest, Summary, SummaryPipeline};
