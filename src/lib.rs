pub mod cli;
pub mod config;
pub mod core;
pub mod extractors;
pub mod summarize;

pub use self::core::{
    classify, prepare, PipelineError, SourceKind, Summary, SummaryPipeline, SummarizeRequest,
    UrlClassification,
};
pub use extractors::{ContentExtractor, TranscriptExtractor, WebPageExtractor};
pub use summarize::{GroqSummarizer, Summarizer, SummaryRequest};
