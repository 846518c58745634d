use serde::{Deserialize, Serialize};
use std::fmt;

/// Hard cap on the number of characters handed to the summarizer.
pub const MAX_SUMMARY_INPUT_CHARS: usize = 10_000;

/// Which extraction path produced a summary. Display/serialization values
/// are part of the invocation surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Video,
    Website,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Video => write!(f, "video"),
            SourceKind::Website => write!(f, "website"),
        }
    }
}

/// How the text of an [`ExtractedDocument`] was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionMethod {
    /// Timed captions, concatenated in chronological order.
    Transcript,
    /// Inner text of paragraph elements, in document order.
    HtmlParagraphs,
}

/// Plain text pulled out of a URL, before preparation.
///
/// `raw_text` may be empty only when extraction explicitly failed upstream;
/// the web path never reports an empty document as success.
#[derive(Debug, Clone)]
pub struct ExtractedDocument {
    pub source_url: String,
    pub raw_text: String,
    pub method: ExtractionMethod,
}

/// One timed caption entry. Only `text` is consumed downstream; timing
/// metadata is kept for callers that want it.
#[derive(Debug, Clone, Serialize)]
pub struct CaptionSegment {
    pub text: String,
    /// Offset from the start of the video, in seconds.
    pub start: f64,
    /// How long the caption stays on screen, in seconds.
    pub duration: f64,
}

/// Text bounded for a single-prompt summarization request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedText {
    pub text: String,
    pub truncated: bool,
}

/// Bounds extracted text to [`MAX_SUMMARY_INPUT_CHARS`] characters.
///
/// The cut is a hard one at the character boundary; no attempt is made to
/// preserve sentences. Counting is in characters, not bytes, so multi-byte
/// input is never split mid-character.
pub fn prepare(raw_text: &str) -> PreparedText {
    match raw_text.char_indices().nth(MAX_SUMMARY_INPUT_CHARS) {
        Some((cut, _)) => PreparedText {
            text: raw_text[..cut].to_string(),
            truncated: true,
        },
        None => PreparedText {
            text: raw_text.to_string(),
            truncated: false,
        },
    }
}
