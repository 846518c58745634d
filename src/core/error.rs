use thiserror::Error;

/// Failure taxonomy for a single summarization run.
///
/// Every stage failure is terminal for the current invocation: there are no
/// retries and no fallback between extraction paths. Each variant carries the
/// underlying diagnostic message for display. The API credential is never
/// included in any of these messages.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The input failed basic URL validation before any network work.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The video has no usable transcript (missing captions, private or
    /// age-restricted video, or a transport error while fetching them).
    #[error("could not fetch transcript: {0}")]
    TranscriptUnavailable(String),

    /// The page could not be fetched at the transport level.
    #[error("failed to fetch page: {0}")]
    FetchFailed(String),

    /// The page was fetched but contained no paragraph text.
    #[error("could not extract readable text from the page")]
    NoReadableContent,

    /// The completion request failed: auth, rate limit, transport, or a
    /// malformed provider response.
    #[error("summarization failed: {0}")]
    Summarization(String),

    /// Anything not covered by the typed kinds above.
    #[error("unexpected error: {0}")]
    Unexpected(String),
}
