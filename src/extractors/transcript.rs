use crate::core::{
    CaptionSegment, ExtractedDocument, ExtractionMethod, PipelineError, UrlClassification,
};
use crate::extractors::ContentExtractor;
use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

/// Pulls the timed-caption transcript for a YouTube video and flattens it
/// into plain text.
///
/// Works the way the site itself serves captions: fetch the watch page, read
/// the embedded player response JSON, follow the first suitable caption
/// track's `baseUrl`, and decode the `json3` event list.
pub struct TranscriptExtractor {
    client: reqwest::Client,
}

impl TranscriptExtractor {
    pub fn new(timeout: Duration) -> Self {
        // Use a basic browser user agent; the watch page serves a reduced
        // payload without player data to unknown clients.
        let client = reqwest::Client::builder()
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }

    /// Fetches the full caption sequence for a video identifier, in
    /// chronological order.
    pub async fn transcript(&self, video_id: &str) -> Result<Vec<CaptionSegment>, PipelineError> {
        let html = self.fetch_watch_page(video_id).await?;
        let player_response = extract_player_response(&html)?;
        let track_url = caption_track_url(&player_response)?;

        tracing::debug!("Fetching caption track for video {}", video_id);
        let body = self
            .client
            .get(&track_url)
            .send()
            .await
            .map_err(|e| PipelineError::TranscriptUnavailable(e.to_string()))?
            .text()
            .await
            .map_err(|e| PipelineError::TranscriptUnavailable(e.to_string()))?;

        parse_caption_events(&body)
    }

    async fn fetch_watch_page(&self, video_id: &str) -> Result<String, PipelineError> {
        let watch_url = format!(
            "https://www.youtube.com/watch?v={}",
            urlencoding::encode(video_id)
        );

        let response = self
            .client
            .get(&watch_url)
            .header(
                "Accept",
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .header("Accept-Language", "en-US,en;q=0.5")
            .send()
            .await
            .map_err(|e| PipelineError::TranscriptUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(PipelineError::TranscriptUnavailable(format!(
                "watch page returned HTTP {}",
                response.status()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| PipelineError::TranscriptUnavailable(e.to_string()))
    }
}

/// Locates and parses the `ytInitialPlayerResponse` JSON embedded in a watch
/// page. The markup shifts between page revisions, so several patterns are
/// tried in order.
fn extract_player_response(html: &str) -> Result<Value, PipelineError> {
    let patterns = [
        r#"ytInitialPlayerResponse\s*=\s*(\{.+?\});"#,
        r#"ytInitialPlayerResponse\s*=\s*(\{.+?\})\s*;"#,
        r#"ytInitialPlayerResponse":\s*(\{.+?\})"#,
        r#"var\s+ytInitialPlayerResponse\s*=\s*(\{.+?\});"#,
    ];

    for pattern in &patterns {
        if let Ok(re) = Regex::new(pattern) {
            if let Some(captures) = re.captures(html) {
                let json_str = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
                match serde_json::from_str::<Value>(json_str) {
                    Ok(parsed) => return Ok(parsed),
                    Err(_) => continue, // Try next pattern
                }
            }
        }
    }

    Err(PipelineError::TranscriptUnavailable(
        "could not find player data in watch page".to_string(),
    ))
}

/// Picks a caption track from the player response and returns its fetch URL
/// in `json3` format. Prefers an English track, falls back to the first one
/// listed.
fn caption_track_url(player_response: &Value) -> Result<String, PipelineError> {
    if let Some(playability) = player_response.get("playabilityStatus") {
        let status = playability
            .get("status")
            .and_then(|v| v.as_str())
            .unwrap_or("OK");
        if status != "OK" {
            let reason = playability
                .get("reason")
                .and_then(|v| v.as_str())
                .unwrap_or("video is not playable");
            return Err(PipelineError::TranscriptUnavailable(format!(
                "{}: {}",
                status, reason
            )));
        }
    }

    let tracks = player_response
        .get("captions")
        .and_then(|c| c.get("playerCaptionsTracklistRenderer"))
        .and_then(|r| r.get("captionTracks"))
        .and_then(|t| t.as_array())
        .ok_or_else(|| {
            PipelineError::TranscriptUnavailable(
                "no caption tracks available for this video".to_string(),
            )
        })?;

    let track = tracks
        .iter()
        .find(|t| {
            t.get("languageCode")
                .and_then(|v| v.as_str())
                .map(|code| code.starts_with("en"))
                .unwrap_or(false)
        })
        .or_else(|| tracks.first())
        .ok_or_else(|| {
            PipelineError::TranscriptUnavailable("caption track list is empty".to_string())
        })?;

    let base_url = track.get("baseUrl").and_then(|v| v.as_str()).ok_or_else(|| {
        PipelineError::TranscriptUnavailable("caption track has no fetch URL".to_string())
    })?;

    Ok(format!("{}&fmt=json3", base_url))
}

#[derive(Debug, Deserialize)]
struct CaptionResponse {
    #[serde(default)]
    events: Vec<CaptionEvent>,
}

#[derive(Debug, Deserialize)]
struct CaptionEvent {
    #[serde(rename = "tStartMs", default)]
    start_ms: u64,
    #[serde(rename = "dDurationMs", default)]
    duration_ms: u64,
    #[serde(default)]
    segs: Vec<CaptionSeg>,
}

#[derive(Debug, Deserialize)]
struct CaptionSeg {
    #[serde(default)]
    utf8: String,
}

/// Decodes a `json3` caption body into ordered segments. Events carrying
/// only whitespace (newline markers between caption windows) are skipped.
fn parse_caption_events(body: &str) -> Result<Vec<CaptionSegment>, PipelineError> {
    let response: CaptionResponse = serde_json::from_str(body)
        .map_err(|e| PipelineError::TranscriptUnavailable(format!("bad caption data: {}", e)))?;

    let segments = response
        .events
        .into_iter()
        .filter_map(|event| {
            let text: String = event.segs.iter().map(|s| s.utf8.as_str()).collect();
            if text.trim().is_empty() {
                return None;
            }
            Some(CaptionSegment {
                text: text.trim().to_string(),
                start: event.start_ms as f64 / 1000.0,
                duration: event.duration_ms as f64 / 1000.0,
            })
        })
        .collect();

    Ok(segments)
}

#[async_trait]
impl ContentExtractor for TranscriptExtractor {
    fn name(&self) -> &'static str {
        "transcript"
    }

    fn suitable(&self, classification: &UrlClassification) -> bool {
        matches!(classification, UrlClassification::Video { .. })
    }

    async fn extract(
        &self,
        url: &str,
        classification: &UrlClassification,
    ) -> Result<ExtractedDocument, PipelineError> {
        let video_id = match classification {
            UrlClassification::Video { id } => id,
            UrlClassification::WebPage => {
                return Err(PipelineError::Unexpected(
                    "transcript extractor called for a non-video URL".to_string(),
                ))
            }
        };

        let segments = self.transcript(video_id).await?;
        tracing::debug!("Fetched {} caption segments", segments.len());

        let raw_text = segments
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        Ok(ExtractedDocument {
            source_url: url.to_string(),
            raw_text,
            method: ExtractionMethod::Transcript,
        })
    }
}
