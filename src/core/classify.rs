use regex::Regex;

/// Video URL shapes we recognize, in priority order. Each pattern captures
/// the video identifier greedily up to the next `&` or the end of the string.
/// Matching is unanchored, so subdomain variants like `m.youtube.com` are
/// accepted as well.
const VIDEO_URL_PATTERNS: [&str; 3] = [
    r"(?:https?://)?(?:www\.)?youtube\.com/watch\?v=([^&]+)",
    r"(?:https?://)?(?:www\.)?youtube\.com/embed/([^&]+)",
    r"(?:https?://)?(?:www\.)?youtu\.be/([^&]+)",
];

/// What a URL points at, decided before any network work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlClassification {
    /// A playable video on a known platform, with its extracted identifier.
    Video { id: String },
    /// Anything else; treated as an arbitrary web page regardless of host.
    WebPage,
}

/// Classifies a URL as a video resource or a generic web page.
///
/// With `strict_ids` set, a captured identifier containing characters outside
/// `[A-Za-z0-9_-]` does not count as a match and matching falls through to
/// the next pattern. The default (false) preserves the uncurated capture.
pub fn classify(url: &str, strict_ids: bool) -> UrlClassification {
    for pattern in &VIDEO_URL_PATTERNS {
        if let Ok(re) = Regex::new(pattern) {
            if let Some(captures) = re.captures(url) {
                let id = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
                if strict_ids && !is_plain_video_id(id) {
                    continue;
                }
                return UrlClassification::Video { id: id.to_string() };
            }
        }
    }

    UrlClassification::WebPage
}

fn is_plain_video_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video_id(url: &str) -> Option<String> {
        match classify(url, false) {
            UrlClassification::Video { id } => Some(id),
            UrlClassification::WebPage => None,
        }
    }

    #[test]
    fn test_watch_url() {
        assert_eq!(
            video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_watch_url_stops_at_ampersand() {
        assert_eq!(
            video_id("https://www.youtube.com/watch?v=abc123&t=5"),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn test_embed_url() {
        assert_eq!(
            video_id("https://www.youtube.com/embed/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_short_url() {
        assert_eq!(
            video_id("https://youtu.be/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_mobile_subdomain() {
        assert_eq!(
            video_id("https://m.youtube.com/watch?v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_scheme_optional() {
        assert_eq!(
            video_id("www.youtube.com/watch?v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_generic_urls_fall_through() {
        assert_eq!(classify("https://example.com/article", false), UrlClassification::WebPage);
        assert_eq!(classify("https://vimeo.com/123456", false), UrlClassification::WebPage);
    }

    #[test]
    fn test_greedy_capture_keeps_trailing_path() {
        // Lax mode preserves the uncurated capture, query string included.
        assert_eq!(
            video_id("https://www.youtube.com/embed/abc123?start=5"),
            Some("abc123?start=5".to_string())
        );
    }

    #[test]
    fn test_strict_ids_reject_decorated_capture() {
        assert_eq!(
            classify("https://www.youtube.com/embed/abc123?start=5", true),
            UrlClassification::WebPage
        );
        assert_eq!(
            classify("https://www.youtube.com/watch?v=dQw4w9WgXcQ", true),
            UrlClassification::Video {
                id: "dQw4w9WgXcQ".to_string()
            }
        );
    }
}
