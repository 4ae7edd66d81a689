//! Video identifier extraction from YouTube URL strings.
//!
//! This is a best-effort textual parse, not a URL-grammar parser: the rules
//! check for known substrings anywhere in the input, so malformed URLs that
//! happen to contain them in odd positions can yield odd identifiers. That
//! looseness is part of the contract and must not be tightened silently.

/// Extract a video identifier from a YouTube URL.
///
/// Rules, applied in order:
/// 1. `youtu.be` URLs: the final path segment.
/// 2. `youtube.com` URLs: the value after `v=` up to the next `&`, or the
///    value after `embed/` up to the next `?`.
/// 3. Anything else: no identifier.
pub fn extract_video_id(url: &str) -> Option<String> {
    if url.contains("youtu.be") {
        let id = url.rsplit('/').next().unwrap_or(url);
        return non_empty(id);
    }

    if url.contains("youtube.com") {
        if let Some((_, rest)) = url.split_once("v=") {
            let id = rest.split('&').next().unwrap_or(rest);
            return non_empty(id);
        }
        if let Some((_, rest)) = url.split_once("embed/") {
            let id = rest.split('?').next().unwrap_or(rest);
            return non_empty(id);
        }
    }

    None
}

fn non_empty(id: &str) -> Option<String> {
    if id.is_empty() {
        None
    } else {
        Some(id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_url() {
        assert_eq!(
            extract_video_id("https://youtu.be/abc123"),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn test_short_url_takes_trailing_segment() {
        assert_eq!(
            extract_video_id("https://youtu.be/some/path/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_watch_url() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_watch_url_stops_at_ampersand() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&extra=1"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_embed_url() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/embed/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_embed_url_stops_at_question_mark() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/embed/dQw4w9WgXcQ?feature=x"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_unrecognized_url() {
        assert_eq!(extract_video_id("https://example.com/video"), None);
        assert_eq!(extract_video_id("not-a-youtube-url"), None);
        assert_eq!(extract_video_id(""), None);
    }

    #[test]
    fn test_empty_identifier_is_not_found() {
        assert_eq!(extract_video_id("https://youtu.be/"), None);
        assert_eq!(extract_video_id("https://www.youtube.com/watch?v="), None);
    }

    // Loose parsing is intentional: a `v=` parameter anywhere in a
    // youtube.com URL wins, even when it is not the watch parameter.
    #[test]
    fn test_loose_parse_matches_any_v_parameter() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/playlist?list=x&v=abc"),
            Some("abc".to_string())
        );
    }
}
