//! URL utilities for turning user input into video IDs

use crate::error::YoatError;
use url::Url;

/// Check if `input` looks like a bare video ID
pub fn is_video_id(input: &str) -> bool {
    !input.is_empty()
        && input
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

/// Normalize a bare video ID or a video platform URL to a video ID
pub fn normalize_video_id(input: &str) -> Result<String, YoatError> {
    let input = input.trim();
    if is_video_id(input) {
        return Ok(input.to_string());
    }

    let parsed =
        Url::parse(input).map_err(|_| YoatError::InvalidVideoId(input.to_string()))?;
    let id = extract_video_id(&parsed)?;

    if is_video_id(&id) {
        Ok(id)
    } else {
        Err(YoatError::InvalidVideoId(input.to_string()))
    }
}

/// Extract video ID from the watch, short link and shorts URL formats
fn extract_video_id(parsed: &Url) -> Result<String, YoatError> {
    let invalid = || YoatError::InvalidVideoId(parsed.to_string());

    match parsed.host_str() {
        Some("youtu.be") => {
            let path = parsed.path().trim_start_matches('/');
            if path.is_empty() {
                return Err(invalid());
            }
            Ok(path.to_string())
        }
        Some("youtube.com") | Some("www.youtube.com") | Some("m.youtube.com")
        | Some("music.youtube.com") => {
            if parsed.path().starts_with("/watch") {
                parsed
                    .query_pairs()
                    .find(|(key, _)| key == "v")
                    .map(|(_, value)| value.to_string())
                    .ok_or_else(invalid)
            } else if let Some(id) = parsed.path().strip_prefix("/shorts/") {
                let id = id.trim_end_matches('/');
                if id.is_empty() {
                    return Err(invalid());
                }
                Ok(id.to_string())
            } else {
                Err(invalid())
            }
        }
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_video_id() {
        assert_eq!(normalize_video_id("dQw4w9WgXcQ").unwrap(), "dQw4w9WgXcQ");
        assert_eq!(normalize_video_id(" a_b-c ").unwrap(), "a_b-c");
        assert!(is_video_id("abc"));
        assert!(!is_video_id(""));
        assert!(!is_video_id("a b"));
    }

    #[test]
    fn test_normalize_video_urls() {
        assert_eq!(
            normalize_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ").unwrap(),
            "dQw4w9WgXcQ"
        );
        assert_eq!(
            normalize_video_id("https://youtu.be/dQw4w9WgXcQ?t=10").unwrap(),
            "dQw4w9WgXcQ"
        );
        assert_eq!(
            normalize_video_id("https://youtube.com/shorts/brZCOVlyPPo").unwrap(),
            "brZCOVlyPPo"
        );

        // Extra parameters and fragments
        assert_eq!(
            normalize_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&list=PLxxxx#t=10s")
                .unwrap(),
            "dQw4w9WgXcQ"
        );

        // Hosts are case-insensitive
        assert_eq!(
            normalize_video_id("https://YOUTU.BE/dQw4w9WgXcQ").unwrap(),
            "dQw4w9WgXcQ"
        );
    }

    #[test]
    fn test_normalize_rejects_invalid_input() {
        let cases = [
            "",
            "not a video",
            "https://youtu.be/",
            "https://www.youtube.com/watch",
            "https://www.youtube.com/shorts/",
            "https://www.youtube.com/channel/UCxxx",
            "https://example.com/watch?v=abc",
            "https://www.youtube.com/watch?v=a%20b",
        ];

        for case in cases {
            assert!(
                matches!(normalize_video_id(case), Err(YoatError::InvalidVideoId(_))),
                "accepted {:?}",
                case
            );
        }
    }
}
