//! Player response model for the video info endpoint

use crate::error::YoatError;
use regex::Regex;
use serde::Deserialize;
use tracing::{debug, warn};

/// Field of the video info body that carries the player response JSON
pub const PLAYER_RESPONSE_FIELD: &str = "player_response";

/// Player response, reduced to what audio resolution needs
#[derive(Debug, Deserialize)]
pub struct PlayerResponse {
    #[serde(rename = "playabilityStatus")]
    pub playability_status: Option<PlayabilityStatus>,
    #[serde(rename = "videoDetails")]
    pub video_details: Option<VideoDetails>,
    #[serde(rename = "streamingData")]
    pub streaming_data: Option<StreamingData>,
}

#[derive(Debug, Deserialize)]
pub struct PlayabilityStatus {
    pub status: String,
    pub reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct VideoDetails {
    pub title: String,
    pub author: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct StreamingData {
    #[serde(rename = "adaptiveFormats", default)]
    pub adaptive_formats: Vec<FormatData>,
}

/// One stream descriptor from `adaptiveFormats`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormatData {
    pub itag: Option<u32>,
    #[serde(rename = "mimeType", default)]
    pub mime_type: String,
    #[serde(rename = "averageBitrate")]
    pub average_bitrate: Option<u64>,
    pub bitrate: Option<u64>,
    pub url: Option<String>,
    pub cipher: Option<String>,
    #[serde(rename = "signatureCipher")]
    pub signature_cipher: Option<String>,
}

impl FormatData {
    /// Check if this stream carries audio
    pub fn is_audio(&self) -> bool {
        self.mime_type.contains("audio")
    }

    /// Average bitrate, falling back to the peak bitrate
    pub fn effective_bitrate(&self) -> u64 {
        self.average_bitrate.or(self.bitrate).unwrap_or(0)
    }

    /// Cipher block, whichever of the two field names carries it
    pub fn cipher_block(&self) -> Option<&str> {
        self.cipher
            .as_deref()
            .or(self.signature_cipher.as_deref())
    }
}

impl PlayerResponse {
    /// Video title, empty if the response has no details
    pub fn title(&self) -> &str {
        self.video_details
            .as_ref()
            .map(|d| d.title.as_str())
            .unwrap_or_default()
    }

    /// Video author, empty if the response has no details
    pub fn author(&self) -> &str {
        self.video_details
            .as_ref()
            .map(|d| d.author.as_str())
            .unwrap_or_default()
    }

    /// Adaptive stream descriptors
    pub fn adaptive_formats(&self) -> &[FormatData] {
        self.streaming_data
            .as_ref()
            .map(|s| s.adaptive_formats.as_slice())
            .unwrap_or_default()
    }
}

/// Extract the player response from a URL-encoded video info body
///
/// Returns `None` when the body has no player response, when it is empty or
/// `null`, or when it does not parse.
pub fn parse_player_response(body: &str) -> Option<PlayerResponse> {
    let raw = url::form_urlencoded::parse(body.as_bytes())
        .find(|(key, _)| key == PLAYER_RESPONSE_FIELD)
        .map(|(_, value)| value.into_owned())?;

    if raw.trim().is_empty() {
        debug!("Video info body has an empty player response");
        return None;
    }

    match serde_json::from_str::<Option<PlayerResponse>>(&raw) {
        Ok(response) => response,
        Err(e) => {
            warn!("Failed to parse player response: {}", e);
            None
        }
    }
}

/// Site-relative path of the player script referenced by a watch page
pub fn extract_player_script_path(watch_html: &str) -> Result<String, YoatError> {
    let script_regex = Regex::new(r#""(/[^"]+/base\.js)""#)?;

    script_regex
        .captures(watch_html)
        .and_then(|captures| captures.get(1))
        .map(|path| path.as_str().to_string())
        .ok_or(YoatError::PlayerScriptNotFound)
}
