//! Audio resolution results

use serde::{Deserialize, Serialize, Serializer};

/// Error marker returned when a ciphered stream carries no signature
pub const MISSING_SIGNATURE_MESSAGE: &str = "no s";

/// Resolved audio stream and the video it belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioInfo {
    /// Video ID
    pub id: String,
    /// Video title
    pub title: String,
    /// Video author/channel name
    pub author: String,
    /// Playable stream URL
    pub url: String,
    /// Average bitrate in bits per second
    pub bitrate: u64,
}

/// Error body, as serialized at the service boundary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Outcome of resolving one video
///
/// Serializes as the [`AudioInfo`] object, as `null` when the platform has no
/// player data, or as `{"error":"no s"}` when the signature is missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Audio stream found
    Found(AudioInfo),
    /// No player data for this video
    Absent,
    /// Ciphered stream without a scrambled signature
    MissingSignature,
}

impl Resolution {
    /// Resolved audio, if any
    pub fn audio(&self) -> Option<&AudioInfo> {
        match self {
            Resolution::Found(info) => Some(info),
            _ => None,
        }
    }
}

impl Serialize for Resolution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Resolution::Found(info) => info.serialize(serializer),
            Resolution::Absent => serializer.serialize_unit(),
            Resolution::MissingSignature => {
                ErrorBody::new(MISSING_SIGNATURE_MESSAGE).serialize(serializer)
            }
        }
    }
}
