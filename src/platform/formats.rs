//! Audio stream selection and cipher block parsing

use crate::platform::player::FormatData;

/// Query parameter the descrambled signature goes in when the cipher names none
pub const DEFAULT_SIGNATURE_PARAM: &str = "sig";

/// Where the playable URL of a stream comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamSource {
    /// The stream carries a playable URL as-is
    Direct(String),
    /// The URL needs a descrambled signature appended
    Ciphered(CipherParams),
    /// Ciphered, but the block carries no scrambled signature
    MissingSignature,
}

/// Fields of a cipher block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CipherParams {
    /// Stream URL without its signature
    pub url: Option<String>,
    /// Scrambled signature (`s`)
    pub scrambled: String,
    /// Name of the signature query parameter (`sp`)
    pub signature_param: String,
}

impl CipherParams {
    /// Parse a URL-encoded cipher block
    ///
    /// Returns `None` when the block has no non-empty `s` field.
    pub fn parse(block: &str) -> Option<Self> {
        let mut url = None;
        let mut scrambled = None;
        let mut signature_param = None;

        for (key, value) in url::form_urlencoded::parse(block.as_bytes()) {
            match key.as_ref() {
                "url" => url = Some(value.into_owned()),
                "s" => scrambled = Some(value.into_owned()),
                "sp" => signature_param = Some(value.into_owned()),
                _ => {}
            }
        }

        Some(Self {
            url,
            scrambled: scrambled.filter(|s| !s.is_empty())?,
            signature_param: signature_param
                .filter(|sp| !sp.is_empty())
                .unwrap_or_else(|| DEFAULT_SIGNATURE_PARAM.to_string()),
        })
    }

    /// Append the descrambled signature to `url`
    pub fn signed_url(url: &str, signature_param: &str, signature: &str) -> String {
        let encoded: String = url::form_urlencoded::byte_serialize(signature.as_bytes()).collect();
        format!("{}&{}={}", url, signature_param, encoded)
    }
}

/// Highest-bitrate stream whose MIME type is audio; ties keep the earlier one
pub fn select_best_audio(formats: &[FormatData]) -> Option<&FormatData> {
    formats
        .iter()
        .filter(|f| f.is_audio())
        .fold(None, |best: Option<&FormatData>, f| match best {
            Some(b) if b.effective_bitrate() >= f.effective_bitrate() => Some(b),
            _ => Some(f),
        })
}

/// Decide how the playable URL of `format` is obtained
pub fn stream_source(format: &FormatData) -> StreamSource {
    if let Some(url) = format.url.as_deref().filter(|u| !u.is_empty()) {
        return StreamSource::Direct(url.to_string());
    }

    match format.cipher_block().and_then(CipherParams::parse) {
        Some(params) => StreamSource::Ciphered(params),
        None => StreamSource::MissingSignature,
    }
}
