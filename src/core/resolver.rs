//! Audio stream resolution pipeline

use crate::core::audio_info::{AudioInfo, Resolution};
use crate::error::YoatError;
use crate::platform::cipher::{build_descrambler, TransformRegistry};
use crate::platform::formats::{select_best_audio, stream_source, CipherParams, StreamSource};
use crate::platform::player::{extract_player_script_path, parse_player_response};
use crate::platform::SourceFetcher;
use tracing::{debug, info, warn};

/// Resolves the best audio stream of a video
///
/// Every call to [`AudioResolver::resolve`] fetches its own documents and
/// builds its own descrambler; nothing is shared between resolutions except
/// the fetcher and the read-only transform registry.
pub struct AudioResolver<F> {
    fetcher: F,
    registry: &'static TransformRegistry,
}

impl<F: SourceFetcher> AudioResolver<F> {
    /// Create a resolver using the standard transform registry
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            registry: TransformRegistry::standard(),
        }
    }

    /// Use a different transform registry
    pub fn with_registry(mut self, registry: &'static TransformRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Get the underlying fetcher
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Resolve the highest-bitrate audio stream of `video_id`
    pub async fn resolve(&self, video_id: &str) -> Result<Resolution, YoatError> {
        info!("Resolving audio for video ID: {}", video_id);

        let body = self.fetcher.fetch_video_info(video_id).await?;
        let player = match parse_player_response(&body) {
            Some(player) => player,
            None => {
                info!("No player data for video ID: {}", video_id);
                return Ok(Resolution::Absent);
            }
        };

        if let Some(status) = &player.playability_status {
            debug!("Playability status: {} {:?}", status.status, status.reason);
        }

        let format = select_best_audio(player.adaptive_formats()).ok_or(YoatError::NoAudioStream)?;
        debug!(
            "Selected audio stream itag={:?} mime={} bitrate={}",
            format.itag,
            format.mime_type,
            format.effective_bitrate()
        );

        let url = match stream_source(format) {
            StreamSource::Direct(url) => url,
            StreamSource::MissingSignature => {
                warn!("Ciphered stream of {} carries no signature", video_id);
                return Ok(Resolution::MissingSignature);
            }
            StreamSource::Ciphered(params) => {
                let base_url = params.url.as_deref().ok_or_else(|| {
                    YoatError::MalformedCipher("cipher block carries no url".to_string())
                })?;
                let signature = self.descramble(video_id, &params.scrambled).await?;
                CipherParams::signed_url(base_url, &params.signature_param, &signature)
            }
        };

        Ok(Resolution::Found(AudioInfo {
            id: video_id.to_string(),
            title: player.title().to_string(),
            author: player.author().to_string(),
            url,
            bitrate: format.effective_bitrate(),
        }))
    }

    /// Fetch the player script of `video_id` and descramble `scrambled` with it
    async fn descramble(&self, video_id: &str, scrambled: &str) -> Result<String, YoatError> {
        let watch_html = self.fetcher.fetch_watch_page(video_id).await?;
        let script_path = extract_player_script_path(&watch_html)?;
        debug!("Player script path: {}", script_path);

        let script = self.fetcher.fetch_script(&script_path).await?;
        let descrambler = build_descrambler(&script, self.registry)?;

        let signature = descrambler.descramble(scrambled);
        debug!("Signature descrambled with {} calls", descrambler.len());
        Ok(signature)
    }
}
