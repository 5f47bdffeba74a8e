//! Output formatting

use crate::cli::args::VerbosityLevel;
use crate::core::audio_info::{AudioInfo, Resolution, MISSING_SIGNATURE_MESSAGE};
use crate::error::YoatError;

/// Output formatter for yoat
pub struct OutputFormatter {
    verbosity: VerbosityLevel,
    json: bool,
}

impl OutputFormatter {
    /// Create a new output formatter
    pub fn new(verbosity: VerbosityLevel) -> Self {
        Self {
            verbosity,
            json: false,
        }
    }

    /// Print resolutions as JSON
    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    /// Print info message
    pub fn info(&self, message: &str) {
        if self.verbosity != VerbosityLevel::Quiet {
            println!("ℹ️  {}", message);
        }
    }

    /// Print error message
    pub fn error(&self, message: &str) {
        eprintln!("❌ {}", message);
    }

    /// Print the outcome of resolving `video_id`
    pub fn print_resolution(&self, video_id: &str, resolution: &Resolution) -> Result<(), YoatError> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(resolution)?);
            return Ok(());
        }

        match resolution {
            Resolution::Found(info) => self.print_audio_info(info),
            Resolution::Absent => self.info(&format!("No player data for {}", video_id)),
            Resolution::MissingSignature => {
                self.error(&format!("{}: {}", video_id, MISSING_SIGNATURE_MESSAGE))
            }
        }
        Ok(())
    }

    /// Print resolved audio information
    ///
    /// In quiet mode only the stream URL is printed.
    pub fn print_audio_info(&self, info: &AudioInfo) {
        if self.verbosity == VerbosityLevel::Quiet {
            println!("{}", info.url);
            return;
        }

        println!("📹 {}", info.title);
        println!("👤 {}", info.author);
        println!("🎵 {}", format_bitrate(info.bitrate));
        println!("🔗 {}", info.url);
    }

    /// Print help text
    pub fn print_help(&self) {
        println!("yoat - audio stream resolver");
        println!();
        println!("Usage: yoat [OPTIONS] [ID]");
        println!();
        println!("Examples:");
        println!("  yoat dQw4w9WgXcQ");
        println!("  yoat --json https://youtu.be/dQw4w9WgXcQ");
        println!("  yoat --serve --listen 0.0.0.0:8080");
        println!();
        println!("For more information, run: yoat --help");
    }
}

/// Format a bitrate in bits per second as a human-readable string
fn format_bitrate(bitrate: u64) -> String {
    if bitrate < 1000 {
        format!("{} bps", bitrate)
    } else if bitrate < 1_000_000 {
        format!("{} kbps", bitrate / 1000)
    } else {
        format!("{:.1} Mbps", bitrate as f64 / 1_000_000.0)
    }
}
