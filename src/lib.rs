//! # yoat - audio stream resolver
//!
//! Resolves the highest-bitrate audio stream of a video into a playable URL.
//!
//! ## Features
//!
//! - Player response parsing and audio stream selection
//! - Signature descrambling synthesized from the platform's player script
//! - One-shot CLI and a JSON HTTP service
//! - Timeout retry logic
//!
//! ## Example
//!
//! ```rust,no_run
//! use yoat::{AudioResolver, PlatformClient, Resolution};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let resolver = AudioResolver::new(PlatformClient::new()?);
//!
//!     if let Resolution::Found(info) = resolver.resolve("VIDEO_ID").await? {
//!         println!("{}: {}", info.title, info.url);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod core;
pub mod error;
pub mod platform;
pub mod server;
pub mod utils;

// Re-export main types
pub use crate::core::{AudioInfo, AudioResolver, Resolution};
pub use error::YoatError;
pub use platform::{
    build_descrambler, Descrambler, ExtractError, PlatformClient, SourceFetcher, TransformRegistry,
};

/// Result type alias for yoat operations
pub type Result<T> = std::result::Result<T, YoatError>;
