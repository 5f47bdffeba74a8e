//! Video platform client, page parsing and signature descrambling

pub mod cipher;
pub mod client;
pub mod formats;
pub mod player;
pub mod retry;

pub use cipher::{build_descrambler, Descrambler, ExtractError, TransformRegistry};
pub use client::*;
pub use formats::*;
pub use player::*;
pub use retry::*;
