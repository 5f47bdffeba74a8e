//! Audio resolution for yoat

pub mod audio_info;
pub mod resolver;

pub use audio_info::*;
pub use resolver::*;
