//! Utility functions for yoat

pub mod url;

pub use self::url::*;
