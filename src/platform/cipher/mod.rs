//! Signature descrambling for ciphered stream URLs
//!
//! The player script carries a flat function that splits the scrambled
//! signature into characters, runs it through a series of calls on a helper
//! object, and joins it back together. Each helper is one of three array
//! transforms. Building a [`Descrambler`] means locating that function,
//! reading its call sequence, and working out which transform every helper
//! name stands for.

pub mod calls;
pub mod classifier;
pub mod descrambler;
pub mod locator;
pub mod registry;

pub use calls::{extract_calls, CallArg, ScrambleCall};
pub use classifier::{classify_operations, OperationTable};
pub use descrambler::Descrambler;
pub use locator::{locate_descrambler, LocatedFunction};
pub use registry::{TransformEntry, TransformKind, TransformRegistry};

use thiserror::Error;
use tracing::debug;

/// Failures while turning a player script into a descrambler
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("descrambler function not found in player script")]
    FunctionNotFound,

    #[error("descrambler function contains no operation calls")]
    NoCalls,

    #[error("no definition found for operation '{0}'")]
    DefinitionNotFound(String),

    #[error("operation '{0}' matches no known transform")]
    UnknownTransform(String),

    #[error("call to '{0}' does not receive the character array")]
    DetachedCall(String),

    #[error("invalid scan pattern: {0}")]
    Pattern(String),
}

impl From<regex::Error> for ExtractError {
    fn from(error: regex::Error) -> Self {
        ExtractError::Pattern(error.to_string())
    }
}

/// Build the descrambler for one player script
pub fn build_descrambler(
    script: &str,
    registry: &TransformRegistry,
) -> Result<Descrambler, ExtractError> {
    let located = locate_descrambler(script)?;
    debug!(
        "Located descrambler function ({} bytes, param '{}')",
        located.span.len(),
        located.param
    );

    let calls = extract_calls(located.span)?;
    debug!("Extracted {} scramble calls", calls.len());

    let table = classify_operations(script, &calls, registry)?;
    Descrambler::new(calls, &table)
}
