//! The synthesized signature descrambler

use super::{CallArg, ExtractError, OperationTable, ScrambleCall, TransformEntry};

#[derive(Debug, Clone, Copy)]
struct Step {
    transform: &'static TransformEntry,
    count: usize,
}

/// Maps a scrambled signature to its descrambled form
///
/// Holds the call sequence of one player script with every operation already
/// bound to its transform, so applying it cannot fail.
#[derive(Debug, Clone)]
pub struct Descrambler {
    steps: Vec<Step>,
}

impl Descrambler {
    /// Bind each call to its transform from `table`
    ///
    /// Every call must receive the character array in at least one argument.
    /// The numeric argument is the first literal; a call without one uses 0.
    pub fn new(calls: Vec<ScrambleCall>, table: &OperationTable) -> Result<Self, ExtractError> {
        let steps = calls
            .into_iter()
            .map(|call| {
                let transform = table
                    .get(&call.name)
                    .ok_or_else(|| ExtractError::DefinitionNotFound(call.name.clone()))?;

                if call.arg1 != CallArg::CharArray && call.arg2 != CallArg::CharArray {
                    return Err(ExtractError::DetachedCall(call.name));
                }

                let count = call.arg1.number().or(call.arg2.number()).unwrap_or(0);
                Ok(Step {
                    transform,
                    count: usize::try_from(count).unwrap_or(usize::MAX),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { steps })
    }

    /// Number of calls applied per descramble
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Run the call sequence, in source order, over the characters of `input`
    pub fn descramble(&self, input: &str) -> String {
        self.steps
            .iter()
            .fold(input.chars().collect::<Vec<char>>(), |chars, step| {
                step.transform.run(chars, step.count)
            })
            .into_iter()
            .collect()
    }
}
