//! Matching operation names to the transforms they implement

use super::{ExtractError, ScrambleCall, TransformEntry, TransformRegistry};
use regex::Regex;
use std::collections::HashMap;
use tracing::debug;

/// Operation name to transform, for one player script
#[derive(Debug, Default)]
pub struct OperationTable {
    entries: HashMap<String, &'static TransformEntry>,
}

impl OperationTable {
    /// Transform bound to `name`
    pub fn get(&self, name: &str) -> Option<&'static TransformEntry> {
        self.entries.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolve every distinct operation name in `calls` against `registry`
///
/// Either every name resolves or the whole classification fails; a partial
/// table is never returned.
pub fn classify_operations(
    script: &str,
    calls: &[ScrambleCall],
    registry: &TransformRegistry,
) -> Result<OperationTable, ExtractError> {
    let mut table = OperationTable::default();

    for call in calls {
        if table.entries.contains_key(&call.name) {
            continue;
        }

        let definition = find_definition(script, &call.name)?
            .ok_or_else(|| ExtractError::DefinitionNotFound(call.name.clone()))?;
        let entry = registry
            .classify(definition)
            .ok_or_else(|| ExtractError::UnknownTransform(call.name.clone()))?;

        debug!("Operation '{}' classified as {:?}", call.name, entry.kind);
        table.entries.insert(call.name.clone(), entry);
    }

    Ok(table)
}

/// Text of `name:function(...){...}`, up to and including the first closing brace
fn find_definition<'a>(script: &'a str, name: &str) -> Result<Option<&'a str>, ExtractError> {
    let definition_regex = Regex::new(&format!(
        r#"(?:^|[^\w$])({}\s*:\s*function\b[^}}]*\}})"#,
        regex::escape(name)
    ))?;

    Ok(definition_regex
        .captures(script)
        .and_then(|captures| captures.get(1))
        .map(|definition| definition.as_str()))
}
