//! Locating the descrambler function inside a player script

use super::ExtractError;
use regex::Regex;

/// A function definition found in the script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocatedFunction<'a> {
    /// Whole definition, from `function` through the closing brace
    pub span: &'a str,
    /// First parameter name
    pub param: &'a str,
    /// Text between the braces
    pub body: &'a str,
}

/// Find the descrambler function in `script`
///
/// The function is recognized by shape, not by name: a flat body (no nested
/// braces) that splits its input into characters and ends by joining them
/// back into a string. The first such function in source order is returned.
pub fn locate_descrambler(script: &str) -> Result<LocatedFunction<'_>, ExtractError> {
    let fn_regex = Regex::new(concat!(
        r#"(?:^|[^\w$])(function\b\s*[\w$]*\s*\(\s*([\w$]+)[\w$,\s]*\)\s*\{"#,
        r#"([^{}]*?\.split\((?:""|'')\)[^{}]*\.join\((?:""|'')\)[\s;]*)\})"#
    ))?;

    let captures = fn_regex
        .captures(script)
        .ok_or(ExtractError::FunctionNotFound)?;

    match (captures.get(1), captures.get(2), captures.get(3)) {
        (Some(span), Some(param), Some(body)) => Ok(LocatedFunction {
            span: span.as_str(),
            param: param.as_str(),
            body: body.as_str(),
        }),
        _ => Err(ExtractError::FunctionNotFound),
    }
}
