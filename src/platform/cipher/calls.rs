//! Reading the ordered operation calls out of the descrambler function

use super::ExtractError;
use regex::Regex;

/// One argument at a call site
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallArg {
    /// Numeric literal
    Number(u64),
    /// Anything that is not a number: the running character array is passed
    CharArray,
}

impl CallArg {
    /// Classify a raw argument token
    pub fn from_token(token: &str) -> Self {
        parse_numeric_literal(token).map_or(CallArg::CharArray, CallArg::Number)
    }

    /// Numeric value, if this is a literal
    pub fn number(self) -> Option<u64> {
        match self {
            CallArg::Number(n) => Some(n),
            CallArg::CharArray => None,
        }
    }
}

/// A `receiver.name(arg1,arg2)` invocation inside the descrambler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrambleCall {
    /// Operation name as written in the script
    pub name: String,
    pub arg1: CallArg,
    pub arg2: CallArg,
}

/// Extract every two-argument method call from `span`, in source order
pub fn extract_calls(span: &str) -> Result<Vec<ScrambleCall>, ExtractError> {
    let call_regex = Regex::new(r#"([\w$]+)\.([\w$]+)\(\s*([\w$]+)\s*,\s*([\w$]+)\s*\)"#)?;

    let calls: Vec<ScrambleCall> = call_regex
        .captures_iter(span)
        .filter_map(|captures| {
            let (name, arg1, arg2) = (captures.get(2)?, captures.get(3)?, captures.get(4)?);
            Some(ScrambleCall {
                name: name.as_str().to_string(),
                arg1: CallArg::from_token(arg1.as_str()),
                arg2: CallArg::from_token(arg2.as_str()),
            })
        })
        .collect();

    if calls.is_empty() {
        return Err(ExtractError::NoCalls);
    }
    Ok(calls)
}

/// Decimal or `0x` hexadecimal literal; saturates on overflow
fn parse_numeric_literal(token: &str) -> Option<u64> {
    let (digits, radix) = match token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
    {
        Some(hex) => (hex, 16),
        None => (token, 10),
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }

    Some(digits.chars().fold(0u64, |acc, c| {
        acc.saturating_mul(radix as u64)
            .saturating_add(c.to_digit(radix).unwrap_or(0) as u64)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(name: &str, arg1: CallArg, arg2: CallArg) -> ScrambleCall {
        ScrambleCall {
            name: name.to_string(),
            arg1,
            arg2,
        }
    }

    #[test]
    fn test_extract_preserves_order() {
        let calls = extract_calls("function(a){a=a.split(\"\");x.foo(a,2);x.bar(a,0);return a.join(\"\")}")
            .unwrap();

        assert_eq!(
            calls,
            vec![
                call("foo", CallArg::CharArray, CallArg::Number(2)),
                call("bar", CallArg::CharArray, CallArg::Number(0)),
            ]
        );
    }

    #[test]
    fn test_extract_repeated_names() {
        let calls = extract_calls("Kq.Ab(a,1);Kq.Cd(a,22);Kq.Ab(a,3)").unwrap();
        let names: Vec<&str> = calls.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Ab", "Cd", "Ab"]);
        assert_eq!(calls[2].arg2, CallArg::Number(3));
    }

    #[test]
    fn test_extract_skips_other_shapes() {
        let span = "function(a){a=a.split(\"\");Kq.Ab(a);Kq.Cd(a,1,2);g.h.Ef(a,5);Kq.$x(a, 0x1f );return a.join(\"\")}";
        let calls = extract_calls(span).unwrap();

        assert_eq!(
            calls,
            vec![
                call("Ef", CallArg::CharArray, CallArg::Number(5)),
                call("$x", CallArg::CharArray, CallArg::Number(31)),
            ]
        );
    }

    #[test]
    fn test_sentinel_in_either_position() {
        let calls = extract_calls("Kq.Ab(3,a);Kq.Cd(a,b)").unwrap();
        assert_eq!(calls[0], call("Ab", CallArg::Number(3), CallArg::CharArray));
        assert_eq!(calls[1], call("Cd", CallArg::CharArray, CallArg::CharArray));
    }

    #[test]
    fn test_no_calls() {
        assert_eq!(
            extract_calls("function(a){a=a.split(\"\");return a.join(\"\")}"),
            Err(ExtractError::NoCalls)
        );
    }

    #[test]
    fn test_call_arg_from_token() {
        assert_eq!(CallArg::from_token("17"), CallArg::Number(17));
        assert_eq!(CallArg::from_token("0"), CallArg::Number(0));
        assert_eq!(CallArg::from_token("0xA"), CallArg::Number(10));
        assert_eq!(CallArg::from_token("a"), CallArg::CharArray);
        assert_eq!(CallArg::from_token("1e"), CallArg::CharArray);
        assert_eq!(CallArg::from_token("0x"), CallArg::CharArray);
        assert_eq!(
            CallArg::from_token("99999999999999999999999"),
            CallArg::Number(u64::MAX)
        );
        assert_eq!(CallArg::Number(4).number(), Some(4));
        assert_eq!(CallArg::CharArray.number(), None);
    }
}
