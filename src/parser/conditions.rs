//! Condition parsing for `filter(...)` arguments (spec §4.C).

use super::chunks::trim_ident;
use crate::error::{Error, Result};
use crate::ir::{Condition, RelationalOperator};

const OPERATOR_TOKENS: &[(&str, RelationalOperator)] = &[
    (" eq ", RelationalOperator::Equals),
    (" neq ", RelationalOperator::NotEquals),
    (" lte ", RelationalOperator::LessThan),
    (" gte ", RelationalOperator::GreaterThan),
    (" in ", RelationalOperator::InRange),
    (" like ", RelationalOperator::Like),
];

/// Finds the first occurrence (scanning left-to-right, skipping quoted runs)
/// of one of the operator separators and splits the condition string there.
pub fn parse_condition(s: &str) -> Result<Condition> {
    let mut quoted = false;
    for (i, c) in s.char_indices() {
        if c == '\'' {
            quoted = !quoted;
            continue;
        }
        if quoted {
            continue;
        }
        for (sep, op) in OPERATOR_TOKENS {
            if s[i..].starts_with(sep) {
                let field = trim_ident(&s[..i]);
                let value = trim_ident(&s[i + sep.len()..]);
                return Ok((*op, field, value));
            }
        }
    }
    Err(Error::parse(format!(
        "no relational operator found in condition {s:?}"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_eq() {
        let (op, field, value) = parse_condition("age eq 18").unwrap();
        assert_eq!(op, RelationalOperator::Equals);
        assert_eq!(field, "age");
        assert_eq!(value, "18");
    }

    #[test]
    fn parses_quoted_field_and_value() {
        let (op, field, value) = parse_condition("'name' like 'an'").unwrap();
        assert_eq!(op, RelationalOperator::Like);
        assert_eq!(field, "name");
        assert_eq!(value, "an");
    }

    #[test]
    fn parses_in_range() {
        let (op, field, value) = parse_condition("age in 18,30").unwrap();
        assert_eq!(op, RelationalOperator::InRange);
        assert_eq!(field, "age");
        assert_eq!(value, "18,30");
    }

    #[test]
    fn unknown_operator_fails() {
        assert!(parse_condition("age foo 18").is_err());
    }
}
