//! Type inference and the unification lattice (spec §3, §4.B).

use chrono::{NaiveDate, NaiveDateTime};
use strum_macros::{Display, EnumString};

use crate::value::Row;

/// A locale tag carried by an inferred `Date` column. `None` means the
/// sampled text is ambiguous between cultures (e.g. an ISO date, or a
/// day/month pair that's valid read either way).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum Culture {
    Invariant,
    EnGb,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InferredType {
    Any,
    String,
    Int,
    Float,
    Bool,
    OneZero,
    Date(Option<Culture>),
}

/// Ordered `(column, type)` pairs; order matches the canonical column order
/// of the row set it was inferred from.
pub type Metadata = Vec<(String, InferredType)>;

/// Sample no more than this many rows when inferring column types (spec §4.B).
const MAX_SAMPLE_ROWS: usize = 100;

/// Infers metadata for a row set, sampling at most `MAX_SAMPLE_ROWS` rows.
pub fn infer_metadata(rows: &[Row]) -> Metadata {
    let Some(first) = rows.first() else {
        return Vec::new();
    };
    let column_order: Vec<&str> = first.iter().map(|(name, _)| name.as_str()).collect();
    let sample = &rows[..rows.len().min(MAX_SAMPLE_ROWS)];

    column_order
        .into_iter()
        .map(|name| {
            let ty = sample
                .iter()
                .filter_map(|row| row.iter().find(|(n, _)| n == name))
                .map(|(_, v)| infer_type(&v.as_string()))
                .fold(InferredType::Any, unify);
            (name.to_string(), ty)
        })
        .collect()
}

/// Per-cell classifier — spec §4.B step list.
pub fn infer_type(s: &str) -> InferredType {
    if let Ok(i) = s.parse::<i32>() {
        return if i == 0 || i == 1 {
            InferredType::OneZero
        } else {
            InferredType::Int
        };
    }
    if s.parse::<f64>().is_ok() {
        return InferredType::Float;
    }
    let invariant = parse_invariant_date(s).is_some();
    let en_gb = parse_en_gb_date(s).is_some();
    if invariant && en_gb {
        return InferredType::Date(None);
    }
    if invariant {
        return InferredType::Date(Some(Culture::Invariant));
    }
    if en_gb {
        return InferredType::Date(Some(Culture::EnGb));
    }
    if s.eq_ignore_ascii_case("true") || s.eq_ignore_ascii_case("false") {
        return InferredType::Bool;
    }
    InferredType::String
}

/// Pairwise lattice unification — spec §4.B. Symmetric and associative.
pub fn unify(a: InferredType, b: InferredType) -> InferredType {
    use InferredType::*;
    if a == b {
        return a;
    }
    match (a, b) {
        (Any, x) | (x, Any) => x,
        (Date(Some(c)), Date(None)) | (Date(None), Date(Some(c))) => Date(Some(c)),
        (Bool, OneZero) | (OneZero, Bool) => Bool,
        (Int, OneZero) | (OneZero, Int) => Int,
        (Float, OneZero) | (OneZero, Float) => Float,
        (Int, Float) | (Float, Int) => Float,
        _ => String,
    }
}

/// Projects an `InferredType` to its external JSON-metadata name.
pub fn format_type(t: &InferredType) -> &'static str {
    match t {
        InferredType::String | InferredType::Any => "string",
        InferredType::Bool | InferredType::OneZero => "bool",
        InferredType::Int | InferredType::Float => "number",
        InferredType::Date(_) => "date",
    }
}

const INVARIANT_DATE_ONLY: &[&str] = &["%m/%d/%Y", "%Y-%m-%d"];
const INVARIANT_DATE_TIME: &[&str] = &[
    "%m/%d/%Y %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%m/%d/%Y %I:%M:%S %p",
];
const EN_GB_DATE_ONLY: &[&str] = &["%d/%m/%Y", "%Y-%m-%d"];
const EN_GB_DATE_TIME: &[&str] = &["%d/%m/%Y %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

fn parse_invariant_date(s: &str) -> Option<NaiveDateTime> {
    parse_with_formats(s, INVARIANT_DATE_ONLY, INVARIANT_DATE_TIME)
}

fn parse_en_gb_date(s: &str) -> Option<NaiveDateTime> {
    parse_with_formats(s, EN_GB_DATE_ONLY, EN_GB_DATE_TIME)
}

fn parse_with_formats(s: &str, date_only: &[&str], date_time: &[&str]) -> Option<NaiveDateTime> {
    let s = s.trim();
    for fmt in date_time {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    for fmt in date_only {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }
    None
}

/// Parses a literal as an instant, trying invariant then en-GB formats — used
/// by the evaluator's date-typed condition handling (spec §4.D).
pub fn parse_instant(s: &str) -> Option<chrono::DateTime<chrono::FixedOffset>> {
    use chrono::{FixedOffset, TimeZone};
    let naive = parse_invariant_date(s).or_else(|| parse_en_gb_date(s))?;
    FixedOffset::east_opt(0)
        .unwrap()
        .from_local_datetime(&naive)
        .single()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_int_and_one_zero() {
        assert_eq!(infer_type("1"), InferredType::OneZero);
        assert_eq!(infer_type("0"), InferredType::OneZero);
        assert_eq!(infer_type("2"), InferredType::Int);
    }

    #[test]
    fn classifies_float() {
        assert_eq!(infer_type("1.5"), InferredType::Float);
    }

    #[test]
    fn classifies_bool() {
        assert_eq!(infer_type("true"), InferredType::Bool);
        assert_eq!(infer_type("FALSE"), InferredType::Bool);
    }

    #[test]
    fn classifies_iso_date_as_ambiguous() {
        assert_eq!(infer_type("2020-01-05"), InferredType::Date(None));
    }

    #[test]
    fn classifies_unambiguous_en_gb_date() {
        // day 13 is invalid as a month, so this only parses under en-GB.
        assert_eq!(
            infer_type("13/01/2020"),
            InferredType::Date(Some(Culture::EnGb))
        );
    }

    #[test]
    fn classifies_unambiguous_invariant_date() {
        assert_eq!(
            infer_type("01/13/2020"),
            InferredType::Date(Some(Culture::Invariant))
        );
    }

    #[test]
    fn classifies_plain_string() {
        assert_eq!(infer_type("hello"), InferredType::String);
    }

    #[test]
    fn unify_is_commutative() {
        use InferredType::*;
        let pairs = [(Int, Float), (Bool, OneZero), (Any, String)];
        for (a, b) in pairs {
            assert_eq!(unify(a, b), unify(b, a));
        }
    }

    #[test]
    fn unify_any_is_identity() {
        assert_eq!(unify(InferredType::Any, InferredType::Int), InferredType::Int);
    }

    #[test]
    fn unify_mismatched_collapses_to_string() {
        assert_eq!(unify(InferredType::Bool, InferredType::Int), InferredType::String);
    }

    #[test]
    fn unify_converges_over_sample() {
        let sample = [
            InferredType::OneZero,
            InferredType::OneZero,
            InferredType::Int,
        ];
        let folded = sample.into_iter().fold(InferredType::Any, unify);
        assert_eq!(folded, InferredType::Int);
    }

    #[test]
    fn unify_is_associative() {
        use InferredType::*;
        let (a, b, c) = (OneZero, Int, Float);
        assert_eq!(unify(unify(a, b), c), unify(a, unify(b, c)));
    }
}
