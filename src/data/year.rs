//! Year Tag Module
//! Year values as requested by the caller and the yearly file naming pattern.

use serde::Serialize;
use std::fmt;

/// Placeholder written into file names when a year does not coerce to an integer.
pub const MISSING_YEAR: &str = "NA";

/// A year exactly as the caller supplied it.
///
/// The literal text is what ends up in the `year` column and in the summary
/// headers; the integer form is only used to build the file name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct YearTag(String);

impl YearTag {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The literal value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Integer form of the year, `None` when the value is not numeric.
    pub fn as_integer(&self) -> Option<i64> {
        coerce_integer(&self.0)
    }
}

impl fmt::Display for YearTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for YearTag {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for YearTag {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<i64> for YearTag {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl From<i32> for YearTag {
    fn from(value: i32) -> Self {
        Self(value.to_string())
    }
}

impl From<&YearTag> for YearTag {
    fn from(value: &YearTag) -> Self {
        value.clone()
    }
}

/// Coerce free-form text to an integer.
///
/// Accepts integers and finite decimals (truncated toward zero), surrounding
/// whitespace ignored. Anything else is `None`.
pub fn coerce_integer(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if let Ok(v) = trimmed.parse::<i64>() {
        return Some(v);
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && v.abs() < i64::MAX as f64)
        .map(|v| v.trunc() as i64)
}

/// Build the yearly accident file name, e.g. `accident_2013.csv.bz2`.
pub fn resolve_filename(year: impl Into<YearTag>) -> String {
    let year = year.into();
    match year.as_integer() {
        Some(y) => format!("accident_{}.csv.bz2", y),
        None => format!("accident_{}.csv.bz2", MISSING_YEAR),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_integer_year() {
        assert_eq!(resolve_filename(2013), "accident_2013.csv.bz2");
    }

    #[test]
    fn resolves_string_year() {
        assert_eq!(resolve_filename("2014"), "accident_2014.csv.bz2");
        assert_eq!(resolve_filename(" 2015 "), "accident_2015.csv.bz2");
        assert_eq!(resolve_filename("2015.0"), "accident_2015.csv.bz2");
    }

    #[test]
    fn resolution_is_deterministic() {
        let year = YearTag::from("2013");
        assert_eq!(resolve_filename(&year), resolve_filename(&year));
    }

    #[test]
    fn non_numeric_year_yields_placeholder_name() {
        assert_eq!(resolve_filename("twenty"), "accident_NA.csv.bz2");
        assert_eq!(resolve_filename(""), "accident_NA.csv.bz2");
    }

    #[test]
    fn coercion_truncates_decimals() {
        assert_eq!(coerce_integer("5.7"), Some(5));
        assert_eq!(coerce_integer("-3.2"), Some(-3));
        assert_eq!(coerce_integer("NaN"), None);
        assert_eq!(coerce_integer("abc"), None);
    }

    #[test]
    fn year_tag_keeps_literal_text() {
        let year = YearTag::from("2013.0");
        assert_eq!(year.as_str(), "2013.0");
        assert_eq!(year.as_integer(), Some(2013));
    }
}
