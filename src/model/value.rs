//! Scalar cell values and their coercion rules

use std::borrow::Cow;
use std::cmp::Ordering;
use std::sync::Arc;

use serde::{Serialize, Serializer};

/// A single cell.
///
/// Text is stored behind an `Arc` so that transforms copying a record share the
/// underlying string storage with the table they were derived from.
#[derive(Debug, Clone)]
pub enum Value {
    Text(Arc<str>),
    Number(f64),
    Null,
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => {
                // Handle NaN comparison
                if a.is_nan() && b.is_nan() {
                    true
                } else {
                    a == b
                }
            }
            _ => false,
        }
    }
}

impl Value {
    /// Build a text value
    pub fn text(s: impl Into<Arc<str>>) -> Self {
        Value::Text(s.into())
    }

    /// Interpret a literal: numbers become `Number`, `null` becomes `Null`,
    /// anything else stays `Text`.
    pub fn infer(s: &str) -> Self {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("null") {
            return Value::Null;
        }
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => Value::Number(n),
            _ => Value::text(trimmed),
        }
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Borrow the text of a `Text` value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric view of the value.
    ///
    /// `Number` is returned as is, `Text` is parsed after trimming, `Null` and
    /// non-numeric text have no numeric view.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            // `nan` and `inf` are words, not numbers
            Value::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            Value::Null => None,
        }
    }

    /// Order two values.
    ///
    /// When both sides have a numeric view they compare as numbers, so `"10" > "9"`.
    /// Otherwise non-null values compare by their display text. `Null` is unordered
    /// against everything, including another `Null`.
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        if self.is_null() || other.is_null() {
            return None;
        }
        match (self.as_number(), other.as_number()) {
            (Some(a), Some(b)) => a.partial_cmp(&b),
            _ => Some(self.display().cmp(&other.display())),
        }
    }

    /// Equality used by conditions: `Null` only equals `Null`, everything else goes
    /// through [`Value::compare`].
    pub fn loose_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            _ => self.compare(other) == Some(Ordering::Equal),
        }
    }

    /// Convert to a display string
    pub fn display(&self) -> Cow<'_, str> {
        match self {
            Value::Null => Cow::Borrowed("NULL"),
            Value::Number(n) => Cow::Owned(n.to_string()),
            Value::Text(s) => Cow::Borrowed(s.as_ref()),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_none(),
            Value::Text(s) => serializer.serialize_str(s),
            Value::Number(n) if n.fract() == 0.0 && n.abs() < i64::MAX as f64 => {
                serializer.serialize_i64(*n as i64)
            }
            Value::Number(n) => serializer.serialize_f64(*n),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::text(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::text(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_number() {
        assert_eq!(Value::from(" 35 ").as_number(), Some(35.0));
        assert_eq!(Value::Number(2.5).as_number(), Some(2.5));
        assert_eq!(Value::from("red").as_number(), None);
        assert_eq!(Value::Null.as_number(), None);
        for word in ["Nan", "NaN", "inf", "Infinity", "-INF"] {
            assert_eq!(Value::from(word).as_number(), None, "{word}");
        }
    }

    #[test]
    fn test_non_finite_words_compare_as_text() {
        assert!(Value::from("Nan").loose_eq(&Value::from("Nan")));
        assert!(!Value::from("Inf").loose_eq(&Value::from("Infinity")));
        assert_eq!(
            Value::from("Bob").compare(&Value::from("Nan")),
            Some(std::cmp::Ordering::Less)
        );
    }

    #[test]
    fn test_compare_numeric_before_text() {
        // numerically 10 > 9 even though "10" < "9" as text
        assert_eq!(
            Value::from("10").compare(&Value::from("9")),
            Some(Ordering::Greater)
        );
        assert_eq!(
            Value::from("2").compare(&Value::Number(1.0)),
            Some(Ordering::Greater)
        );
        assert_eq!(
            Value::from("Bob").compare(&Value::from("Merble")),
            Some(Ordering::Less)
        );
        assert_eq!(Value::Null.compare(&Value::Null), None);
        assert_eq!(Value::from("1").compare(&Value::Null), None);
    }

    #[test]
    fn test_loose_eq() {
        assert!(Value::from("1.0").loose_eq(&Value::Number(1.0)));
        assert!(Value::Null.loose_eq(&Value::Null));
        assert!(!Value::Null.loose_eq(&Value::from("")));
    }

    #[test]
    fn test_infer() {
        assert_eq!(Value::infer("42"), Value::Number(42.0));
        assert_eq!(Value::infer("NULL"), Value::Null);
        assert_eq!(Value::infer(" red "), Value::from("red"));
        assert_eq!(Value::infer("inf"), Value::from("inf"));
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Number(2.0).display(), "2");
        assert_eq!(Value::Number(0.5).display(), "0.5");
        assert_eq!(Value::Null.display(), "NULL");
        assert_eq!(Value::from("SICP").to_string(), "SICP");
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_string(&vec![
            Value::Number(2.0),
            Value::Number(1.5),
            Value::Null,
            Value::from("x"),
        ])
        .unwrap();
        assert_eq!(json, r#"[2,1.5,null,"x"]"#);
    }
}
