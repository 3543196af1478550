//! Typed coercion of scalar text.
//!
//! Scalars are untyped in the list notation. [`coerce`] classifies their text
//! by trying parsers in a fixed order and keeping the first success:
//!
//! 1. unsigned 64-bit integer
//! 2. signed 64-bit integer
//! 3. `f64` (locale-independent decimal notation)
//! 4. boolean (`true`/`false`, any ASCII case)
//! 5. the text itself
//!
//! ```rust
//! use lisp_list::{coerce, ParsedValue};
//!
//! assert_eq!(coerce("18446744073709551615"), ParsedValue::UInt(u64::MAX));
//! assert_eq!(coerce("-5"), ParsedValue::Int(-5));
//! assert_eq!(coerce("1.5"), ParsedValue::Float(1.5));
//! assert_eq!(coerce("TRUE"), ParsedValue::Bool(true));
//! assert_eq!(coerce("hello"), ParsedValue::Str("hello".into()));
//! ```

use crate::tree::Node;
use std::borrow::Cow;
use std::fmt;

/// The outcome of coercing a scalar.
///
/// Values are produced on demand and never stored in the tree.
#[derive(Clone, Debug, PartialEq)]
pub enum ParsedValue<'a> {
    UInt(u64),
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(Cow<'a, str>),
}

/// The variant of a [`ParsedValue`], without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    UInt,
    Int,
    Float,
    Bool,
    Str,
}

impl<'a> ParsedValue<'a> {
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            ParsedValue::UInt(_) => ValueKind::UInt,
            ParsedValue::Int(_) => ValueKind::Int,
            ParsedValue::Float(_) => ValueKind::Float,
            ParsedValue::Bool(_) => ValueKind::Bool,
            ParsedValue::Str(_) => ValueKind::Str,
        }
    }

    /// Returns the value as `u64` if it was classified as an unsigned integer.
    #[inline]
    #[must_use]
    pub const fn as_u64(&self) -> Option<u64> {
        match self {
            ParsedValue::UInt(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value as `i64` for signed integers and for unsigned ones
    /// that fit.
    ///
    /// ```rust
    /// use lisp_list::coerce;
    ///
    /// assert_eq!(coerce("42").as_i64(), Some(42));
    /// assert_eq!(coerce("-42").as_i64(), Some(-42));
    /// assert_eq!(coerce("18446744073709551615").as_i64(), None);
    /// ```
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ParsedValue::Int(v) => Some(*v),
            ParsedValue::UInt(v) => i64::try_from(*v).ok(),
            _ => None,
        }
    }

    /// Returns any numeric value as `f64`.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParsedValue::UInt(v) => Some(*v as f64),
            ParsedValue::Int(v) => Some(*v as f64),
            ParsedValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            ParsedValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the text if no typed parser matched.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParsedValue::Str(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn into_owned(self) -> ParsedValue<'static> {
        match self {
            ParsedValue::UInt(v) => ParsedValue::UInt(v),
            ParsedValue::Int(v) => ParsedValue::Int(v),
            ParsedValue::Float(v) => ParsedValue::Float(v),
            ParsedValue::Bool(v) => ParsedValue::Bool(v),
            ParsedValue::Str(s) => ParsedValue::Str(Cow::Owned(s.into_owned())),
        }
    }
}

impl fmt::Display for ParsedValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParsedValue::UInt(v) => write!(f, "{}", v),
            ParsedValue::Int(v) => write!(f, "{}", v),
            ParsedValue::Float(v) => write!(f, "{}", v),
            ParsedValue::Bool(v) => write!(f, "{}", v),
            ParsedValue::Str(s) => f.write_str(s),
        }
    }
}

/// Classifies `text` using the ordered trial parse described in the module docs.
///
/// Surrounding whitespace is ignored by the numeric and boolean parsers; the
/// string fallback keeps the text untouched.
#[must_use]
pub fn coerce(text: &str) -> ParsedValue<'_> {
    let trimmed = text.trim();
    if let Ok(v) = trimmed.parse::<u64>() {
        return ParsedValue::UInt(v);
    }
    if let Ok(v) = trimmed.parse::<i64>() {
        return ParsedValue::Int(v);
    }
    if let Ok(v) = trimmed.parse::<f64>() {
        return ParsedValue::Float(v);
    }
    if trimmed.eq_ignore_ascii_case("true") {
        return ParsedValue::Bool(true);
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return ParsedValue::Bool(false);
    }
    ParsedValue::Str(Cow::Borrowed(text))
}

impl<'a> Node<'a> {
    /// Coerces a scalar's [`Node::text`]. Returns `None` for lists.
    ///
    /// Quotes do not protect a value from coercion: `"12"` is still an
    /// unsigned integer.
    ///
    /// ```rust
    /// use lisp_list::{parse, ParsedValue};
    ///
    /// let root = parse(r#"(3 "12" -1 2.5 false x)"#).unwrap().unwrap();
    /// let values: Vec<_> = root[0].iter().filter_map(|n| n.parse_value()).collect();
    /// assert_eq!(values[0], ParsedValue::UInt(3));
    /// assert_eq!(values[1], ParsedValue::UInt(12));
    /// assert_eq!(values[2], ParsedValue::Int(-1));
    /// assert_eq!(values[3], ParsedValue::Float(2.5));
    /// assert_eq!(values[4], ParsedValue::Bool(false));
    /// assert_eq!(values[5].as_str(), Some("x"));
    /// ```
    #[must_use]
    pub fn parse_value(&self) -> Option<ParsedValue<'_>> {
        if self.is_list() {
            return None;
        }
        Some(coerce(self.text()))
    }
}
