//! Error types for tokenizing, tree building and Serde support.
//!
//! ## Error Categories
//!
//! - **Syntax Errors**: the source text does not follow the list grammar
//!   (unmatched brackets, unterminated strings, stray escapes, quotes or
//!   escapes inside an atom). These are reported for the whole parse: no
//!   partial tree is ever returned and no offset is attached.
//! - **Decoding Errors**: the text is well formed but does not fit the
//!   requested Rust type.
//! - **I/O Errors**: reading or writing failed.
//!
//! ## Examples
//!
//! ```rust
//! use lisp_list::{parse, Error};
//!
//! let err = parse("(a b").unwrap_err();
//! assert!(matches!(err, Error::UnmatchedBracket));
//! assert!(err.is_syntax());
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors produced by this crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A `)` without a matching `(`, or a `(` that is never closed
    #[error("Syntax error: unmatched bracket")]
    UnmatchedBracket,

    /// The input ended inside a quoted string
    #[error("Syntax error: unterminated quoted string")]
    UnterminatedString,

    /// `\` is only allowed inside quoted strings
    #[error("Syntax error: escape character outside of a quoted string")]
    EscapeOutsideString,

    /// A `"` or `\` was found while scanning an unquoted atom
    #[error("Syntax error: illegal character {ch:?} inside an unquoted atom")]
    IllegalCharInAtom { ch: char },

    /// The document holds no value at all
    #[error("Document is empty")]
    EmptyDocument,

    /// The document holds more than one top-level value
    #[error("Expected a single top-level value, found {count}")]
    TrailingValues { count: usize },

    /// Type mismatch during deserialization
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// A map key or object-style key position holds a list
    #[error("Keys must be scalars, found a list")]
    KeyMustBeScalar,

    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),

    /// Generic message
    #[error("{0}")]
    Message(String),
}

impl Error {
    /// Returns `true` for errors caused by malformed list text.
    ///
    /// ```rust
    /// use lisp_list::Error;
    ///
    /// assert!(Error::UnterminatedString.is_syntax());
    /// assert!(!Error::EmptyDocument.is_syntax());
    /// ```
    #[must_use]
    pub const fn is_syntax(&self) -> bool {
        matches!(
            self,
            Error::UnmatchedBracket
                | Error::UnterminatedString
                | Error::EscapeOutsideString
                | Error::IllegalCharInAtom { .. }
        )
    }

    /// Creates a type mismatch error when a node cannot be decoded into the target type.
    ///
    /// ```rust
    /// use lisp_list::Error;
    ///
    /// let err = Error::type_mismatch("list", "unquoted atom");
    /// assert!(err.to_string().contains("expected list"));
    /// ```
    pub fn type_mismatch(expected: &str, found: &str) -> Self {
        Error::TypeMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
