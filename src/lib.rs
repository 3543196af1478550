//! # lisp_list
//!
//! A tokenizer, tree builder and renderer for a minimal Lisp-like list
//! notation, with Serde support.
//!
//! ## What is the list notation?
//!
//! Text is made of nested parenthesized lists holding quoted strings and
//! unquoted atoms, separated by whitespace:
//!
//! ```text
//! (name "Ada Lovelace" born 1815 (tags math poetry))
//! ```
//!
//! There are no symbols, no evaluation and no macros: text is tokenized,
//! structured, queried and written back out. See [`format`] for the grammar.
//!
//! ## Key Features
//!
//! - **Zero-copy**: tokens and tree nodes borrow the source text; a node's
//!   unescaped text is computed at most once
//! - **Span-based trees**: nesting is rebuilt from token positions alone
//! - **Typed coercion**: scalars classify as `u64`, `i64`, `f64`, `bool` or string
//! - **Object-style lookup**: lists of alternating keys and values act as records
//! - **Two renderers**: pretty-printed list text and JSON
//! - **Serde Compatible**: encode and decode Rust types via `#[derive(Serialize, Deserialize)]`
//!
//! ## Quick Start
//!
//! ### Parsing and querying
//!
//! ```rust
//! use lisp_list::{parse, ParsedValue};
//!
//! let root = parse("(name \"Ada Lovelace\" born 1815)").unwrap().unwrap();
//! let record = &root[0];
//!
//! assert_eq!(record.get("name").map(|n| n.text()), Some("Ada Lovelace"));
//! let born = record.get("born").and_then(|n| n.parse_value());
//! assert_eq!(born, Some(ParsedValue::UInt(1815)));
//! ```
//!
//! ### Rendering
//!
//! ```rust
//! use lisp_list::{parse, PrintOptions};
//!
//! let root = parse("(a (b c))").unwrap().unwrap();
//! assert_eq!(root[0].to_json(), r#"["a",["b","c"]]"#);
//! assert_eq!(root[0].to_lisp(&PrintOptions::pretty()), "(a\n (b\n  c)\n)\n");
//! ```
//!
//! ### Serialization and Deserialization
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use lisp_list::{to_string, from_str};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct User {
//!     id: u32,
//!     name: String,
//!     active: bool,
//! }
//!
//! let user = User {
//!     id: 123,
//!     name: "Alice".to_string(),
//!     active: true,
//! };
//!
//! let text = to_string(&user).unwrap();
//! assert_eq!(text, "(id 123 name Alice active true)");
//!
//! let user_back: User = from_str(&text).unwrap();
//! assert_eq!(user, user_back);
//! ```
//!
//! ## Pipeline
//!
//! Data flows one way: text → [`tokenize`] → [`build_tree`] → query or
//! render. [`parse`] runs the first two steps.
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - Malformed text is an [`Error`], never a partial tree
//! - Query methods return `Option`; only `Index` panics on a bad index

pub mod de;
pub mod error;
pub mod format;
pub mod options;
pub mod print;
pub mod query;
pub mod ser;
pub mod token;
pub mod tokenize;
pub mod tree;
pub mod value;

pub use de::Deserializer;
pub use error::{Error, Result};
pub use options::PrintOptions;
pub use ser::{Serializer, NIL};
pub use token::{Span, Token, TokenKind};
pub use tokenize::{count_tokens, tokenize};
pub use tree::{build_tree, Node};
pub use value::{coerce, ParsedValue, ValueKind};

use serde::{Deserialize, Serialize};
use std::io;

/// Tokenize and build the tree for `source`.
///
/// Returns `Ok(None)` when the text holds no items (it is empty or only
/// whitespace). Otherwise the root is a [`TokenKind::Document`] list with one
/// child per top-level item.
///
/// # Examples
///
/// ```rust
/// use lisp_list::parse;
///
/// let root = parse("(asdf)").unwrap().unwrap();
/// assert_eq!(root[0].span().start, 0);
/// assert_eq!(root[0].span().end, 6);
/// assert_eq!(root[0][0].text(), "asdf");
///
/// assert!(parse(" \t\n").unwrap().is_none());
/// assert!(parse("(").is_err());
/// ```
///
/// # Errors
///
/// Returns a syntax error if the text is malformed. See [`Error::is_syntax`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse(source: &str) -> Result<Option<Node<'_>>> {
    let tokens = tokenize(source)?;
    Ok(build_tree(&tokens))
}

/// Serialize any `T: Serialize` to compact list text.
///
/// # Examples
///
/// ```rust
/// use lisp_list::to_string;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let point = Point { x: 1, y: -2 };
/// assert_eq!(to_string(&point).unwrap(), "(x 1 y -2)");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be serialized (e.g. a map with list keys).
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let mut serializer = Serializer::new();
    value.serialize(&mut serializer)?;
    Ok(serializer.into_inner())
}

/// Serialize any `T: Serialize` to pretty-printed list text.
///
/// ```rust
/// use lisp_list::to_string_pretty;
///
/// let text = to_string_pretty(&vec![vec![1, 2], vec![3]]).unwrap();
/// assert_eq!(text, "((1\n  2)\n (3)\n)\n");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_pretty<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, &PrintOptions::pretty())
}

/// Serialize any `T: Serialize` to list text laid out per `options`.
///
/// The compact encoding is produced first; pretty output renders the encoded
/// item with [`Node::to_lisp`].
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: &PrintOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let compact = to_string(value)?;
    if !options.pretty {
        return Ok(compact);
    }
    let root = parse(&compact)?.ok_or(Error::EmptyDocument)?;
    match root.children() {
        [item] => Ok(item.to_lisp(options)),
        _ => Ok(root.to_lisp(options)),
    }
}

/// Serialize any `T: Serialize` to a writer as compact list text.
///
/// # Examples
///
/// ```rust
/// use lisp_list::to_writer;
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &("a", 1)).unwrap();
/// assert_eq!(buffer, b"(a 1)");
/// ```
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_writer_with_options(writer, value, &PrintOptions::default())
}

/// Serialize any `T: Serialize` to a writer with custom layout options.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W, T>(mut writer: W, value: &T, options: &PrintOptions) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let text = to_string_with_options(value, options)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Deserialize an instance of type `T` from list text.
///
/// The text must hold exactly one top-level item.
///
/// # Examples
///
/// ```rust
/// use lisp_list::from_str;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str("(x 1 y 2)").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns a syntax error for malformed text, [`Error::EmptyDocument`] or
/// [`Error::TrailingValues`] when there is not exactly one item, or a
/// decoding error if the item does not fit `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<'a, T>(s: &'a str) -> Result<T>
where
    T: Deserialize<'a>,
{
    let root = parse(s)?.ok_or(Error::EmptyDocument)?;
    from_node(&root)
}

/// Deserialize an instance of type `T` from an already parsed node.
///
/// A document root is unwrapped to its single item; any other node is
/// decoded directly.
///
/// ```rust
/// use lisp_list::{from_node, parse};
///
/// let root = parse("(k (1 2 3))").unwrap().unwrap();
/// let numbers: Vec<u8> = from_node(root[0].get("k").unwrap()).unwrap();
/// assert_eq!(numbers, [1, 2, 3]);
/// ```
///
/// # Errors
///
/// Returns an error if the node does not fit `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_node<'a, T>(node: &Node<'a>) -> Result<T>
where
    T: Deserialize<'a>,
{
    T::deserialize(Deserializer::from_root(node)?)
}

/// Deserialize an instance of type `T` from an I/O stream of list text.
///
/// # Examples
///
/// ```rust
/// use lisp_list::from_reader;
/// use std::io::Cursor;
///
/// let words: Vec<String> = from_reader(Cursor::new(b"(a \"b c\")")).unwrap();
/// assert_eq!(words, ["a", "b c"]);
/// ```
///
/// # Errors
///
/// Returns an error if reading fails, the text is malformed, or the data
/// cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: for<'de> Deserialize<'de>,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(&string)
}

/// Deserialize an instance of type `T` from bytes of list text.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8, the text is malformed,
/// or it cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<'a, T>(v: &'a [u8]) -> Result<T>
where
    T: Deserialize<'a>,
{
    let s = std::str::from_utf8(v).map_err(|e| Error::custom(e.to_string()))?;
    from_str(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct User {
        id: u32,
        name: String,
        active: bool,
        tags: Vec<String>,
    }

    fn alice() -> User {
        User {
            id: 123,
            name: "Alice Liddell".to_string(),
            active: true,
            tags: vec!["admin".to_string(), "user".to_string()],
        }
    }

    #[test]
    fn test_serialize_deserialize_point() {
        let point = Point { x: 1, y: 2 };
        let text = to_string(&point).unwrap();
        let point_back: Point = from_str(&text).unwrap();
        assert_eq!(point, point_back);
    }

    #[test]
    fn test_serialize_deserialize_user() {
        let text = to_string(&alice()).unwrap();
        assert_eq!(
            text,
            "(id 123 name \"Alice Liddell\" active true tags (admin user))"
        );
        let user_back: User = from_str(&text).unwrap();
        assert_eq!(alice(), user_back);
    }

    #[test]
    fn test_pretty_printing() {
        let text = to_string_pretty(&alice()).unwrap();
        assert_eq!(
            text,
            "(id\n 123\n name\n \"Alice Liddell\"\n active\n true\n tags\n (admin\n  user)\n)\n"
        );
        let user_back: User = from_str(&text).unwrap();
        assert_eq!(alice(), user_back);
    }

    #[test]
    fn test_pretty_scalar() {
        assert_eq!(to_string_pretty(&5).unwrap(), "5\n");
        let options = PrintOptions::pretty().with_newline(false);
        assert_eq!(to_string_with_options(&5, &options).unwrap(), "5");
    }

    #[test]
    fn test_arrays() {
        let numbers = vec![1, 2, 3, 4, 5];
        let text = to_string(&numbers).unwrap();
        assert_eq!(text, "(1 2 3 4 5)");
        let numbers_back: Vec<i32> = from_str(&text).unwrap();
        assert_eq!(numbers, numbers_back);
    }

    #[test]
    fn test_custom_options() {
        let options = PrintOptions::pretty().with_indent(4);
        let text = to_string_with_options(&alice(), &options).unwrap();
        assert!(text.contains("\n    tags\n    (admin\n        user)\n"));
        let user_back: User = from_str(&text).unwrap();
        assert_eq!(alice(), user_back);
    }

    #[test]
    fn test_writer_and_reader() {
        let mut buffer = Vec::new();
        to_writer(&mut buffer, &alice()).unwrap();
        let user_back: User = from_reader(std::io::Cursor::new(buffer)).unwrap();
        assert_eq!(alice(), user_back);
    }

    #[test]
    fn test_from_slice_rejects_invalid_utf8() {
        let err = from_slice::<String>(&[0xff, 0xfe]).unwrap_err();
        assert!(matches!(err, Error::Custom(_)));
    }

    #[test]
    fn test_parse_errors_are_whole_parse() {
        for src in ["(", ")", "\"", "(a \"b)", "a\\b", "(a\"b)"] {
            let err = parse(src).unwrap_err();
            assert!(err.is_syntax(), "{src:?}");
        }
    }
}
