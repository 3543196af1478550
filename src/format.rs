//! List Notation Format
//!
//! This module documents the text format read by [`tokenize`](crate::tokenize)
//! and written by the serializer and renderers.
//!
//! # Overview
//!
//! The notation is a minimal Lisp-like syntax: nested parenthesized lists of
//! quoted strings and unquoted atoms. It has no symbols, no evaluation and no
//! macros. Text is tokenized, structured, queried and written back out.
//!
//! # Grammar
//!
//! ```text
//! document = item*
//! item     = list | quoted | atom | separator
//! list     = "(" item* ")"
//! quoted   = '"' ( "\" any | any - '"' )* '"'
//! atom     = ( any > 0x20 - "(" - ")" - '"' - "\" )+
//! separator = ( any <= 0x20 )+
//! ```
//!
//! Characters are classified by their byte value, so every byte at or below
//! `0x20` (space and all ASCII control characters) separates items. Multi-byte
//! UTF-8 sequences are atom content.
//!
//! ## Lists
//!
//! ```text
//! (a b c)
//! (a(b c)d)
//! ()
//! ```
//!
//! A list needs no separator next to its brackets: `(a(b c)d)` holds `a`,
//! `(b c)` and `d`.
//!
//! ## Quoted strings
//!
//! `\` is the only escape introducer and escapes exactly one following
//! character, which is taken literally:
//!
//! ```text
//! "plain"           # plain
//! "with \"quotes\"" # with "quotes"
//! "back\\slash"     # back\slash
//! "\n"              # n
//! ```
//!
//! There are no other escape sequences; `\n` is the letter `n`.
//!
//! ## Atoms
//!
//! Any run of non-separator characters except brackets, `"` and `\`. An atom
//! ends at a separator or a bracket. A `"` or `\` inside an atom is a syntax
//! error.
//!
//! # Errors
//!
//! Parsing is all-or-nothing. These are syntax errors for the whole input:
//!
//! | Input | Error |
//! |-------|-------|
//! | `(a` | [`UnmatchedBracket`](crate::Error::UnmatchedBracket) |
//! | `a)` | [`UnmatchedBracket`](crate::Error::UnmatchedBracket) |
//! | `"abc` | [`UnterminatedString`](crate::Error::UnterminatedString) |
//! | `\ a` | [`EscapeOutsideString`](crate::Error::EscapeOutsideString) |
//! | `ab"c"` | [`IllegalCharInAtom`](crate::Error::IllegalCharInAtom) |
//!
//! Empty or whitespace-only text is not an error; it simply holds no items.
//!
//! # Values
//!
//! Scalars are untyped text. [`coerce`](crate::coerce) classifies a scalar
//! by trying, in order: `u64`, `i64`, `f64`, `true`/`false` (any case), and
//! falls back to the text. Quotes do not prevent coercion.
//!
//! # Object-style lists
//!
//! A list with an even number of items whose even positions are scalars can
//! be read as a record of key/value pairs:
//!
//! ```text
//! (name Ada born 1815)
//! ```
//!
//! See [`Node::get`](crate::Node::get) and [`Node::entries`](crate::Node::entries).
//!
//! # JSON rendering
//!
//! Every list renders as a JSON array, including object-style lists. Atoms
//! are wrapped in double quotes; quoted strings are copied as written. No
//! other escaping is applied.
//!
//! ```text
//! (k1 v1 "k 2" (v 2))  →  ["k1","v1","k 2",["v","2"]]
//! ```
//!
//! ## Rust-Specific Serialization
//!
//! - **`None` and unit**: the atom `nil`
//! - **Strings**: bare when they would read back unchanged, otherwise quoted;
//!   `"42"`, `"true"`, `"nil"` and `""` are always quoted
//! - **Structs and maps**: object-style lists `(key value ...)`
//! - **Unit variants**: the variant name: `Active`
//! - **Other variants**: `(Variant payload)`; tuple and struct variants carry
//!   a list payload
//!
//! # Limitations
//!
//! - **Map keys**: must serialize to scalars
//! - **JSON output**: no escaping beyond the quoting rule above
//! - **Comments**: not supported in the format

// This module contains only documentation; no implementation code
