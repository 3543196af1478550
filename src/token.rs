//! Position-addressed tokens.
//!
//! A [`Token`] never copies the source: it keeps a reference to the whole text
//! plus a half-open byte span `[start, end)` and a [`TokenKind`].

use std::fmt;

/// The classification of a token.
///
/// `None` only appears on the unset (default) token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum TokenKind {
    #[default]
    None,
    /// The implicit outermost list wrapping a whole parse
    Document,
    /// A bracketed region, `(` up to and including its matching `)`
    List,
    /// A `"`-delimited string, quotes included
    QuotedString,
    /// A bare atom
    UnquotedString,
    /// A run of whitespace/control characters
    Neutral,
}

impl TokenKind {
    /// Human readable name, used in error messages.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            TokenKind::None => "nothing",
            TokenKind::Document => "document",
            TokenKind::List => "list",
            TokenKind::QuotedString => "quoted string",
            TokenKind::UnquotedString => "unquoted atom",
            TokenKind::Neutral => "whitespace",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A half-open byte range `[start, end)` into the source text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    #[inline]
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Returns `true` if `other` lies inside this span.
    #[inline]
    #[must_use]
    pub const fn contains(&self, other: &Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

/// A classified slice of the source text.
///
/// # Examples
///
/// ```rust
/// use lisp_list::{tokenize, TokenKind};
///
/// let tokens = tokenize("(asdf)").unwrap();
/// assert_eq!(tokens[0].kind(), TokenKind::List);
/// assert_eq!(tokens[1].text(), "asdf");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Token<'a> {
    source: &'a str,
    kind: TokenKind,
    span: Span,
}

impl<'a> Token<'a> {
    #[must_use]
    pub const fn new(source: &'a str, kind: TokenKind, span: Span) -> Self {
        Token { source, kind, span }
    }

    /// Opens a token at `start`; its end is set later by [`Token::close`].
    pub(crate) const fn open(source: &'a str, kind: TokenKind, start: usize) -> Self {
        Token {
            source,
            kind,
            span: Span { start, end: start },
        }
    }

    pub(crate) fn close(&mut self, end: usize) {
        self.span.end = end;
    }

    #[inline]
    #[must_use]
    pub const fn kind(&self) -> TokenKind {
        self.kind
    }

    #[inline]
    #[must_use]
    pub const fn span(&self) -> Span {
        self.span
    }

    #[inline]
    #[must_use]
    pub const fn start(&self) -> usize {
        self.span.start
    }

    #[inline]
    #[must_use]
    pub const fn end(&self) -> usize {
        self.span.end
    }

    /// The whole source text this token points into.
    #[inline]
    #[must_use]
    pub const fn source(&self) -> &'a str {
        self.source
    }

    #[inline]
    #[must_use]
    pub const fn section_len(&self) -> usize {
        self.span.len()
    }

    #[inline]
    #[must_use]
    pub const fn source_len(&self) -> usize {
        self.source.len()
    }

    /// The raw text covered by the span, quotes and brackets included.
    #[must_use]
    pub fn text(&self) -> &'a str {
        if self.span.is_empty() {
            return "";
        }
        &self.source[self.span.start..self.span.end]
    }

    /// Returns `true` for the default token, which stands for "no match".
    #[must_use]
    pub fn is_unset(&self) -> bool {
        self.source.is_empty() && self.kind == TokenKind::None && self.span == Span::default()
    }
}
