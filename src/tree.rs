//! Tree reconstruction from flat token spans.
//!
//! The builder never looks at the source text. Nesting is recovered purely
//! from positions: every token that starts before a list token's end belongs
//! to that list.

use crate::token::{Span, Token, TokenKind};
use std::borrow::Cow;
use std::cell::OnceCell;
use tracing::trace;

/// A node of the parsed tree: either a scalar leaf or a list of child nodes.
///
/// A node is a list exactly when it owns a child sequence, even an empty one.
/// The root returned by [`build_tree`] is a synthetic [`TokenKind::Document`]
/// list wrapping every top-level item.
///
/// # Examples
///
/// ```rust
/// use lisp_list::parse;
///
/// let root = parse("(a (b c) d)").unwrap().unwrap();
/// let list = &root[0];
/// assert!(list.is_list());
/// assert_eq!(list.count(), Some(3));
/// assert_eq!(list[1][0].text(), "b");
/// ```
#[derive(Clone, Debug)]
pub struct Node<'a> {
    token: Token<'a>,
    children: Option<Vec<Node<'a>>>,
    // Filled on first request by `text()`.
    text: OnceCell<Cow<'a, str>>,
}

impl<'a> Node<'a> {
    pub(crate) fn scalar(token: Token<'a>) -> Self {
        Node {
            token,
            children: None,
            text: OnceCell::new(),
        }
    }

    pub(crate) fn list(token: Token<'a>, children: Vec<Node<'a>>) -> Self {
        Node {
            token,
            children: Some(children),
            text: OnceCell::new(),
        }
    }

    #[inline]
    #[must_use]
    pub const fn token(&self) -> &Token<'a> {
        &self.token
    }

    #[inline]
    #[must_use]
    pub const fn kind(&self) -> TokenKind {
        self.token.kind()
    }

    #[inline]
    #[must_use]
    pub const fn span(&self) -> Span {
        self.token.span()
    }

    #[inline]
    #[must_use]
    pub const fn is_list(&self) -> bool {
        self.children.is_some()
    }

    #[inline]
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        self.children.is_none()
    }

    /// Returns `true` for the synthetic root wrapping a whole parse.
    #[inline]
    #[must_use]
    pub fn is_document(&self) -> bool {
        self.token.kind() == TokenKind::Document
    }

    /// The children of a list, or an empty slice for a scalar.
    #[must_use]
    pub fn children(&self) -> &[Node<'a>] {
        self.children.as_deref().unwrap_or(&[])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node<'a>> {
        self.children().iter()
    }

    /// The verbatim source slice covered by this node.
    #[must_use]
    pub fn raw(&self) -> &'a str {
        self.token.text()
    }

    #[must_use]
    pub const fn section_len(&self) -> usize {
        self.token.section_len()
    }

    #[must_use]
    pub const fn source_len(&self) -> usize {
        self.token.source_len()
    }

    /// The value text of this node.
    ///
    /// Quoted strings lose their surrounding quotes and each `\x` escape
    /// becomes `x`. Atoms and lists are returned verbatim. The result is
    /// computed once and cached on the node.
    ///
    /// ```rust
    /// use lisp_list::parse;
    ///
    /// let root = parse(r#"(plain "with \"quotes\"")"#).unwrap().unwrap();
    /// assert_eq!(root[0][0].text(), "plain");
    /// assert_eq!(root[0][1].text(), "with \"quotes\"");
    /// ```
    #[must_use]
    pub fn text(&self) -> &str {
        self.cow_text()
    }

    pub(crate) fn cow_text(&self) -> &Cow<'a, str> {
        self.text.get_or_init(|| {
            let raw = self.token.text();
            match self.token.kind() {
                TokenKind::QuotedString if raw.len() >= 2 => unescape(&raw[1..raw.len() - 1]),
                _ => Cow::Borrowed(raw),
            }
        })
    }
}

impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.token == other.token && self.children == other.children
    }
}

impl<'n, 'a> IntoIterator for &'n Node<'a> {
    type Item = &'n Node<'a>;
    type IntoIter = std::slice::Iter<'n, Node<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn unescape(inner: &str) -> Cow<'_, str> {
    if !inner.contains('\\') {
        return Cow::Borrowed(inner);
    }
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(ch);
        }
    }
    Cow::Owned(out)
}

/// Rebuilds the nesting of a token sequence.
///
/// Returns `None` when the tokens hold no content (no tokens at all, or only
/// whitespace); otherwise the returned node is a [`TokenKind::Document`] list
/// spanning the whole source.
///
/// # Examples
///
/// ```rust
/// use lisp_list::{build_tree, tokenize};
///
/// let tokens = tokenize("a (b)").unwrap();
/// let root = build_tree(&tokens).unwrap();
/// assert!(root.is_document());
/// assert_eq!(root.count(), Some(2));
///
/// assert!(build_tree(&tokenize("  ").unwrap()).is_none());
/// ```
#[must_use]
pub fn build_tree<'a>(tokens: &[Token<'a>]) -> Option<Node<'a>> {
    let source = tokens.first()?.source();
    let document = Token::new(source, TokenKind::Document, Span::new(0, source.len()));

    let mut children = Vec::new();
    let mut cursor = 0;
    while cursor < tokens.len() {
        if let Some(node) = build_node(tokens, &mut cursor) {
            children.push(node);
        }
    }

    if children.is_empty() {
        trace!("document has no content");
        return None;
    }
    trace!(items = children.len(), "built document");
    Some(Node::list(document, children))
}

/// Builds the node for `tokens[*cursor]` and advances the cursor past it and
/// everything it contains. Whitespace produces no node.
fn build_node<'a>(tokens: &[Token<'a>], cursor: &mut usize) -> Option<Node<'a>> {
    let token = tokens[*cursor];
    *cursor += 1;

    match token.kind() {
        TokenKind::Neutral => None,
        TokenKind::List => {
            let mut children = Vec::new();
            while *cursor < tokens.len() && tokens[*cursor].start() < token.end() {
                if let Some(child) = build_node(tokens, cursor) {
                    children.push(child);
                }
            }
            Some(Node::list(token, children))
        }
        _ => Some(Node::scalar(token)),
    }
}
