//! Character-level tokenizer.
//!
//! The scanner is an explicit state machine over the raw bytes of the source.
//! Every character that changes state is ASCII, so all spans land on UTF-8
//! boundaries even though multi-byte characters are never decoded.
//!
//! Tokenizing runs in two passes: a dry run that only counts tokens, then a
//! second run that fills a buffer allocated with exactly that capacity.

use crate::token::{Token, TokenKind};
use crate::{Error, Result};
use tracing::{debug, trace};

pub const LIST_START: u8 = b'(';
pub const LIST_END: u8 = b')';
pub const STRING_DELIMITER: u8 = b'"';
/// Only valid inside quoted strings, where it escapes the next character.
pub const ESCAPE: u8 = b'\\';

/// Whitespace and control characters: everything up to and including space.
#[inline]
pub(crate) const fn is_neutral(b: u8) -> bool {
    b <= b' '
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ScanState {
    InsideBody,
    InsideQuotedString,
    InsideUnquotedString,
    InsideNeutral,
}

/// Splits `source` into an ordered sequence of tokens.
///
/// Whitespace runs are kept as [`TokenKind::Neutral`] tokens so spans cover
/// the input without gaps. An empty source yields no tokens.
///
/// # Examples
///
/// ```rust
/// use lisp_list::{tokenize, Span, TokenKind};
///
/// let tokens = tokenize("(a \"b c\")").unwrap();
/// let kinds: Vec<_> = tokens.iter().map(|t| t.kind()).collect();
/// assert_eq!(
///     kinds,
///     vec![
///         TokenKind::List,
///         TokenKind::UnquotedString,
///         TokenKind::Neutral,
///         TokenKind::QuotedString,
///     ]
/// );
/// assert_eq!(tokens[0].span(), Span::new(0, 9));
/// ```
///
/// # Errors
///
/// Returns a syntax error for unmatched brackets, unterminated quoted strings,
/// `\` outside a quoted string, or `"`/`\` inside an unquoted atom. Nothing is
/// returned on error.
pub fn tokenize(source: &str) -> Result<Vec<Token<'_>>> {
    let count = count_tokens(source)?;
    let mut tokens = Vec::with_capacity(count);
    let filled = scan(source, Some(&mut tokens))?;
    debug_assert_eq!(count, filled);
    trace!(count, len = source.len(), "tokenized source");
    Ok(tokens)
}

/// Runs the scanner without producing output and returns how many tokens
/// [`tokenize`] would emit.
///
/// # Errors
///
/// Fails exactly when [`tokenize`] fails.
pub fn count_tokens(source: &str) -> Result<usize> {
    scan(source, None)
}

fn scan<'a>(source: &'a str, mut tokens: Option<&mut Vec<Token<'a>>>) -> Result<usize> {
    let bytes = source.as_bytes();
    let mut state = ScanState::InsideBody;
    let mut count = 0usize;
    let mut escaped = false;
    // Indices of list tokens whose `)` has not been seen yet.
    let mut open_lists: Vec<usize> = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let cur = bytes[i];
        match state {
            ScanState::InsideBody => {
                match cur {
                    LIST_START => {
                        open_lists.push(count);
                        push(&mut tokens, source, TokenKind::List, i);
                        count += 1;
                    }
                    LIST_END => {
                        let idx = open_lists
                            .pop()
                            .ok_or_else(|| reject(i, Error::UnmatchedBracket))?;
                        close(&mut tokens, idx, i + 1);
                    }
                    STRING_DELIMITER => {
                        push(&mut tokens, source, TokenKind::QuotedString, i);
                        count += 1;
                        state = ScanState::InsideQuotedString;
                    }
                    ESCAPE => return Err(reject(i, Error::EscapeOutsideString)),
                    c if is_neutral(c) => {
                        push(&mut tokens, source, TokenKind::Neutral, i);
                        count += 1;
                        state = ScanState::InsideNeutral;
                    }
                    _ => {
                        push(&mut tokens, source, TokenKind::UnquotedString, i);
                        count += 1;
                        state = ScanState::InsideUnquotedString;
                    }
                }
                i += 1;
            }
            ScanState::InsideQuotedString => {
                if escaped {
                    escaped = false;
                } else if cur == ESCAPE {
                    escaped = true;
                } else if cur == STRING_DELIMITER {
                    close(&mut tokens, count - 1, i + 1);
                    state = ScanState::InsideBody;
                }
                i += 1;
            }
            ScanState::InsideUnquotedString => match cur {
                // Brackets end the atom and are handled again by the body state.
                LIST_START | LIST_END => {
                    close(&mut tokens, count - 1, i);
                    state = ScanState::InsideBody;
                }
                STRING_DELIMITER | ESCAPE => {
                    return Err(reject(i, Error::IllegalCharInAtom { ch: cur as char }));
                }
                c if is_neutral(c) => {
                    close(&mut tokens, count - 1, i);
                    push(&mut tokens, source, TokenKind::Neutral, i);
                    count += 1;
                    state = ScanState::InsideNeutral;
                    i += 1;
                }
                _ => i += 1,
            },
            ScanState::InsideNeutral => {
                if is_neutral(cur) {
                    i += 1;
                } else {
                    close(&mut tokens, count - 1, i);
                    state = ScanState::InsideBody;
                }
            }
        }
    }

    if state == ScanState::InsideQuotedString {
        return Err(reject(bytes.len(), Error::UnterminatedString));
    }
    if !open_lists.is_empty() {
        return Err(reject(bytes.len(), Error::UnmatchedBracket));
    }
    if matches!(
        state,
        ScanState::InsideUnquotedString | ScanState::InsideNeutral
    ) {
        close(&mut tokens, count - 1, bytes.len());
    }

    trace!(count, filling = tokens.is_some(), "scan finished");
    Ok(count)
}

#[inline]
fn push<'a>(tokens: &mut Option<&mut Vec<Token<'a>>>, source: &'a str, kind: TokenKind, at: usize) {
    if let Some(tokens) = tokens.as_deref_mut() {
        tokens.push(Token::open(source, kind, at));
    }
}

#[inline]
fn close(tokens: &mut Option<&mut Vec<Token<'_>>>, idx: usize, end: usize) {
    if let Some(tokens) = tokens.as_deref_mut() {
        tokens[idx].close(end);
    }
}

fn reject(offset: usize, err: Error) -> Error {
    debug!(offset, error = %err, "rejected list source");
    err
}
