//! Configuration options for rendering list text.
//!
//! ## Examples
//!
//! ```rust
//! use lisp_list::{parse, PrintOptions};
//!
//! let root = parse("(a (b c))").unwrap().unwrap();
//!
//! // Verbatim source slice
//! assert_eq!(root[0].to_lisp(&PrintOptions::new()), "(a (b c))");
//!
//! // One node per line, indented
//! let pretty = root[0].to_lisp(&PrintOptions::pretty().with_indent(2));
//! assert_eq!(pretty, "(a\n  (b\n    c)\n)\n");
//! ```

/// Configuration options for the list renderer and the serializer.
///
/// # Examples
///
/// ```rust
/// use lisp_list::PrintOptions;
///
/// // Default: compact, verbatim output
/// let options = PrintOptions::new();
/// assert!(!options.pretty);
///
/// // Pretty-printed with 4-space indentation
/// let options = PrintOptions::pretty().with_indent(4);
/// assert_eq!(options.indent, 4);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrintOptions {
    /// Spaces per nesting level. Only affects pretty output.
    pub indent: usize,
    pub pretty: bool,
    /// End a pretty-printed scalar root with a newline. Lists always end
    /// with `)` and a newline.
    pub newline: bool,
}

impl Default for PrintOptions {
    fn default() -> Self {
        PrintOptions {
            indent: 1,
            pretty: false,
            newline: true,
        }
    }
}

impl PrintOptions {
    /// Creates default options (compact output, 1-space indent, trailing newline).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options for pretty-printed output with one node per line.
    ///
    /// ```rust
    /// use lisp_list::PrintOptions;
    ///
    /// let options = PrintOptions::pretty();
    /// assert!(options.pretty);
    /// ```
    #[must_use]
    pub fn pretty() -> Self {
        PrintOptions {
            pretty: true,
            ..Default::default()
        }
    }

    /// Sets the indentation size. Values below 1 are raised to 1.
    ///
    /// ```rust
    /// use lisp_list::PrintOptions;
    ///
    /// assert_eq!(PrintOptions::pretty().with_indent(0).indent, 1);
    /// ```
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent.max(1);
        self
    }

    /// Sets whether a pretty-printed scalar ends with a newline.
    ///
    /// ```rust
    /// use lisp_list::{parse, PrintOptions};
    ///
    /// let root = parse("word").unwrap().unwrap();
    /// let options = PrintOptions::pretty().with_newline(false);
    /// assert_eq!(root[0].to_lisp(&options), "word");
    /// ```
    #[must_use]
    pub fn with_newline(mut self, newline: bool) -> Self {
        self.newline = newline;
        self
    }

    #[inline]
    pub(crate) fn indent_width(&self) -> usize {
        self.indent.max(1)
    }
}
