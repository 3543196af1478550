//! Rendering trees back to text.
//!
//! Both renderers are pure functions of the tree; the tokenizer is never
//! invoked again.
//!
//! - [`Node::to_lisp`]: the verbatim source slice, or a pretty layout with
//!   one node per line.
//! - [`Node::to_json`]: scalars become JSON strings and lists become arrays.

use crate::options::PrintOptions;
use crate::tree::Node;

impl Node<'_> {
    /// Renders the node as list text.
    ///
    /// Without `pretty`, this is the original source slice for the node's
    /// span. With `pretty`, every node goes on its own line indented by
    /// `depth * indent` spaces; the first child of a list stays on the line
    /// of its `(`. Lists end with `)` and a newline, scalars end with a
    /// newline unless they are the last child. The document root is written
    /// without brackets but still nests its items one level deep.
    ///
    /// [`PrintOptions::newline`] decides whether the node itself, when it is
    /// a scalar, ends with a newline.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lisp_list::{parse, PrintOptions};
    ///
    /// let root = parse("(eu tu (nos vos) ele)").unwrap().unwrap();
    /// let text = root.to_lisp(&PrintOptions::pretty());
    /// assert_eq!(text, "(eu\n tu\n (nos\n  vos)\n ele)\n");
    /// ```
    #[must_use]
    pub fn to_lisp(&self, options: &PrintOptions) -> String {
        if !options.pretty {
            return self.raw().to_string();
        }
        let mut out = String::with_capacity(self.section_len() * 2);
        write_pretty(self, options.indent_width(), 0, true, options.newline, &mut out);
        out
    }

    /// Renders the node as JSON.
    ///
    /// Quoted scalars are emitted as they appear in the source; atoms are
    /// wrapped in double quotes. No further escaping is applied.
    ///
    /// ```rust
    /// use lisp_list::parse;
    ///
    /// let root = parse(r#"(a "b c" (d))"#).unwrap().unwrap();
    /// assert_eq!(root[0].to_json(), r#"["a","b c",["d"]]"#);
    /// assert_eq!(root.to_json(), r#"[["a","b c",["d"]]]"#);
    /// ```
    #[must_use]
    pub fn to_json(&self) -> String {
        let mut out = String::with_capacity(self.section_len() + 8);
        write_json(self, &mut out);
        out
    }
}

fn push_spaces(out: &mut String, count: usize) {
    out.extend(std::iter::repeat(' ').take(count));
}

fn write_pretty(
    node: &Node<'_>,
    indent: usize,
    depth: usize,
    indent_first: bool,
    newline: bool,
    out: &mut String,
) {
    if indent_first {
        push_spaces(out, depth * indent);
    }

    if node.is_scalar() {
        out.push_str(node.raw());
        if newline {
            out.push('\n');
        }
        return;
    }

    let document = node.is_document();
    if !document {
        out.push('(');
    }
    let children = node.children();
    let last = children.len().saturating_sub(1);
    for (i, child) in children.iter().enumerate() {
        // The first child shares the line of its `(`.
        write_pretty(child, indent, depth + 1, i > 0, i < last, out);
    }
    if !document {
        out.push_str(")\n");
    }
}

fn write_json(node: &Node<'_>, out: &mut String) {
    if node.is_scalar() {
        let raw = node.raw();
        if raw.starts_with('"') {
            out.push_str(raw);
        } else {
            out.push('"');
            out.push_str(raw);
            out.push('"');
        }
        return;
    }

    out.push('[');
    for (i, child) in node.children().iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        write_json(child, out);
    }
    out.push(']');
}
