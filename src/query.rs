//! Index and key lookups over parsed lists.
//!
//! Lists double as objects: `(k1 v1 k2 v2)` is read as alternating key/value
//! pairs. A list only qualifies when it has an even number of children and no
//! key position holds a sub-list.

use crate::tree::Node;
use indexmap::IndexMap;
use std::ops::Index;

impl<'a> Node<'a> {
    /// Number of children, or `None` for a scalar.
    #[must_use]
    pub fn count(&self) -> Option<usize> {
        self.is_list().then(|| self.children().len())
    }

    /// The child at `idx`, or `None` for a scalar or an out-of-range index.
    #[must_use]
    pub fn child(&self, idx: usize) -> Option<&Node<'a>> {
        self.children().get(idx)
    }

    /// Looks up the value following `key` in an object-style list.
    ///
    /// Every pair is visited even after a match, because a list in any key
    /// position invalidates the whole lookup. When a key repeats, the first
    /// occurrence wins. Keys are compared by their [`Node::text`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lisp_list::parse;
    ///
    /// let root = parse("(k1 v1 k2 v2)").unwrap().unwrap();
    /// assert_eq!(root[0].get("k2").map(|n| n.text()), Some("v2"));
    /// assert!(root[0].get("k3").is_none());
    ///
    /// // odd length, or a list used as a key
    /// let root = parse("(k1 v1 k2) (k1 v1 (k) v2)").unwrap().unwrap();
    /// assert!(root[0].get("k1").is_none());
    /// assert!(root[1].get("k1").is_none());
    /// ```
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Node<'a>> {
        let pairs = self.object_pairs()?;
        let mut found = None;
        for pair in pairs {
            let (k, v) = (&pair[0], &pair[1]);
            if k.is_list() {
                return None;
            }
            if found.is_none() && k.text() == key {
                found = Some(v);
            }
        }
        found
    }

    /// Returns an insertion-ordered view of an object-style list.
    ///
    /// Follows the same rules as [`Node::get`]: `None` for scalars, odd-length
    /// lists and lists with a sub-list in a key position; the first occurrence
    /// of a repeated key wins.
    ///
    /// ```rust
    /// use lisp_list::parse;
    ///
    /// let root = parse("(name Alice age 30 name Bob)").unwrap().unwrap();
    /// let entries = root[0].entries().unwrap();
    /// let keys: Vec<_> = entries.keys().copied().collect();
    /// assert_eq!(keys, vec!["name", "age"]);
    /// assert_eq!(entries["name"].text(), "Alice");
    /// ```
    #[must_use]
    pub fn entries(&self) -> Option<IndexMap<&str, &Node<'a>>> {
        let pairs = self.object_pairs()?;
        let mut map = IndexMap::with_capacity(pairs.len());
        for pair in pairs {
            let (k, v) = (&pair[0], &pair[1]);
            if k.is_list() {
                return None;
            }
            map.entry(k.text()).or_insert(v);
        }
        Some(map)
    }

    fn object_pairs(&self) -> Option<std::slice::ChunksExact<'_, Node<'a>>> {
        if !self.is_list() {
            return None;
        }
        let children = self.children();
        if children.len() % 2 != 0 {
            return None;
        }
        Some(children.chunks_exact(2))
    }
}

impl<'a> Index<usize> for Node<'a> {
    type Output = Node<'a>;

    /// # Panics
    ///
    /// Panics if the node is a scalar or `idx` is out of range.
    fn index(&self, idx: usize) -> &Self::Output {
        match self.child(idx) {
            Some(node) => node,
            None => panic!(
                "index {idx} out of range for {} with {} children",
                self.kind(),
                self.children().len()
            ),
        }
    }
}
