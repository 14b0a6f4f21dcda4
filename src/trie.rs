//! Prefix tree over the textual literals of every logical symbol.
//!
//! A node does not record whether the path leading to it spells a complete
//! literal. Membership is decided by the reverse lookup in
//! [`SymbolTable`][crate::symbol::SymbolTable], which keeps the tree minimal.

use std::collections::HashMap;

#[derive(Debug, Default, Clone)]
pub struct TrieNode {
    children: HashMap<char, TrieNode>,
}

impl TrieNode {
    pub fn child(&self, ch: char) -> Option<&TrieNode> {
        self.children.get(&ch)
    }

    pub fn has(&self, ch: char) -> bool {
        self.children.contains_key(&ch)
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    fn count(&self) -> usize {
        1 + self.children.values().map(TrieNode::count).sum::<usize>()
    }
}

/// Word tree rooted at the empty string.
#[derive(Debug, Default, Clone)]
pub struct WordTree {
    root: TrieNode,
}

impl WordTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build<'a>(words: impl IntoIterator<Item = &'a str>) -> Self {
        let mut tree = Self::new();
        for word in words {
            tree.add(word);
        }
        tree
    }

    pub fn root(&self) -> &TrieNode {
        &self.root
    }

    /// Insert `word` as a path from the root.
    pub fn add(&mut self, word: &str) {
        let mut node = &mut self.root;
        for ch in word.chars() {
            node = node.children.entry(ch).or_default();
        }
    }

    /// Check whether `word` is a path from the root (not necessarily a full literal).
    pub fn find(&self, word: &str) -> bool {
        let mut node = &self.root;
        for ch in word.chars() {
            match node.child(ch) {
                Some(next) => node = next,
                None => return false,
            }
        }
        true
    }

    /// Number of nodes, root included.
    pub fn size(&self) -> usize {
        self.root.count()
    }
}
