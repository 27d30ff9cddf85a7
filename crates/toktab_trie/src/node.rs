//! Trie nodes and the node arena.

use rustc_hash::FxHashMap;
use std::fmt;
use toktab_core::{TokenId, ASCII_SET};

/// Index of a node in the [`Trie`] arena.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// The root node: no characters consumed yet.
    pub const ROOT: NodeId = NodeId(0);

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// One depth of spelling matching.
///
/// `tokens[c]` completes a spelling when the next character is `c`;
/// `children[c]` continues a longer one. Keys are always below [`ASCII_SET`].
/// Map iteration order is unspecified, so callers that need a stable order
/// use [`TokenSet::sorted_tokens`] and [`TokenSet::sorted_children`].
#[derive(Debug, Clone, Default)]
pub struct TokenSet {
    tokens: FxHashMap<u8, TokenId>,
    children: FxHashMap<u8, NodeId>,
}

impl TokenSet {
    #[inline]
    pub fn token(&self, code: u8) -> Option<TokenId> {
        self.tokens.get(&code).copied()
    }

    #[inline]
    pub fn child(&self, code: u8) -> Option<NodeId> {
        self.children.get(&code).copied()
    }

    pub fn has_tokens(&self) -> bool {
        !self.tokens.is_empty()
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty() && self.children.is_empty()
    }

    /// Completing tokens in ascending character code.
    pub fn sorted_tokens(&self) -> Vec<(u8, TokenId)> {
        let mut entries: Vec<_> = self.tokens.iter().map(|(&c, &t)| (c, t)).collect();
        entries.sort_unstable_by_key(|&(c, _)| c);
        entries
    }

    /// Child nodes in ascending character code.
    pub fn sorted_children(&self) -> Vec<(u8, NodeId)> {
        let mut entries: Vec<_> = self.children.iter().map(|(&c, &n)| (c, n)).collect();
        entries.sort_unstable_by_key(|&(c, _)| c);
        entries
    }
}

/// Why a spelling could not be inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertError {
    Empty,
    /// A byte outside the 128-wide table.
    NonAscii(u8),
    /// The exact spelling is already bound to this token.
    Occupied(TokenId),
}

/// An arena of [`TokenSet`] nodes rooted at [`NodeId::ROOT`].
#[derive(Debug, Clone)]
pub struct Trie {
    nodes: Vec<TokenSet>,
}

impl Trie {
    pub fn new() -> Self {
        Self {
            nodes: vec![TokenSet::default()],
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &TokenSet {
        &self.nodes[id.index()]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Bind `spelling` to `token`.
    ///
    /// The last character goes into the `tokens` map of the node reached by
    /// the preceding characters, creating intermediate nodes as needed. An
    /// existing binding for the same spelling is never overwritten.
    pub fn insert(&mut self, spelling: &[u8], token: TokenId) -> Result<(), InsertError> {
        let (&last, prefix) = spelling.split_last().ok_or(InsertError::Empty)?;
        if let Some(&bad) = spelling.iter().find(|&&c| c as usize >= ASCII_SET) {
            return Err(InsertError::NonAscii(bad));
        }

        let mut node = NodeId::ROOT;
        for &c in prefix {
            node = self.child_or_insert(node, c);
        }
        let slot = &mut self.nodes[node.index()].tokens;
        if let Some(&existing) = slot.get(&last) {
            return Err(InsertError::Occupied(existing));
        }
        slot.insert(last, token);
        Ok(())
    }

    fn child_or_insert(&mut self, node: NodeId, code: u8) -> NodeId {
        if let Some(child) = self.node(node).child(code) {
            return child;
        }
        let child = NodeId(self.nodes.len() as u32);
        self.nodes.push(TokenSet::default());
        self.nodes[node.index()].children.insert(code, child);
        child
    }

    /// The node reached after consuming all of `prefix`, if any.
    pub fn walk(&self, prefix: &[u8]) -> Option<NodeId> {
        prefix
            .iter()
            .try_fold(NodeId::ROOT, |node, &c| self.node(node).child(c))
    }

    /// Exact lookup: follow `children` for all but the last character, then
    /// read the final `tokens` entry.
    pub fn lookup(&self, spelling: &str) -> Option<TokenId> {
        let (&last, prefix) = spelling.as_bytes().split_last()?;
        let node = self.walk(prefix)?;
        self.node(node).token(last)
    }

    /// Longest spelling that prefixes `input`, with its length in bytes.
    ///
    /// This is the walk a consumer lexer performs over the emitted tables:
    /// descend while a child exists and remember the deepest completed token.
    pub fn longest_match(&self, input: &[u8]) -> Option<(TokenId, usize)> {
        let mut node = NodeId::ROOT;
        let mut best = None;
        for (i, &c) in input.iter().enumerate() {
            if c as usize >= ASCII_SET {
                break;
            }
            let set = self.node(node);
            if let Some(token) = set.token(c) {
                best = Some((token, i + 1));
            }
            match set.child(c) {
                Some(child) => node = child,
                None => break,
            }
        }
        best
    }

    /// Length of the longest path from the root, in edges.
    pub fn depth(&self) -> usize {
        self.depth_of(NodeId::ROOT)
    }

    fn depth_of(&self, node: NodeId) -> usize {
        let set = self.node(node);
        let below = set
            .children
            .values()
            .map(|&child| 1 + self.depth_of(child))
            .max()
            .unwrap_or(0);
        if set.has_tokens() {
            below.max(1)
        } else {
            below
        }
    }

    /// The first token, in ascending character order, at or below `node`.
    pub fn first_token_under(&self, node: NodeId) -> Option<TokenId> {
        let set = self.node(node);
        let mut tokens = set.sorted_tokens().into_iter();
        let mut children = set.sorted_children().into_iter();
        // Shorter spellings first, then deeper ones, both in code order.
        tokens.next().map(|(_, t)| t).or_else(|| {
            children.find_map(|(_, child)| self.first_token_under(child))
        })
    }

    /// Every `(spelling, token)` pair stored in the trie, depth-first in
    /// ascending character order.
    pub fn entries(&self) -> Vec<(Vec<u8>, TokenId)> {
        let mut out = Vec::new();
        let mut prefix = Vec::new();
        self.collect_entries(NodeId::ROOT, &mut prefix, &mut out);
        out
    }

    fn collect_entries(
        &self,
        node: NodeId,
        prefix: &mut Vec<u8>,
        out: &mut Vec<(Vec<u8>, TokenId)>,
    ) {
        let set = self.node(node);
        let tokens = set.sorted_tokens();
        let children = set.sorted_children();
        for code in 0..ASCII_SET as u8 {
            if let Some(&(_, token)) = tokens.iter().find(|&&(c, _)| c == code) {
                let mut spelling = prefix.clone();
                spelling.push(code);
                out.push((spelling, token));
            }
            if let Some(&(_, child)) = children.iter().find(|&&(c, _)| c == code) {
                prefix.push(code);
                self.collect_entries(child, prefix, out);
                prefix.pop();
            }
        }
    }
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(i: usize) -> TokenId {
        TokenId::new(i)
    }

    #[test]
    fn test_single_char_goes_to_tokens() {
        let mut trie = Trie::new();
        trie.insert(b"{", t(0)).unwrap();
        assert_eq!(trie.node(trie.root()).token(b'{'), Some(t(0)));
        assert!(!trie.node(trie.root()).has_children());
        assert_eq!(trie.node_count(), 1);
    }

    #[test]
    fn test_multi_char_creates_children() {
        let mut trie = Trie::new();
        trie.insert(b"->", t(0)).unwrap();
        let child = trie.node(trie.root()).child(b'-').unwrap();
        assert_eq!(trie.node(child).token(b'>'), Some(t(0)));
        assert_eq!(trie.node(trie.root()).token(b'-'), None);
        assert_eq!(trie.depth(), 2);
    }

    #[test]
    fn test_shared_prefix_reuses_node() {
        let mut trie = Trie::new();
        trie.insert(b"**", t(0)).unwrap();
        trie.insert(b"**=", t(1)).unwrap();
        trie.insert(b"*=", t(2)).unwrap();
        // root -> '*' -> '*'
        assert_eq!(trie.node_count(), 3);
        assert_eq!(trie.lookup("**"), Some(t(0)));
        assert_eq!(trie.lookup("**="), Some(t(1)));
        assert_eq!(trie.lookup("*="), Some(t(2)));
        assert_eq!(trie.lookup("*"), None);
    }

    #[test]
    fn test_insert_errors() {
        let mut trie = Trie::new();
        assert_eq!(trie.insert(b"", t(0)), Err(InsertError::Empty));
        assert_eq!(trie.insert(&[b'a', 0xC3], t(0)), Err(InsertError::NonAscii(0xC3)));
        trie.insert(b"==", t(1)).unwrap();
        assert_eq!(trie.insert(b"==", t(2)), Err(InsertError::Occupied(t(1))));
        assert_eq!(trie.lookup("=="), Some(t(1)));
    }

    #[test]
    fn test_longest_match() {
        let mut trie = Trie::new();
        trie.insert(b"-", t(0)).unwrap();
        trie.insert(b"->", t(1)).unwrap();
        trie.insert(b"-->", t(2)).unwrap();
        assert_eq!(trie.longest_match(b"->x"), Some((t(1), 2)));
        assert_eq!(trie.longest_match(b"-x"), Some((t(0), 1)));
        // "--" is not a token; the walk falls back to "-".
        assert_eq!(trie.longest_match(b"--x"), Some((t(0), 1)));
        assert_eq!(trie.longest_match(b"-->"), Some((t(2), 3)));
        assert_eq!(trie.longest_match(b"+"), None);
        assert_eq!(trie.longest_match(b""), None);
    }

    #[test]
    fn test_sorted_iteration_ignores_insertion_order() {
        let mut trie = Trie::new();
        for (i, c) in [b'}', b'(', b'{', b'!'].into_iter().enumerate() {
            trie.insert(&[c], t(i)).unwrap();
        }
        let codes: Vec<u8> = trie
            .node(trie.root())
            .sorted_tokens()
            .into_iter()
            .map(|(c, _)| c)
            .collect();
        assert_eq!(codes, vec![b'!', b'(', b'{', b'}']);
    }

    #[test]
    fn test_entries_and_first_token_under() {
        let mut trie = Trie::new();
        trie.insert(b"<=", t(0)).unwrap();
        trie.insert(b"<<=", t(1)).unwrap();
        trie.insert(b"<", t(2)).unwrap();
        let entries: Vec<_> = trie
            .entries()
            .into_iter()
            .map(|(s, t)| (String::from_utf8(s).unwrap(), t.index()))
            .collect();
        assert_eq!(
            entries,
            vec![("<".to_string(), 2), ("<<=".to_string(), 1), ("<=".to_string(), 0)]
        );
        let child = trie.node(trie.root()).child(b'<').unwrap();
        assert_eq!(trie.first_token_under(child), Some(t(0)));
    }
}
