//! toktab_trie: Character trie over token spellings.
//!
//! Each node ([`TokenSet`]) maps an ASCII code either to a token that a
//! spelling completes at this depth or to a child node that continues a
//! longer spelling. Nodes live in an arena owned by [`Trie`] and refer to
//! each other by [`NodeId`].

mod builder;
mod node;

pub use builder::{build_trie, TrieBuild, TrieBuilder};
pub use node::{InsertError, NodeId, TokenSet, Trie};
