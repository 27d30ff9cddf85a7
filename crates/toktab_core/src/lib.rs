//! toktab_core: Core types for the toktab token table compiler.
//!
//! Provides the token data model (ids, records, the ordered token table)
//! and the ASCII helpers shared by the reader, trie builder and emitters.

pub mod ascii;
pub mod record;

// Re-export commonly used types
pub use ascii::ASCII_SET;
pub use record::{TokenId, TokenRecord, TokenTable, COMMA_NAME};
