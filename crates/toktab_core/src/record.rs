//! Token records and the ordered token table.
//!
//! A token specification is a flat, ordered list of `(name, spelling)` pairs.
//! The position of a record in that list is its [`TokenId`], which is the
//! identifier the generated tables and the consumer lexer agree on.

use indexmap::map::Entry;
use indexmap::IndexMap;
use std::fmt;

/// Name of the record whose spelling is always `","`.
///
/// One variant of the token file format separates fields with commas, so
/// the comma token cannot spell itself on its own line.
pub const COMMA_NAME: &str = "COMMA";

/// A dense token ordinal. Ids form the contiguous range `0..N` in record order.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct TokenId(u32);

impl TokenId {
    #[inline]
    pub fn new(index: usize) -> Self {
        Self(index as u32)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TokenId({})", self.0)
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One line of the token specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRecord {
    /// The token kind name, e.g. `LBRACE`.
    pub name: String,
    /// The literal text that produces this token, if it has a fixed spelling.
    pub spelling: Option<String>,
    /// 1-based line in the token file (0 when synthesized).
    pub line: u32,
}

impl TokenRecord {
    /// Create a record, applying the spelling normalizations every record
    /// obeys: `COMMA` always spells `","` and an empty spelling is a single
    /// space.
    pub fn new(name: impl Into<String>, spelling: Option<String>, line: u32) -> Self {
        let name = name.into();
        let spelling = if name == COMMA_NAME {
            Some(",".to_string())
        } else {
            spelling.map(|s| if s.is_empty() { " ".to_string() } else { s })
        };
        Self { name, spelling, line }
    }

    /// Whether this record contributes a literal spelling.
    pub fn has_spelling(&self) -> bool {
        self.spelling.is_some()
    }
}

/// The ordered sequence of token records, keyed by name.
///
/// Insertion order is preserved and defines the [`TokenId`] of each record.
#[derive(Debug, Clone, Default)]
pub struct TokenTable {
    records: IndexMap<String, TokenRecord>,
}

impl TokenTable {
    pub fn new() -> Self {
        Self {
            records: IndexMap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: IndexMap::with_capacity(capacity),
        }
    }

    /// Build a table from `(name, spelling)` pairs.
    ///
    /// Returns the offending name if two pairs share one.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
    {
        let mut table = Self::new();
        for (line, (name, spelling)) in pairs.into_iter().enumerate() {
            let record = TokenRecord::new(name, spelling.map(str::to_string), line as u32 + 1);
            if table.push(record).is_err() {
                return Err(name.to_string());
            }
        }
        Ok(table)
    }

    /// Append a record. On a name collision the table is left unchanged and
    /// the id of the earlier record is returned as the error.
    pub fn push(&mut self, record: TokenRecord) -> Result<TokenId, TokenId> {
        let next = TokenId::new(self.records.len());
        match self.records.entry(record.name.clone()) {
            Entry::Occupied(existing) => Err(TokenId::new(existing.index())),
            Entry::Vacant(slot) => {
                slot.insert(record);
                Ok(next)
            }
        }
    }

    pub fn get(&self, id: TokenId) -> Option<&TokenRecord> {
        self.records.get_index(id.index()).map(|(_, record)| record)
    }

    pub fn id_of(&self, name: &str) -> Option<TokenId> {
        self.records.get_index_of(name).map(TokenId::new)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records with their ids, in record order.
    pub fn iter(&self) -> impl Iterator<Item = (TokenId, &TokenRecord)> {
        self.records
            .values()
            .enumerate()
            .map(|(i, record)| (TokenId::new(i), record))
    }

    /// Only the records that carry a spelling, in record order.
    pub fn spelled(&self) -> impl Iterator<Item = (TokenId, &TokenRecord, &str)> {
        self.iter().filter_map(|(id, record)| {
            record
                .spelling
                .as_deref()
                .map(|spelling| (id, record, spelling))
        })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_follow_record_order() {
        let table = TokenTable::from_pairs([("EOF", None), ("LBRACE", Some("{"))]).unwrap();
        assert_eq!(table.id_of("EOF"), Some(TokenId::new(0)));
        assert_eq!(table.id_of("LBRACE"), Some(TokenId::new(1)));
        assert_eq!(table.get(TokenId::new(1)).unwrap().line, 2);
        assert_eq!(table.id_of("RBRACE"), None);
    }

    #[test]
    fn test_duplicate_name_is_rejected() {
        let mut table = TokenTable::new();
        table.push(TokenRecord::new("PLUS", Some("+".into()), 1)).unwrap();
        let err = table.push(TokenRecord::new("PLUS", Some("++".into()), 2));
        assert_eq!(err, Err(TokenId::new(0)));
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(TokenId::new(0)).unwrap().spelling.as_deref(), Some("+"));
    }

    #[test]
    fn test_comma_is_forced() {
        assert_eq!(TokenRecord::new("COMMA", None, 1).spelling.as_deref(), Some(","));
        assert_eq!(
            TokenRecord::new("COMMA", Some(";".into()), 1).spelling.as_deref(),
            Some(",")
        );
    }

    #[test]
    fn test_empty_spelling_is_space() {
        let record = TokenRecord::new("SPACE", Some(String::new()), 1);
        assert_eq!(record.spelling.as_deref(), Some(" "));
    }

    #[test]
    fn test_spelled_skips_unspelled() {
        let table = TokenTable::from_pairs([
            ("IDENT", None),
            ("ARROW", Some("->")),
            ("INT", None),
            ("DOT", Some(".")),
        ])
        .unwrap();
        let spelled: Vec<_> = table.spelled().map(|(id, _, s)| (id.index(), s)).collect();
        assert_eq!(spelled, vec![(1, "->"), (3, ".")]);
    }
}
