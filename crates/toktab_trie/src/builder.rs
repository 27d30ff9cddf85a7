//! Building a trie from a token table, with ambiguity checks.

use crate::node::{InsertError, NodeId, Trie};
use toktab_core::ascii::{first_non_ascii, string_literal};
use toktab_core::{TokenId, TokenTable};
use toktab_diagnostics::{messages, Diagnostic, DiagnosticCollection, DiagnosticMessage};
use toktab_options::PrefixOverlap;

/// A built trie and the diagnostics found while building it.
#[derive(Debug)]
pub struct TrieBuild {
    pub trie: Trie,
    pub diagnostics: DiagnosticCollection,
}

/// Inserts the spellings of a [`TokenTable`] into a [`Trie`] in record order.
///
/// Two records with the same spelling are always an error. A spelling that
/// is a strict prefix of another puts one character into both maps of a
/// node; that is reported according to the [`PrefixOverlap`] policy.
pub struct TrieBuilder<'a> {
    table: &'a TokenTable,
    overlap: PrefixOverlap,
    file_name: Option<&'a str>,
    trie: Trie,
    diagnostics: DiagnosticCollection,
}

impl<'a> TrieBuilder<'a> {
    pub fn new(table: &'a TokenTable, overlap: PrefixOverlap) -> Self {
        Self {
            table,
            overlap,
            file_name: None,
            trie: Trie::new(),
            diagnostics: DiagnosticCollection::new(),
        }
    }

    /// Attach a file name to the diagnostics.
    pub fn with_file_name(mut self, file_name: Option<&'a str>) -> Self {
        self.file_name = file_name;
        self
    }

    pub fn build(mut self) -> TrieBuild {
        let table = self.table;
        let mut inserted = 0usize;
        for (id, _, spelling) in table.spelled() {
            if self.insert(id, spelling) {
                inserted += 1;
            }
        }
        log::debug!(
            "built trie: {} spellings, {} nodes, depth {}",
            inserted,
            self.trie.node_count(),
            self.trie.depth()
        );
        TrieBuild {
            trie: self.trie,
            diagnostics: self.diagnostics,
        }
    }

    fn insert(&mut self, id: TokenId, spelling: &str) -> bool {
        if let Some(bad) = first_non_ascii(spelling) {
            self.report(
                id,
                &messages::NON_ASCII_SPELLING,
                &[self.name(id), bad.to_string().as_str()],
            );
            return false;
        }

        let bytes = spelling.as_bytes();
        let overlaps = self.find_overlaps(id, bytes);

        match self.trie.insert(bytes, id) {
            Ok(()) => {}
            Err(InsertError::Occupied(existing)) => {
                let literal = string_literal(spelling);
                let first_line = self.line(existing);
                let diagnostic = Diagnostic::with_location(
                    self.file_name,
                    self.line(id),
                    &messages::SPELLING_0_OF_1_IS_ALREADY_BOUND_TO_2,
                    &[literal.as_str(), self.name(id), self.name(existing)],
                )
                .with_related(Diagnostic::with_location(
                    self.file_name,
                    first_line,
                    &messages::_0_WAS_FIRST_DEFINED_HERE,
                    &[self.name(existing)],
                ));
                self.diagnostics.add(diagnostic);
                return false;
            }
            // Records never carry empty or non-ASCII spellings at this point.
            Err(InsertError::Empty) | Err(InsertError::NonAscii(_)) => return false,
        }

        for (shorter, longer) in overlaps {
            self.report_overlap(id, shorter, longer);
        }
        true
    }

    /// Pairs `(shorter, longer)` of tokens whose spellings would share a
    /// character between the `tokens` and `children` maps of one node once
    /// `bytes` is inserted for `id`.
    fn find_overlaps(&self, id: TokenId, bytes: &[u8]) -> Vec<(TokenId, TokenId)> {
        let mut overlaps = Vec::new();
        let Some((&last, prefix)) = bytes.split_last() else {
            return overlaps;
        };

        // Existing shorter spellings ending along our path.
        let mut node = Some(NodeId::ROOT);
        for &c in prefix {
            let Some(current) = node else { break };
            let set = self.trie.node(current);
            if let Some(shorter) = set.token(c) {
                overlaps.push((shorter, id));
            }
            node = set.child(c);
        }

        // An existing longer spelling continuing past our last character.
        let longer = node
            .and_then(|current| self.trie.node(current).child(last))
            .and_then(|child| self.trie.first_token_under(child));
        if let Some(longer) = longer {
            overlaps.push((id, longer));
        }

        overlaps
    }

    fn report_overlap(&mut self, id: TokenId, shorter: TokenId, longer: TokenId) {
        let message = match self.overlap {
            PrefixOverlap::Allow => {
                log::trace!(
                    "prefix overlap allowed: {} / {}",
                    self.name(shorter),
                    self.name(longer)
                );
                return;
            }
            PrefixOverlap::Warn => &messages::SPELLING_0_OF_1_OVERLAPS_2_OF_3,
            PrefixOverlap::Deny => &messages::SPELLING_0_OF_1_OVERLAPS_2_OF_3_DENIED,
        };
        let shorter_literal = string_literal(self.spelling(shorter));
        let longer_literal = string_literal(self.spelling(longer));
        self.report(
            id,
            message,
            &[
                shorter_literal.as_str(),
                self.name(shorter),
                longer_literal.as_str(),
                self.name(longer),
            ],
        );
    }

    fn report(&mut self, id: TokenId, message: &DiagnosticMessage, args: &[&str]) {
        let diagnostic = Diagnostic::with_location(self.file_name, self.line(id), message, args);
        self.diagnostics.add(diagnostic);
    }

    fn name(&self, id: TokenId) -> &'a str {
        self.table.get(id).map(|r| r.name.as_str()).unwrap_or("?")
    }

    fn spelling(&self, id: TokenId) -> &'a str {
        self.table
            .get(id)
            .and_then(|r| r.spelling.as_deref())
            .unwrap_or("")
    }

    fn line(&self, id: TokenId) -> u32 {
        self.table.get(id).map(|r| r.line).unwrap_or(0)
    }
}

/// Build the trie for every spelling-bearing record of `table`.
pub fn build_trie(
    table: &TokenTable,
    overlap: PrefixOverlap,
    file_name: Option<&str>,
) -> TrieBuild {
    TrieBuilder::new(table, overlap).with_file_name(file_name).build()
}
