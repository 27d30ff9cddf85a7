//! Flat identifier-indexed tables: spelling and display name per token.

use crate::dialect::Dialect;
use crate::writer::CodeWriter;
use toktab_core::ascii::string_literal;
use toktab_core::{TokenId, TokenTable};

/// Both flat tables, indexed by [`TokenId`] and sized to the token count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatTables {
    names: Vec<String>,
    spellings: Vec<Option<String>>,
}

impl FlatTables {
    /// One pass over the records.
    pub fn from_table(table: &TokenTable) -> Self {
        let mut names = Vec::with_capacity(table.len());
        let mut spellings = Vec::with_capacity(table.len());
        for (_, record) in table.iter() {
            names.push(record.name.clone());
            spellings.push(record.spelling.clone());
        }
        Self { names, spellings }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn name(&self, id: TokenId) -> Option<&str> {
        self.names.get(id.index()).map(String::as_str)
    }

    /// `None` both for spelling-less tokens and for ids out of range.
    pub fn spelling(&self, id: TokenId) -> Option<&str> {
        self.spellings.get(id.index()).and_then(|s| s.as_deref())
    }

    /// Write `tokenToStrMap` and `tokenToNameMap` as designated initializers.
    /// Spelling-less slots are left out and stay null.
    pub fn emit(&self, w: &mut CodeWriter, dialect: &Dialect) {
        let count = dialect.count_symbol();

        w.open(&format!("static const char *tokenToStrMap[{}] = {{", count));
        for (name, spelling) in self.names.iter().zip(&self.spellings) {
            if let Some(spelling) = spelling {
                w.line(&format!("[{}] = {},", dialect.index(name), string_literal(spelling)));
            }
        }
        w.close("};");
        w.blank_line();

        w.open(&format!("static const char *tokenToNameMap[{}] = {{", count));
        for name in &self.names {
            w.line(&format!("[{}] = {},", dialect.index(name), string_literal(name)));
        }
        w.close("};");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toktab_options::Target;

    fn sample() -> TokenTable {
        TokenTable::from_pairs([("IDENT", None), ("QUOTE", Some("\"")), ("COMMA", None)]).unwrap()
    }

    #[test]
    fn test_tables_are_total_over_ids() {
        let flat = FlatTables::from_table(&sample());
        assert_eq!(flat.len(), 3);
        assert_eq!(flat.name(TokenId::new(0)), Some("IDENT"));
        assert_eq!(flat.spelling(TokenId::new(0)), None);
        assert_eq!(flat.spelling(TokenId::new(1)), Some("\""));
        assert_eq!(flat.spelling(TokenId::new(2)), Some(","));
        assert_eq!(flat.name(TokenId::new(3)), None);
    }

    #[test]
    fn test_emit_skips_missing_spellings() {
        let mut w = CodeWriter::new();
        let dialect = Dialect::new(Target::C, "TOK_", "Token::Kind");
        FlatTables::from_table(&sample()).emit(&mut w, &dialect);
        let text = w.finish();
        assert!(text.starts_with(
            "static const char *tokenToStrMap[NUM_TOKENS] = {\n    \
             [TOK_QUOTE] = \"\\\"\",\n    [TOK_COMMA] = \",\",\n};\n"
        ));
        assert!(text.contains("    [TOK_IDENT] = \"IDENT\",\n"));
        assert!(!text.contains("[TOK_IDENT] = \"\""));
    }
}
