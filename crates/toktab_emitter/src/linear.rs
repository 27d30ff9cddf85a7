//! The linear chain: one exact comparison per spelling, in record order.

use crate::dialect::Dialect;
use crate::writer::CodeWriter;
use toktab_core::ascii::string_literal;
use toktab_core::{TokenId, TokenTable};

/// The comparisons the chain performs, and its fallback.
#[derive(Debug, Clone)]
pub struct LinearChain {
    tests: Vec<(String, TokenId)>,
    fallback: TokenId,
}

impl LinearChain {
    /// Build the chain for `table`, falling back to the token named
    /// `no_match`. Returns `None` when that token is not declared.
    pub fn from_table(table: &TokenTable, no_match: &str) -> Option<Self> {
        let fallback = table.id_of(no_match)?;
        let tests = table
            .spelled()
            .map(|(id, _, spelling)| (spelling.to_string(), id))
            .collect();
        Some(Self { tests, fallback })
    }

    /// What the emitted function returns for `input`: the first record
    /// whose spelling equals it, else the fallback.
    pub fn lookup(&self, input: &str) -> TokenId {
        self.tests
            .iter()
            .find(|(spelling, _)| spelling == input)
            .map(|&(_, id)| id)
            .unwrap_or(self.fallback)
    }

    pub fn fallback(&self) -> TokenId {
        self.fallback
    }

    /// Number of comparisons.
    pub fn len(&self) -> usize {
        self.tests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }

    pub fn emit(&self, w: &mut CodeWriter, table: &TokenTable, dialect: &Dialect) {
        let name = |id: TokenId| table.get(id).map(|r| r.name.as_str()).unwrap_or_default();

        w.open(&dialect.linear_signature());
        for (spelling, id) in &self.tests {
            w.line(&format!(
                "if ({}) return {};",
                dialect.string_equals(&string_literal(spelling)),
                dialect.kind(name(*id))
            ));
        }
        w.line(&format!("return {};", dialect.kind(name(self.fallback))));
        w.close("}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toktab_options::Target;

    fn sample() -> TokenTable {
        TokenTable::from_pairs([
            ("Undefined", None),
            ("Minus", Some("-")),
            ("ReturnType", Some("->")),
        ])
        .unwrap()
    }

    #[test]
    fn test_lookup_and_fallback() {
        let table = sample();
        let chain = LinearChain::from_table(&table, "Undefined").unwrap();
        assert_eq!(chain.len(), 2);
        assert_eq!(chain.lookup("->"), TokenId::new(2));
        assert_eq!(chain.lookup("-"), TokenId::new(1));
        assert_eq!(chain.lookup("-->"), TokenId::new(0));
        assert!(LinearChain::from_table(&table, "Missing").is_none());
    }

    #[test]
    fn test_emit_cpp() {
        let table = sample();
        let chain = LinearChain::from_table(&table, "Undefined").unwrap();
        let mut w = CodeWriter::new();
        chain.emit(&mut w, &table, &Dialect::new(Target::Cpp, "TOK_", "Token::Kind"));
        assert_eq!(
            w.finish(),
            "Token::Kind tokenFromStr(std::string_view str) {\n    \
             if (str == \"-\") return Token::Kind::Minus;\n    \
             if (str == \"->\") return Token::Kind::ReturnType;\n    \
             return Token::Kind::Undefined;\n}\n"
        );
    }
}
