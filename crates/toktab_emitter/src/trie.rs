//! Nested dispatch tables for the trie.
//!
//! Every node becomes two sibling 128-slot tables: completing tokens and
//! child nodes. An empty table is written as the dialect's null sentinel.
//! Populated slots are written in ascending character code.

use crate::dialect::Dialect;
use crate::writer::CodeWriter;
use crate::EmitError;
use toktab_core::ascii::char_literal;
use toktab_core::TokenTable;
use toktab_trie::{NodeId, Trie};

/// Write the `ASCII_SET` guard, the node type and the root node.
pub fn write_trie(
    w: &mut CodeWriter,
    trie: &Trie,
    table: &TokenTable,
    dialect: &Dialect,
) -> Result<(), EmitError> {
    w.line("#ifndef ASCII_SET");
    w.line(&format!("#define ASCII_SET {}", toktab_core::ASCII_SET));
    w.line("#endif");
    w.blank_line();

    for line in dialect.node_type_declaration() {
        w.line(line);
    }
    w.blank_line();

    w.open(dialect.root_open());
    write_node(w, trie, trie.root(), table, dialect)?;
    w.close("};");
    Ok(())
}

/// Write the two tables of `node`, recursing into children. Every token in
/// the trie must be a record of `table`.
pub fn write_node(
    w: &mut CodeWriter,
    trie: &Trie,
    node: NodeId,
    table: &TokenTable,
    dialect: &Dialect,
) -> Result<(), EmitError> {
    let set = trie.node(node);

    if set.has_tokens() {
        w.open(dialect.tokens_table_open());
        for (code, token) in set.sorted_tokens() {
            let record = table.get(token).ok_or(EmitError::UnknownToken(token))?;
            w.line(&format!("[{}] = {},", char_literal(code), dialect.index(&record.name)));
        }
        w.close("},");
    } else {
        w.line(&format!("{},", dialect.null()));
    }

    if set.has_children() {
        w.open(dialect.children_table_open());
        for (code, child) in set.sorted_children() {
            w.open(&dialect.child_open(&char_literal(code)));
            write_node(w, trie, child, table, dialect)?;
            w.close("},");
        }
        w.close("},");
    } else {
        w.line(&format!("{},", dialect.null()));
    }
    Ok(())
}
