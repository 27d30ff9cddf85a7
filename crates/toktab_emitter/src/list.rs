//! The token list: one enumerator per record, in record order.

use crate::dialect::Dialect;
use crate::writer::CodeWriter;
use toktab_core::TokenTable;

/// Write every record's enumerator followed by a comma, ready to be
/// included inside an enumeration body.
pub fn write_token_list(w: &mut CodeWriter, table: &TokenTable, dialect: &Dialect) {
    for (_, record) in table.iter() {
        w.line(&format!("{},", dialect.enumerator(&record.name)));
    }
}
