//! The token file reader.

use crate::fields::{split_fields, Field, SplitError};
use toktab_core::{TokenRecord, TokenTable};
use toktab_diagnostics::{messages, Diagnostic, DiagnosticCollection, DiagnosticMessage};
use toktab_options::{FormatOptions, MalformedPolicy};

/// The outcome of reading a specification: every well-formed record plus the
/// diagnostics for the rest.
#[derive(Debug)]
pub struct ReadResult {
    pub table: TokenTable,
    pub diagnostics: DiagnosticCollection,
}

/// Reads specification text line by line into a [`TokenTable`].
pub struct SpecReader<'a> {
    format: &'a FormatOptions,
    file_name: Option<&'a str>,
    table: TokenTable,
    diagnostics: DiagnosticCollection,
}

impl<'a> SpecReader<'a> {
    pub fn new(format: &'a FormatOptions, file_name: Option<&'a str>) -> Self {
        Self {
            format,
            file_name,
            table: TokenTable::new(),
            diagnostics: DiagnosticCollection::new(),
        }
    }

    /// Read all lines of `source`.
    pub fn read(mut self, source: &str) -> ReadResult {
        for (index, line) in source.lines().enumerate() {
            self.read_line(index as u32 + 1, line);
        }
        log::debug!(
            "read {} token records from {} ({} diagnostics)",
            self.table.len(),
            self.file_name.unwrap_or("<input>"),
            self.diagnostics.len()
        );
        ReadResult {
            table: self.table,
            diagnostics: self.diagnostics,
        }
    }

    /// Read one line. Blank and comment lines produce nothing.
    pub fn read_line(&mut self, line_number: u32, line: &str) {
        let content = line.trim_start();
        if content.is_empty() {
            return;
        }
        if !self.format.comment_marker.is_empty()
            && content.starts_with(self.format.comment_marker.as_str())
        {
            return;
        }

        let separator = self.format.separator;
        let fields = match split_fields(line, separator.as_char()) {
            Ok(fields) => fields,
            Err(SplitError::Unterminated(fields)) => {
                let name = fields.first().map(|f| f.text.as_str()).unwrap_or("");
                self.report(line_number, &messages::UNTERMINATED_SPELLING, &[name]);
                return;
            }
        };

        // A record needs a non-empty name.
        let Some(name) = fields
            .first()
            .filter(|f| !f.text.trim_matches(|c: char| c == '"' || c.is_whitespace()).is_empty())
        else {
            let message = match self.format.malformed {
                MalformedPolicy::Abort => &messages::MALFORMED_RECORD,
                MalformedPolicy::Skip => &messages::MALFORMED_RECORD_SKIPPED,
            };
            self.report(line_number, message, &[separator.to_string().as_str()]);
            return;
        };

        if fields.len() > 2 {
            self.report(
                line_number,
                &messages::EXTRA_FIELDS_IGNORED,
                &[name.text.as_str(), &fields.len().to_string()],
            );
        }

        let spelling = fields.get(1).map(spelling_of);
        let record = TokenRecord::new(name.text.as_str(), spelling, line_number);
        log::trace!("line {}: {} {:?}", line_number, record.name, record.spelling);

        if let Err(first) = self.table.push(record) {
            let first_line = self.table.get(first).map(|r| r.line).unwrap_or(0);
            let diagnostic = Diagnostic::with_location(
                self.file_name,
                line_number,
                &messages::DUPLICATE_TOKEN_NAME,
                &[name.text.as_str()],
            )
            .with_related(Diagnostic::with_location(
                self.file_name,
                first_line,
                &messages::_0_WAS_FIRST_DEFINED_HERE,
                &[name.text.as_str()],
            ));
            self.diagnostics.add(diagnostic);
        }
    }

    fn report(&mut self, line: u32, message: &DiagnosticMessage, args: &[&str]) {
        self.diagnostics
            .add(Diagnostic::with_location(self.file_name, line, message, args));
    }
}

/// The spelling a field denotes. Unquoted fields lose any stray quotes.
fn spelling_of(field: &Field) -> String {
    if field.quoted {
        field.text.clone()
    } else {
        field.text.trim_matches('"').to_string()
    }
}

/// Read a whole specification with the given format.
pub fn read_token_spec(
    source: &str,
    file_name: Option<&str>,
    format: &FormatOptions,
) -> ReadResult {
    SpecReader::new(format, file_name).read(source)
}
