//! toktab_emitter: C/C++ table output.
//!
//! Coordinates output generation for one build:
//! 1. The token list file (one enumerator per record)
//! 2. The token data file: flat spelling and name tables, then either the
//!    trie dispatch tables or the linear comparison chain

mod dialect;
mod flat;
mod linear;
mod list;
mod trie;
mod writer;

pub use dialect::Dialect;
pub use flat::FlatTables;
pub use linear::LinearChain;
pub use list::write_token_list;
pub use trie::{write_node, write_trie};
pub use writer::CodeWriter;

use std::path::PathBuf;
use thiserror::Error;
use toktab_core::{TokenId, TokenTable};
use toktab_diagnostics::{messages, Diagnostic, DiagnosticCollection};
use toktab_options::{GeneratorOptions, Strategy, Target};
use toktab_trie::Trie;

/// First line of every generated file.
pub const GENERATED_HEADER: &str = "/* Auto Generated File */";

/// Emission failures that no file may be produced around.
#[derive(Debug, Error)]
pub enum EmitError {
    #[error("no-match token '{0}' is not declared")]
    UnknownNoMatch(String),
    #[error("trie slot refers to token {0}, which is not in the table")]
    UnknownToken(TokenId),
}

/// The emitter produces the output files of a build.
pub struct Emitter {
    options: GeneratorOptions,
    dialect: Dialect,
}

/// The result of emitting a token table.
#[derive(Debug, Default)]
pub struct EmitResult {
    /// Output files; empty when any diagnostic is an error.
    pub output_files: Vec<OutputFile>,
    pub diagnostics: DiagnosticCollection,
}

impl EmitResult {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }
}

/// A file produced by the emitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    /// The output file path.
    pub path: PathBuf,
    /// The content of the file.
    pub text: String,
}

impl Emitter {
    pub fn new(options: &GeneratorOptions) -> Self {
        Self {
            options: options.clone(),
            dialect: Dialect::from_options(options),
        }
    }

    pub fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    /// Emission-time checks: the linear chain's fallback must be declared.
    pub fn check(&self, table: &TokenTable) -> DiagnosticCollection {
        let mut diagnostics = DiagnosticCollection::new();
        if self.options.strategy == Strategy::Linear {
            let no_match = self.options.no_match_name();
            if table.id_of(no_match).is_none() {
                diagnostics.add(Diagnostic::new(&messages::UNKNOWN_NO_MATCH_TOKEN, &[no_match]));
            }
        }
        diagnostics
    }

    /// Emit both files. Nothing is produced when [`Emitter::check`] fails.
    pub fn emit(&self, table: &TokenTable, trie: &Trie) -> Result<EmitResult, EmitError> {
        let diagnostics = self.check(table);
        if diagnostics.has_errors() {
            return Ok(EmitResult {
                output_files: Vec::new(),
                diagnostics,
            });
        }

        log::debug!(
            "emitting {} tokens ({:?}, {:?})",
            table.len(),
            self.options.target,
            self.options.strategy
        );

        let output_files = vec![
            OutputFile {
                path: self.options.token_list_path(),
                text: self.emit_token_list(table),
            },
            OutputFile {
                path: self.options.token_data_path(),
                text: self.emit_token_data(table, trie)?,
            },
        ];

        Ok(EmitResult {
            output_files,
            diagnostics,
        })
    }

    /// The token list file.
    pub fn emit_token_list(&self, table: &TokenTable) -> String {
        let mut w = CodeWriter::new();
        w.line(GENERATED_HEADER);
        write_token_list(&mut w, table, &self.dialect);
        w.finish()
    }

    /// The token data file, using the configured strategy.
    pub fn emit_token_data(&self, table: &TokenTable, trie: &Trie) -> Result<String, EmitError> {
        let no_match = self.options.no_match_name();
        let chain = match self.options.strategy {
            Strategy::Trie => None,
            Strategy::Linear => Some(
                LinearChain::from_table(table, no_match)
                    .ok_or_else(|| EmitError::UnknownNoMatch(no_match.to_string()))?,
            ),
        };

        let mut w = CodeWriter::new();
        w.line(GENERATED_HEADER);
        self.write_includes(&mut w);

        let namespace = self.namespace();
        if let Some(namespace) = namespace {
            w.line(&format!("namespace {} {{", namespace));
            w.blank_line();
        }

        FlatTables::from_table(table).emit(&mut w, &self.dialect);
        w.blank_line();

        match chain {
            Some(chain) => chain.emit(&mut w, table, &self.dialect),
            None => write_trie(&mut w, trie, table, &self.dialect)?,
        }

        if let Some(namespace) = namespace {
            w.blank_line();
            w.line(&format!("}} // namespace {}", namespace));
        }
        Ok(w.finish())
    }

    fn write_includes(&self, w: &mut CodeWriter) {
        let mut wrote = false;
        for include in &self.options.includes {
            if include.starts_with('<') {
                w.line(&format!("#include {}", include));
            } else {
                w.line(&format!("#include \"{}\"", include));
            }
            wrote = true;
        }
        if self.options.strategy == Strategy::Linear {
            w.line(self.dialect.linear_include());
            wrote = true;
        }
        if wrote {
            w.blank_line();
        }
    }

    /// Namespaces only exist in the C++ dialect.
    fn namespace(&self) -> Option<&str> {
        let namespace = self.options.namespace.as_deref().filter(|n| !n.is_empty())?;
        if self.dialect.target() == Target::C {
            log::debug!("ignoring namespace '{}' for the C target", namespace);
            return None;
        }
        Some(namespace)
    }
}
