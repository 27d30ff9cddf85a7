//! toktab_compiler: Build orchestration.
//!
//! Creates the program, coordinates reading, trie building, checking and
//! emission for one token specification.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;
use toktab_core::TokenTable;
use toktab_diagnostics::DiagnosticCollection;
use toktab_emitter::{EmitError, EmitResult, Emitter};
use toktab_options::GeneratorOptions;
use toktab_reader::read_token_spec;
use toktab_trie::{build_trie, Trie};

/// Fatal errors of a build. Problems inside the token file are
/// diagnostics; they only become an error once they abort emission.
#[derive(Debug, Error, Diagnostic)]
pub enum ProgramError {
    #[error("no input specification given")]
    #[diagnostic(
        code(toktab::no_input),
        help("pass a token file or set \"input\" in toktab.json")
    )]
    NoInput,
    #[error("failed to read '{path}'")]
    #[diagnostic(code(toktab::io::read))]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write '{path}'")]
    #[diagnostic(code(toktab::io::write))]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to emit token data")]
    #[diagnostic(code(toktab::emit))]
    Emit(#[from] EmitError),
    #[error("emission aborted: {} error(s) in the token specification", .diagnostics.error_count())]
    #[diagnostic(code(toktab::aborted))]
    Aborted { diagnostics: DiagnosticCollection },
}

impl ProgramError {
    /// Diagnostics carried by an aborted build.
    pub fn diagnostics(&self) -> Option<&DiagnosticCollection> {
        match self {
            ProgramError::Aborted { diagnostics } => Some(diagnostics),
            _ => None,
        }
    }
}

/// The token file text of a program.
#[derive(Debug, Clone)]
struct SourceText {
    file_name: String,
    text: String,
}

/// Everything derived from the source before emission.
#[derive(Debug)]
pub struct Analysis {
    pub table: TokenTable,
    pub trie: Trie,
    /// Reader, trie and emitter diagnostics, sorted by line.
    pub diagnostics: DiagnosticCollection,
}

/// The program represents one build of one token specification.
pub struct Program {
    /// Generator options.
    pub options: GeneratorOptions,
    source: Option<SourceText>,
}

impl Program {
    pub fn new(options: GeneratorOptions) -> Self {
        Self {
            options,
            source: None,
        }
    }

    /// Set the token file text. A later call replaces an earlier one.
    pub fn add_source(&mut self, file_name: impl Into<String>, text: impl Into<String>) {
        let file_name = file_name.into();
        if let Some(previous) = &self.source {
            log::debug!("replacing source '{}' with '{}'", previous.file_name, file_name);
        }
        self.source = Some(SourceText {
            file_name,
            text: text.into(),
        });
    }

    /// Read the `input` file named by the options.
    pub fn load_input(&mut self) -> Result<(), ProgramError> {
        let path = self.options.input.clone().ok_or(ProgramError::NoInput)?;
        let text = std::fs::read_to_string(&path).map_err(|source| ProgramError::Read {
            path: PathBuf::from(&path),
            source,
        })?;
        log::debug!("loaded {} ({} bytes)", path, text.len());
        self.add_source(path, text);
        Ok(())
    }

    /// Read the source, build the trie and run the emitter's checks.
    pub fn analyze(&self) -> Result<Analysis, ProgramError> {
        let source = self.source.as_ref().ok_or(ProgramError::NoInput)?;
        let file_name = Some(source.file_name.as_str());

        let read = read_token_spec(&source.text, file_name, &self.options.format);
        let mut diagnostics = read.diagnostics;

        let build = build_trie(&read.table, self.options.prefix_overlap, file_name);
        diagnostics.extend(build.diagnostics);
        diagnostics.extend(Emitter::new(&self.options).check(&read.table));
        diagnostics.sort();

        Ok(Analysis {
            table: read.table,
            trie: build.trie,
            diagnostics,
        })
    }

    /// All diagnostics of the build, without emitting anything.
    pub fn check(&self) -> Result<DiagnosticCollection, ProgramError> {
        Ok(self.analyze()?.diagnostics)
    }

    /// Produce the output files in memory. Any error diagnostic aborts the
    /// whole build; warnings are returned with the result.
    pub fn emit(&self) -> Result<EmitResult, ProgramError> {
        let analysis = self.analyze()?;
        if analysis.diagnostics.has_errors() {
            return Err(ProgramError::Aborted {
                diagnostics: analysis.diagnostics,
            });
        }

        let emitter = Emitter::new(&self.options);
        let mut result = emitter.emit(&analysis.table, &analysis.trie)?;
        if result.has_errors() {
            return Err(ProgramError::Aborted {
                diagnostics: result.diagnostics,
            });
        }
        // Emitter checks already ran as part of the analysis.
        result.diagnostics = analysis.diagnostics;
        Ok(result)
    }

    /// Write an emit result to disk.
    pub fn write_output_files(&self, result: &EmitResult) -> Result<(), ProgramError> {
        for file in &result.output_files {
            let write = |path: &std::path::Path| -> std::io::Result<()> {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(path, &file.text)
            };
            write(&file.path).map_err(|source| ProgramError::Write {
                path: file.path.clone(),
                source,
            })?;
            log::info!("wrote {}", file.path.display());
        }
        Ok(())
    }
}
