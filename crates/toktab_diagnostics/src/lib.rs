//! toktab_diagnostics: Diagnostic messages and error reporting infrastructure.
//!
//! Every problem found in a token specification is reported as a diagnostic
//! carrying a stable code, a category and, when known, the file and line it
//! came from. Diagnostics are collected for the whole input so that a single
//! run reports everything; any error aborts table emission.

use std::fmt;

/// Diagnostic category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCategory {
    Warning,
    Error,
    Message,
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCategory::Warning => write!(f, "warning"),
            DiagnosticCategory::Error => write!(f, "error"),
            DiagnosticCategory::Message => write!(f, "note"),
        }
    }
}

/// A diagnostic message template with a code and category.
#[derive(Debug, Clone)]
pub struct DiagnosticMessage {
    /// The diagnostic code (e.g., 1001, 3002).
    pub code: u32,
    /// The category of this diagnostic.
    pub category: DiagnosticCategory,
    /// The message template string. May contain `{0}`, `{1}`, etc. placeholders.
    pub message: &'static str,
}

/// A realized diagnostic with location information and resolved message text.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// The token file this diagnostic refers to, if any.
    pub file: Option<String>,
    /// 1-based line in that file, if any.
    pub line: Option<u32>,
    /// The resolved message text.
    pub message_text: String,
    /// The diagnostic code.
    pub code: u32,
    /// The category.
    pub category: DiagnosticCategory,
    /// Related diagnostics, e.g. the first definition of a duplicated name.
    pub related_information: Vec<Diagnostic>,
}

impl Diagnostic {
    /// Create a new diagnostic without location info.
    pub fn new(message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            file: None,
            line: None,
            message_text: format_message(message.message, args),
            code: message.code,
            category: message.category,
            related_information: Vec::new(),
        }
    }

    /// Create a new diagnostic pointing at a line of a file.
    pub fn with_location(
        file: Option<&str>,
        line: u32,
        message: &DiagnosticMessage,
        args: &[&str],
    ) -> Self {
        Self {
            file: file.map(str::to_string),
            line: Some(line),
            ..Self::new(message, args)
        }
    }

    /// Add related diagnostic information.
    pub fn with_related(mut self, related: Diagnostic) -> Self {
        self.related_information.push(related);
        self
    }

    /// Whether this is an error diagnostic.
    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref file) = self.file {
            write!(f, "{}", file)?;
            if let Some(line) = self.line {
                write!(f, ":{}", line)?;
            }
            write!(f, ": ")?;
        } else if let Some(line) = self.line {
            write!(f, "line {}: ", line)?;
        }
        write!(
            f,
            "{} TT{}: {}",
            self.category, self.code, self.message_text
        )
    }
}

/// Format a diagnostic message template by replacing `{0}`, `{1}`, etc. with arguments.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{}}}", i), arg);
    }
    result
}

/// A collection of diagnostics accumulated while building tables.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticCollection {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollection {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.category == DiagnosticCategory::Warning)
            .count()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Whether any diagnostic carries the given code.
    pub fn contains_code(&self, code: u32) -> bool {
        self.diagnostics.iter().any(|d| d.code == code)
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn extend(&mut self, other: DiagnosticCollection) {
        self.diagnostics.extend(other.diagnostics);
    }

    /// Sort diagnostics by file and line, keeping report order within a line.
    pub fn sort(&mut self) {
        self.diagnostics.sort_by(|a, b| {
            a.file
                .cmp(&b.file)
                .then_with(|| a.line.unwrap_or(0).cmp(&b.line.unwrap_or(0)))
        });
    }
}

// ============================================================================
// Diagnostic Messages
// ============================================================================

#[rustfmt::skip]
pub mod messages {
    use super::*;

    macro_rules! diag {
        ($code:expr, Error, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Error, message: $msg }
        };
        ($code:expr, Warning, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Warning, message: $msg }
        };
        ($code:expr, Message, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Message, message: $msg }
        };
    }

    // ========================================================================
    // Record syntax (1000-1099)
    // ========================================================================
    pub const MALFORMED_RECORD: DiagnosticMessage = diag!(1001, Error, "Line has no fields after splitting on the {0} separator.");
    pub const MALFORMED_RECORD_SKIPPED: DiagnosticMessage = diag!(1001, Warning, "Skipping line with no fields after splitting on the {0} separator.");
    pub const EXTRA_FIELDS_IGNORED: DiagnosticMessage = diag!(1003, Warning, "Token '{0}' has {1} fields; fields after the spelling are ignored.");
    pub const UNTERMINATED_SPELLING: DiagnosticMessage = diag!(1004, Error, "Unterminated quoted spelling for token '{0}'.");

    // ========================================================================
    // Token names (2000-2099)
    // ========================================================================
    pub const DUPLICATE_TOKEN_NAME: DiagnosticMessage = diag!(2001, Error, "Duplicate token name '{0}'.");
    pub const _0_WAS_FIRST_DEFINED_HERE: DiagnosticMessage = diag!(2002, Message, "'{0}' was first defined here.");

    // ========================================================================
    // Spellings (3000-3099)
    // ========================================================================
    pub const NON_ASCII_SPELLING: DiagnosticMessage = diag!(3001, Error, "Spelling of '{0}' contains non-ASCII character '{1}'.");
    pub const SPELLING_0_OF_1_IS_ALREADY_BOUND_TO_2: DiagnosticMessage = diag!(3002, Error, "Spelling {0} of '{1}' is already bound to '{2}'.");
    pub const SPELLING_0_OF_1_OVERLAPS_2_OF_3: DiagnosticMessage = diag!(3003, Warning, "Spelling {0} of '{1}' is a prefix of {2} of '{3}'; the lexer must resolve it by longest match.");
    pub const SPELLING_0_OF_1_OVERLAPS_2_OF_3_DENIED: DiagnosticMessage = diag!(3003, Error, "Spelling {0} of '{1}' is a prefix of {2} of '{3}'.");

    // ========================================================================
    // Emission (4000-4099)
    // ========================================================================
    pub const UNKNOWN_NO_MATCH_TOKEN: DiagnosticMessage = diag!(4001, Error, "No-match token '{0}' is not declared in the token file.");
}
