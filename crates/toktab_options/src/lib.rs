//! toktab_options: toktab.json parsing and generator options.
//!
//! Parses the project file and provides the option structures consumed by
//! the reader (format variant), the trie builder (overlap policy) and the
//! emitters (target dialect, strategy, output names).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use miette::Diagnostic;
use thiserror::Error;

/// Default project file name.
pub const PROJECT_FILE_NAME: &str = "toktab.json";

/// Field separator of the token file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Separator {
    #[default]
    Tab,
    Space,
    Comma,
}

impl Separator {
    pub fn as_char(self) -> char {
        match self {
            Separator::Tab => '\t',
            Separator::Space => ' ',
            Separator::Comma => ',',
        }
    }
}

impl fmt::Display for Separator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Separator::Tab => write!(f, "tab"),
            Separator::Space => write!(f, "space"),
            Separator::Comma => write!(f, "comma"),
        }
    }
}

/// What to do with a line that yields no fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedPolicy {
    /// Report an error and emit nothing.
    #[default]
    Abort,
    /// Report a warning and drop the line.
    Skip,
}

/// How a spelling that is a strict prefix of another one is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrefixOverlap {
    /// Keep both; the lexer resolves by longest match.
    Allow,
    /// Keep both and report a warning per pair.
    #[default]
    Warn,
    /// Report an error per pair.
    Deny,
}

/// Target language dialect of the emitted tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    #[default]
    C,
    Cpp,
}

/// Spelling-to-identifier emission strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Nested 128-wide dispatch tables.
    #[default]
    Trie,
    /// A chain of exact string comparisons.
    Linear,
}

/// Line format of the token specification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormatOptions {
    pub separator: Separator,
    /// Lines starting with this marker are comments.
    pub comment_marker: String,
    pub malformed: MalformedPolicy,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            separator: Separator::Tab,
            comment_marker: "//".to_string(),
            malformed: MalformedPolicy::Abort,
        }
    }
}

/// Generator options, matching the toktab.json schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratorOptions {
    /// Path to the token specification.
    pub input: Option<String>,
    pub format: FormatOptions,
    pub target: Target,
    pub strategy: Strategy,
    pub out_dir: Option<String>,
    pub token_list_file: String,
    pub token_data_file: String,
    /// Prefix of enum constants in the C dialect.
    pub identifier_prefix: String,
    /// Path of the enum type in the C++ dialect.
    pub kind_path: String,
    /// Namespace wrapping the C++ tables.
    pub namespace: Option<String>,
    /// Headers included at the top of the data file.
    pub includes: Vec<String>,
    /// Token returned by the linear chain when nothing matches.
    pub no_match: Option<String>,
    pub prefix_overlap: PrefixOverlap,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            input: None,
            format: FormatOptions::default(),
            target: Target::C,
            strategy: Strategy::Trie,
            out_dir: None,
            token_list_file: "token_list.incl".to_string(),
            token_data_file: "token_data.incl".to_string(),
            identifier_prefix: "TOK_".to_string(),
            kind_path: "Token::Kind".to_string(),
            namespace: None,
            includes: Vec::new(),
            no_match: None,
            prefix_overlap: PrefixOverlap::Warn,
        }
    }
}

impl GeneratorOptions {
    /// The no-match token name, falling back to the dialect's convention.
    pub fn no_match_name(&self) -> &str {
        match (&self.no_match, self.target) {
            (Some(name), _) => name,
            (None, Target::C) => "UNDEFINED",
            (None, Target::Cpp) => "Undefined",
        }
    }

    /// Directory the output files are written to.
    pub fn out_dir(&self) -> PathBuf {
        PathBuf::from(self.out_dir.as_deref().unwrap_or("."))
    }

    pub fn token_list_path(&self) -> PathBuf {
        self.out_dir().join(&self.token_list_file)
    }

    pub fn token_data_path(&self) -> PathBuf {
        self.out_dir().join(&self.token_data_file)
    }
}

/// Errors raised while loading a project file.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read project file '{path}'")]
    #[diagnostic(code(toktab::config::read))]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid project file '{path}'")]
    #[diagnostic(
        code(toktab::config::parse),
        help("see `toktab --init` for a project file with every field")
    )]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Parse a toktab.json file from a string.
pub fn parse_options(content: &str) -> Result<GeneratorOptions, serde_json::Error> {
    serde_json::from_str(content)
}

/// Parse a toktab.json file from a path.
///
/// A relative `input` or `outDir` is resolved against the project file's
/// directory.
pub fn parse_options_file(path: impl AsRef<Path>) -> Result<GeneratorOptions, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mut options = parse_options(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    if let Some(root) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        let resolve = |p: &String| {
            if Path::new(p).is_absolute() {
                p.clone()
            } else {
                root.join(p).to_string_lossy().into_owned()
            }
        };
        options.input = options.input.as_ref().map(resolve);
        options.out_dir = options.out_dir.as_ref().map(resolve);
    }
    Ok(options)
}

/// The project file written by `toktab --init`.
pub fn default_project_file() -> String {
    let options = GeneratorOptions {
        input: Some("tokens".to_string()),
        out_dir: Some(".".to_string()),
        ..GeneratorOptions::default()
    };
    // Serializing plain enums and strings cannot fail.
    serde_json::to_string_pretty(&options).unwrap_or_default() + "\n"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = parse_options("{}").unwrap();
        assert_eq!(options, GeneratorOptions::default());
        assert_eq!(options.format.separator, Separator::Tab);
        assert_eq!(options.format.comment_marker, "//");
        assert_eq!(options.prefix_overlap, PrefixOverlap::Warn);
        assert_eq!(options.no_match_name(), "UNDEFINED");
    }

    #[test]
    fn test_camel_case_fields() {
        let options = parse_options(
            r#"{
                "format": { "separator": "space", "malformed": "skip" },
                "target": "cpp",
                "strategy": "linear",
                "kindPath": "Kind",
                "namespace": "porc",
                "prefixOverlap": "deny",
                "tokenDataFile": "token_data.hpp"
            }"#,
        )
        .unwrap();
        assert_eq!(options.format.separator, Separator::Space);
        assert_eq!(options.format.comment_marker, "//");
        assert_eq!(options.format.malformed, MalformedPolicy::Skip);
        assert_eq!(options.target, Target::Cpp);
        assert_eq!(options.strategy, Strategy::Linear);
        assert_eq!(options.kind_path, "Kind");
        assert_eq!(options.namespace.as_deref(), Some("porc"));
        assert_eq!(options.prefix_overlap, PrefixOverlap::Deny);
        assert_eq!(options.no_match_name(), "Undefined");
        assert_eq!(options.token_data_path(), PathBuf::from("./token_data.hpp"));
    }

    #[test]
    fn test_unknown_variant_is_rejected() {
        assert!(parse_options(r#"{ "strategy": "hash" }"#).is_err());
    }

    #[test]
    fn test_default_project_file_round_trips() {
        let options = parse_options(&default_project_file()).unwrap();
        assert_eq!(options.input.as_deref(), Some("tokens"));
        assert_eq!(options.target, Target::C);
    }
}
