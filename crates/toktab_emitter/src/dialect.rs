//! Target-language syntax for the emitted tables.
//!
//! Both dialects produce the same shape; only the spelling of references,
//! sentinels and type names differs.

use toktab_options::{GeneratorOptions, Target};

/// Syntax choices for one target language.
#[derive(Debug, Clone)]
pub struct Dialect {
    target: Target,
    identifier_prefix: String,
    kind_path: String,
}

impl Dialect {
    pub fn new(target: Target, identifier_prefix: &str, kind_path: &str) -> Self {
        Self {
            target,
            identifier_prefix: identifier_prefix.to_string(),
            kind_path: kind_path.to_string(),
        }
    }

    pub fn from_options(options: &GeneratorOptions) -> Self {
        Self::new(options.target, &options.identifier_prefix, &options.kind_path)
    }

    pub fn target(&self) -> Target {
        self.target
    }

    /// The entry of `name` in the token list, e.g. `TOK_COMMA` or `Comma`.
    pub fn enumerator(&self, name: &str) -> String {
        match self.target {
            Target::C => format!("{}{}", self.identifier_prefix, name),
            Target::Cpp => name.to_string(),
        }
    }

    /// `name` as a value of the enumeration type, e.g. `Token::Kind::Comma`.
    pub fn kind(&self, name: &str) -> String {
        match self.target {
            Target::C => self.enumerator(name),
            Target::Cpp => format!("{}::{}", self.kind_path, name),
        }
    }

    /// `name` as an array index or `int` slot value.
    pub fn index(&self, name: &str) -> String {
        match self.target {
            Target::C => self.enumerator(name),
            Target::Cpp => format!("(int){}", self.kind(name)),
        }
    }

    /// Size of the flat tables.
    pub fn count_symbol(&self) -> String {
        match self.target {
            Target::C => "NUM_TOKENS".to_string(),
            Target::Cpp => self.index("NumTokens"),
        }
    }

    /// Empty-table sentinel.
    pub fn null(&self) -> &'static str {
        match self.target {
            Target::C => "NULL",
            Target::Cpp => "nullptr",
        }
    }

    /// Declaration of the trie node type.
    pub fn node_type_declaration(&self) -> &'static [&'static str] {
        match self.target {
            Target::C => &[
                "typedef struct _token_set_t {",
                "    const int *tokens;",
                "    const struct _token_set_t **child_tokens;",
                "} const *TokenSet;",
            ],
            Target::Cpp => &[
                "struct TokenSet {",
                "    const int *tokens;",
                "    const TokenSet *child_tokens;",
                "};",
            ],
        }
    }

    /// Opening of the root node definition.
    pub fn root_open(&self) -> &'static str {
        match self.target {
            Target::C => "static const struct _token_set_t tokenFromStrMap = {",
            Target::Cpp => "static const TokenSet tokenFromStrMap = {",
        }
    }

    /// Compound literal opening a 128-slot table of completing tokens.
    pub fn tokens_table_open(&self) -> &'static str {
        "(const int[ASCII_SET]){"
    }

    /// Compound literal opening a 128-slot table of children.
    pub fn children_table_open(&self) -> &'static str {
        match self.target {
            Target::C => "(const struct _token_set_t*[ASCII_SET]){",
            Target::Cpp => "(const TokenSet[ASCII_SET]){",
        }
    }

    /// Opening of one child node stored in a children slot.
    pub fn child_open(&self, key: &str) -> String {
        match self.target {
            Target::C => format!("[{}] = (const struct _token_set_t[1]){{", key),
            Target::Cpp => format!("[{}] = {{", key),
        }
    }

    /// Signature opening the linear lookup function.
    pub fn linear_signature(&self) -> String {
        match self.target {
            Target::C => "static int tokenFromStr(const char *str) {".to_string(),
            Target::Cpp => format!("{} tokenFromStr(std::string_view str) {{", self.kind_path),
        }
    }

    /// Exact-equality test of the lookup argument against `literal`.
    pub fn string_equals(&self, literal: &str) -> String {
        match self.target {
            Target::C => format!("strcmp(str, {}) == 0", literal),
            Target::Cpp => format!("str == {}", literal),
        }
    }

    /// Header the linear chain needs.
    pub fn linear_include(&self) -> &'static str {
        match self.target {
            Target::C => "#include <string.h>",
            Target::Cpp => "#include <string_view>",
        }
    }
}
