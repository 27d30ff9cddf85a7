//! Emitter tests: golden output for small inputs, determinism, and
//! agreement between the trie and linear strategies.

use similar_asserts::assert_eq;
use toktab_core::TokenTable;
use toktab_emitter::{Emitter, LinearChain};
use toktab_options::{FormatOptions, GeneratorOptions, PrefixOverlap, Separator, Strategy, Target};
use toktab_reader::read_token_spec;
use toktab_trie::{build_trie, Trie};

const SCENARIO: &str = include_str!("../../../tests/fixtures/scenario");
const TOKENS: &str = include_str!("../../../tests/fixtures/tokens");
const TOKENS_SPACE: &str = include_str!("../../../tests/fixtures/tokens_space");

fn load(source: &str, separator: Separator) -> (TokenTable, Trie) {
    let format = FormatOptions {
        separator,
        ..FormatOptions::default()
    };
    let read = read_token_spec(source, None, &format);
    assert!(!read.diagnostics.has_errors(), "{:?}", read.diagnostics);
    let build = build_trie(&read.table, PrefixOverlap::Allow, None);
    assert!(build.diagnostics.is_empty());
    (read.table, build.trie)
}

#[test]
fn test_scenario_c_trie_golden() {
    let (table, trie) = load(SCENARIO, Separator::Tab);
    let emitter = Emitter::new(&GeneratorOptions::default());

    assert_eq!(
        emitter.emit_token_list(&table).as_str(),
        "/* Auto Generated File */\nTOK_LBRACE,\nTOK_RBRACE,\nTOK_ARROW,\n"
    );

    let expected = r#"/* Auto Generated File */
static const char *tokenToStrMap[NUM_TOKENS] = {
    [TOK_LBRACE] = "{",
    [TOK_RBRACE] = "}",
    [TOK_ARROW] = "->",
};

static const char *tokenToNameMap[NUM_TOKENS] = {
    [TOK_LBRACE] = "LBRACE",
    [TOK_RBRACE] = "RBRACE",
    [TOK_ARROW] = "ARROW",
};

#ifndef ASCII_SET
#define ASCII_SET 128
#endif

typedef struct _token_set_t {
    const int *tokens;
    const struct _token_set_t **child_tokens;
} const *TokenSet;

static const struct _token_set_t tokenFromStrMap = {
    (const int[ASCII_SET]){
        ['{'] = TOK_LBRACE,
        ['}'] = TOK_RBRACE,
    },
    (const struct _token_set_t*[ASCII_SET]){
        ['-'] = (const struct _token_set_t[1]){
            (const int[ASCII_SET]){
                ['>'] = TOK_ARROW,
            },
            NULL,
        },
    },
};
"#;
    assert_eq!(emitter.emit_token_data(&table, &trie).unwrap().as_str(), expected);
}

#[test]
fn test_scenario_cpp_trie_golden() {
    let (table, trie) = load(SCENARIO, Separator::Tab);
    let options = GeneratorOptions {
        target: Target::Cpp,
        ..GeneratorOptions::default()
    };
    let emitter = Emitter::new(&options);

    assert_eq!(
        emitter.emit_token_list(&table).as_str(),
        "/* Auto Generated File */\nLBRACE,\nRBRACE,\nARROW,\n"
    );

    let text = emitter.emit_token_data(&table, &trie).unwrap();
    let trie_part = &text[text.find("struct TokenSet").unwrap()..];
    let expected = r#"struct TokenSet {
    const int *tokens;
    const TokenSet *child_tokens;
};

static const TokenSet tokenFromStrMap = {
    (const int[ASCII_SET]){
        ['{'] = (int)Token::Kind::LBRACE,
        ['}'] = (int)Token::Kind::RBRACE,
    },
    (const TokenSet[ASCII_SET]){
        ['-'] = {
            (const int[ASCII_SET]){
                ['>'] = (int)Token::Kind::ARROW,
            },
            nullptr,
        },
    },
};
"#;
    assert_eq!(trie_part, expected);
    assert!(text.contains(
        "static const char *tokenToStrMap[(int)Token::Kind::NumTokens] = {\n    \
         [(int)Token::Kind::LBRACE] = \"{\",\n"
    ));
}

#[test]
fn test_space_variant_cpp_linear_golden() {
    let (table, trie) = load(TOKENS_SPACE, Separator::Space);
    let options = GeneratorOptions {
        target: Target::Cpp,
        strategy: Strategy::Linear,
        ..GeneratorOptions::default()
    };
    let result = Emitter::new(&options).emit(&table, &trie).unwrap();
    assert!(!result.has_errors());
    let text = &result.output_files[1].text;
    let chain = &text[text.find("Token::Kind tokenFromStr").unwrap()..];
    let expected = r#"Token::Kind tokenFromStr(std::string_view str) {
    if (str == ",") return Token::Kind::COMMA;
    if (str == ";") return Token::Kind::SemiColon;
    if (str == " ") return Token::Kind::Whitespace;
    if (str == "-") return Token::Kind::Minus;
    if (str == "->") return Token::Kind::ReturnType;
    if (str == "=") return Token::Kind::Assign;
    if (str == "=>") return Token::Kind::FatArrow;
    if (str == "==") return Token::Kind::Equal;
    if (str == "let") return Token::Kind::Let;
    return Token::Kind::Undefined;
}
"#;
    assert_eq!(chain, expected);
    assert!(!text.contains("tokenFromStrMap"));
}

#[test]
fn test_c_linear_chain() {
    let (table, trie) = load(TOKENS, Separator::Tab);
    let options = GeneratorOptions {
        strategy: Strategy::Linear,
        ..GeneratorOptions::default()
    };
    let text = Emitter::new(&options).emit_token_data(&table, &trie).unwrap();
    assert!(text.contains("#include <string.h>\n"));
    assert!(text.contains(
        "static int tokenFromStr(const char *str) {\n    \
         if (strcmp(str, \",\") == 0) return TOK_COMMA;\n"
    ));
    assert!(text.contains("    if (strcmp(str, \"**=\") == 0) return TOK_POWER_ASSIGN;\n"));
    assert!(text.ends_with("    return TOK_UNDEFINED;\n}\n"));
}

#[test]
fn test_emission_is_deterministic() {
    for target in [Target::C, Target::Cpp] {
        for strategy in [Strategy::Trie, Strategy::Linear] {
            let options = GeneratorOptions {
                target,
                strategy,
                no_match: Some("UNDEFINED".to_string()),
                ..GeneratorOptions::default()
            };
            let (table, trie) = load(TOKENS, Separator::Tab);
            let first = Emitter::new(&options).emit(&table, &trie).unwrap();
            let (table, trie) = load(TOKENS, Separator::Tab);
            let second = Emitter::new(&options).emit(&table, &trie).unwrap();
            assert_eq!(first.output_files, second.output_files);
        }
    }
}

#[test]
fn test_trie_and_linear_agree() {
    let (table, trie) = load(TOKENS, Separator::Tab);
    let chain = LinearChain::from_table(&table, "UNDEFINED").unwrap();
    for (_, record, spelling) in table.spelled() {
        assert_eq!(trie.lookup(spelling), Some(chain.lookup(spelling)), "{}", record.name);
    }
    assert_eq!(chain.lookup("nope"), chain.fallback());
}

#[test]
fn test_every_trie_slot_is_written() {
    let (table, trie) = load(TOKENS, Separator::Tab);
    let text = Emitter::new(&GeneratorOptions::default())
        .emit_token_data(&table, &trie)
        .unwrap();
    let slots = text
        .lines()
        .filter(|l| l.trim_start().starts_with("['") && l.contains("= TOK_"))
        .count();
    assert_eq!(slots, table.spelled().count());
    // Every name appears once in the name table, including spelling-less ones.
    for name in table.names() {
        assert!(text.contains(&format!("[TOK_{}] = \"{}\",", name, name)), "{}", name);
    }
}
