//! ASCII constants and literal escaping.
//!
//! Trie dispatch tables are indexed by 7-bit character codes, and the
//! emitters need to spell characters and strings as C/C++ literals.

/// Width of every dispatch table.
pub const ASCII_SET: usize = 128;

pub const DOUBLE_QUOTE: char = '"';
pub const SINGLE_QUOTE: char = '\'';
pub const BACKSLASH: char = '\\';

/// The first character of `spelling` outside the 7-bit range, if any.
pub fn first_non_ascii(spelling: &str) -> Option<char> {
    spelling.chars().find(|c| !c.is_ascii())
}

/// Render an ASCII code as a C character literal, e.g. `'{'` or `'\''`.
pub fn char_literal(code: u8) -> String {
    format!("'{}'", escape(code, SINGLE_QUOTE))
}

/// Render text as a C string literal, e.g. `"->"` or `"\""`.
pub fn string_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push(DOUBLE_QUOTE);
    for byte in text.bytes() {
        out.push_str(&escape(byte, DOUBLE_QUOTE));
    }
    out.push(DOUBLE_QUOTE);
    out
}

fn escape(code: u8, quote: char) -> String {
    match code {
        b'\\' => "\\\\".to_string(),
        b'\n' => "\\n".to_string(),
        b'\t' => "\\t".to_string(),
        b'\r' => "\\r".to_string(),
        0 => "\\0".to_string(),
        c if c as char == quote => format!("\\{}", quote),
        // Octal escapes stop after three digits, unlike `\x`.
        c if c < 0x20 || c >= 0x7f => format!("\\{:03o}", c),
        c => (c as char).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_literal() {
        assert_eq!(char_literal(b'{'), "'{'");
        assert_eq!(char_literal(b'\''), "'\\''");
        assert_eq!(char_literal(b'\\'), "'\\\\'");
        assert_eq!(char_literal(b'"'), "'\"'");
        assert_eq!(char_literal(b'\t'), "'\\t'");
        assert_eq!(char_literal(0x1b), "'\\033'");
    }

    #[test]
    fn test_string_literal() {
        assert_eq!(string_literal("->"), "\"->\"");
        assert_eq!(string_literal("\""), "\"\\\"\"");
        assert_eq!(string_literal("'"), "\"'\"");
        assert_eq!(string_literal(" "), "\" \"");
    }

    #[test]
    fn test_first_non_ascii() {
        assert_eq!(first_non_ascii("=>"), None);
        assert_eq!(first_non_ascii("a→b"), Some('→'));
    }
}
