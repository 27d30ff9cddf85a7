//! Indented text output.

const INDENT: &str = "    ";
const NEW_LINE: &str = "\n";

/// Accumulates generated source text line by line.
pub struct CodeWriter {
    output: String,
    indent_level: u32,
}

impl CodeWriter {
    pub fn new() -> Self {
        Self {
            output: String::with_capacity(4096),
            indent_level: 0,
        }
    }

    /// Write `text` on its own line at the current indentation.
    pub fn line(&mut self, text: &str) {
        if !text.is_empty() {
            self.write_indent();
            self.output.push_str(text);
        }
        self.write_newline();
    }

    /// Write a line, then indent what follows.
    pub fn open(&mut self, text: &str) {
        self.line(text);
        self.increase_indent();
    }

    /// Dedent, then write a line.
    pub fn close(&mut self, text: &str) {
        self.decrease_indent();
        self.line(text);
    }

    pub fn blank_line(&mut self) {
        self.write_newline();
    }

    pub fn indent_level(&self) -> u32 {
        self.indent_level
    }

    pub fn finish(self) -> String {
        self.output
    }

    // ========================================================================
    // Core write helpers
    // ========================================================================

    fn write_newline(&mut self) {
        self.output.push_str(NEW_LINE);
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.output.push_str(INDENT);
        }
    }

    pub fn increase_indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn decrease_indent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }
}

impl Default for CodeWriter {
    fn default() -> Self {
        Self::new()
    }
}
