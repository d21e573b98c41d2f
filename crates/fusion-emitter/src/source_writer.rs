//! Output buffer with indentation tracking.
//!
//! `write_line` emits the newline together with the indentation of the new
//! line, so blank lines only appear where two line breaks are written in a
//! row.

#[derive(Debug, Default)]
pub struct SourceWriter {
    output: String,
    indent_level: u32,
    indent_width: usize,
}

impl SourceWriter {
    pub fn new(indent_width: usize) -> Self {
        SourceWriter {
            output: String::new(),
            indent_level: 0,
            indent_width,
        }
    }

    pub fn with_capacity(capacity: usize, indent_width: usize) -> Self {
        SourceWriter {
            output: String::with_capacity(capacity),
            indent_level: 0,
            indent_width,
        }
    }

    #[inline]
    pub fn write(&mut self, text: &str) {
        self.output.push_str(text);
    }

    #[inline]
    pub fn write_char(&mut self, ch: char) {
        self.output.push(ch);
    }

    #[inline]
    pub fn write_space(&mut self) {
        self.output.push(' ');
    }

    /// Newline followed by the current indentation.
    pub fn write_line(&mut self) {
        self.output.push('\n');
        let width = self.indent_level as usize * self.indent_width;
        self.output.extend(std::iter::repeat_n(' ', width));
    }

    /// Write text whose embedded newlines are re-indented at the current level.
    pub fn write_multiline(&mut self, text: &str) {
        let mut lines = text.split('\n');
        if let Some(first) = lines.next() {
            self.write(first);
        }
        for line in lines {
            self.write_line();
            self.write(line);
        }
    }

    pub fn increase_indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn decrease_indent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    pub fn indent_level(&self) -> u32 {
        self.indent_level
    }

    pub fn get_output(&self) -> &str {
        &self.output
    }

    pub fn take_output(self) -> String {
        self.output
    }

    pub fn is_empty(&self) -> bool {
        self.output.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_line_indents_following_text() {
        let mut writer = SourceWriter::new(4);
        writer.write("{");
        writer.increase_indent();
        writer.write_line();
        writer.write("body;");
        writer.decrease_indent();
        writer.write_line();
        writer.write("}");
        assert_eq!(writer.get_output(), "{\n    body;\n}");
    }

    #[test]
    fn multiline_text_is_reindented() {
        let mut writer = SourceWriter::new(2);
        writer.increase_indent();
        writer.write_multiline("/**\n * doc\n */");
        assert_eq!(writer.take_output(), "/**\n   * doc\n   */");
    }

    #[test]
    fn decrease_below_zero_saturates() {
        let mut writer = SourceWriter::new(4);
        writer.decrease_indent();
        assert_eq!(writer.indent_level(), 0);
    }
}
