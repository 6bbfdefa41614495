//! Output writer for Ninja build files
//!
//! Handles indentation of rule and edge bindings. Statements never end a line with whitespace.

/// Indentation used for `key = value` lines under `rule` and `build` statements.
pub const DEFAULT_INDENT_WIDTH: usize = 2;

/// Writer that tracks indentation and builds the build-file text
#[derive(Debug)]
pub struct NinjaWriter {
    /// The output buffer
    output: String,
    /// Current indentation level
    indent_level: usize,
    /// Spaces per indentation level
    indent_width: usize,
}

impl Default for NinjaWriter {
    fn default() -> Self {
        Self::new(DEFAULT_INDENT_WIDTH)
    }
}

impl NinjaWriter {
    pub fn new(indent_width: usize) -> Self {
        Self {
            output: String::new(),
            indent_level: 0,
            indent_width,
        }
    }

    /// Get the written text
    pub fn finish(self) -> String {
        self.output
    }

    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn dedent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }

    /// Write one indented line
    pub fn writeln(&mut self, s: &str) {
        if !s.is_empty() {
            for _ in 0..self.indent_level * self.indent_width {
                self.output.push(' ');
            }
            self.output.push_str(s);
        }
        self.output.push('\n');
    }

    /// Write an empty line
    pub fn blank_line(&mut self) {
        self.output.push('\n');
    }

    /// `# text`
    pub fn comment(&mut self, text: &str) {
        self.writeln(&format!("# {}", text));
    }

    /// `name = value`, or `name =` for an empty value
    pub fn variable(&mut self, name: &str, value: &str) {
        if value.is_empty() {
            self.writeln(&format!("{} =", name));
        } else {
            self.writeln(&format!("{} = {}", name, value));
        }
    }

    /// `rule name` followed by its indented bindings
    pub fn rule<'b>(&mut self, name: &str, bindings: impl IntoIterator<Item = (&'b str, &'b str)>) {
        self.writeln(&format!("rule {}", name));
        self.indent();
        for (key, value) in bindings {
            self.variable(key, value);
        }
        self.dedent();
    }

    /// `build outputs: rule inputs` followed by indented edge bindings. Paths must already be escaped.
    pub fn build<'b, O, I>(&mut self, outputs: O, rule: &str, inputs: I, bindings: &[(&'b str, String)])
    where
        O: IntoIterator,
        O::Item: AsRef<str>,
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut line = String::from("build");
        for output in outputs {
            line.push(' ');
            line.push_str(output.as_ref());
        }
        line.push_str(": ");
        line.push_str(rule);
        for input in inputs {
            line.push(' ');
            line.push_str(input.as_ref());
        }
        self.writeln(&line);

        self.indent();
        for (key, value) in bindings {
            self.variable(key, value);
        }
        self.dedent();
    }

    /// `default target`
    pub fn default_target(&mut self, target: &str) {
        self.writeln(&format!("default {}", target));
    }

    pub fn current_indent(&self) -> usize {
        self.indent_level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_writer() -> NinjaWriter {
        NinjaWriter::default()
    }

    // ========================================
    // Constructor and finish tests
    // ========================================

    #[test]
    fn test_new_writer_empty_output() {
        assert_eq!(default_writer().finish(), "");
    }

    // ========================================
    // Line tests
    // ========================================

    #[test]
    fn test_writeln_multiple() {
        let mut writer = default_writer();
        writer.writeln("line1");
        writer.writeln("line2");
        assert_eq!(writer.finish(), "line1\nline2\n");
    }

    #[test]
    fn test_indented_empty_line_has_no_spaces() {
        let mut writer = default_writer();
        writer.indent();
        writer.writeln("");
        writer.variable("ldflags", "");
        assert_eq!(writer.finish(), "\n  ldflags =\n");
    }

    #[test]
    fn test_dedent_at_zero_stays_zero() {
        let mut writer = default_writer();
        writer.dedent();
        assert_eq!(writer.current_indent(), 0);
    }

    #[test]
    fn test_custom_indent_width() {
        let mut writer = NinjaWriter::new(4);
        writer.indent();
        writer.writeln("args = x");
        assert_eq!(writer.finish(), "    args = x\n");
    }

    // ========================================
    // Statement tests
    // ========================================

    #[test]
    fn test_variable_empty_value() {
        let mut writer = default_writer();
        writer.variable("cflags", "");
        assert_eq!(writer.finish(), "cflags =\n");
    }

    #[test]
    fn test_rule_block() {
        let mut writer = default_writer();
        writer.rule("bin", [("command", "$cxx -o $out $in"), ("description", "Linking $out")]);
        writer.writeln("default fab");
        assert_eq!(
            writer.finish(),
            "rule bin\n  command = $cxx -o $out $in\n  description = Linking $out\ndefault fab\n"
        );
    }

    #[test]
    fn test_build_with_bindings() {
        let mut writer = default_writer();
        writer.build(["build.ninja"], "rebuild", ["bootstrap.py"], &[("args", "-d .".to_string())]);
        assert_eq!(writer.finish(), "build build.ninja: rebuild bootstrap.py\n  args = -d .\n");
    }

    #[test]
    fn test_build_without_inputs() {
        let mut writer = default_writer();
        writer.build(["libfoo"], "lib", Vec::<String>::new(), &[]);
        assert_eq!(writer.finish(), "build libfoo: lib\n");
    }

    #[test]
    fn test_comment_and_default() {
        let mut writer = default_writer();
        writer.comment("Generated");
        writer.blank_line();
        writer.default_target("fab");
        assert_eq!(writer.finish(), "# Generated\n\ndefault fab\n");
    }
}
