//! Code builder utility for generating properly indented descriptor text.

use super::Indent;

/// Fluent API for building descriptor text with proper indentation.
///
/// Supports both consuming methods (returning `Self`) for chaining and
/// mutable methods (returning `&mut Self`) for use inside loops.
///
/// # Example (Consuming API)
///
/// ```
/// use bpc_codegen::builder::CodeBuilder;
///
/// let text = CodeBuilder::ninja()
///     .line("rule touch")
///     .indent()
///     .line("command = touch $out")
///     .dedent()
///     .build();
///
/// assert_eq!(text, "rule touch\n  command = touch $out\n");
/// ```
///
/// # Example (Mutable API)
///
/// ```
/// use bpc_codegen::builder::CodeBuilder;
///
/// let mut builder = CodeBuilder::make();
/// builder
///     .push_line("all:")
///     .push_indent()
///     .push_line("@echo done")
///     .push_dedent();
/// assert_eq!(builder.build(), "all:\n\t@echo done\n");
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    indent_level: usize,
    indent: Indent,
    buffer: String,
}

impl CodeBuilder {
    /// Create a new CodeBuilder with the specified indentation.
    pub fn new(indent: Indent) -> Self {
        Self {
            indent_level: 0,
            indent,
            buffer: String::new(),
        }
    }

    /// Create a new CodeBuilder with tab indentation (Makefiles).
    pub fn make() -> Self {
        Self::new(Indent::MAKE)
    }

    /// Create a new CodeBuilder with 2-space indentation (Ninja).
    pub fn ninja() -> Self {
        Self::new(Indent::NINJA)
    }

    /// Create a new CodeBuilder with 4-space indentation (Python, Starlark).
    pub fn python() -> Self {
        Self::new(Indent::PYTHON)
    }

    /// Create a new CodeBuilder with 4-space indentation (Bash).
    pub fn bash() -> Self {
        Self::new(Indent::PYTHON)
    }

    // =========================================================================
    // Mutable API - methods prefixed with `push_`
    // =========================================================================

    /// Add a line with current indentation (mutable).
    pub fn push_line(&mut self, s: &str) -> &mut Self {
        self.write_indent();
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self
    }

    /// Add a blank line (mutable).
    pub fn push_blank(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self
    }

    /// Add raw text without indentation or newline (mutable).
    pub fn push_raw(&mut self, s: &str) -> &mut Self {
        self.buffer.push_str(s);
        self
    }

    /// Increase indentation level (mutable).
    pub fn push_indent(&mut self) -> &mut Self {
        self.indent_level += 1;
        self
    }

    /// Decrease indentation level (mutable).
    pub fn push_dedent(&mut self) -> &mut Self {
        self.indent_level = self.indent_level.saturating_sub(1);
        self
    }

    /// Add a comment line with the given prefix (e.g. `#`) (mutable).
    pub fn push_comment(&mut self, prefix: &str, text: &str) -> &mut Self {
        self.write_indent();
        self.buffer.push_str(prefix);
        self.buffer.push(' ');
        self.buffer.push_str(text);
        self.buffer.push('\n');
        self
    }

    /// Add `head` followed by one item per line, every line but the last
    /// ending in `continuation` (mutable).
    ///
    /// Items are indented one level deeper than `head`.
    pub fn push_continued<I, S>(&mut self, head: &str, items: I, continuation: &str) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.write_indent();
        self.buffer.push_str(head);
        self.indent_level += 1;
        for item in items {
            self.buffer.push_str(continuation);
            self.buffer.push('\n');
            self.write_indent();
            self.buffer.push_str(item.as_ref());
        }
        self.indent_level -= 1;
        self.buffer.push('\n');
        self
    }

    // =========================================================================
    // Consuming API
    // =========================================================================

    /// Add a line with current indentation.
    pub fn line(mut self, s: &str) -> Self {
        self.push_line(s);
        self
    }

    /// Add a blank line (no indentation).
    pub fn blank(mut self) -> Self {
        self.push_blank();
        self
    }

    /// Add raw text without indentation or newline.
    pub fn raw(mut self, s: &str) -> Self {
        self.push_raw(s);
        self
    }

    /// Increase indentation level.
    pub fn indent(mut self) -> Self {
        self.push_indent();
        self
    }

    /// Decrease indentation level.
    pub fn dedent(mut self) -> Self {
        self.push_dedent();
        self
    }

    /// Add a block with automatic indentation.
    pub fn block<F>(self, header: &str, f: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        let builder = self.line(header).indent();
        f(builder).dedent()
    }

    /// Add a block with a closing line.
    pub fn block_with_close<F>(self, header: &str, close: &str, f: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        let builder = self.line(header).indent();
        f(builder).dedent().line(close)
    }

    /// Add a `#` comment line.
    pub fn comment(mut self, text: &str) -> Self {
        self.push_comment("#", text);
        self
    }

    /// Add a continued list, see [`CodeBuilder::push_continued`].
    pub fn continued<I, S>(mut self, head: &str, items: I, continuation: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.push_continued(head, items, continuation);
        self
    }

    /// Conditionally add content.
    pub fn when<F>(self, condition: bool, f: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        if condition { f(self) } else { self }
    }

    /// Iterate and add content for each item.
    pub fn each<T, I, F>(mut self, items: I, f: F) -> Self
    where
        I: IntoIterator<Item = T>,
        F: Fn(Self, T) -> Self,
    {
        for item in items {
            self = f(self, item);
        }
        self
    }

    /// Get the current indentation level.
    pub fn current_indent(&self) -> usize {
        self.indent_level
    }

    /// Consume the builder and return the generated text.
    pub fn build(self) -> String {
        self.buffer
    }

    /// Get a reference to the current buffer content.
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.buffer.push_str(self.indent.as_str());
        }
    }
}

impl Default for CodeBuilder {
    fn default() -> Self {
        Self::python()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_line() {
        let text = CodeBuilder::make().line("BOD ?=").build();
        assert_eq!(text, "BOD ?=\n");
    }

    #[test]
    fn test_block() {
        let text = CodeBuilder::python()
            .block("def artifact(name, srcs):", |b| b.line("pass"))
            .build();

        assert_eq!(text, "def artifact(name, srcs):\n    pass\n");
    }

    #[test]
    fn test_bash_block() {
        let text = CodeBuilder::bash()
            .block_with_close("if [ ! -d \"${BOD}\" ]; then", "fi;", |b| b.line("exit 1;"))
            .build();

        assert_eq!(text, "if [ ! -d \"${BOD}\" ]; then\n    exit 1;\nfi;\n");
    }

    #[test]
    fn test_block_with_close() {
        let text = CodeBuilder::python()
            .block_with_close("exports_files([", "])", |b| b.line("\"m0.interface\","))
            .build();

        assert_eq!(text, "exports_files([\n    \"m0.interface\",\n])\n");
    }

    #[test]
    fn test_blank_and_comment() {
        let text = CodeBuilder::ninja()
            .comment("generated")
            .blank()
            .line("default all")
            .build();

        assert_eq!(text, "# generated\n\ndefault all\n");
    }

    #[test]
    fn test_continued() {
        let text = CodeBuilder::ninja()
            .continued("build all: phony", ["a", "b"], " $")
            .build();

        assert_eq!(text, "build all: phony $\n  a $\n  b\n");
    }

    #[test]
    fn test_continued_without_items() {
        let text = CodeBuilder::make().continued("SOURCE :=", Vec::<String>::new(), " \\").build();
        assert_eq!(text, "SOURCE :=\n");
    }

    #[test]
    fn test_continued_respects_current_indent() {
        let mut builder = CodeBuilder::python();
        builder
            .push_indent()
            .push_continued("[ -f a ]", ["|| [ -f b ]"], " \\");

        assert_eq!(builder.build(), "    [ -f a ] \\\n        || [ -f b ]\n");
    }

    #[test]
    fn test_conditional() {
        let with = CodeBuilder::make()
            .when(true, |b| b.line(".PHONY: build"))
            .build();
        let without = CodeBuilder::make()
            .when(false, |b| b.line(".PHONY: build"))
            .build();

        assert_eq!(with, ".PHONY: build\n");
        assert_eq!(without, "");
    }

    #[test]
    fn test_each() {
        let text = CodeBuilder::make()
            .each([0, 1], |b, n| b.line(&format!("include {n}.mk")))
            .build();

        assert_eq!(text, "include 0.mk\ninclude 1.mk\n");
    }

    #[test]
    fn test_mutable_api_indentation() {
        let mut builder = CodeBuilder::make();
        builder
            .push_line("clean:")
            .push_indent()
            .push_line("rm -rf $(BOD)")
            .push_dedent()
            .push_blank();

        assert_eq!(builder.current_indent(), 0);
        assert_eq!(builder.build(), "clean:\n\trm -rf $(BOD)\n\n");
    }
}
