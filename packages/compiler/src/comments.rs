use crate::context::CompilerContext;

impl CompilerContext<'_> {
    /// Writes `text` as a JSDoc block at the given indentation
    pub fn write_doc_comment(&mut self, text: &str, depth: usize) {
        self.add_indent(depth);
        self.add("/**\n");
        for line in text.lines().filter(|l| !l.trim().is_empty()) {
            self.add_indent(depth);
            self.add(" * ");
            self.add(&line.replace("*/", "*\\/"));
            self.add_char('\n');
        }
        self.add_indent(depth);
        self.add(" */\n");
    }

    /// Writes the end of a member line, with its trailing comment when kept
    pub fn write_line_end(&mut self, comment: Option<&str>) {
        match comment.filter(|_| self.options.preserve_comments) {
            Some(comment) => {
                self.add(" // ");
                self.add(&single_line(comment));
                self.add_char('\n');
            }
            None => self.add_char('\n'),
        }
    }
}

/// Joins a multi-line comment so it fits behind `//`
pub(crate) fn single_line(comment: &str) -> String {
    comment
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
