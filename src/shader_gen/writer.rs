/// Append-only line buffer with two-space indentation.
#[derive(Debug, Default)]
pub(crate) struct SourceWriter {
    buf: String,
    depth: usize,
}

impl SourceWriter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn line(&mut self, text: impl AsRef<str>) {
        for _ in 0..self.depth {
            self.buf.push_str("  ");
        }
        self.buf.push_str(text.as_ref());
        self.buf.push('\n');
    }

    pub(crate) fn blank(&mut self) {
        self.buf.push('\n');
    }

    pub(crate) fn indent(&mut self) {
        self.depth += 1;
    }

    pub(crate) fn dedent(&mut self) {
        assert!(self.depth > 0, "unbalanced dedent in shader source writer");
        self.depth -= 1;
    }

    pub(crate) fn finish(self) -> String {
        assert_eq!(self.depth, 0, "shader source finished with open blocks");
        self.buf
    }
}
