//! Core document types.

/// A source document split into lines, ready for transduction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceDocument {
    lines: Vec<String>,
}

impl SourceDocument {
    /// Split `text` on `\n` or `\r\n`.
    ///
    /// A trailing line terminator does not produce an extra empty line.
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.lines().map(ToOwned::to_owned).collect(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

/// What an output line represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Blank separator line
    Empty,
    /// Section heading with level
    Heading(usize),
    /// Bullet with nesting depth
    ListItem(usize),
    /// Literal block opener (replaces an opening fence)
    CodeOpen,
    /// Literal block closer (replaces a closing fence)
    CodeClose,
    /// Verbatim line inside a literal block
    Code,
    /// Horizontal divider
    Rule,
    /// Prose with inline markup applied
    Prose,
}

/// A single line of Micron markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLine {
    content: String,
    kind: LineKind,
}

impl OutputLine {
    pub const fn new(content: String, kind: LineKind) -> Self {
        Self { content, kind }
    }

    pub fn empty() -> Self {
        Self::new(String::new(), LineKind::Empty)
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub const fn kind(&self) -> LineKind {
        self.kind
    }
}

/// A transduced Micron document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MicronDocument {
    lines: Vec<OutputLine>,
}

impl MicronDocument {
    pub const fn new(lines: Vec<OutputLine>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[OutputLine] {
        &self.lines
    }

    pub fn push(&mut self, line: OutputLine) {
        self.lines.push(line);
    }

    pub fn extend(&mut self, lines: impl IntoIterator<Item = OutputLine>) {
        self.lines.extend(lines);
    }

    /// The plain markup strings, one per line.
    pub fn to_lines(&self) -> Vec<String> {
        self.lines.iter().map(|l| l.content().to_owned()).collect()
    }

    /// Lines joined with `\n`, without a trailing newline.
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(&line.content);
        }
        out
    }
}

impl FromIterator<OutputLine> for MicronDocument {
    fn from_iter<T: IntoIterator<Item = OutputLine>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
