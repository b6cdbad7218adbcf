//! Rule-set profiles for the transducer.

/// What happens to whitespace-only lines outside literal blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlankLinePolicy {
    /// Emit an empty line (and end any list run)
    Emit,
    /// Drop the line entirely
    Skip,
}

/// What happens to whitespace-only lines inside a fenced block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FenceBlankPolicy {
    /// Copy them through untouched, like any other code line
    #[default]
    Verbatim,
    /// Treat them as ordinary blank lines, checked before fence membership
    Collapse,
}

/// How heading lines are recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingRule {
    /// One to six `#`, whitespace, then text
    Strict,
    /// Any line starting with `#`; level is the run length
    Loose,
}

/// How list item lines are recognised and rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListRule {
    /// Leading indent nests the bullet one level per two columns
    Indented,
    /// `* ` or `- ` at line start, always rendered one level deep
    Flat,
}

/// Selects which line rules the transducer applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    /// Trim each line before classification
    pub trim_lines: bool,
    pub blank_lines: BlankLinePolicy,
    /// Recognise ```` ``` ```` fences
    pub code_fences: bool,
    pub fence_blanks: FenceBlankPolicy,
    pub headings: HeadingRule,
    pub lists: ListRule,
    /// Collapse `---`, `***`, `___` runs to a divider
    pub horizontal_rules: bool,
    /// Rewrite links and emphasis in prose lines
    pub inline_markup: bool,
    /// Prepended to every prose line
    pub prose_prefix: &'static str,
}

impl Profile {
    /// Full Markdown documents: every rule, indent-aware lists.
    pub const fn document() -> Self {
        Self {
            trim_lines: false,
            blank_lines: BlankLinePolicy::Emit,
            code_fences: true,
            fence_blanks: FenceBlankPolicy::Verbatim,
            headings: HeadingRule::Strict,
            lists: ListRule::Indented,
            horizontal_rules: true,
            inline_markup: true,
            prose_prefix: "",
        }
    }

    /// GitHub release note bodies, nested under a page section.
    ///
    /// Blank lines are dropped, lists are flat and prose is indented one
    /// level without inline rewriting.
    pub const fn release_notes() -> Self {
        Self {
            trim_lines: true,
            blank_lines: BlankLinePolicy::Skip,
            code_fences: false,
            fence_blanks: FenceBlankPolicy::Verbatim,
            headings: HeadingRule::Loose,
            lists: ListRule::Flat,
            horizontal_rules: false,
            inline_markup: false,
            prose_prefix: "  ",
        }
    }

    #[must_use]
    pub const fn with_fence_blanks(mut self, policy: FenceBlankPolicy) -> Self {
        self.fence_blanks = policy;
        self
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self::document()
    }
}
