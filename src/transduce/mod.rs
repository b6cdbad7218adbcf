//! Markdown to Micron transduction.
//!
//! A line-oriented scanner: each source line is classified by an ordered
//! rule table (see [`rules`]) and rewritten into exactly one Micron line,
//! except where the active [`Profile`] skips blank lines. Cross-line state
//! (fenced block membership, list run) lives in a [`TransducerState`] owned
//! by one [`Transducer`], so concurrent conversions never share anything.
//!
//! ```
//! use micronize::transduce::{transduce, Profile};
//!
//! let out = transduce(&["# Hi", "- one"], &Profile::document());
//! assert_eq!(out, vec!["> `!Hi`!", "* one"]);
//! ```

mod inline;
mod profile;
pub mod rules;
mod state;


use crate::document::{LineKind, MicronDocument, OutputLine, SourceDocument};
use crate::micron;

pub use profile::{BlankLinePolicy, FenceBlankPolicy, HeadingRule, ListRule, Profile};
pub use rules::LineClass;
pub use state::TransducerState;

/// Incremental transducer for one document.
#[derive(Debug, Clone)]
pub struct Transducer<'p> {
    profile: &'p Profile,
    state: TransducerState,
}

impl<'p> Transducer<'p> {
    pub fn new(profile: &'p Profile) -> Self {
        Self {
            profile,
            state: TransducerState::new(),
        }
    }

    pub const fn state(&self) -> &TransducerState {
        &self.state
    }

    /// Rewrite one source line. `None` means the profile drops it.
    pub fn feed(&mut self, line: &str) -> Option<OutputLine> {
        let line = if self.profile.trim_lines {
            line.trim()
        } else {
            line
        };
        let class = rules::classify(line, &self.state, self.profile);
        self.apply(line, class)
    }

    fn apply(&mut self, line: &str, class: LineClass<'_>) -> Option<OutputLine> {
        let out = match class {
            LineClass::Skip => return None,
            LineClass::Blank => {
                if self.state.in_list {
                    tracing::trace!("blank line ends list run");
                    self.state.end_list();
                }
                OutputLine::empty()
            }
            LineClass::Fence => {
                if self.state.toggle_code_block() {
                    OutputLine::new(micron::CODE_OPEN.to_string(), LineKind::CodeOpen)
                } else {
                    OutputLine::new(micron::CODE_CLOSE.to_string(), LineKind::CodeClose)
                }
            }
            LineClass::Code => OutputLine::new(line.to_string(), LineKind::Code),
            LineClass::Heading { level, text } => {
                OutputLine::new(micron::heading(level, text), LineKind::Heading(level))
            }
            LineClass::ListItem { indent, text } => {
                let depth = match self.profile.lists {
                    ListRule::Indented => {
                        if self.state.enter_list(indent) {
                            tracing::trace!(indent, "list run started");
                        }
                        indent / 2
                    }
                    // Flat items sit one level under the enclosing section.
                    ListRule::Flat => 1,
                };
                OutputLine::new(micron::bullet(depth, text), LineKind::ListItem(depth))
            }
            LineClass::Rule => OutputLine::new(micron::RULE.to_string(), LineKind::Rule),
            LineClass::Prose => {
                let body = if self.profile.inline_markup {
                    inline::substitute(line)
                } else {
                    line.to_string()
                };
                OutputLine::new(format!("{}{body}", self.profile.prose_prefix), LineKind::Prose)
            }
        };
        Some(out)
    }

    /// Feed every line of `lines`, collecting the output.
    pub fn run<I, S>(&mut self, lines: I) -> MicronDocument
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        lines
            .into_iter()
            .filter_map(|line| self.feed(line.as_ref()))
            .collect()
    }
}

/// Transduce a sequence of lines with a fresh state.
pub fn transduce<S: AsRef<str>>(lines: &[S], profile: &Profile) -> Vec<String> {
    Transducer::new(profile).run(lines).to_lines()
}

/// Transduce a whole source document.
pub fn transduce_document(doc: &SourceDocument, profile: &Profile) -> MicronDocument {
    Transducer::new(profile).run(doc.lines())
}
