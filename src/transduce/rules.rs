//! Line classification.
//!
//! Each rule inspects one line against the current state and profile and
//! either claims it or passes. Rules run in table order; the first claim wins.

use std::sync::LazyLock;

use regex::Regex;

use super::profile::{BlankLinePolicy, FenceBlankPolicy, HeadingRule, ListRule, Profile};
use super::state::TransducerState;

const FENCE: &str = "```";

static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.+)$").expect("valid heading pattern"));

static LIST_ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)[*-]\s+(.+)$").expect("valid list item pattern"));

static RULE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-*_]{3,}$").expect("valid horizontal rule pattern"));

/// The classification a rule assigns to a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass<'a> {
    /// Whitespace-only, emitted as an empty line
    Blank,
    /// Whitespace-only, dropped
    Skip,
    /// Code fence delimiter
    Fence,
    /// Line inside a fenced block
    Code,
    Heading { level: usize, text: &'a str },
    ListItem { indent: usize, text: &'a str },
    Rule,
    Prose,
}

type Rule = for<'a> fn(&'a str, &TransducerState, &Profile) -> Option<LineClass<'a>>;

/// Evaluated top to bottom.
const RULES: &[Rule] = &[blank, fence, code, heading, list_item, horizontal_rule];

/// Classify `line`; anything no rule claims is prose.
pub fn classify<'a>(line: &'a str, state: &TransducerState, profile: &Profile) -> LineClass<'a> {
    RULES
        .iter()
        .find_map(|rule| rule(line, state, profile))
        .unwrap_or(LineClass::Prose)
}

fn blank<'a>(line: &'a str, state: &TransducerState, profile: &Profile) -> Option<LineClass<'a>> {
    if !line.trim().is_empty() {
        return None;
    }
    if state.in_code_block && profile.fence_blanks == FenceBlankPolicy::Verbatim {
        return None;
    }
    Some(match profile.blank_lines {
        BlankLinePolicy::Emit => LineClass::Blank,
        BlankLinePolicy::Skip => LineClass::Skip,
    })
}

fn fence<'a>(line: &'a str, _state: &TransducerState, profile: &Profile) -> Option<LineClass<'a>> {
    (profile.code_fences && line.starts_with(FENCE)).then_some(LineClass::Fence)
}

fn code<'a>(_line: &'a str, state: &TransducerState, _profile: &Profile) -> Option<LineClass<'a>> {
    state.in_code_block.then_some(LineClass::Code)
}

fn heading<'a>(line: &'a str, _state: &TransducerState, profile: &Profile) -> Option<LineClass<'a>> {
    match profile.headings {
        HeadingRule::Strict => {
            let caps = HEADING_RE.captures(line)?;
            let level = caps.get(1)?.as_str().len();
            let text = caps.get(2)?.as_str();
            Some(LineClass::Heading { level, text })
        }
        HeadingRule::Loose => {
            let rest = line.trim_start_matches('#');
            let level = line.len() - rest.len();
            (level > 0).then(|| LineClass::Heading {
                level,
                text: rest.trim(),
            })
        }
    }
}

fn list_item<'a>(
    line: &'a str,
    _state: &TransducerState,
    profile: &Profile,
) -> Option<LineClass<'a>> {
    match profile.lists {
        ListRule::Indented => {
            let caps = LIST_ITEM_RE.captures(line)?;
            let indent = caps.get(1)?.as_str().chars().count();
            let text = caps.get(2)?.as_str();
            Some(LineClass::ListItem { indent, text })
        }
        ListRule::Flat => line
            .strip_prefix("* ")
            .or_else(|| line.strip_prefix("- "))
            .map(|text| LineClass::ListItem { indent: 0, text }),
    }
}

fn horizontal_rule<'a>(
    line: &'a str,
    _state: &TransducerState,
    profile: &Profile,
) -> Option<LineClass<'a>> {
    (profile.horizontal_rules && RULE_RE.is_match(line)).then_some(LineClass::Rule)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(line: &str) -> LineClass<'_> {
        classify(line, &TransducerState::new(), &Profile::document())
    }

    fn notes(line: &str) -> LineClass<'_> {
        classify(line, &TransducerState::new(), &Profile::release_notes())
    }

    #[test]
    fn test_heading_requires_whitespace_after_hashes() {
        assert_eq!(doc("#Title"), LineClass::Prose);
        assert_eq!(
            doc("###\tTabbed"),
            LineClass::Heading {
                level: 3,
                text: "Tabbed"
            }
        );
    }

    #[test]
    fn test_seven_hashes_is_prose() {
        assert_eq!(doc("####### Too deep"), LineClass::Prose);
    }

    #[test]
    fn test_list_item_counts_leading_whitespace() {
        assert_eq!(
            doc("    - nested"),
            LineClass::ListItem {
                indent: 4,
                text: "nested"
            }
        );
    }

    #[test]
    fn test_rule_needs_three_characters() {
        assert_eq!(doc("___"), LineClass::Rule);
        assert_eq!(doc("--"), LineClass::Prose);
        assert_eq!(doc("-*_"), LineClass::Rule);
    }

    #[test]
    fn test_dash_with_space_is_list_not_rule() {
        assert_eq!(
            doc("- --"),
            LineClass::ListItem {
                indent: 0,
                text: "--"
            }
        );
    }

    #[test]
    fn test_indented_fence_is_not_a_fence() {
        assert_eq!(doc("  ```"), LineClass::Prose);
    }

    #[test]
    fn test_code_rule_claims_everything_inside_block() {
        let state = TransducerState {
            in_code_block: true,
            ..TransducerState::new()
        };
        assert_eq!(
            classify("# not a heading", &state, &Profile::document()),
            LineClass::Code
        );
        assert_eq!(classify("", &state, &Profile::document()), LineClass::Code);
    }

    #[test]
    fn test_collapse_policy_checks_blank_before_fence_membership() {
        let state = TransducerState {
            in_code_block: true,
            ..TransducerState::new()
        };
        let profile = Profile::document().with_fence_blanks(FenceBlankPolicy::Collapse);
        assert_eq!(classify("   ", &state, &profile), LineClass::Blank);
    }

    #[test]
    fn test_release_notes_heading_counts_hashes_without_space() {
        assert_eq!(
            notes("##Changes "),
            LineClass::Heading {
                level: 2,
                text: "Changes"
            }
        );
    }

    #[test]
    fn test_release_notes_heading_level_is_not_clamped() {
        assert_eq!(
            notes("####### Deep"),
            LineClass::Heading {
                level: 7,
                text: "Deep"
            }
        );
        assert_eq!(
            crate::micron::heading(7, "Deep"),
            ">>>>>>> `!Deep`!"
        );
    }

    #[test]
    fn test_release_notes_ignore_fences_and_rules() {
        assert_eq!(notes("```"), LineClass::Prose);
        assert_eq!(notes("---"), LineClass::Prose);
        assert_eq!(notes(""), LineClass::Skip);
    }

    #[test]
    fn test_release_notes_flat_list_requires_marker_space() {
        assert_eq!(
            notes("- fixed"),
            LineClass::ListItem {
                indent: 0,
                text: "fixed"
            }
        );
        assert_eq!(notes("-fixed"), LineClass::Prose);
    }
}
