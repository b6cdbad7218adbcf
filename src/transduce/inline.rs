//! Inline rewriting for prose lines.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::micron;

static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("valid link pattern"));

static STRONG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*([^*]+)\*\*").expect("valid strong pattern"));

static ITALIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*([^*]+)\*").expect("valid italic pattern"));

/// Rewrite links, then strong, then italic emphasis across the whole line.
///
/// Strong runs before italic so `**x**` is never read as two italic spans.
pub fn substitute(line: &str) -> String {
    let linked = LINK_RE.replace_all(line, |caps: &Captures<'_>| {
        micron::link(&caps[1], &caps[2])
    });
    let strong = STRONG_RE.replace_all(&linked, |caps: &Captures<'_>| micron::strong(&caps[1]));
    ITALIC_RE
        .replace_all(&strong, |caps: &Captures<'_>| micron::italic(&caps[1]))
        .into_owned()
}
