//! Micron markup vocabulary.
//!
//! Micron is the page markup used by NomadNet nodes. Only the subset this
//! crate emits is modelled here: section headings, strong and italic
//! emphasis, underlined links, literal (code) blocks, dividers and bullets.

/// Repeated once per heading level (`>>` is a level 2 section).
pub const HEADING_MARKER: char = '>';

/// Toggles bold formatting.
pub const STRONG: &str = "`!";

/// Toggles italic formatting.
pub const ITALIC: &str = "`*";

/// Opens a literal block.
pub const CODE_OPEN: &str = "`=";

/// Closes a literal block.
pub const CODE_CLOSE: &str = "``";

/// A line holding only this renders as a horizontal divider.
pub const RULE: &str = "-";

/// Bullet glyph placed in front of list item text.
pub const BULLET: &str = "*";

/// One level of list nesting.
pub const INDENT_UNIT: &str = "  ";

/// Wrap `text` in bold toggles.
pub fn strong(text: &str) -> String {
    format!("{STRONG}{text}{STRONG}")
}

/// Wrap `text` in italic toggles.
pub fn italic(text: &str) -> String {
    format!("{ITALIC}{text}{ITALIC}")
}

/// Underlined link with a visible label.
///
/// ```
/// assert_eq!(micronize::micron::link("docs", "/page/docs.mu"), "`_`[docs`/page/docs.mu]`_");
/// ```
pub fn link(label: &str, target: &str) -> String {
    format!("`_`[{label}`{target}]`_")
}

/// Section heading at `level`, with the title set in bold.
pub fn heading(level: usize, text: &str) -> String {
    let markers = HEADING_MARKER.to_string().repeat(level);
    format!("{markers} {}", strong(text))
}

/// Bullet line nested `depth` levels deep.
pub fn bullet(depth: usize, text: &str) -> String {
    format!("{}{BULLET} {text}", INDENT_UNIT.repeat(depth))
}

/// A bold label followed by a plain value, e.g. `` `!Size:` 3 KB ``.
pub fn field(label: &str, value: &str) -> String {
    format!("{STRONG}{label}:` {value}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_repeats_marker_per_level() {
        assert_eq!(heading(1, "Title"), "> `!Title`!");
        assert_eq!(heading(3, "Deep"), ">>> `!Deep`!");
    }

    #[test]
    fn test_bullet_indents_two_spaces_per_depth() {
        assert_eq!(bullet(0, "a"), "* a");
        assert_eq!(bullet(2, "b"), "    * b");
    }

    #[test]
    fn test_field_closes_bold_after_colon() {
        assert_eq!(field("File", "x.zip"), "`!File:` x.zip");
    }

    #[test]
    fn test_emphasis_wrappers() {
        assert_eq!(strong("x"), "`!x`!");
        assert_eq!(italic("y"), "`*y`*");
    }
}
