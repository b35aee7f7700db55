//! Markdown inline marker stripping shared by every place emitted text
//! passes through (key-values, list items, paragraphs, table cells).

use std::sync::LazyLock;

use regex::{Captures, Regex};

static LINK_OR_IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!?\[([^\]]*)\]\(([^)]*)\)").unwrap());
static BOLD_STAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());
static BOLD_UNDER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"__(.+?)__").unwrap());
static STRIKE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"~~(.+?)~~").unwrap());
static ITALIC_STAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*(.+?)\*").unwrap());
static CODE_SPAN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]+?)`").unwrap());

/// Strip bold/italic/code/strike markers and rewrite links and images,
/// keeping their label text. Bold is resolved before italic so `**x**`
/// never gets half-eaten by the single-star pattern.
#[must_use]
pub fn strip_inline(text: &str, keep_urls: bool, compression: u8) -> String {
    let keep = keep_urls || compression < 2;
    let s = LINK_OR_IMAGE.replace_all(text, |caps: &Captures| {
        let label = &caps[1];
        let url = &caps[2];
        if keep && !url.is_empty() {
            format!("{label}<{url}>")
        } else {
            label.to_string()
        }
    });
    let s = BOLD_STAR.replace_all(&s, "$1");
    let s = BOLD_UNDER.replace_all(&s, "$1");
    let s = STRIKE.replace_all(&s, "$1");
    let s = ITALIC_STAR.replace_all(&s, "$1");
    CODE_SPAN.replace_all(&s, "$1").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_bold_italic_code_strike() {
        assert_eq!(strip_inline("**bold**", false, 0), "bold");
        assert_eq!(strip_inline("*italic*", false, 0), "italic");
        assert_eq!(strip_inline("`code`", false, 0), "code");
        assert_eq!(strip_inline("~~gone~~", false, 0), "gone");
        assert_eq!(strip_inline("__also bold__", false, 0), "also bold");
    }

    #[test]
    fn link_keeps_url_below_compression_two() {
        let out = strip_inline("[docs](https://example.com)", false, 1);
        assert_eq!(out, "docs<https://example.com>");
    }

    #[test]
    fn link_drops_url_at_compression_two_without_keep_urls() {
        let out = strip_inline("[docs](https://example.com)", false, 2);
        assert_eq!(out, "docs");
    }

    #[test]
    fn keep_urls_flag_overrides_compression() {
        let out = strip_inline("[docs](https://example.com)", true, 3);
        assert_eq!(out, "docs<https://example.com>");
    }

    #[test]
    fn image_treated_like_a_link() {
        let out = strip_inline("![a screenshot](img.png)", false, 1);
        assert_eq!(out, "a screenshot<img.png>");
    }

    #[test]
    fn bold_does_not_leave_stray_italic_markers() {
        assert_eq!(strip_inline("**bold** and *italic*", false, 0), "bold and italic");
    }
}
