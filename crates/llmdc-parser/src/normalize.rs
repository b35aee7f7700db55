//! NFKC the whole input, unify line endings, right-trim every line.
//! Leading indentation is preserved: it's how the next stage recovers
//! list nesting depth.

use unicode_normalization::UnicodeNormalization;

/// Runs whole-document normalization over the raw source text,
/// returning one already-right-trimmed line per entry.
///
/// Callers compiling multiple files in one invocation are expected to
/// concatenate them with a blank-line separator first; this function
/// has no notion of multiple files.
#[must_use]
pub fn normalize(source: &str) -> Vec<String> {
    let nfkc: String = source.nfkc().collect();
    let unified = unify_line_endings(&nfkc);
    unified
        .split('\n')
        .map(|line| line.trim_end().to_string())
        .collect()
}

fn unify_line_endings(s: &str) -> String {
    // `\r\n` first so a lone `\r` left behind by a prior `\r\n` isn't
    // double-counted, then any remaining lone `\r`.
    s.replace("\r\n", "\n").replace('\r', "\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unifies_all_three_line_ending_styles() {
        let mixed = "a\r\nb\rc\nd";
        assert_eq!(normalize(mixed), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn right_trims_but_keeps_leading_indentation() {
        let lines = normalize("  - item   \n");
        assert_eq!(lines[0], "  - item");
    }

    #[test]
    fn applies_nfkc() {
        // U+FB01 LATIN SMALL LIGATURE FI -> "fi" under NFKC.
        let lines = normalize("\u{FB01}le");
        assert_eq!(lines[0], "file");
    }
}
