//! Scope and key normalization. Shared by the emitter (which produces
//! scope/key names) and the dictionary engine (which rewrites
//! already-normalized names via the `scope`/`key` namespaces), so it
//! lives in the data-model crate both depend on.

/// Collapse whitespace runs to a single `_`, drop every character
/// outside `[A-Za-z0-9_-]`, and lowercase when `lowercase` is set.
///
/// Idempotent: `normalize_scope_name(normalize_scope_name(x, l), l) ==
/// normalize_scope_name(x, l)` for any `x` and `l`, since the output
/// alphabet is already a subset of the allowed one and contains no
/// whitespace.
#[must_use]
pub fn normalize_scope_name(raw: &str, lowercase: bool) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_sep = false;
    for ch in raw.chars() {
        if ch.is_whitespace() {
            pending_sep = true;
            continue;
        }
        if pending_sep && !out.is_empty() {
            out.push('_');
        }
        pending_sep = false;
        if ch.is_ascii_alphanumeric() || ch == '_' || ch == '-' {
            out.push(ch);
        }
    }
    if lowercase { out.to_lowercase() } else { out }
}

/// Lowercase, collapse whitespace runs to `_`, drop everything outside
/// `[a-z0-9_-]`, then strip leading/trailing hyphens.
///
/// Idempotent for the same reason as [`normalize_scope_name`]; the
/// trailing hyphen-trim doesn't break idempotency since a
/// hyphen-trimmed string has none left to trim on a second pass.
#[must_use]
pub fn normalize_key(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    let mut pending_sep = false;
    for ch in lowered.chars() {
        if ch.is_whitespace() {
            pending_sep = true;
            continue;
        }
        if pending_sep && !out.is_empty() {
            out.push('_');
        }
        pending_sep = false;
        if ch.is_ascii_alphanumeric() || ch == '_' || ch == '-' {
            out.push(ch);
        }
    }
    out.trim_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_collapses_whitespace_and_strips_punctuation() {
        assert_eq!(normalize_scope_name("Hello, World!", false), "Hello_World");
        assert_eq!(normalize_scope_name("Hello,   World!", false), "Hello_World");
    }

    #[test]
    fn scope_lowercases_only_when_requested() {
        assert_eq!(normalize_scope_name("API Reference", false), "API_Reference");
        assert_eq!(normalize_scope_name("API Reference", true), "api_reference");
    }

    #[test]
    fn scope_normalization_is_idempotent() {
        for lowercase in [false, true] {
            let input = "  Weird ## Name__with-stuff  ";
            let once = normalize_scope_name(input, lowercase);
            let twice = normalize_scope_name(&once, lowercase);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn key_normalization_matches_pattern() {
        let n = normalize_key("  Max Retries! ");
        assert_eq!(n, "max_retries");
        assert!(n.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-'));
    }

    #[test]
    fn key_normalization_strips_leading_trailing_hyphens() {
        assert_eq!(normalize_key("-weird-key-"), "weird-key");
    }

    #[test]
    fn key_normalization_is_idempotent() {
        let input = "--Some Key--";
        let once = normalize_key(input);
        let twice = normalize_key(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn key_normalization_can_produce_empty_string() {
        // A key consisting entirely of disallowed characters normalizes
        // to empty; callers must handle this.
        assert_eq!(normalize_key("!!!"), "");
    }
}
