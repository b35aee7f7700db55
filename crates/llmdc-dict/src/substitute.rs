//! The longest-match substitution engine that drives compression pass
//! c3. Protection checks run before any replacement, per-token and
//! per-piece, since skipping that step is the most common source of
//! semantic drift in a dictionary pass.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::merge::MergedDictionary;
use crate::schema::{CaseMode, MatchMode};

static VALUE_TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9._-]*$").unwrap());

/// Build the always-protected set: the fixed negations/modals plus
/// whatever a dictionary's policy adds.
#[must_use]
pub fn protected_set(dict: &MergedDictionary) -> HashSet<String> {
    let mut set: HashSet<String> =
        ["no", "not", "never", "must", "should", "may"].iter().map(|s| (*s).to_string()).collect();
    set.extend(dict.policy.protect.negations.iter().map(|s| s.to_lowercase()));
    set.extend(dict.policy.protect.modals.iter().map(|s| s.to_lowercase()));
    set
}

fn is_protected(token: &str, protected: &HashSet<String>) -> bool {
    if token.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        return true;
    }
    let alpha_lower: String = token.chars().filter(|c| c.is_alphabetic()).collect::<String>().to_lowercase();
    protected.contains(&alpha_lower)
}

fn keys_match(key: &str, candidate: &str, case: CaseMode) -> bool {
    match case {
        CaseMode::Preserve => key == candidate,
        CaseMode::Smart => key.eq_ignore_ascii_case(candidate),
    }
}

/// Replace `input` wholesale if it exactly equals some entry's key.
/// Used for the single-token scope/key/type namespaces, where the
/// whole string either is or isn't a known alias source.
#[must_use]
pub fn apply_whole(
    input: &str,
    entries: &[(String, String)],
    case: CaseMode,
    protected: &HashSet<String>,
) -> String {
    if is_protected(input, protected) {
        return input.to_string();
    }
    for (key, value) in entries {
        if keys_match(key, input, case) {
            return value.clone();
        }
    }
    input.to_string()
}

/// Apply the `value` map to one `|`/`,`-delimited piece of a KV value.
/// Only eligible pieces (bare identifier-shaped tokens, not URLs or
/// quoted strings) are considered for replacement.
#[must_use]
pub fn apply_value_piece(
    piece: &str,
    entries: &[(String, String)],
    case: CaseMode,
    protected: &HashSet<String>,
) -> String {
    if !is_eligible_value_piece(piece) {
        return piece.to_string();
    }
    apply_whole(piece, entries, case, protected)
}

fn is_eligible_value_piece(piece: &str) -> bool {
    if piece.starts_with('"') || piece.ends_with('"') {
        return false;
    }
    if piece.starts_with("http://") || piece.starts_with("https://") {
        return false;
    }
    VALUE_TOKEN.is_match(piece)
}

/// Apply the `text` map to a line of prose/list text, token-by-token
/// in `token` mode or as boundary-respecting phrase replacement in
/// `word` mode (entries may contain spaces).
#[must_use]
pub fn apply_text(
    text: &str,
    entries: &[(String, String)],
    case: CaseMode,
    match_mode: MatchMode,
    protected: &HashSet<String>,
) -> String {
    match match_mode {
        MatchMode::Token => text
            .split(' ')
            .map(|tok| if tok.is_empty() { String::new() } else { apply_whole(tok, entries, case, protected) })
            .collect::<Vec<_>>()
            .join(" "),
        MatchMode::Word => apply_word_mode(text, entries, case, protected),
    }
}

fn apply_word_mode(text: &str, entries: &[(String, String)], case: CaseMode, protected: &HashSet<String>) -> String {
    let mut result = text.to_string();
    for (key, value) in entries {
        let boundary = r"[^A-Za-z0-9_./-]";
        let pattern = format!("(^|{boundary}){}($|{boundary})", regex::escape(key));
        let pattern = if matches!(case, CaseMode::Smart) { format!("(?i){pattern}") } else { pattern };
        let Ok(re) = Regex::new(&pattern) else { continue };
        result = re
            .replace_all(&result, |caps: &Captures| {
                let whole = &caps[0];
                let pre_len = caps[1].len();
                let post_len = caps[2].len();
                let matched = &whole[pre_len..whole.len() - post_len];
                if is_protected(matched, protected) {
                    whole.to_string()
                } else {
                    format!("{}{value}{}", &caps[1], &caps[2])
                }
            })
            .into_owned();
    }
    result
}

/// Drop tokens whose lowercase alphabetic form is in `stop`, unless
/// protected.
#[must_use]
pub fn apply_c3_stopwords(text: &str, stop: &HashSet<String>, protected: &HashSet<String>) -> String {
    text.split(' ')
        .filter(|tok| {
            if tok.is_empty() || is_protected(tok, protected) {
                return true;
            }
            let lower: String = tok.chars().filter(|c| c.is_alphabetic()).collect::<String>().to_lowercase();
            !stop.contains(&lower)
        })
        .collect::<Vec<_>>()
        .join(" ")
}
