//! Compression passes c0 through c3, run in order up to the configured
//! level. Every pass skips the inside of `<<<`/`>>>` verbatim regions;
//! that's the one rule all four share.

use std::collections::HashSet;

use llmdc_dict::substitute::{apply_c3_stopwords, apply_text, apply_value_piece, apply_whole, protected_set};
use llmdc_dict::MergedDictionary;
use regex::Regex;
use std::sync::LazyLock;

use crate::config::CompileConfig;

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static THEMATIC_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[-*_](?:\s*[-*_]){2,}$").unwrap());

/// Run c0/c1 (identical) over emitted lines: collapse internal
/// whitespace, drop lines that become empty, drop bare thematic-break
/// residue (lines like `---` or `***` that survived emission).
fn run_c0(lines: Vec<String>) -> Vec<String> {
    let mut out = Vec::with_capacity(lines.len());
    let mut in_block = false;
    for line in lines {
        if line == "<<<" {
            in_block = true;
            out.push(line);
            continue;
        }
        if line == ">>>" {
            in_block = false;
            out.push(line);
            continue;
        }
        if in_block {
            out.push(line);
            continue;
        }
        let collapsed = WHITESPACE_RUN.replace_all(line.trim(), " ").into_owned();
        if collapsed.is_empty() {
            continue;
        }
        if THEMATIC_BREAK.is_match(&collapsed) {
            continue;
        }
        out.push(collapsed);
    }
    out
}

fn is_prose_or_list(line: &str) -> bool {
    line.starts_with('>') || line.starts_with('-')
}

/// Splits a prose (`>text`) or list (`-...text`) line into its marker
/// prefix and the text that follows, so stopword removal and period
/// stripping never chew into the grammar marker itself.
fn split_marker(line: &str) -> (&str, &str) {
    if let Some(rest) = line.strip_prefix('>') {
        return (&line[..1], rest);
    }
    if line.starts_with('-') {
        let dots_end = line[1..].find(|c: char| c != '.').map_or(line.len(), |i| i + 1);
        return (&line[..dots_end], &line[dots_end..]);
    }
    ("", line)
}

/// Applies only to lines c2 is allowed to touch: not block markers, not
/// `@scope`, not `::type`.
fn is_c2_eligible(line: &str) -> bool {
    !(line == "<<<" || line == ">>>" || line.starts_with('@') || line.starts_with("::"))
}

fn apply_phrase_map(line: &str, phrase_map: &[(String, String)]) -> String {
    let mut out = line.to_string();
    for (key, value) in phrase_map {
        let pattern = format!("(?i){}", regex::escape(key));
        if let Ok(re) = Regex::new(&pattern) {
            out = re.replace_all(&out, value.as_str()).into_owned();
        }
    }
    out
}

fn apply_units(line: &str, units: &[(String, String)]) -> String {
    let mut out = line.to_string();
    for (unit, abbr) in units {
        let spaced = format!(r"(\d+)\s+{}", regex::escape(unit));
        if let Ok(re) = Regex::new(&format!("(?i){spaced}")) {
            out = re.replace_all(&out, format!("${{1}}{abbr}")).into_owned();
        }
        let bare = format!(r"(?i)\b{}\b", regex::escape(unit));
        if let Ok(re) = Regex::new(&bare) {
            out = re.replace_all(&out, abbr.as_str()).into_owned();
        }
    }
    out
}

fn strip_trailing_period(line: &str) -> String {
    if !line.ends_with('.') {
        return line.to_string();
    }
    for exception in ["...", "e.g.", "i.e.", "etc."] {
        if line.ends_with(exception) {
            return line.to_string();
        }
    }
    line[..line.len() - 1].to_string()
}

fn remove_stopwords(line: &str, stopwords: &HashSet<String>, protect: &HashSet<String>) -> String {
    line.split(' ')
        .filter(|tok| {
            if tok.is_empty() {
                return true;
            }
            let lower: String = tok.chars().filter(|c| c.is_alphabetic()).collect::<String>().to_lowercase();
            protect.contains(&lower) || !stopwords.contains(&lower)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn run_c2(lines: Vec<String>, config: &CompileConfig) -> Vec<String> {
    let mut phrase_map: Vec<(String, String)> = config.phrase_map.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
    phrase_map.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    let mut units: Vec<(String, String)> = config.units.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
    units.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

    let stopwords: HashSet<String> = config.stopwords.iter().map(|s| s.to_lowercase()).collect();
    let mut protect: HashSet<String> = ["no", "not", "never", "must", "should", "may"].iter().map(|s| (*s).to_string()).collect();
    protect.extend(config.protect_words.iter().map(|s| s.to_lowercase()));

    let mut out = Vec::with_capacity(lines.len());
    let mut in_block = false;
    for line in lines {
        if line == "<<<" {
            in_block = true;
            out.push(line);
            continue;
        }
        if line == ">>>" {
            in_block = false;
            out.push(line);
            continue;
        }
        if in_block || !is_c2_eligible(&line) {
            out.push(line);
            continue;
        }

        let mut transformed = apply_phrase_map(&line, &phrase_map);
        transformed = apply_units(&transformed, &units);
        if is_prose_or_list(&transformed) {
            let (marker, content) = split_marker(&transformed);
            let mut content = remove_stopwords(content, &stopwords, &protect);
            content = strip_trailing_period(&content);
            transformed = format!("{marker}{content}");
        }
        out.push(transformed);
    }
    out
}

/// Dispatches each emitted line to the namespace a c3 dictionary pass
/// is allowed to touch: scope lines get the `scope` map, type lines get
/// `type`, KV lines get `key`/`value` per pair, prose/list lines get
/// `text`, and `->` relation targets get `scope`.
fn run_c3_pass(lines: Vec<String>, dict: &MergedDictionary) -> Vec<String> {
    let protected = protected_set(dict);
    let mut out = Vec::with_capacity(lines.len());
    let mut in_block = false;

    for line in lines {
        if line == "<<<" {
            in_block = true;
            out.push(line);
            continue;
        }
        if line == ">>>" {
            in_block = false;
            out.push(line);
            continue;
        }
        if in_block {
            out.push(line);
            continue;
        }

        let transformed = if let Some(scope) = line.strip_prefix('@') {
            format!("@{}", apply_whole(scope, &dict.scope, dict.policy.case, &protected))
        } else if let Some(type_tag) = line.strip_prefix("::") {
            format!("::{}", apply_whole(type_tag, &dict.type_, dict.policy.case, &protected))
        } else if let Some(rest) = line.strip_prefix("->") {
            format!("->{}", apply_whole(rest.trim(), &dict.scope, dict.policy.case, &protected))
        } else if line.starts_with(':') {
            apply_kv_line(&line, dict, &protected)
        } else if is_prose_or_list(&line) {
            apply_text(&line, &dict.text, dict.policy.case, dict.policy.match_mode, &protected)
        } else {
            line
        };
        out.push(apply_c3_stopwords(&transformed, &dict.c3_stop, &protected));
    }
    out
}

fn apply_kv_line(line: &str, dict: &MergedDictionary, protected: &HashSet<String>) -> String {
    let prefix = &line[..1];
    let rest = &line[1..];
    let pairs: Vec<String> = rest
        .split(' ')
        .map(|pair| {
            let Some((key, value)) = pair.split_once('=') else {
                return pair.to_string();
            };
            let new_key = apply_whole(key, &dict.key, dict.policy.case, protected);
            let new_value = split_preserving_delims(value)
                .into_iter()
                .map(|piece| match piece {
                    ValuePiece::Delim(c) => c.to_string(),
                    ValuePiece::Token(tok) => apply_value_piece(tok, &dict.value, dict.policy.case, protected),
                })
                .collect::<String>();
            format!("{new_key}={new_value}")
        })
        .collect();
    format!("{prefix}{}", pairs.join(" "))
}

enum ValuePiece<'a> {
    Token(&'a str),
    Delim(char),
}

fn split_preserving_delims(value: &str) -> Vec<ValuePiece<'_>> {
    let mut out = Vec::new();
    let mut start = 0;
    for (i, c) in value.char_indices() {
        if c == '|' || c == ',' {
            if start < i {
                out.push(ValuePiece::Token(&value[start..i]));
            }
            out.push(ValuePiece::Delim(c));
            start = i + c.len_utf8();
        }
    }
    if start < value.len() {
        out.push(ValuePiece::Token(&value[start..]));
    }
    out
}

fn run_c3(lines: Vec<String>, dict: &MergedDictionary) -> Vec<String> {
    let passes = dict.policy.max_passes.min(10).max(1);
    let mut current = lines;
    for _ in 0..passes {
        current = run_c3_pass(current, dict);
    }
    current
}

/// Run every pass up to `config.compression`. `dicts` is only consulted
/// at compression level 3; an empty slice there is a no-op c3 pass.
#[must_use]
pub fn compress(lines: Vec<String>, config: &CompileConfig, dict: Option<&MergedDictionary>) -> Vec<String> {
    let mut lines = lines;
    if config.compression >= 1 {
        lines = run_c0(lines);
    }
    if config.compression >= 2 {
        lines = run_c2(lines, config);
    }
    if config.compression >= 3 {
        if let Some(dict) = dict {
            lines = run_c3(lines, dict);
        }
    }
    lines
}
