//! Parses post-block-extraction lines into [`IrNode`]s. Classifies each
//! line in strict priority order (first match wins) and produces the
//! sequence the emitter consumes.

use std::sync::LazyLock;

use llmdc_ir::grammar::parse_block_placeholder;
use llmdc_ir::IrNode;
use regex::Regex;

static THEMATIC_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[-*_]{3,}$").unwrap());
static HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.+)$").unwrap());
static UNORDERED_LIST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)([-*+])\s+(.+)$").unwrap());
static ORDERED_LIST: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\s*)(\d+)\.\s+(.+)$").unwrap());
static KV_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z][A-Za-z0-9 _-]{0,63})\s*:\s+(.+)$").unwrap());
static TABLE_DELIMITER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\|?[\s:-]+\|").unwrap());

/// Run S2 over S1's output lines, producing one [`IrNode`] per
/// recognized construct (tables and multi-line paragraphs each consume
/// more than one source line).
#[must_use]
pub fn parse_ir(lines: &[String]) -> Vec<IrNode> {
    let mut nodes = Vec::with_capacity(lines.len());
    let mut i = 0;

    while i < lines.len() {
        let line = &lines[i];

        if line.is_empty() {
            nodes.push(IrNode::Blank);
            i += 1;
            continue;
        }

        if THEMATIC_BREAK.is_match(line) {
            // Thematic breaks carry no meaning in LLMD; drop entirely.
            i += 1;
            continue;
        }

        if let Some(index) = parse_block_placeholder(line) {
            nodes.push(IrNode::BlockRef { index });
            i += 1;
            continue;
        }

        if let Some(caps) = HEADING.captures(line) {
            nodes.push(IrNode::Heading {
                #[allow(clippy::cast_possible_truncation)]
                level: caps[1].len() as u8,
                text: caps[2].to_string(),
            });
            i += 1;
            continue;
        }

        if let Some((rows, consumed)) = try_parse_table(lines, i) {
            nodes.push(IrNode::Table { rows });
            i += consumed;
            continue;
        }

        if let Some((depth, text)) = match_unordered_list(line) {
            nodes.push(IrNode::ListItem { depth, text, ordered: false });
            i += 1;
            continue;
        }

        if let Some((depth, text)) = match_ordered_list(line) {
            nodes.push(IrNode::ListItem { depth, text, ordered: true });
            i += 1;
            continue;
        }

        if let Some((key, value)) = match_kv(line) {
            nodes.push(IrNode::Kv { key, value });
            i += 1;
            continue;
        }

        // Paragraph: greedily absorb subsequent non-empty, non-structural
        // lines, joined with single spaces.
        let mut parts = vec![line.clone()];
        i += 1;
        while i < lines.len() && !lines[i].is_empty() && !is_structural(&lines[i]) {
            parts.push(lines[i].clone());
            i += 1;
        }
        nodes.push(IrNode::Paragraph { text: parts.join(" ") });
    }

    nodes
}

fn match_unordered_list(line: &str) -> Option<(usize, String)> {
    let caps = UNORDERED_LIST.captures(line)?;
    Some((caps[1].len() / 2, caps[3].to_string()))
}

fn match_ordered_list(line: &str) -> Option<(usize, String)> {
    let caps = ORDERED_LIST.captures(line)?;
    Some((caps[1].len() / 2, caps[3].to_string()))
}

fn match_kv(line: &str) -> Option<(String, String)> {
    if line.starts_with("http://") || line.starts_with("https://") {
        return None;
    }
    let caps = KV_LINE.captures(line)?;
    Some((caps[1].to_string(), caps[2].to_string()))
}

/// A construct that must terminate a paragraph's greedy absorption, so
/// prose never swallows the structure that follows it. Deliberately
/// excludes thematic breaks: headings, lists, block refs, table-ish
/// lines (contain `|`), and KV lines all count; bare rules don't.
fn is_structural(line: &str) -> bool {
    HEADING.is_match(line)
        || UNORDERED_LIST.is_match(line)
        || ORDERED_LIST.is_match(line)
        || parse_block_placeholder(line).is_some()
        || line.contains('|')
        || match_kv(line).is_some()
}

fn try_parse_table(lines: &[String], start: usize) -> Option<(Vec<Vec<String>>, usize)> {
    let header_line = &lines[start];
    if !header_line.contains('|') {
        return None;
    }
    let delimiter_line = lines.get(start + 1)?;
    if !delimiter_line.contains("---") || !TABLE_DELIMITER.is_match(delimiter_line) {
        return None;
    }

    let mut rows = vec![split_table_row(header_line)];
    let mut consumed = 2;
    while let Some(row_line) = lines.get(start + consumed) {
        if row_line.is_empty() || !row_line.contains('|') {
            break;
        }
        rows.push(split_table_row(row_line));
        consumed += 1;
    }
    Some((rows, consumed))
}

fn split_table_row(line: &str) -> Vec<String> {
    let mut cells: Vec<&str> = line.split('|').collect();
    if cells.first().is_some_and(|c| c.trim().is_empty()) {
        cells.remove(0);
    }
    if cells.last().is_some_and(|c| c.trim().is_empty()) {
        cells.pop();
    }
    cells.into_iter().map(|c| c.trim().to_string()).collect()
}
