//! Lifts fenced code blocks out of the line stream into a side table,
//! leaving a placeholder line behind so later stages never see (and
//! never transform) code content.

use std::sync::LazyLock;

use llmdc_ir::grammar::block_placeholder;
use llmdc_ir::BlockTable;
use regex::Regex;

static FENCE_OPEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(`{3,})(\w*)\s*$").unwrap());

/// Run S1 over S0's output lines.
///
/// Returns the line stream with every fenced block replaced by a single
/// `⟦BLOCK:<index>⟧` placeholder, plus the side table those indices
/// resolve against.
#[must_use]
pub fn extract_blocks(lines: &[String]) -> (Vec<String>, BlockTable) {
    let mut table = BlockTable::new();
    let mut out = Vec::with_capacity(lines.len());
    let mut i = 0;

    while i < lines.len() {
        let Some(caps) = FENCE_OPEN.captures(&lines[i]) else {
            out.push(lines[i].clone());
            i += 1;
            continue;
        };

        let fence = caps[1].to_string();
        let lang = caps[2].to_string();
        i += 1;

        let mut content_lines = Vec::new();
        let mut closed = false;
        while i < lines.len() {
            if lines[i] == fence {
                closed = true;
                i += 1;
                break;
            }
            content_lines.push(lines[i].clone());
            i += 1;
        }

        if !closed {
            // Not a fatal error; an unterminated fence just closes at EOF.
            log::warn!("unterminated fenced block (lang={lang:?}); closed at end of input");
        }

        let index = table.push(lang, content_lines.join("\n"));
        out.push(block_placeholder(index));
    }

    (out, table)
}
