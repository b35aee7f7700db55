#![warn(clippy::pedantic)]

//! Front half of the LLMD compiler: normalizes raw Markdown-like source,
//! lifts fenced code into a side table, and classifies what's left into
//! [`llmdc_ir::IrNode`]s. The emitter (`llmdc-emit`) takes it from here.

pub mod blocks;
pub mod ir_parse;
pub mod normalize;

pub use blocks::extract_blocks;
pub use ir_parse::parse_ir;
pub use normalize::normalize;

use llmdc_ir::{BlockTable, IrNode};

/// Run the full front half of the pipeline in one call: normalize,
/// extract blocks, then classify into IR nodes.
#[must_use]
pub fn parse(source: &str) -> (Vec<IrNode>, BlockTable) {
    let lines = normalize(source);
    let (lines, blocks) = extract_blocks(&lines);
    (parse_ir(&lines), blocks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_to_end_front_half_produces_blockref_and_table() {
        let (nodes, blocks) = parse("# Title\n\n```py\nx = 1\n```\n\nk: v\n");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks.get(0).unwrap().content, "x = 1");
        assert!(nodes.iter().any(|n| matches!(n, IrNode::Heading { level: 1, .. })));
        assert!(nodes.iter().any(|n| matches!(n, IrNode::BlockRef { index: 0 })));
        assert!(nodes.iter().any(|n| matches!(n, IrNode::Kv { .. })));
    }
}
