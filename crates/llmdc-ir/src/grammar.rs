//! Constants shared by every stage of the pipeline: the set of prefixes
//! the output grammar reserves for structural lines, and the block
//! placeholder format fenced code gets replaced with during extraction.

/// Line-prefix strings the LLMD grammar reserves for structural roles.
///
/// Nothing downstream (dictionary aliases, prose content, key values)
/// may begin with one of these; doing so would make the line ambiguous
/// with a structural line on the next parse. A separate, out-of-scope
/// dictionary-generation tool enforces the same constraint on aliases
/// it assigns.
pub const RESERVED_PREFIXES: &[&str] = &[
    "~", "@", ":", ">", "::", "->", "<-", "=", "<<<", ">>>",
];

/// True if `s` begins with one of [`RESERVED_PREFIXES`].
#[must_use]
pub fn is_reserved_prefix(s: &str) -> bool {
    RESERVED_PREFIXES.iter().any(|p| s.starts_with(p))
}

/// Opening bracket of a block placeholder (U+27E6, MATHEMATICAL LEFT
/// WHITE SQUARE BRACKET). Chosen because it cannot collide with any
/// character a human author would type in Markdown source.
pub const BLOCK_OPEN: char = '⟦';
/// Closing bracket of a block placeholder (U+27E7).
pub const BLOCK_CLOSE: char = '⟧';

/// Render the placeholder line S1 substitutes for a fenced block at
/// `index`.
#[must_use]
pub fn block_placeholder(index: usize) -> String {
    format!("{BLOCK_OPEN}BLOCK:{index}{BLOCK_CLOSE}")
}

/// Recover the block table index from a placeholder line produced by
/// [`block_placeholder`], if `line` (after trimming) is exactly one.
#[must_use]
pub fn parse_block_placeholder(line: &str) -> Option<usize> {
    let trimmed = line.trim();
    let inner = trimmed
        .strip_prefix(BLOCK_OPEN)?
        .strip_suffix(BLOCK_CLOSE)?;
    inner.strip_prefix("BLOCK:")?.parse().ok()
}
