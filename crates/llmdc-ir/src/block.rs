//! The fenced-block side table built during block extraction and
//! consumed by emission.

/// One fenced code block lifted out of the source.
///
/// `index` matches the number embedded in the `⟦BLOCK:<index>⟧`
/// placeholder that took its place. Indices are dense and 0-based,
/// assigned in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FencedBlock {
    pub index: usize,
    /// Language tag from the opening fence (e.g. `py` in ` ```py `).
    /// Empty when the fence carried no tag.
    pub lang: String,
    /// Verbatim content between the fences, newline-joined. No stage
    /// ever transforms this.
    pub content: String,
}

/// Ordered collection of [`FencedBlock`]s extracted from one source.
///
/// Dense and append-only: the only way to add a block is [`push`](Self::push),
/// which assigns the next index and returns it.
#[derive(Debug, Clone, Default)]
pub struct BlockTable {
    blocks: Vec<FencedBlock>,
}

impl BlockTable {
    #[must_use]
    pub fn new() -> Self {
        Self { blocks: Vec::new() }
    }

    /// Append a block, returning the index it was assigned.
    pub fn push(&mut self, lang: String, content: String) -> usize {
        let index = self.blocks.len();
        self.blocks.push(FencedBlock { index, lang, content });
        index
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&FencedBlock> {
        self.blocks.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FencedBlock> {
        self.blocks.iter()
    }
}
