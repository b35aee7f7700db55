//! Walks the parsed IR and turns it into LLMD lines: the scope
//! resolver, the key-value buffer, and table/list/paragraph/block
//! formatting all meet here.

use llmdc_ir::normalize::{normalize_key, normalize_scope_name};
use llmdc_ir::{BlockTable, IrNode};

use crate::error::EmitError;
use crate::inline::strip_inline;
use crate::kvbuf::KvBuffer;
use crate::scope::{ScopeMode, ScopeStack};
use crate::table;

/// Settings the emitter needs from the compile configuration. A subset
/// of the driver's full config, kept free of its `serde` dependency.
#[derive(Debug, Clone)]
pub struct EmitConfig {
    pub compression: u8,
    pub scope_mode: ScopeMode,
    pub keep_urls: bool,
    pub sentence_split: bool,
    pub bool_compress: bool,
    pub max_kv_per_line: usize,
    pub prefix_extraction: bool,
    pub min_prefix_len: usize,
    pub min_prefix_pct: f64,
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            compression: 2,
            scope_mode: ScopeMode::Flat,
            keep_urls: false,
            sentence_split: false,
            bool_compress: true,
            max_kv_per_line: 4,
            prefix_extraction: true,
            min_prefix_len: 6,
            min_prefix_pct: 0.6,
        }
    }
}

/// Run S3+S4 over a parsed node stream, producing the emitted LLMD
/// lines (before compression passes run).
///
/// # Errors
///
/// Returns [`EmitError::UnknownBlockIndex`] if a `BlockRef` points past
/// the end of `blocks`; under the front end's invariants this never
/// happens, but the emitter doesn't trust it blindly.
pub fn emit(nodes: &[IrNode], blocks: &BlockTable, config: &EmitConfig) -> Result<Vec<String>, EmitError> {
    let mut state = EmitState::new(config);
    for node in nodes {
        state.visit(node, blocks)?;
    }
    state.finish();
    Ok(state.out)
}

struct EmitState<'a> {
    config: &'a EmitConfig,
    scope_stack: ScopeStack,
    kv_buffer: KvBuffer,
    out: Vec<String>,
    last_scope: Option<String>,
    scope_emitted: bool,
}

impl<'a> EmitState<'a> {
    fn new(config: &'a EmitConfig) -> Self {
        Self {
            config,
            scope_stack: ScopeStack::new(),
            kv_buffer: KvBuffer::new(),
            out: Vec::new(),
            last_scope: None,
            scope_emitted: false,
        }
    }

    fn flush_kv(&mut self) {
        let lines = self.kv_buffer.flush(
            self.config.compression,
            self.config.max_kv_per_line,
            self.config.prefix_extraction,
            self.config.min_prefix_len,
            self.config.min_prefix_pct,
        );
        self.out.extend(lines);
    }

    fn ensure_scope(&mut self) {
        if !self.scope_emitted {
            self.out.push("@root".to_string());
            self.last_scope = Some("root".to_string());
            self.scope_emitted = true;
        }
    }

    fn finalize_prose(&self, text: &str) -> String {
        strip_inline(text, self.config.keep_urls, self.config.compression)
    }

    fn visit(&mut self, node: &IrNode, blocks: &BlockTable) -> Result<(), EmitError> {
        match node {
            IrNode::Blank => self.flush_kv(),

            IrNode::Heading { level, text } => {
                self.flush_kv();
                let lowercase = self.config.compression >= 2;
                let normalized = normalize_scope_name(text, lowercase);
                self.scope_stack.push_heading(*level, normalized);
                let resolved = self
                    .scope_stack
                    .resolve(self.config.scope_mode)
                    .unwrap_or_else(|| "root".to_string());
                if self.last_scope.as_deref() != Some(resolved.as_str()) {
                    self.out.push(format!("@{resolved}"));
                    self.last_scope = Some(resolved);
                    self.scope_emitted = true;
                }
            }

            IrNode::ListItem { depth, text, ordered: _ } => {
                self.flush_kv();
                self.ensure_scope();
                let body = self.finalize_prose(text);
                let dots = ".".repeat(*depth);
                self.out.push(format!("-{dots}{body}"));
            }

            IrNode::Table { rows } => {
                self.flush_kv();
                self.ensure_scope();
                let kind = table::classify(rows);
                table::emit(
                    rows,
                    kind,
                    &mut self.kv_buffer,
                    &mut self.out,
                    self.config.compression,
                    self.config.bool_compress,
                    self.config.keep_urls,
                );
            }

            IrNode::Kv { key, value } => {
                let norm_key = normalize_key(key);
                if norm_key.is_empty() {
                    log::warn!("key {key:?} normalizes to empty string; falling back to prose");
                    self.flush_kv();
                    self.ensure_scope();
                    self.out.push(format!(">{key}: {value}"));
                } else {
                    self.ensure_scope();
                    let val = sanitize_kv_value(&self.finalize_prose(value));
                    self.kv_buffer.push(norm_key, val);
                }
            }

            IrNode::BlockRef { index } => {
                self.flush_kv();
                self.ensure_scope();
                let block = blocks
                    .get(*index)
                    .ok_or(EmitError::UnknownBlockIndex { index: *index })?;
                let lang = if block.lang.is_empty() { "code" } else { block.lang.as_str() };
                self.out.push(format!("::{lang}"));
                self.out.push("<<<".to_string());
                for line in block.content.split('\n') {
                    self.out.push(line.to_string());
                }
                self.out.push(">>>".to_string());
            }

            IrNode::Paragraph { text } => {
                self.flush_kv();
                self.ensure_scope();
                let body = self.finalize_prose(text);
                if self.config.sentence_split && self.config.compression >= 2 {
                    for sentence in split_sentences(&body) {
                        self.out.push(format!(">{sentence}"));
                    }
                } else {
                    self.out.push(format!(">{body}"));
                }
            }
        }
        Ok(())
    }

    fn finish(&mut self) {
        self.flush_kv();
    }
}

fn sanitize_kv_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut pending_sep = false;
    for ch in value.trim().chars() {
        if ch.is_whitespace() {
            pending_sep = true;
            continue;
        }
        if pending_sep && !out.is_empty() {
            out.push('_');
        }
        pending_sep = false;
        out.push(ch);
    }
    out
}

/// Split on sentence-ending punctuation followed by whitespace and a
/// capital letter. `regex` has no lookaround, so this walks the
/// characters by hand instead of trying to express it as one pattern.
fn split_sentences(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < chars.len() {
        if matches!(chars[i], '.' | '!' | '?') {
            let ws_start = i + 1;
            let mut j = ws_start;
            while j < chars.len() && chars[j].is_whitespace() {
                j += 1;
            }
            if j > ws_start && j < chars.len() && chars[j].is_uppercase() {
                sentences.push(chars[start..=i].iter().collect::<String>().trim().to_string());
                start = j;
                i = j;
                continue;
            }
        }
        i += 1;
    }
    let rest: String = chars[start..].iter().collect::<String>().trim().to_string();
    if !rest.is_empty() {
        sentences.push(rest);
    }
    sentences
}
