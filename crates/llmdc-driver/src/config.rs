//! Compiler configuration: every knob a caller can set to steer
//! normalization, emission, and compression, with defaults chosen for
//! unattended use.

use llmdc_emit::ScopeMode;
use serde::Deserialize;
use std::collections::HashMap;

/// Full configuration for one compile run.
///
/// ```text
/// ┌────────────────────┬─────────┬──────────────────────────────────────┐
/// │ Field               │ Default │ Effect                              │
/// ├────────────────────┼─────────┼──────────────────────────────────────┤
/// │ compression         │ 2       │ highest pass (c0..=c3) to run        │
/// │ scope_mode          │ flat    │ heading-stack resolution strategy    │
/// │ keep_urls           │ false   │ keep link/image targets at c2+       │
/// │ sentence_split      │ false   │ one sentence per line at c2+         │
/// │ anchor_every        │ 0       │ re-emit last @scope every N lines    │
/// │ bool_compress       │ true    │ Y/N collapse for boolean table cols  │
/// │ max_kv_per_line     │ 4       │ KV pairs grouped per emitted line    │
/// │ prefix_extraction   │ true    │ hoist shared key prefixes to `:_pfx=`│
/// │ min_prefix_len      │ 6       │ shortest prefix worth hoisting       │
/// │ min_prefix_pct      │ 0.6     │ fraction of keys the prefix must hit │
/// │ stopwords           │ []      │ extra c2 prose words to drop         │
/// │ protect_words       │ []      │ extra words c2/c3 must never touch   │
/// │ phrase_map          │ {}      │ c2 longest-first phrase substitution │
/// │ units               │ {}      │ c2 unit-name abbreviation map        │
/// └────────────────────┴─────────┴──────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct CompileConfig {
    #[serde(default = "default_compression")]
    pub compression: u8,
    #[serde(default)]
    pub scope_mode: ScopeMode,
    #[serde(default)]
    pub keep_urls: bool,
    #[serde(default)]
    pub sentence_split: bool,
    #[serde(default)]
    pub anchor_every: usize,
    #[serde(default = "default_true")]
    pub bool_compress: bool,
    #[serde(default = "default_max_kv_per_line")]
    pub max_kv_per_line: usize,
    #[serde(default = "default_true")]
    pub prefix_extraction: bool,
    #[serde(default = "default_min_prefix_len")]
    pub min_prefix_len: usize,
    #[serde(default = "default_min_prefix_pct")]
    pub min_prefix_pct: f64,
    #[serde(default)]
    pub stopwords: Vec<String>,
    #[serde(default)]
    pub protect_words: Vec<String>,
    #[serde(default)]
    pub phrase_map: HashMap<String, String>,
    #[serde(default)]
    pub units: HashMap<String, String>,
}

fn default_compression() -> u8 {
    2
}

fn default_true() -> bool {
    true
}

fn default_max_kv_per_line() -> usize {
    4
}

fn default_min_prefix_len() -> usize {
    6
}

fn default_min_prefix_pct() -> f64 {
    0.6
}

/// Defaults chosen for unattended batch compilation: moderate
/// compression (c0-c2, dictionary substitution opt-in via `--dict`),
/// flat scoping, and no re-anchoring since most documents are short
/// enough that drift isn't a concern.
impl Default for CompileConfig {
    fn default() -> Self {
        Self {
            compression: default_compression(),
            scope_mode: ScopeMode::default(),
            keep_urls: false,
            sentence_split: false,
            anchor_every: 0,
            bool_compress: default_true(),
            max_kv_per_line: default_max_kv_per_line(),
            prefix_extraction: default_true(),
            min_prefix_len: default_min_prefix_len(),
            min_prefix_pct: default_min_prefix_pct(),
            stopwords: Vec::new(),
            protect_words: Vec::new(),
            phrase_map: HashMap::new(),
            units: HashMap::new(),
        }
    }
}

impl CompileConfig {
    /// Build the [`llmdc_emit::EmitConfig`] slice of this configuration.
    #[must_use]
    pub fn emit_config(&self) -> llmdc_emit::EmitConfig {
        llmdc_emit::EmitConfig {
            compression: self.compression,
            scope_mode: self.scope_mode,
            keep_urls: self.keep_urls,
            sentence_split: self.sentence_split,
            bool_compress: self.bool_compress,
            max_kv_per_line: self.max_kv_per_line,
            prefix_extraction: self.prefix_extraction,
            min_prefix_len: self.min_prefix_len,
            min_prefix_pct: self.min_prefix_pct,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_documented_values() {
        let cfg = CompileConfig::default();
        assert_eq!(cfg.compression, 2);
        assert_eq!(cfg.max_kv_per_line, 4);
        assert_eq!(cfg.min_prefix_len, 6);
        assert!((cfg.min_prefix_pct - 0.6).abs() < f64::EPSILON);
        assert!(cfg.prefix_extraction);
        assert!(cfg.bool_compress);
        assert_eq!(cfg.anchor_every, 0);
    }

    #[test]
    fn deserializes_partial_json_with_defaults() {
        let cfg: CompileConfig = serde_json::from_str(r#"{"compression": 3}"#).unwrap();
        assert_eq!(cfg.compression, 3);
        assert_eq!(cfg.max_kv_per_line, 4);
    }
}
