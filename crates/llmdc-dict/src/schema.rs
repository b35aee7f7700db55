//! JSON schema for dictionary files consumed by compression pass c3.

use std::collections::HashMap;

use serde::Deserialize;

/// A single dictionary file as loaded from disk.
#[derive(Debug, Clone, Deserialize)]
pub struct DictionaryFile {
    pub version: String,
    #[serde(default)]
    pub policy: Policy,
    #[serde(default)]
    pub maps: Maps,
    pub stop: Option<StopLists>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseMode {
    /// Case-sensitive key matching.
    Preserve,
    /// Case-insensitive key matching.
    Smart,
}

impl Default for CaseMode {
    fn default() -> Self {
        Self::Smart
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// The whole whitespace-delimited token must equal the key.
    Token,
    /// A word-boundary match against `[A-Za-z0-9_./-]` runs.
    Word,
}

impl Default for MatchMode {
    fn default() -> Self {
        Self::Token
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Protect {
    #[serde(default)]
    pub negations: Vec<String>,
    #[serde(default)]
    pub modals: Vec<String>,
}

impl Default for Protect {
    fn default() -> Self {
        Self {
            negations: vec!["no".into(), "not".into(), "never".into()],
            modals: vec!["must".into(), "should".into(), "may".into()],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Policy {
    #[serde(default)]
    pub case: CaseMode,
    #[serde(rename = "match", default)]
    pub match_mode: MatchMode,
    #[serde(default = "default_true")]
    pub longest_match: bool,
    #[serde(default)]
    pub normalize_unicode: bool,
    #[serde(default = "default_max_passes")]
    pub max_passes: usize,
    #[serde(default = "default_true")]
    pub enable_global: bool,
    #[serde(default)]
    pub protect: Protect,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            case: CaseMode::default(),
            match_mode: MatchMode::default(),
            longest_match: true,
            normalize_unicode: false,
            max_passes: default_max_passes(),
            enable_global: true,
            protect: Protect::default(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_max_passes() -> usize {
    1
}

/// Source-token to alias mappings, one per namespace.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Maps {
    #[serde(default)]
    pub scope: HashMap<String, String>,
    #[serde(default)]
    pub key: HashMap<String, String>,
    #[serde(default)]
    pub value: HashMap<String, String>,
    #[serde(default)]
    pub text: HashMap<String, String>,
    #[serde(default, rename = "type")]
    pub type_: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StopLists {
    #[serde(default)]
    pub c3: Vec<String>,
}
