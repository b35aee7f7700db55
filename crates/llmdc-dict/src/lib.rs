#![warn(clippy::pedantic)]

//! Dictionary loading and the longest-match substitution engine behind
//! compression pass c3: per-namespace alias maps, merge-and-sort
//! across multiple dictionary files, and token/phrase replacement with
//! protected-word discipline applied ahead of every substitution.

pub mod error;
pub mod merge;
pub mod schema;
pub mod substitute;

pub use error::DictError;
pub use merge::MergedDictionary;
pub use schema::{CaseMode, DictionaryFile, MatchMode, Policy};

/// Parse one dictionary file's JSON contents.
///
/// # Errors
///
/// Returns [`DictError::Json`] if the text isn't valid dictionary JSON.
pub fn load(json: &str) -> Result<DictionaryFile, DictError> {
    Ok(serde_json::from_str(json)?)
}
