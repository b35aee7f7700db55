#![warn(clippy::pedantic)]

//! Top-level compile pipeline: parse, emit, compress, post-process.
//! Everything upstream (file discovery, config/dictionary loading from
//! disk) is `llmdc-cli`'s job; this crate only ever sees source text
//! already in memory.

pub mod compression;
pub mod config;
pub mod driver;
pub mod error;
pub mod post;

pub use config::CompileConfig;
pub use driver::{Compiler, DefaultCompiler};
pub use error::CompileError;

/// Compile one source string into emitted LLMD text using
/// [`DefaultCompiler`].
///
/// Concatenate multiple files with a blank-line separator before
/// calling this, if compiling more than one at once; the pipeline
/// itself has no notion of file boundaries.
///
/// # Errors
///
/// Returns [`CompileError::Emit`] if emission fails (an unresolved
/// block reference; should not happen under the front end's
/// invariants but isn't assumed away).
pub fn compile(source: &str, config: &CompileConfig, dicts: &[llmdc_dict::DictionaryFile]) -> Result<String, CompileError> {
    DefaultCompiler.compile(source, config, dicts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiles_minimal_document_at_default_compression() {
        let out = compile("# Title\n\nHello world.", &CompileConfig::default(), &[]).unwrap();
        assert!(out.contains("@title") || out.contains("@Title"));
        assert!(out.contains("Hello world"));
    }

    #[test]
    fn compiles_kv_scenario_into_single_grouped_line() {
        let source = "# Cfg\n\nfoo: 1\nbar: 2\nbaz: 3\nfoobar: 4\n";
        let mut config = CompileConfig::default();
        config.compression = 1;
        let out = compile(source, &config, &[]).unwrap();
        assert!(out.lines().any(|l| l == ":foo=1 bar=2 baz=3 foobar=4"));
    }

    #[test]
    fn compiles_table_scenario_into_property_table_emission() {
        let source = "# T\n\n|k|v|\n|---|---|\n|a|1|\n|b|2|\n";
        let mut config = CompileConfig::default();
        config.compression = 1;
        let out = compile(source, &config, &[]).unwrap();
        assert!(out.lines().any(|l| l == ":_col=v"));
        assert!(out.lines().any(|l| l == ":a=1 b=2"));
    }

    #[test]
    fn compiles_code_block_scenario_verbatim() {
        let source = "# Code\n\n```py\nx=1\n```\n";
        let mut config = CompileConfig::default();
        config.compression = 1;
        let out = compile(source, &config, &[]).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines.contains(&"::py"));
        assert!(lines.contains(&"<<<"));
        assert!(lines.contains(&"x=1"));
        assert!(lines.contains(&">>>"));
    }

    #[test]
    fn compiles_stopword_scenario_at_compression_two() {
        let source = "# X\n\nThe cat is happy.";
        let mut config = CompileConfig::default();
        config.compression = 2;
        config.stopwords = vec!["the".into(), "is".into()];
        let out = compile(source, &config, &[]).unwrap();
        assert!(out.lines().any(|l| l == ">cat happy"));
    }

    #[test]
    fn round_trips_identically_at_compression_zero() {
        let source = "# A\n\nSome text here.\n";
        let mut config = CompileConfig::default();
        config.compression = 0;
        let first = compile(source, &config, &[]).unwrap();
        let second = compile(source, &config, &[]).unwrap();
        assert_eq!(first, second);
    }
}
