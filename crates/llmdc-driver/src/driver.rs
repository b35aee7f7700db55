//! The compiler trait and its default implementation.

use llmdc_dict::{DictionaryFile, MergedDictionary};

use crate::compression;
use crate::config::CompileConfig;
use crate::error::CompileError;
use crate::post;

/// Dictionary schema version this pipeline's c3 pass understands.
const SUPPORTED_DICT_VERSION: &str = "0.1";

/// Drop dictionaries whose `version` doesn't match
/// [`SUPPORTED_DICT_VERSION`], warning once per dropped file. A
/// dictionary built for a different grammar dialect may use namespaces
/// or matching semantics this c3 implementation doesn't expect.
fn filter_supported(dicts: &[DictionaryFile]) -> Vec<DictionaryFile> {
    dicts
        .iter()
        .filter(|d| {
            let ok = d.version == SUPPORTED_DICT_VERSION;
            if !ok {
                log::warn!(
                    "dictionary version {:?} does not match supported version {SUPPORTED_DICT_VERSION:?}; skipping c3 for this file",
                    d.version
                );
            }
            ok
        })
        .cloned()
        .collect()
}

/// Core compiler interface: turns Markdown-like source into emitted
/// LLMD text under a given configuration.
///
/// Implementations are expected to be stateless; all configuration
/// comes through `CompileConfig` and the dictionary slice passed to
/// each call.
pub trait Compiler {
    /// Compile `source`, applying compression up to `config.compression`
    /// and substituting from `dicts` at c3.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::Emit`] if emission fails.
    fn compile(&self, source: &str, config: &CompileConfig, dicts: &[DictionaryFile]) -> Result<String, CompileError>;
}

/// Standard compiler: parse, emit, compress, post-process, in that
/// order, with no caching or parallelism between stages.
pub struct DefaultCompiler;

impl Compiler for DefaultCompiler {
    fn compile(&self, source: &str, config: &CompileConfig, dicts: &[DictionaryFile]) -> Result<String, CompileError> {
        log::debug!("parsing {} bytes of source", source.len());
        let (nodes, blocks) = llmdc_parser::parse(source);

        log::debug!("emitting {} nodes ({} blocks)", nodes.len(), blocks.len());
        let emitted = llmdc_emit::emit(&nodes, &blocks, &config.emit_config())?;

        log::debug!("compressing {} lines at level {}", emitted.len(), config.compression);
        let supported = filter_supported(dicts);
        let merged = (!supported.is_empty()).then(|| MergedDictionary::merge(&supported));
        let mut lines = compression::compress(emitted, config, merged.as_ref());

        log::debug!("post-processing {} lines", lines.len());
        post::check_scope_before_content(&lines);
        lines = post::reanchor(lines, config.anchor_every);

        Ok(lines.join("\n"))
    }
}
