/// Errors that can surface from a compile run.
///
/// File I/O, config loading, and dictionary parsing all happen in
/// `llmdc-cli` before a compile is even attempted, so this enum only
/// covers failures internal to the pipeline itself.
///
/// ```text
/// ┌──────────────────┬────────────────────────────────────────────────┐
/// │ Variant           │ Cause                                         │
/// ├──────────────────┼────────────────────────────────────────────────┤
/// │ Emit              │ emission failed (see llmdc_emit::EmitError)   │
/// └──────────────────┴────────────────────────────────────────────────┘
/// ```
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error(transparent)]
    Emit(#[from] llmdc_emit::EmitError),
}
