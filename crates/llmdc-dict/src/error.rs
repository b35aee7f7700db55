/// Errors raised while loading a dictionary file.
#[derive(Debug, thiserror::Error)]
pub enum DictError {
    #[error("failed to parse dictionary JSON: {0}")]
    Json(#[from] serde_json::Error),
}
