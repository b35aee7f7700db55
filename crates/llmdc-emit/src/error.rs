/// Errors surfaced during emission.
///
/// Almost everything the emitter encounters is recoverable in place
/// (an unnormalizable key falls back to a prose line, a repeated scope
/// is simply not re-anchored); the one case that can't be papered over
/// is a block reference that doesn't resolve, which the front end's
/// invariants say should never happen.
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    #[error("block reference pointed at unknown index {index}; this indicates an upstream invariant violation")]
    UnknownBlockIndex { index: usize },
}
