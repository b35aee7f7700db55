#![warn(clippy::pedantic)]

//! Back half of the LLMD compiler: turns parsed IR into emitted LLMD
//! lines. Owns the scope resolver, the key-value buffer, table
//! classification, and the inline Markdown stripping every text path
//! shares.

pub mod emitter;
pub mod error;
pub mod inline;
pub mod kvbuf;
pub mod scope;
pub mod table;

pub use emitter::{emit, EmitConfig};
pub use error::EmitError;
pub use scope::ScopeMode;
