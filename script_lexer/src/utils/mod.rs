//! Shared location types used by tokens, errors and log events.

pub mod span;

pub use span::{Position, SourceMap, Span};
