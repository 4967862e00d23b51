//! Token and comment values produced by the scanner
//!
//! Tokens reference their [`TokenType`](crate::registry::TokenType) through a
//! shared handle, so every token of a given type points at the same registry
//! entry. Comments are collected separately and never appear among tokens.

pub mod token;

pub use token::{Comment, Literal, Token};
