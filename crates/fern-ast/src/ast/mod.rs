//! Untyped syntax tree produced by the parser.
//!
//! Four closed node families: expressions, patterns, type expressions and
//! declarations. Children are owned by value, so every tree is acyclic;
//! recursive types are plain named references. Every node root carries the
//! [`Location`](crate::foundation::Location) of its first token.

mod decl;
mod expr;
mod pattern;
mod types;
pub mod walk;

pub use decl::*;
pub use expr::*;
pub use pattern::*;
pub use types::*;
