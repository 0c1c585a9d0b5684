// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! AST types for the Fern language
//!
//! This crate contains the syntax tree produced by `fern-parser` and the
//! source locations attached to every node.

pub mod ast;
pub mod foundation;

pub use foundation::{Located, Location};

pub use ast::*;
