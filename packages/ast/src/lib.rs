//! # typeport AST
//!
//! The declaration tree handed to the typeport compiler by an external
//! source-language parser. Trees are plain owned data, serializable with
//! serde so parsers in any language can produce them as JSON.

pub mod ast;
pub mod visitor;

pub use ast::*;
pub use visitor::*;
