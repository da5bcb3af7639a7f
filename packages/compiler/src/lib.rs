//! # typeport compiler
//!
//! Translates struct, interface and alias declarations into TypeScript.
//! Every top-level call writes into its own [`CompilerContext`] buffer, so
//! compiling is pure and repeatable.

mod comments;
mod context;
mod declarations;
mod error;
mod fields;
mod generics;
pub mod naming;
mod references;
pub mod tags;
mod translator;

pub use context::{CompileOptions, CompilerContext, Flavor, DEFAULT_MAX_DEPTH};
pub use declarations::{compile_declaration, compile_package, GENERATED_HEADER};
pub use error::{CompileError, CompileResult};
pub use references::{collect_qualified_names, unmapped_references};
pub use tags::{StructTag, TagDirectives};
pub use translator::{primitive_type, render_type};
