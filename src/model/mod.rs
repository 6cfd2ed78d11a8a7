//! Structural C++ API model - the canonical intermediate representation.
//!
//! The model is produced by an external header extractor (regex- or
//! clang-based) and exchanged as JSON. The diff engine treats it as an
//! immutable input: two [`ApiModel`] snapshots in, issues and a score out.
//!
//! Type tokens (return types, parameter types, enum member values, macro
//! values) are opaque strings compared by structural equality. The model
//! does not attempt semantic type equivalence.

mod api;
mod class;
mod enums;
mod function;
mod macros;

pub use api::ApiModel;
pub use class::{ClassDecl, FieldDecl};
pub use enums::{EnumDecl, EnumMember};
pub use function::{AccessLevel, FunctionDecl, Parameter};
pub use macros::MacroDecl;
