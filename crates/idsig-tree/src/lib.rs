//! Declaration tree model for the idsig mangler.
//!
//! The mangler never owns declarations. It reads them through the
//! [`DeclarationTree`] trait, which any host tree can implement. [`DeclArena`]
//! is the reference implementation: a flat arena indexed by [`DeclId`] with
//! weak parent links, used by the CLI, the tests and the benchmarks.

pub mod arena;
pub mod decl;
pub mod tree;
pub mod types;

pub use arena::DeclArena;
pub use decl::{
    AccessorKind, ClassKind, DeclId, DeclKind, Declaration, FragmentId, PackageFragment, Parent,
};
pub use tree::DeclarationTree;
pub use types::{Classifier, StructuralType, TypeArgument, Variance};
