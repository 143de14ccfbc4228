// Common types - Fully qualified names, visibility, well-known names, mangle hashing
pub use idsig_common as common;
pub use idsig_common::{FqName, Visibility, hash_mangle};

// Declaration tree - The arena and the trait the mangler reads declarations through
pub use idsig_tree as tree;
pub use idsig_tree::{DeclArena, DeclId, DeclKind, Declaration, DeclarationTree, Parent, StructuralType};

// Mangling - Export checking and structural mangles
pub use idsig_mangle as mangle;
pub use idsig_mangle::{ExportChecker, MangleError, Mangler, ManglerHooks};

// Signatures - Public/file-local/built-in signatures and the per-module table
pub use idsig_signature as signature;
pub use idsig_signature::{
    BuiltinRegistry, PublicSignature, Signature, SignatureBuilder, SignatureError, SignatureTable,
};
