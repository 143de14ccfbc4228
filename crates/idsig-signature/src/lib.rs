//! Cross-module declaration signatures.
//!
//! A [`Signature`] is what a serialized library stores to refer to a
//! declaration: exported declarations get a [`PublicSignature`] built from
//! their package, their path and the hash of their mangle; everything else
//! gets a file-local signature nested under its container. The
//! [`SignatureTable`] assigns and memoizes them for one module.

mod builder;
mod builtins;
mod error;
mod flags;
mod signature;
mod table;

pub use builder::SignatureBuilder;
pub use builtins::BuiltinRegistry;
pub use error::SignatureError;
pub use flags::SignatureFlags;
pub use signature::{PublicSignature, Signature};
pub use table::{SignatureClash, SignatureTable};
