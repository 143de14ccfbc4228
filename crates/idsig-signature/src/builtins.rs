//! Runtime intrinsics with fixed signatures.

use crate::signature::Signature;
use idsig_common::hash_mangle;
use idsig_tree::DeclId;
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

/// Intrinsic declarations and the built-in signatures they are preloaded
/// with. Iteration follows registration order.
#[derive(Clone, Debug, Default)]
pub struct BuiltinRegistry {
    entries: IndexMap<DeclId, Signature, FxBuildHasher>,
}

impl BuiltinRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `decl` under an explicit id. Returns the signature it
    /// replaced, if any.
    pub fn register(&mut self, decl: DeclId, mangle: impl Into<String>, id: i64) -> Option<Signature> {
        self.entries.insert(decl, Signature::built_in(mangle, id))
    }

    /// Register `decl` with an id derived from its mangle, so every module
    /// computing the same mangle agrees on it.
    pub fn register_mangle(&mut self, decl: DeclId, mangle: impl Into<String>) -> i64 {
        let mangle = mangle.into();
        let id = hash_mangle(&mangle);
        self.entries.insert(decl, Signature::built_in(mangle, id));
        id
    }

    pub fn get(&self, decl: DeclId) -> Option<&Signature> {
        self.entries.get(&decl)
    }

    pub fn contains(&self, decl: DeclId) -> bool {
        self.entries.contains_key(&decl)
    }

    pub fn iter(&self) -> impl Iterator<Item = (DeclId, &Signature)> {
        self.entries.iter().map(|(&decl, signature)| (decl, signature))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "../tests/builtins_tests.rs"]
mod tests;
