//! Mangler facade.

use crate::computer::MangleComputer;
use crate::error::MangleError;
use crate::export::ExportChecker;
use crate::hooks::{DefaultManglerHooks, ManglerHooks};
use idsig_common::hash_mangle;
use idsig_tree::{DeclId, DeclarationTree};
use tracing::debug;

static DEFAULT_HOOKS: DefaultManglerHooks = DefaultManglerHooks;

/// Export checking and mangling over one declaration tree.
///
/// Fake overrides are resolved to the declaration they stand for before
/// mangling, so an inherited member has the same mangle in every subclass.
pub struct Mangler<'a, T: DeclarationTree + ?Sized> {
    tree: &'a T,
    hooks: &'a dyn ManglerHooks<T>,
}

impl<T: DeclarationTree + ?Sized> Clone for Mangler<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: DeclarationTree + ?Sized> Copy for Mangler<'_, T> {}

impl<'a, T: DeclarationTree + ?Sized> Mangler<'a, T> {
    pub fn new(tree: &'a T) -> Self {
        Self {
            tree,
            hooks: &DEFAULT_HOOKS,
        }
    }

    pub fn with_hooks(tree: &'a T, hooks: &'a dyn ManglerHooks<T>) -> Self {
        Self { tree, hooks }
    }

    pub fn tree(&self) -> &'a T {
        self.tree
    }

    pub fn hooks(&self) -> &'a dyn ManglerHooks<T> {
        self.hooks
    }

    pub fn export_checker(&self) -> ExportChecker<'a, T> {
        ExportChecker::new(self.tree, self.hooks)
    }

    pub fn is_exported(&self, id: DeclId) -> bool {
        self.export_checker().is_exported(id)
    }

    /// Follow fake-override links down to a real declaration.
    pub fn resolve_fake_override(&self, id: DeclId) -> DeclId {
        let mut current = id;
        while let Some(original) = self.tree.fake_override_of(current) {
            current = original;
        }
        current
    }

    pub fn compute_mangle(&self, id: DeclId, include_signature: bool) -> Result<String, MangleError> {
        let target = self.resolve_fake_override(id);
        if target != id {
            debug!(fake_override = %id, original = %target, "mangling fake override as its original");
        }
        MangleComputer::new(self.tree, self.hooks).compute_mangle(target, include_signature)
    }

    /// Full mangle: kind prefix, path, signature and `#expect` marker.
    pub fn mangle(&self, id: DeclId) -> Result<String, MangleError> {
        self.compute_mangle(id, true)
    }

    /// Path-only mangle, as used for parents and class references.
    pub fn raw_mangle(&self, id: DeclId) -> Result<String, MangleError> {
        self.compute_mangle(id, false)
    }

    /// 64-bit hash of the full mangle.
    pub fn hashed_mangle(&self, id: DeclId) -> Result<i64, MangleError> {
        Ok(hash_mangle(&self.mangle(id)?))
    }
}

#[cfg(test)]
#[path = "../tests/mangler_tests.rs"]
mod tests;
