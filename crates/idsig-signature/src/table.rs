//! Per-module signature table.
//!
//! The table memoizes the signature of every declaration it is asked about.
//! Exported declarations get a public signature from the
//! [`SignatureBuilder`]; everything else gets a file-local signature nested
//! under its container's signature with a fresh local index.
//!
//! A table belongs to one module compilation and is not shared across
//! threads. Incremental drivers seed `start_index` with the previous file's
//! [`SignatureTable::local_index`] so local ids never repeat.

use crate::builder::SignatureBuilder;
use crate::builtins::BuiltinRegistry;
use crate::error::SignatureError;
use crate::signature::{PublicSignature, Signature};
use idsig_mangle::Mangler;
use idsig_tree::{DeclId, DeclKind, DeclarationTree, Parent};
use indexmap::IndexMap;
use rustc_hash::{FxBuildHasher, FxHashMap};
use tracing::{debug, trace, warn};

/// Two declarations that produced the same public signature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignatureClash {
    pub signature: Signature,
    /// Declaration that claimed the signature first.
    pub first: DeclId,
    pub second: DeclId,
    pub first_mangle: String,
    pub second_mangle: String,
}

pub struct SignatureTable<'a, T: DeclarationTree + ?Sized> {
    mangler: Mangler<'a, T>,
    builder: SignatureBuilder<'a, T>,
    builtins: BuiltinRegistry,
    local_index: i64,
    /// Declaration -> signature, in the order signatures were assigned.
    table: IndexMap<DeclId, Signature, FxBuildHasher>,
    by_signature: FxHashMap<Signature, DeclId>,
    clashes: Vec<SignatureClash>,
}

impl<'a, T: DeclarationTree + ?Sized> SignatureTable<'a, T> {
    pub fn new(mangler: Mangler<'a, T>, start_index: i64) -> Self {
        Self::with_builtins(mangler, start_index, BuiltinRegistry::new())
    }

    /// Table preloaded with the built-in signatures of `builtins`.
    pub fn with_builtins(mangler: Mangler<'a, T>, start_index: i64, builtins: BuiltinRegistry) -> Self {
        debug!(start_index, builtins = builtins.len(), "SignatureTable::new");
        let mut table = Self {
            mangler,
            builder: SignatureBuilder::new(mangler),
            builtins: BuiltinRegistry::new(),
            local_index: start_index,
            table: IndexMap::default(),
            by_signature: FxHashMap::default(),
            clashes: Vec::new(),
        };
        for (decl, signature) in builtins.iter() {
            table.commit(decl, signature.clone());
        }
        table.builtins = builtins;
        table
    }

    pub fn mangler(&self) -> Mangler<'a, T> {
        self.mangler
    }

    pub fn builtins(&self) -> &BuiltinRegistry {
        &self.builtins
    }

    /// Last local index handed out (the seed if none was).
    pub fn local_index(&self) -> i64 {
        self.local_index
    }

    pub fn is_exported(&self, id: DeclId) -> bool {
        self.mangler
            .is_exported(self.mangler.resolve_fake_override(id))
    }

    /// Signature of `id`, computed on first request.
    pub fn signature_of(&mut self, id: DeclId) -> Result<Signature, SignatureError> {
        let target = self.mangler.resolve_fake_override(id);
        if let Some(signature) = self.table.get(&target) {
            return Ok(signature.clone());
        }

        let signature = if self.mangler.is_exported(target) {
            self.builder.build_signature(target)?
        } else {
            self.compose_file_local(target)?
        };
        self.commit(target, signature.clone());
        Ok(signature)
    }

    /// Signature of a declaration that must be exported.
    pub fn public_signature(&mut self, id: DeclId) -> Result<Signature, SignatureError> {
        self.assert_public(id)?;
        self.signature_of(id)
    }

    /// Signature of a declaration that must not be exported.
    pub fn file_local_signature(&mut self, id: DeclId) -> Result<Signature, SignatureError> {
        self.assert_file_local(id)?;
        self.signature_of(id)
    }

    pub fn assert_public(&self, id: DeclId) -> Result<(), SignatureError> {
        if self.is_exported(id) || self.builtins.contains(id) {
            Ok(())
        } else {
            Err(SignatureError::NotExported {
                rendered: self.mangler.tree().render(id),
            })
        }
    }

    pub fn assert_file_local(&self, id: DeclId) -> Result<(), SignatureError> {
        if self.is_exported(id) || self.builtins.contains(id) {
            Err(SignatureError::UnexpectedlyExported {
                rendered: self.mangler.tree().render(id),
            })
        } else {
            Ok(())
        }
    }

    /// Declaration a signature was assigned to, if this table assigned it.
    pub fn declaration_of(&self, signature: &Signature) -> Option<DeclId> {
        self.by_signature.get(signature).copied()
    }

    /// Every assigned signature, in assignment order.
    pub fn entries(&self) -> impl Iterator<Item = (DeclId, &Signature)> {
        self.table.iter().map(|(&decl, signature)| (decl, signature))
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn clashes(&self) -> &[SignatureClash] {
        &self.clashes
    }

    fn compose_file_local(&mut self, id: DeclId) -> Result<Signature, SignatureError> {
        let tree = self.mangler.tree();
        let container = match tree.kind(id) {
            DeclKind::PropertyAccessor(_) | DeclKind::Field => tree
                .corresponding_property(id)
                .map_or_else(|| tree.parent(id), Parent::Declaration),
            _ => tree.parent(id),
        };

        let container = match container {
            Parent::Package(fragment) => Signature::Public(PublicSignature::package(
                tree.package_fq_name(fragment).clone(),
            )),
            Parent::Declaration(parent) => self.signature_of(parent)?,
        };

        self.local_index += 1;
        debug!(
            decl = %id,
            local_id = self.local_index,
            container = %container,
            "assigned file-local signature"
        );
        Ok(Signature::file_local(container, self.local_index))
    }

    fn commit(&mut self, id: DeclId, signature: Signature) {
        if signature.is_public()
            && let Some(&existing) = self.by_signature.get(&signature)
            && existing != id
        {
            let first_mangle = self
                .mangler
                .mangle(existing)
                .unwrap_or_else(|err| err.to_string());
            let second_mangle = self.mangler.mangle(id).unwrap_or_else(|err| err.to_string());
            warn!(
                signature = %signature,
                first = %existing,
                second = %id,
                %first_mangle,
                %second_mangle,
                "signature clash"
            );
            self.clashes.push(SignatureClash {
                signature: signature.clone(),
                first: existing,
                second: id,
                first_mangle,
                second_mangle,
            });
        }

        trace!(decl = %id, signature = %signature, "SignatureTable::commit");
        self.by_signature.entry(signature.clone()).or_insert(id);
        self.table.insert(id, signature);
    }
}

#[cfg(test)]
#[path = "../tests/table_tests.rs"]
mod tests;
