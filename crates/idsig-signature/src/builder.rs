//! Public signature construction.
//!
//! The builder walks a declaration's container chain structurally, collecting
//! the package name and the path segments, and asks the mangler for exactly
//! one hash: the full mangle of the declaration itself. Accessors also record
//! their own hash and fold the result under their property.

use crate::error::SignatureError;
use crate::flags::SignatureFlags;
use crate::signature::{PublicSignature, Signature};
use idsig_common::FqName;
use idsig_mangle::{MangleError, Mangler};
use idsig_tree::{DeclId, DeclKind, DeclarationTree, Parent};
use tracing::trace;

pub struct SignatureBuilder<'a, T: DeclarationTree + ?Sized> {
    mangler: Mangler<'a, T>,
    package_fqn: FqName,
    segments: Vec<String>,
    hash_id: Option<i64>,
    /// Hash of the accessor when building an accessor signature.
    hash_id_acc: Option<i64>,
    mask: SignatureFlags,
}

impl<'a, T: DeclarationTree + ?Sized> SignatureBuilder<'a, T> {
    pub fn new(mangler: Mangler<'a, T>) -> Self {
        Self {
            mangler,
            package_fqn: FqName::root(),
            segments: Vec::new(),
            hash_id: None,
            hash_id_acc: None,
            mask: SignatureFlags::empty(),
        }
    }

    /// Build the public signature of an exported declaration.
    ///
    /// Exportedness is not checked here; the signature table does that.
    pub fn build_signature(&mut self, id: DeclId) -> Result<Signature, SignatureError> {
        self.reset();
        let target = self.mangler.resolve_fake_override(id);
        self.visit_root(target)?;
        let signature = self.build();
        trace!(decl = %id, signature = %signature, "SignatureBuilder::build_signature");
        Ok(signature)
    }

    fn reset(&mut self) {
        self.package_fqn = FqName::root();
        self.segments.clear();
        self.hash_id = None;
        self.hash_id_acc = None;
        self.mask = SignatureFlags::empty();
    }

    fn build(&mut self) -> Signature {
        let mask = self.mask.bits();
        let path = FqName::from_segments(&self.segments);
        match self.hash_id_acc.take() {
            None => Signature::Public(PublicSignature::new(
                self.package_fqn.clone(),
                path,
                self.hash_id,
                mask,
            )),
            Some(accessor_id) => {
                let accessor =
                    PublicSignature::new(self.package_fqn.clone(), path, Some(accessor_id), mask);
                self.segments.pop();
                let property = self.build();
                Signature::Accessor {
                    property: Box::new(property),
                    accessor,
                }
            }
        }
    }

    fn set_expected(&mut self, is_expect: bool) {
        self.mask |= SignatureFlags::encode(SignatureFlags::IS_EXPECT, is_expect);
    }

    fn visit_root(&mut self, id: DeclId) -> Result<(), SignatureError> {
        let tree = self.mangler.tree();
        match tree.kind(id) {
            DeclKind::Class(_) => {
                self.visit_container(id);
                Ok(())
            }
            DeclKind::Function
            | DeclKind::Constructor
            | DeclKind::Property
            | DeclKind::Field
            | DeclKind::TypeAlias
            | DeclKind::EnumEntry
            | DeclKind::TypeParameter => {
                self.hash_id = Some(self.mangler.hashed_mangle(id)?);
                self.visit_container(id);
                Ok(())
            }
            DeclKind::PropertyAccessor(_) => {
                self.hash_id_acc = Some(self.mangler.hashed_mangle(id)?);
                let property = tree.corresponding_property(id).ok_or_else(|| {
                    MangleError::MissingCorrespondingProperty {
                        rendered: tree.render(id),
                    }
                })?;
                self.visit_root(property)?;
                self.set_expected(tree.is_expect(id));
                self.segments.push(tree.name(id).to_string());
                Ok(())
            }
            kind @ (DeclKind::ValueParameter
            | DeclKind::ReceiverParameter
            | DeclKind::Variable
            | DeclKind::AnonymousInitializer
            | DeclKind::LocalDelegatedProperty) => Err(MangleError::NotAMangleRoot {
                kind,
                rendered: tree.render(id),
            }
            .into()),
        }
    }

    /// Record `id` and its containers as path segments.
    ///
    /// Type parameters contribute `<index>` instead of their name.
    fn visit_container(&mut self, id: DeclId) {
        let tree = self.mangler.tree();
        self.set_expected(tree.is_expect(id));
        match tree.parent(id) {
            Parent::Package(fragment) => {
                self.package_fqn = tree.package_fq_name(fragment).clone();
            }
            Parent::Declaration(parent) => self.visit_container(parent),
        }
        let segment = match tree.kind(id) {
            DeclKind::TypeParameter => format!("<{}>", tree.type_parameter_index(id)),
            _ => tree.name(id).to_string(),
        };
        self.segments.push(segment);
    }
}

#[cfg(test)]
#[path = "../tests/builder_tests.rs"]
mod tests;
