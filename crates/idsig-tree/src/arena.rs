//! Arena storage for declarations.
//!
//! Declarations are stored top-down in one `Vec` and refer to each other by
//! [`DeclId`]. Parent links are plain indices, so the tree never owns a cycle.

use crate::decl::{AccessorKind, DeclId, DeclKind, Declaration, FragmentId, PackageFragment, Parent};
use idsig_common::FqName;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Flat storage for the declarations of one or more modules.
///
/// ## Usage
///
/// ```ignore
/// let mut arena = DeclArena::new();
/// let pkg = arena.add_fragment("org.sample", "main");
/// let class = arena.alloc(Declaration::class("Box", Parent::Package(pkg)));
/// let t = arena.alloc(Declaration::type_parameter("T", class));
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclArena {
    #[serde(default)]
    fragments: Vec<PackageFragment>,
    #[serde(default)]
    declarations: Vec<Declaration>,
}

impl DeclArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the fragment of package `fq_name` compiled in `module`.
    pub fn add_fragment(&mut self, fq_name: &str, module: &str) -> FragmentId {
        let id = FragmentId(self.fragments.len() as u32);
        self.fragments.push(PackageFragment {
            fq_name: FqName::new(fq_name),
            module: module.to_string(),
        });
        id
    }

    /// Store a declaration and link it into its owner.
    ///
    /// - type parameters are appended to the owner's type parameters and get
    ///   their index from their position,
    /// - value parameters are appended to the owner's value parameters,
    /// - receiver parameters become the owner's extension receiver,
    /// - accessors become the getter or setter of their property.
    pub fn alloc(&mut self, mut decl: Declaration) -> DeclId {
        let id = DeclId(self.declarations.len() as u32);
        let owner = decl.parent.as_declaration();

        match decl.kind {
            DeclKind::TypeParameter => {
                if let Some(owner) = owner.and_then(|o| self.declarations.get_mut(o.index())) {
                    decl.index = owner.type_parameters.len() as u32;
                    owner.type_parameters.push(id);
                }
            }
            DeclKind::ValueParameter => {
                if let Some(owner) = owner.and_then(|o| self.declarations.get_mut(o.index())) {
                    owner.value_parameters.push(id);
                }
            }
            DeclKind::ReceiverParameter => {
                if let Some(owner) = owner.and_then(|o| self.declarations.get_mut(o.index())) {
                    owner.extension_receiver = Some(id);
                }
            }
            DeclKind::PropertyAccessor(kind) => {
                if let Some(property) = decl
                    .corresponding_property
                    .and_then(|p| self.declarations.get_mut(p.index()))
                {
                    match kind {
                        AccessorKind::Getter => property.getter = Some(id),
                        AccessorKind::Setter => property.setter = Some(id),
                    }
                }
            }
            _ => {}
        }

        trace!(decl_id = id.0, kind = ?decl.kind, name = %decl.name, "DeclArena::alloc");
        self.declarations.push(decl);
        id
    }

    /// Add a getter for `property`, sharing its parent and visibility and
    /// returning its type.
    pub fn add_getter(&mut self, property: DeclId) -> DeclId {
        let accessor = self.accessor_for(property, AccessorKind::Getter);
        self.alloc(accessor)
    }

    /// Add a setter for `property`, sharing its parent and visibility. The
    /// setter gets a single value parameter of the property's type.
    pub fn add_setter(&mut self, property: DeclId) -> DeclId {
        let accessor = self.accessor_for(property, AccessorKind::Setter);
        let value_ty = self.declarations[property.index()].ty.clone();
        let setter = self.alloc(accessor);
        if let Some(ty) = value_ty {
            self.alloc(Declaration::value_parameter("<set-?>", setter, ty));
        }
        setter
    }

    fn accessor_for(&self, property: DeclId, kind: AccessorKind) -> Declaration {
        let prop = &self.declarations[property.index()];
        let mut accessor = Declaration::accessor(kind, property, &prop.name, prop.parent)
            .with_visibility(prop.visibility)
            .with_expect(prop.is_expect);
        if kind == AccessorKind::Getter {
            accessor.return_type = prop.ty.clone();
        }
        accessor
    }

    #[inline]
    pub fn get(&self, id: DeclId) -> Option<&Declaration> {
        self.declarations.get(id.index())
    }

    /// Declaration `id`; ids always come from this arena.
    #[inline]
    pub(crate) fn decl(&self, id: DeclId) -> &Declaration {
        &self.declarations[id.index()]
    }

    #[inline]
    pub(crate) fn fragment_ref(&self, id: FragmentId) -> &PackageFragment {
        &self.fragments[id.index()]
    }

    #[inline]
    pub fn get_mut(&mut self, id: DeclId) -> Option<&mut Declaration> {
        self.declarations.get_mut(id.index())
    }

    #[inline]
    pub fn fragment(&self, id: FragmentId) -> Option<&PackageFragment> {
        self.fragments.get(id.index())
    }

    /// Iterate over all declarations in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (DeclId, &Declaration)> {
        self.declarations
            .iter()
            .enumerate()
            .map(|(i, d)| (DeclId(i as u32), d))
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Find the first declaration named `name` directly under `parent`.
    pub fn find_child(&self, parent: Parent, name: &str) -> Option<DeclId> {
        self.iter()
            .find(|(_, d)| d.parent == parent && d.name == name)
            .map(|(id, _)| id)
    }
}

#[cfg(test)]
#[path = "../tests/arena_tests.rs"]
mod tests;
