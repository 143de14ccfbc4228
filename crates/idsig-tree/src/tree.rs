//! Read-only view of a declaration tree.
//!
//! The export checker, the mangle computer and the signature builder are
//! written once against this trait. A host compiler with its own declaration
//! representation implements it instead of converting into [`DeclArena`].
//!
//! [`DeclArena`]: crate::DeclArena

use crate::arena::DeclArena;
use crate::decl::{ClassKind, DeclId, DeclKind, FragmentId, Parent};
use crate::types::StructuralType;
use idsig_common::{FqName, Visibility};
use std::fmt::Write;

pub trait DeclarationTree {
    fn kind(&self, id: DeclId) -> DeclKind;
    fn name(&self, id: DeclId) -> &str;
    fn parent(&self, id: DeclId) -> Parent;
    fn visibility(&self, id: DeclId) -> Visibility;
    fn is_expect(&self, id: DeclId) -> bool;
    /// Published-API style marker.
    fn is_always_exported(&self, id: DeclId) -> bool;

    fn type_parameters(&self, id: DeclId) -> &[DeclId];
    fn value_parameters(&self, id: DeclId) -> &[DeclId];
    fn extension_receiver(&self, id: DeclId) -> Option<DeclId>;
    fn return_type(&self, id: DeclId) -> Option<&StructuralType>;
    /// Type of a parameter, receiver, field, property or variable.
    fn value_type(&self, id: DeclId) -> Option<&StructuralType>;
    fn is_vararg(&self, id: DeclId) -> bool;

    fn type_parameter_index(&self, id: DeclId) -> u32;
    fn super_types(&self, id: DeclId) -> &[StructuralType];

    fn corresponding_property(&self, id: DeclId) -> Option<DeclId>;
    fn getter(&self, id: DeclId) -> Option<DeclId>;
    fn setter(&self, id: DeclId) -> Option<DeclId>;
    fn fake_override_of(&self, id: DeclId) -> Option<DeclId>;

    fn package_fq_name(&self, fragment: FragmentId) -> &FqName;
    fn module_name(&self, fragment: FragmentId) -> &str;

    // -------------------------------------------------------------------------
    // Provided
    // -------------------------------------------------------------------------

    fn class_kind(&self, id: DeclId) -> Option<ClassKind> {
        match self.kind(id) {
            DeclKind::Class(kind) => Some(kind),
            _ => None,
        }
    }

    /// Package fragment reached by walking up the parents of `id`.
    fn fragment_of(&self, id: DeclId) -> FragmentId {
        let mut current = id;
        loop {
            match self.parent(current) {
                Parent::Package(fragment) => return fragment,
                Parent::Declaration(parent) => current = parent,
            }
        }
    }

    /// Name of the module that compiled `id`.
    fn module_of(&self, id: DeclId) -> &str {
        self.module_name(self.fragment_of(id))
    }

    /// Package name followed by the names of every declaration on the path.
    fn fq_name_of(&self, id: DeclId) -> FqName {
        let mut names = vec![self.name(id)];
        let mut current = id;
        let fragment = loop {
            match self.parent(current) {
                Parent::Package(fragment) => break fragment,
                Parent::Declaration(parent) => {
                    names.push(self.name(parent));
                    current = parent;
                }
            }
        };
        let package = self.package_fq_name(fragment);
        FqName::from_segments(package.segments().chain(names.into_iter().rev()))
    }

    /// One-line dump of a declaration for diagnostics.
    fn render(&self, id: DeclId) -> String {
        let kind = self.kind(id);
        let mut out = String::new();
        let _ = write!(
            out,
            "{} name:{} visibility:{}",
            kind.tag(),
            self.name(id),
            self.visibility(id)
        );
        if let DeclKind::Class(class_kind) = kind {
            let _ = write!(out, " kind:{class_kind:?}");
        }
        if self.is_expect(id) {
            out.push_str(" [expect]");
        }
        if self.fake_override_of(id).is_some() {
            out.push_str(" [fake_override]");
        }
        match self.parent(id) {
            Parent::Package(fragment) => {
                let _ = write!(
                    out,
                    " parent:package '{}' module:{}",
                    self.package_fq_name(fragment),
                    self.module_name(fragment)
                );
            }
            Parent::Declaration(parent) => {
                let _ = write!(
                    out,
                    " parent:{} {}",
                    self.kind(parent).tag(),
                    self.name(parent)
                );
            }
        }
        out
    }
}

impl DeclarationTree for DeclArena {
    fn kind(&self, id: DeclId) -> DeclKind {
        self.decl(id).kind
    }

    fn name(&self, id: DeclId) -> &str {
        &self.decl(id).name
    }

    fn parent(&self, id: DeclId) -> Parent {
        self.decl(id).parent
    }

    fn visibility(&self, id: DeclId) -> Visibility {
        self.decl(id).visibility
    }

    fn is_expect(&self, id: DeclId) -> bool {
        self.decl(id).is_expect
    }

    fn is_always_exported(&self, id: DeclId) -> bool {
        self.decl(id).always_exported
    }

    fn type_parameters(&self, id: DeclId) -> &[DeclId] {
        &self.decl(id).type_parameters
    }

    fn value_parameters(&self, id: DeclId) -> &[DeclId] {
        &self.decl(id).value_parameters
    }

    fn extension_receiver(&self, id: DeclId) -> Option<DeclId> {
        self.decl(id).extension_receiver
    }

    fn return_type(&self, id: DeclId) -> Option<&StructuralType> {
        self.decl(id).return_type.as_ref()
    }

    fn value_type(&self, id: DeclId) -> Option<&StructuralType> {
        self.decl(id).ty.as_ref()
    }

    fn is_vararg(&self, id: DeclId) -> bool {
        self.decl(id).is_vararg
    }

    fn type_parameter_index(&self, id: DeclId) -> u32 {
        self.decl(id).index
    }

    fn super_types(&self, id: DeclId) -> &[StructuralType] {
        &self.decl(id).super_types
    }

    fn corresponding_property(&self, id: DeclId) -> Option<DeclId> {
        self.decl(id).corresponding_property
    }

    fn getter(&self, id: DeclId) -> Option<DeclId> {
        self.decl(id).getter
    }

    fn setter(&self, id: DeclId) -> Option<DeclId> {
        self.decl(id).setter
    }

    fn fake_override_of(&self, id: DeclId) -> Option<DeclId> {
        self.decl(id).fake_override_of
    }

    fn package_fq_name(&self, fragment: FragmentId) -> &FqName {
        &self.fragment_ref(fragment).fq_name
    }

    fn module_name(&self, fragment: FragmentId) -> &str {
        &self.fragment_ref(fragment).module
    }
}
