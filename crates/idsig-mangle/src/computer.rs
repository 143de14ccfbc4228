//! Recursive mangle computation.
//!
//! The computer walks a declaration and its parent chain, appending to a
//! single buffer. Parents are visited in raw mode (no kind prefix), then the
//! declaration appends its own segment. Type parameter containers are
//! recorded outermost first as the walk returns from each parent, so a type
//! parameter reference encodes as `<container-index>:<parameter-index>`.
//!
//! Mangles of class references inside types are computed by a fork: a fresh
//! computer with its own buffer, empty container list and no expect state,
//! whose output is appended to the parent's buffer.
//!
//! ```text
//! kfun:org.sample.Box.#unwrap$moduleA(){}0:0
//! ^^^^ ^^^^^^^^^^^^^^  ^^^^^^ ^^^^^^^ ^^ ^^^
//! kind parent path     name   salt    |  return type (Box's T)
//!                                     params / type params
//! ```

use crate::error::MangleError;
use crate::hooks::ManglerHooks;
use crate::type_encoder::{ClassifierEncoder, encode_type};
use idsig_common::Visibility;
use idsig_common::names::{
    INVOKE_NAME, function_class_symbol_name, function_invoke_symbol_name, is_function_class_name,
    module_salt,
};
use idsig_tree::{AccessorKind, DeclId, DeclKind, DeclarationTree, Parent, StructuralType};
use smallvec::SmallVec;
use std::fmt::Write;
use tracing::trace;

const EXPECT_MARK: &str = "#expect";

/// Separates a type parameter's index from its bounds.
const TYPE_PARAMETER_SEPARATOR: char = '§';

pub struct MangleComputer<'a, T: DeclarationTree + ?Sized> {
    tree: &'a T,
    hooks: &'a dyn ManglerHooks<T>,
    builder: String,
    /// Enclosing type parameter containers, outermost first.
    type_parameter_containers: SmallVec<[DeclId; 4]>,
    /// Sticky: set once any visited declaration is `expect`.
    is_real_expect: bool,
}

impl<'a, T: DeclarationTree + ?Sized> MangleComputer<'a, T> {
    pub fn new(tree: &'a T, hooks: &'a dyn ManglerHooks<T>) -> Self {
        Self {
            tree,
            hooks,
            builder: String::with_capacity(128),
            type_parameter_containers: SmallVec::new(),
            is_real_expect: false,
        }
    }

    /// A fresh computer over the same tree, used for nested class references.
    pub fn fork(&self) -> Self {
        Self::new(self.tree, self.hooks)
    }

    /// Compute the mangle of `id`.
    ///
    /// With `include_signature` the kind prefix and the `#expect` suffix are
    /// emitted; without it the result is the raw path used for parents and
    /// class references.
    pub fn compute_mangle(mut self, id: DeclId, include_signature: bool) -> Result<String, MangleError> {
        self.visit(id, include_signature)?;
        trace!(
            decl = %id,
            include_signature,
            mangle = %self.builder,
            "MangleComputer::compute_mangle"
        );
        Ok(self.builder)
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    fn visit(&mut self, id: DeclId, data: bool) -> Result<(), MangleError> {
        match self.tree.kind(id) {
            DeclKind::Class(_) => self.visit_class(id, data),
            DeclKind::Function => self.visit_function(id, data),
            DeclKind::Constructor => self.mangle_function(id, true, data),
            DeclKind::Property => self.visit_property(id, data),
            DeclKind::PropertyAccessor(kind) => self.mangle_property_accessor(id, kind, data),
            DeclKind::Field => self.mangle_simple_declaration(id, "kfield", data),
            DeclKind::TypeAlias => self.mangle_expectable_declaration(id, "ktypealias", data),
            DeclKind::EnumEntry => self.mangle_expectable_declaration(id, "kenumentry", data),
            DeclKind::TypeParameter => self.visit_type_parameter(id, data),
            kind @ (DeclKind::ValueParameter
            | DeclKind::ReceiverParameter
            | DeclKind::Variable
            | DeclKind::AnonymousInitializer
            | DeclKind::LocalDelegatedProperty) => Err(MangleError::NotAMangleRoot {
                kind,
                rendered: self.tree.render(id),
            }),
        }
    }

    fn visit_parent(&mut self, parent: Parent) -> Result<(), MangleError> {
        match parent {
            Parent::Package(fragment) => {
                let fq_name = self.tree.package_fq_name(fragment);
                if !fq_name.is_root() {
                    self.builder.push_str(fq_name.as_str());
                }
                Ok(())
            }
            Parent::Declaration(parent) => self.visit(parent, false),
        }
    }

    /// Write `prefix:` when `add` is set. Returns the buffer length after the
    /// prefix so callers can tell whether the parent wrote anything.
    fn add_prefix(&mut self, prefix: &str, add: bool) -> usize {
        if add {
            self.builder.push_str(prefix);
            self.builder.push(':');
        }
        self.builder.len()
    }

    fn add_separator_since(&mut self, prefix_len: usize) {
        if self.builder.len() != prefix_len {
            self.builder.push('.');
        }
    }

    fn add_expect_suffix(&mut self, data: bool) {
        if data && self.is_real_expect {
            self.builder.push_str(EXPECT_MARK);
        }
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    fn mangle_simple_declaration(
        &mut self,
        id: DeclId,
        prefix: &str,
        data: bool,
    ) -> Result<(), MangleError> {
        let prefix_len = self.add_prefix(prefix, data);
        self.visit_parent(self.tree.parent(id))?;
        self.add_separator_since(prefix_len);
        self.builder.push_str(self.tree.name(id));
        Ok(())
    }

    /// Type aliases and enum entries carry `#expect` like classes do.
    fn mangle_expectable_declaration(
        &mut self,
        id: DeclId,
        prefix: &str,
        data: bool,
    ) -> Result<(), MangleError> {
        self.is_real_expect |= self.tree.is_expect(id);
        self.mangle_simple_declaration(id, prefix, data)?;
        self.add_expect_suffix(data);
        Ok(())
    }

    fn visit_class(&mut self, id: DeclId, data: bool) -> Result<(), MangleError> {
        if data && self.is_built_in_function_class(id) {
            self.builder
                .push_str(&function_class_symbol_name(self.tree.name(id)));
            return Ok(());
        }

        self.is_real_expect |= self.tree.is_expect(id);
        self.mangle_simple_declaration(id, "kclass", data)?;
        self.type_parameter_containers.push(id);
        self.add_expect_suffix(data);
        Ok(())
    }

    fn visit_function(&mut self, id: DeclId, data: bool) -> Result<(), MangleError> {
        self.is_real_expect |= self.tree.is_expect(id);

        if let Parent::Declaration(class) = self.tree.parent(id)
            && self.tree.name(id) == INVOKE_NAME
            && self.is_built_in_function_class(class)
        {
            self.builder
                .push_str(&function_invoke_symbol_name(self.tree.name(class)));
            return Ok(());
        }

        if let Some(name) = self.hooks.platform_specific_function_name(self.tree, id) {
            self.builder.push_str(&name);
            return Ok(());
        }

        self.mangle_function(id, false, data)
    }

    fn mangle_function(&mut self, id: DeclId, is_ctor: bool, data: bool) -> Result<(), MangleError> {
        self.is_real_expect |= self.tree.is_expect(id);

        let prefix_len = self.add_prefix("kfun", data);
        self.visit_parent(self.tree.parent(id))?;
        self.type_parameter_containers.push(id);
        self.add_separator_since(prefix_len);

        self.builder.push('#');
        self.builder.push_str(self.tree.name(id));
        if self.tree.visibility(id) == Visibility::Internal {
            self.builder.push('$');
            self.builder.push_str(module_salt(self.tree.module_of(id)));
        }

        self.mangle_signature(id, is_ctor)?;
        self.add_expect_suffix(data);
        Ok(())
    }

    fn visit_property(&mut self, id: DeclId, data: bool) -> Result<(), MangleError> {
        let tree = self.tree;
        let receiver = tree
            .getter(id)
            .and_then(|getter| tree.extension_receiver(getter))
            .or_else(|| tree.setter(id).and_then(|setter| tree.extension_receiver(setter)));

        let prefix_len = self.add_prefix("kprop", data);
        self.is_real_expect |= tree.is_expect(id);
        self.visit_parent(tree.parent(id))?;
        self.type_parameter_containers.push(id);
        self.add_separator_since(prefix_len);

        if let Some(receiver) = receiver {
            self.builder.push('@');
            self.mangle_value_parameter(receiver)?;
        }
        self.builder.push_str(tree.name(id));
        self.add_expect_suffix(data);
        Ok(())
    }

    fn mangle_property_accessor(
        &mut self,
        id: DeclId,
        kind: AccessorKind,
        data: bool,
    ) -> Result<(), MangleError> {
        let tree = self.tree;
        self.is_real_expect |= tree.is_expect(id);
        let property = tree
            .corresponding_property(id)
            .ok_or_else(|| MangleError::MissingCorrespondingProperty {
                rendered: tree.render(id),
            })?;

        let prefix_len = self.add_prefix("kfun", data);
        self.is_real_expect |= tree.is_expect(property);
        self.visit_parent(tree.parent(property))?;
        self.type_parameter_containers.push(property);
        self.add_separator_since(prefix_len);

        self.builder.push('#');
        self.builder.push_str(tree.name(property));
        if let Some(receiver) = tree.extension_receiver(id) {
            self.builder.push('@');
            self.mangle_value_parameter(receiver)?;
        }
        self.builder.push_str(match kind {
            AccessorKind::Getter => ":getter:",
            AccessorKind::Setter => ":setter:",
        });
        self.add_expect_suffix(data);
        Ok(())
    }

    fn visit_type_parameter(&mut self, id: DeclId, data: bool) -> Result<(), MangleError> {
        self.add_prefix("ktypeparam", data);
        let container = self.effective_parent(id)?;
        self.visit(container, data)?;
        let _ = write!(self.builder, "@{}", self.tree.type_parameter_index(id));
        Ok(())
    }

    // =========================================================================
    // Signatures
    // =========================================================================

    fn mangle_signature(&mut self, id: DeclId, is_ctor: bool) -> Result<(), MangleError> {
        let tree = self.tree;

        if let Some(receiver) = tree.extension_receiver(id) {
            self.builder.push('@');
            self.mangle_value_parameter(receiver)?;
        }

        self.builder.push('(');
        for (i, &param) in tree.value_parameters(id).iter().enumerate() {
            if i > 0 {
                self.builder.push(';');
            }
            self.mangle_value_parameter(param)?;
        }
        self.builder.push(')');

        self.builder.push('{');
        for (i, &param) in tree.type_parameters(id).iter().enumerate() {
            if i > 0 {
                self.builder.push(';');
            }
            self.mangle_type_parameter(param)?;
        }
        self.builder.push('}');

        if !is_ctor
            && let Some(return_type) = tree.return_type(id)
            && !self.hooks.is_unit_type(tree, return_type)
        {
            self.mangle_type(return_type, id)?;
        }
        Ok(())
    }

    fn mangle_value_parameter(&mut self, param: DeclId) -> Result<(), MangleError> {
        let ty = self
            .tree
            .value_type(param)
            .ok_or_else(|| MangleError::UnexpectedType {
                shape: "<missing>".to_string(),
                rendered: self.tree.render(param),
            })?;
        self.mangle_type(ty, param)?;
        if self.tree.is_vararg(param) {
            self.builder.push_str("...");
        }
        Ok(())
    }

    fn mangle_type_parameter(&mut self, param: DeclId) -> Result<(), MangleError> {
        let _ = write!(
            self.builder,
            "{}{}<",
            self.tree.type_parameter_index(param),
            TYPE_PARAMETER_SEPARATOR
        );
        for (i, bound) in self.tree.super_types(param).iter().enumerate() {
            if i > 0 {
                self.builder.push('&');
            }
            self.mangle_type(bound, param)?;
        }
        self.builder.push('>');
        Ok(())
    }

    fn mangle_type(&mut self, ty: &StructuralType, owner: DeclId) -> Result<(), MangleError> {
        // Encode straight into our buffer; the encoder only reads the tree
        // and the container list.
        let mut out = std::mem::take(&mut self.builder);
        let result = encode_type(&mut out, ty, owner, &*self);
        self.builder = out;
        result
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    /// The declaration whose container index a type parameter refers to.
    /// Accessor type parameters belong to the property.
    fn effective_parent(&self, param: DeclId) -> Result<DeclId, MangleError> {
        let tree = self.tree;
        let Parent::Declaration(parent) = tree.parent(param) else {
            return Err(MangleError::UnexpectedTypeParameterParent {
                rendered: tree.render(param),
            });
        };
        match tree.kind(parent) {
            DeclKind::PropertyAccessor(_) => tree.corresponding_property(parent).ok_or_else(|| {
                MangleError::MissingCorrespondingProperty {
                    rendered: tree.render(parent),
                }
            }),
            DeclKind::Class(_)
            | DeclKind::Function
            | DeclKind::Constructor
            | DeclKind::Property
            | DeclKind::TypeAlias => Ok(parent),
            _ => Err(MangleError::UnexpectedTypeParameterParent {
                rendered: tree.render(param),
            }),
        }
    }

    fn is_built_in_function_class(&self, id: DeclId) -> bool {
        let tree = self.tree;
        if !matches!(tree.kind(id), DeclKind::Class(_)) {
            return false;
        }
        let Parent::Package(fragment) = tree.parent(id) else {
            return false;
        };
        let package = tree.package_fq_name(fragment).as_str();
        self.hooks.function_class_packages().contains(&package)
            && is_function_class_name(tree.name(id))
    }
}

impl<T: DeclarationTree + ?Sized> ClassifierEncoder for MangleComputer<'_, T> {
    fn encode_class(&self, out: &mut String, class: DeclId) -> Result<(), MangleError> {
        if !matches!(self.tree.kind(class), DeclKind::Class(_)) {
            return Err(MangleError::UnexpectedClassifier {
                rendered: self.tree.render(class),
            });
        }
        out.push_str(&self.fork().compute_mangle(class, false)?);
        Ok(())
    }

    fn encode_type_parameter(&self, out: &mut String, param: DeclId) -> Result<(), MangleError> {
        if self.tree.kind(param) != DeclKind::TypeParameter {
            return Err(MangleError::UnexpectedClassifier {
                rendered: self.tree.render(param),
            });
        }
        let container = self.effective_parent(param)?;
        let container_index = self
            .type_parameter_containers
            .iter()
            .position(|&c| c == container)
            .ok_or_else(|| MangleError::UnknownTypeParameterContainer {
                rendered: self.tree.render(param),
            })?;
        let _ = write!(
            out,
            "{}:{}",
            container_index,
            self.tree.type_parameter_index(param)
        );
        Ok(())
    }

    fn render(&self, id: DeclId) -> String {
        self.tree.render(id)
    }
}

#[cfg(test)]
#[path = "../tests/computer_tests.rs"]
mod tests;
