//! Export checking.
//!
//! A declaration is exported when code in another module can address it.
//! Rules are applied per declaration in priority order; when none of them
//! settles the question the answer is the parent's.

use crate::hooks::ManglerHooks;
use idsig_tree::{ClassKind, DeclId, DeclKind, DeclarationTree, Parent};

/// Outcome of checking a single declaration without its ancestors.
enum Verdict {
    Exported,
    Hidden,
    /// Exported iff this other declaration is (singleton constructors).
    SameAs(DeclId),
    /// Exported iff the parent is.
    AskParent(Parent),
}

pub struct ExportChecker<'a, T: DeclarationTree + ?Sized> {
    tree: &'a T,
    hooks: &'a dyn ManglerHooks<T>,
}

impl<'a, T: DeclarationTree + ?Sized> ExportChecker<'a, T> {
    pub fn new(tree: &'a T, hooks: &'a dyn ManglerHooks<T>) -> Self {
        Self { tree, hooks }
    }

    /// Whether `id` belongs to the module's externally addressable surface.
    pub fn is_exported(&self, id: DeclId) -> bool {
        let mut current = id;
        loop {
            match self.check_own(current) {
                Verdict::Exported => return true,
                Verdict::Hidden => return false,
                Verdict::SameAs(other) => current = other,
                Verdict::AskParent(Parent::Package(_)) => return true,
                Verdict::AskParent(Parent::Declaration(parent)) => current = parent,
            }
        }
    }

    fn check_own(&self, id: DeclId) -> Verdict {
        let tree = self.tree;
        let kind = tree.kind(id);

        // Only reachable from inside their function body.
        if kind.is_body_local() {
            return Verdict::Hidden;
        }

        if self.hooks.is_platform_specific_exported(tree, id) || tree.is_always_exported(id) {
            return Verdict::Exported;
        }

        let parent = tree.parent(id);
        match kind {
            DeclKind::TypeAlias if matches!(parent, Parent::Package(_)) => {
                return Verdict::Exported;
            }
            DeclKind::Class(ClassKind::Anonymous) => return Verdict::Hidden,
            DeclKind::Class(_) if self.is_callable_parent(parent) => return Verdict::Hidden,
            DeclKind::Constructor => {
                if let Some(class) = parent.as_declaration()
                    && tree.class_kind(class).is_some_and(ClassKind::is_singleton)
                {
                    // The constructor is reachable wherever the singleton is.
                    return Verdict::SameAs(class);
                }
            }
            DeclKind::PropertyAccessor(_) | DeclKind::Field => {
                if tree
                    .corresponding_property(id)
                    .is_some_and(|property| tree.is_always_exported(property))
                {
                    return Verdict::Exported;
                }
            }
            _ => {}
        }

        if has_own_visibility(kind) && !tree.visibility(id).is_publicly_visible() {
            return Verdict::Hidden;
        }

        Verdict::AskParent(parent)
    }

    fn is_callable_parent(&self, parent: Parent) -> bool {
        parent
            .as_declaration()
            .is_some_and(|p| self.tree.kind(p).is_callable())
    }
}

/// Type parameters and enum entries take their visibility from their
/// container.
const fn has_own_visibility(kind: DeclKind) -> bool {
    !matches!(kind, DeclKind::TypeParameter | DeclKind::EnumEntry)
}

#[cfg(test)]
#[path = "../tests/export_tests.rs"]
mod tests;
