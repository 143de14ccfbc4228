//! Platform-specific hooks.
//!
//! Backends can override a handful of decisions without re-implementing the
//! visitor: a replacement mangle for functions with a platform name, extra
//! exported declarations, the unit type, and where function classes live.

use idsig_common::names::{DEFAULT_UNIT_FQN, FUNCTION_CLASS_PACKAGES};
use idsig_tree::{Classifier, DeclId, DeclKind, DeclarationTree, StructuralType};

pub trait ManglerHooks<T: DeclarationTree + ?Sized> {
    /// Replacement for the whole mangle of a function, if the platform names
    /// it itself.
    fn platform_specific_function_name(&self, _tree: &T, _function: DeclId) -> Option<String> {
        None
    }

    /// Declarations the platform always exports, regardless of visibility.
    fn is_platform_specific_exported(&self, _tree: &T, _decl: DeclId) -> bool {
        false
    }

    /// Whether `ty` is the unit type, whose return position is left out of
    /// function mangles.
    fn is_unit_type(&self, tree: &T, ty: &StructuralType) -> bool {
        match ty {
            StructuralType::Simple {
                classifier: Classifier::Class(class),
                nullable: false,
                arguments,
            } if arguments.is_empty() => {
                matches!(tree.kind(*class), DeclKind::Class(_))
                    && tree.fq_name_of(*class).as_str() == DEFAULT_UNIT_FQN
            }
            _ => false,
        }
    }

    /// Packages hosting the compiler-synthesized function classes.
    fn function_class_packages(&self) -> &[&str] {
        FUNCTION_CLASS_PACKAGES
    }
}

/// Hooks with every default in place.
#[derive(Copy, Clone, Debug, Default)]
pub struct DefaultManglerHooks;

impl<T: DeclarationTree + ?Sized> ManglerHooks<T> for DefaultManglerHooks {}
