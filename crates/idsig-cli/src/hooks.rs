//! Platform hooks configured from the module description.

use idsig_common::FqName;
use idsig_mangle::ManglerHooks;
use idsig_tree::{Classifier, DeclArena, DeclKind, DeclarationTree, StructuralType};

/// Default hooks with a configurable unit type.
#[derive(Clone, Debug)]
pub struct UnitTypeHooks {
    unit: FqName,
}

impl UnitTypeHooks {
    pub fn new(unit_fq_name: &str) -> Self {
        Self {
            unit: FqName::new(unit_fq_name),
        }
    }

    pub fn unit(&self) -> &FqName {
        &self.unit
    }
}

impl ManglerHooks<DeclArena> for UnitTypeHooks {
    fn is_unit_type(&self, tree: &DeclArena, ty: &StructuralType) -> bool {
        match ty {
            StructuralType::Simple {
                classifier: Classifier::Class(class),
                nullable: false,
                arguments,
            } if arguments.is_empty() => {
                matches!(tree.kind(*class), DeclKind::Class(_))
                    && tree.fq_name_of(*class).as_str() == self.unit.as_str()
            }
            _ => false,
        }
    }
}
