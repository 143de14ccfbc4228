//! Resolved structural types.
//!
//! Types arrive from the type checker fully resolved: every classifier points
//! at a declaration in the tree, never at a display name.

use crate::decl::DeclId;
use serde::{Deserialize, Serialize};

/// What a simple type refers to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Classifier {
    Class(DeclId),
    TypeParameter(DeclId),
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Variance {
    #[default]
    Invariant,
    In,
    Out,
}

impl Variance {
    /// Label used in mangles. Invariant projections carry no label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Invariant => "",
            Self::In => "in",
            Self::Out => "out",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TypeArgument {
    /// `*`
    Star,
    Projection {
        #[serde(default)]
        variance: Variance,
        ty: StructuralType,
    },
}

impl TypeArgument {
    pub const fn invariant(ty: StructuralType) -> Self {
        Self::Projection {
            variance: Variance::Invariant,
            ty,
        }
    }

    pub const fn covariant(ty: StructuralType) -> Self {
        Self::Projection {
            variance: Variance::Out,
            ty,
        }
    }

    pub const fn contravariant(ty: StructuralType) -> Self {
        Self::Projection {
            variance: Variance::In,
            ty,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StructuralType {
    Simple {
        classifier: Classifier,
        #[serde(default)]
        nullable: bool,
        #[serde(default)]
        arguments: Vec<TypeArgument>,
    },
    /// Untyped value from a dynamically typed target.
    Dynamic,
    /// Unresolved type left behind by an upstream failure.
    Error,
}

impl StructuralType {
    pub const fn class(class: DeclId) -> Self {
        Self::Simple {
            classifier: Classifier::Class(class),
            nullable: false,
            arguments: Vec::new(),
        }
    }

    pub const fn type_parameter(param: DeclId) -> Self {
        Self::Simple {
            classifier: Classifier::TypeParameter(param),
            nullable: false,
            arguments: Vec::new(),
        }
    }

    /// Generic class application, e.g. `List<T>`.
    pub const fn generic(class: DeclId, arguments: Vec<TypeArgument>) -> Self {
        Self::Simple {
            classifier: Classifier::Class(class),
            nullable: false,
            arguments,
        }
    }

    /// Same type with the nullable flag set.
    pub fn nullable(self) -> Self {
        match self {
            Self::Simple {
                classifier,
                arguments,
                ..
            } => Self::Simple {
                classifier,
                nullable: true,
                arguments,
            },
            other => other,
        }
    }

    pub const fn classifier(&self) -> Option<Classifier> {
        match self {
            Self::Simple { classifier, .. } => Some(*classifier),
            Self::Dynamic | Self::Error => None,
        }
    }

    pub const fn is_nullable(&self) -> bool {
        matches!(self, Self::Simple { nullable: true, .. })
    }
}
