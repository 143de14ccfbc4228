//! Declaration records.
//!
//! A [`Declaration`] is a flat record: every kind shares the same struct and
//! the fields that do not apply to a kind stay at their defaults. Constructors
//! such as [`Declaration::class`] and [`Declaration::function`] fill in the
//! kind-specific parts; `with_*` methods adjust the rest.

use crate::types::StructuralType;
use idsig_common::{FqName, Visibility};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

// =============================================================================
// Identifiers
// =============================================================================

/// Index of a declaration in its arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeclId(pub u32);

impl DeclId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for DeclId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Index of a package fragment in its arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FragmentId(pub u32);

impl FragmentId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

// =============================================================================
// Kinds
// =============================================================================

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ClassKind {
    Class,
    Interface,
    EnumClass,
    AnnotationClass,
    Object,
    CompanionObject,
    /// Object expression or lambda class; has no name of its own.
    Anonymous,
}

impl ClassKind {
    pub const fn is_singleton(self) -> bool {
        matches!(self, Self::Object | Self::CompanionObject)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AccessorKind {
    Getter,
    Setter,
}

/// Kind of a declaration.
///
/// The set is closed: the export checker, the mangle computer and the
/// signature builder all match on it exhaustively.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeclKind {
    Class(ClassKind),
    Function,
    Constructor,
    Property,
    PropertyAccessor(AccessorKind),
    /// Backing field, or a field declared directly in a class.
    Field,
    TypeAlias,
    EnumEntry,
    TypeParameter,
    ValueParameter,
    /// Extension or dispatch receiver of a callable.
    ReceiverParameter,
    /// Local variable in a function body.
    Variable,
    /// `init { ... }` block of a class.
    AnonymousInitializer,
    /// Local `val x by delegate`.
    LocalDelegatedProperty,
}

impl DeclKind {
    /// Declarations that can only be referenced from inside their own
    /// function body.
    pub const fn is_body_local(self) -> bool {
        matches!(
            self,
            Self::ValueParameter
                | Self::ReceiverParameter
                | Self::Variable
                | Self::AnonymousInitializer
                | Self::LocalDelegatedProperty
        )
    }

    pub const fn is_callable(self) -> bool {
        matches!(
            self,
            Self::Function | Self::Constructor | Self::PropertyAccessor(_)
        )
    }

    /// Short upper-case tag used when rendering declarations.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Class(_) => "CLASS",
            Self::Function => "FUN",
            Self::Constructor => "CONSTRUCTOR",
            Self::Property => "PROPERTY",
            Self::PropertyAccessor(AccessorKind::Getter) => "GETTER",
            Self::PropertyAccessor(AccessorKind::Setter) => "SETTER",
            Self::Field => "FIELD",
            Self::TypeAlias => "TYPEALIAS",
            Self::EnumEntry => "ENUM_ENTRY",
            Self::TypeParameter => "TYPE_PARAMETER",
            Self::ValueParameter => "VALUE_PARAMETER",
            Self::ReceiverParameter => "RECEIVER_PARAMETER",
            Self::Variable => "VAR",
            Self::AnonymousInitializer => "ANONYMOUS_INITIALIZER",
            Self::LocalDelegatedProperty => "LOCAL_DELEGATED_PROPERTY",
        }
    }
}

// =============================================================================
// Parents
// =============================================================================

/// Lexical owner of a declaration.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Parent {
    Package(FragmentId),
    Declaration(DeclId),
}

impl Parent {
    pub const fn as_declaration(self) -> Option<DeclId> {
        match self {
            Self::Declaration(id) => Some(id),
            Self::Package(_) => None,
        }
    }
}

/// The part of a package that one module contributes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageFragment {
    pub fq_name: FqName,
    /// Name of the module this fragment was compiled in.
    pub module: String,
}

// =============================================================================
// Declaration
// =============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Declaration {
    pub name: String,
    pub kind: DeclKind,
    pub parent: Parent,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub is_expect: bool,
    /// Published-API style marker: exported regardless of visibility.
    #[serde(default)]
    pub always_exported: bool,

    /// Ordered type parameters (declarations of kind `TypeParameter`).
    #[serde(default)]
    pub type_parameters: SmallVec<[DeclId; 2]>,
    /// Ordered value parameters (declarations of kind `ValueParameter`).
    #[serde(default)]
    pub value_parameters: SmallVec<[DeclId; 4]>,
    /// Extension receiver (a declaration of kind `ReceiverParameter`).
    #[serde(default)]
    pub extension_receiver: Option<DeclId>,
    #[serde(default)]
    pub return_type: Option<StructuralType>,

    /// Type of a parameter, receiver, field, property or variable.
    #[serde(default)]
    pub ty: Option<StructuralType>,
    #[serde(default)]
    pub is_vararg: bool,

    /// Position of a type parameter within its container.
    #[serde(default)]
    pub index: u32,
    /// Upper bounds of a type parameter.
    #[serde(default)]
    pub super_types: Vec<StructuralType>,

    /// Property owning an accessor or backing field.
    #[serde(default)]
    pub corresponding_property: Option<DeclId>,
    #[serde(default)]
    pub getter: Option<DeclId>,
    #[serde(default)]
    pub setter: Option<DeclId>,

    /// For fake overrides: the inherited declaration this one stands for.
    #[serde(default)]
    pub fake_override_of: Option<DeclId>,
}

impl Declaration {
    fn with_kind(kind: DeclKind, name: impl Into<String>, parent: Parent) -> Self {
        Self {
            name: name.into(),
            kind,
            parent,
            visibility: Visibility::Public,
            is_expect: false,
            always_exported: false,
            type_parameters: SmallVec::new(),
            value_parameters: SmallVec::new(),
            extension_receiver: None,
            return_type: None,
            ty: None,
            is_vararg: false,
            index: 0,
            super_types: Vec::new(),
            corresponding_property: None,
            getter: None,
            setter: None,
            fake_override_of: None,
        }
    }

    pub fn class(name: impl Into<String>, parent: Parent) -> Self {
        Self::with_kind(DeclKind::Class(ClassKind::Class), name, parent)
    }

    pub fn class_of_kind(kind: ClassKind, name: impl Into<String>, parent: Parent) -> Self {
        Self::with_kind(DeclKind::Class(kind), name, parent)
    }

    pub fn function(name: impl Into<String>, parent: Parent) -> Self {
        Self::with_kind(DeclKind::Function, name, parent)
    }

    pub fn constructor(parent: DeclId) -> Self {
        Self::with_kind(
            DeclKind::Constructor,
            idsig_common::names::CONSTRUCTOR_NAME,
            Parent::Declaration(parent),
        )
    }

    pub fn property(name: impl Into<String>, parent: Parent, ty: StructuralType) -> Self {
        let mut decl = Self::with_kind(DeclKind::Property, name, parent);
        decl.ty = Some(ty);
        decl
    }

    /// An accessor for `property`, named `<get-name>` / `<set-name>`.
    ///
    /// The accessor shares the property's lexical parent; pass it explicitly
    /// because the record does not see the arena.
    pub fn accessor(
        kind: AccessorKind,
        property: DeclId,
        property_name: &str,
        parent: Parent,
    ) -> Self {
        let name = match kind {
            AccessorKind::Getter => idsig_common::names::getter_name(property_name),
            AccessorKind::Setter => idsig_common::names::setter_name(property_name),
        };
        let mut decl = Self::with_kind(DeclKind::PropertyAccessor(kind), name, parent);
        decl.corresponding_property = Some(property);
        decl
    }

    pub fn field(name: impl Into<String>, parent: Parent, ty: StructuralType) -> Self {
        let mut decl = Self::with_kind(DeclKind::Field, name, parent);
        decl.ty = Some(ty);
        decl
    }

    pub fn type_alias(name: impl Into<String>, parent: Parent, expanded: StructuralType) -> Self {
        let mut decl = Self::with_kind(DeclKind::TypeAlias, name, parent);
        decl.ty = Some(expanded);
        decl
    }

    pub fn enum_entry(name: impl Into<String>, enum_class: DeclId) -> Self {
        Self::with_kind(DeclKind::EnumEntry, name, Parent::Declaration(enum_class))
    }

    /// A type parameter of `owner`. Its index is assigned by the arena.
    pub fn type_parameter(name: impl Into<String>, owner: DeclId) -> Self {
        Self::with_kind(DeclKind::TypeParameter, name, Parent::Declaration(owner))
    }

    pub fn value_parameter(name: impl Into<String>, owner: DeclId, ty: StructuralType) -> Self {
        let mut decl = Self::with_kind(DeclKind::ValueParameter, name, Parent::Declaration(owner));
        decl.ty = Some(ty);
        decl
    }

    pub fn receiver_parameter(owner: DeclId, ty: StructuralType) -> Self {
        let mut decl =
            Self::with_kind(DeclKind::ReceiverParameter, "<this>", Parent::Declaration(owner));
        decl.ty = Some(ty);
        decl
    }

    pub fn variable(name: impl Into<String>, owner: DeclId, ty: StructuralType) -> Self {
        let mut decl = Self::with_kind(DeclKind::Variable, name, Parent::Declaration(owner));
        decl.ty = Some(ty);
        decl.visibility = Visibility::Local;
        decl
    }

    pub fn anonymous_initializer(owner: DeclId) -> Self {
        Self::with_kind(
            DeclKind::AnonymousInitializer,
            "<anonymous-init>",
            Parent::Declaration(owner),
        )
    }

    pub fn local_delegated_property(
        name: impl Into<String>,
        owner: DeclId,
        ty: StructuralType,
    ) -> Self {
        let mut decl =
            Self::with_kind(DeclKind::LocalDelegatedProperty, name, Parent::Declaration(owner));
        decl.ty = Some(ty);
        decl.visibility = Visibility::Local;
        decl
    }

    pub const fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub const fn with_expect(mut self, is_expect: bool) -> Self {
        self.is_expect = is_expect;
        self
    }

    pub const fn with_always_exported(mut self, always_exported: bool) -> Self {
        self.always_exported = always_exported;
        self
    }

    pub fn with_return_type(mut self, ty: StructuralType) -> Self {
        self.return_type = Some(ty);
        self
    }

    pub const fn with_vararg(mut self, is_vararg: bool) -> Self {
        self.is_vararg = is_vararg;
        self
    }

    pub fn with_super_types(mut self, bounds: Vec<StructuralType>) -> Self {
        self.super_types = bounds;
        self
    }

    pub const fn with_corresponding_property(mut self, property: DeclId) -> Self {
        self.corresponding_property = Some(property);
        self
    }

    pub const fn with_fake_override_of(mut self, original: DeclId) -> Self {
        self.fake_override_of = Some(original);
        self
    }
}
