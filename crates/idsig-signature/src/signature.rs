//! Signature values.
//!
//! A [`Signature`] is the structured identity a declaration is linked by.
//! Public signatures are addressable from any module; file-local ones only
//! from the module that produced them, nested under the signature of an
//! enclosing declaration.
//!
//! ## Textual form
//!
//! | Variant | Render |
//! |---------|--------|
//! | `Public` | `org.sample/Box.unwrap\|-4911…[0]` (`null` when there is no id, mask in binary) |
//! | `FileLocal` | `<container render>:<local id>` |
//! | `Accessor` | render of the accessor half |
//! | `BuiltIn` | `<builtin:<id>\|<mangle>>` |
//!
//! [`Signature::parse`] reads the `Public`, `FileLocal` and `BuiltIn` forms
//! back into equal values.

use crate::error::SignatureError;
use crate::flags::SignatureFlags;
use idsig_common::FqName;
use idsig_common::names::BUILT_IN_PACKAGE;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

const BUILT_IN_OPEN: &str = "<builtin:";

/// Signature addressable from any module.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicSignature {
    pub package_fqn: FqName,
    /// Path of the declaration inside its package; root for a package.
    pub declaration_fqn: FqName,
    /// Hash of the declaration's mangle. Absent for packages and classes.
    pub id: Option<i64>,
    pub mask: i64,
}

impl PublicSignature {
    pub fn new(package_fqn: FqName, declaration_fqn: FqName, id: Option<i64>, mask: i64) -> Self {
        Self {
            package_fqn,
            declaration_fqn,
            id,
            mask,
        }
    }

    /// Signature standing for a whole package.
    pub fn package(package_fqn: FqName) -> Self {
        Self::new(package_fqn, FqName::root(), None, 0)
    }

    pub fn is_package_signature(&self) -> bool {
        self.id.is_none() && self.declaration_fqn.is_root()
    }

    pub fn flags(&self) -> SignatureFlags {
        SignatureFlags::from_bits_truncate(self.mask)
    }

    pub fn render(&self) -> String {
        let id = match self.id {
            Some(id) => id.to_string(),
            None => "null".to_string(),
        };
        format!(
            "{}/{}|{}[{:b}]",
            self.package_fqn, self.declaration_fqn, id, self.mask
        )
    }

    /// Signature of the top-level declaration enclosing this one.
    pub fn top_level(&self) -> Self {
        if self.declaration_fqn.segment_count() <= 1 {
            return self.clone();
        }
        let first = self.declaration_fqn.first_segment().unwrap_or_default();
        Self::new(self.package_fqn.clone(), FqName::new(first), None, self.mask)
    }

    fn parse(input: &str) -> Result<Self, SignatureError> {
        let body = input
            .strip_suffix(']')
            .ok_or_else(|| SignatureError::parse(input, "missing `]` after mask"))?;
        let (head, mask) = body
            .rsplit_once('[')
            .ok_or_else(|| SignatureError::parse(input, "missing `[` before mask"))?;
        let mask = u64::from_str_radix(mask, 2)
            .map_err(|err| SignatureError::parse(input, format!("bad mask: {err}")))?
            as i64;
        let (path, id) = head
            .rsplit_once('|')
            .ok_or_else(|| SignatureError::parse(input, "missing `|` before id"))?;
        let id = match id {
            "null" => None,
            digits => Some(
                digits
                    .parse::<i64>()
                    .map_err(|err| SignatureError::parse(input, format!("bad id: {err}")))?,
            ),
        };
        let (package, declaration) = path
            .split_once('/')
            .ok_or_else(|| SignatureError::parse(input, "missing `/` after package"))?;
        Ok(Self::new(
            FqName::new(package),
            FqName::new(declaration),
            id,
            mask,
        ))
    }
}

/// Identity of a declaration for cross-module linkage.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Signature {
    Public(PublicSignature),
    /// Only meaningful inside the producing module.
    FileLocal {
        container: Box<Signature>,
        local_id: i64,
    },
    /// Runtime intrinsic with an id every module agrees on.
    BuiltIn { mangle: String, id: i64 },
    /// A property accessor, addressable through either half.
    Accessor {
        property: Box<Signature>,
        accessor: PublicSignature,
    },
}

impl Signature {
    pub fn public(
        package_fqn: impl Into<FqName>,
        declaration_fqn: impl Into<FqName>,
        id: Option<i64>,
        mask: i64,
    ) -> Self {
        Self::Public(PublicSignature::new(
            package_fqn.into(),
            declaration_fqn.into(),
            id,
            mask,
        ))
    }

    pub fn file_local(container: Self, local_id: i64) -> Self {
        Self::FileLocal {
            container: Box::new(container),
            local_id,
        }
    }

    pub fn built_in(mangle: impl Into<String>, id: i64) -> Self {
        Self::BuiltIn {
            mangle: mangle.into(),
            id,
        }
    }

    pub const fn is_public(&self) -> bool {
        !self.is_local()
    }

    pub const fn is_local(&self) -> bool {
        matches!(self, Self::FileLocal { .. })
    }

    pub fn is_package_signature(&self) -> bool {
        matches!(self, Self::Public(public) if public.is_package_signature())
    }

    pub const fn as_public(&self) -> Option<&PublicSignature> {
        match self {
            Self::Public(public) => Some(public),
            _ => None,
        }
    }

    /// Hash id of a public or accessor signature.
    pub const fn hash_id(&self) -> Option<i64> {
        match self {
            Self::Public(public) => public.id,
            Self::Accessor { accessor, .. } => accessor.id,
            Self::BuiltIn { id, .. } => Some(*id),
            Self::FileLocal { .. } => None,
        }
    }

    pub fn package_fqn(&self) -> FqName {
        match self {
            Self::Public(public) => public.package_fqn.clone(),
            Self::FileLocal { container, .. } => container.package_fqn(),
            Self::BuiltIn { .. } => FqName::new(BUILT_IN_PACKAGE),
            Self::Accessor { property, .. } => property.package_fqn(),
        }
    }

    /// Signature of the top-level declaration this one lives in.
    ///
    /// A file-local declaration directly in a package is its own top level.
    pub fn top_level_signature(&self) -> Self {
        match self {
            Self::Public(public) => Self::Public(public.top_level()),
            Self::Accessor { property, .. } => property.top_level_signature(),
            Self::BuiltIn { .. } => self.clone(),
            Self::FileLocal { container, .. } => {
                let top = container.top_level_signature();
                if top == **container
                    && top
                        .as_public()
                        .is_some_and(|public| public.declaration_fqn.is_root())
                {
                    return self.clone();
                }
                top
            }
        }
    }

    /// First public signature found walking up file-local containers.
    pub fn nearest_public_signature(&self) -> Self {
        match self {
            Self::FileLocal { container, .. } => container.nearest_public_signature(),
            _ => self.clone(),
        }
    }

    pub fn render(&self) -> String {
        match self {
            Self::Public(public) => public.render(),
            Self::FileLocal {
                container,
                local_id,
            } => format!("{}:{}", container.render(), local_id),
            Self::BuiltIn { mangle, id } => format!("{BUILT_IN_OPEN}{id}|{mangle}>"),
            Self::Accessor { accessor, .. } => accessor.render(),
        }
    }

    /// Parse a rendered signature.
    ///
    /// Accessor renders come back as the public signature of the accessor.
    pub fn parse(input: &str) -> Result<Self, SignatureError> {
        if let Some(rest) = input.strip_prefix(BUILT_IN_OPEN)
            && let Some(body) = rest.strip_suffix('>')
        {
            let (id, mangle) = body
                .split_once('|')
                .ok_or_else(|| SignatureError::parse(input, "missing `|` after built-in id"))?;
            let id = id
                .parse::<i64>()
                .map_err(|err| SignatureError::parse(input, format!("bad built-in id: {err}")))?;
            return Ok(Self::built_in(mangle, id));
        }

        if input.ends_with(']') {
            return PublicSignature::parse(input).map(Self::Public);
        }

        let (container, local_id) = input
            .rsplit_once(':')
            .ok_or_else(|| SignatureError::parse(input, "not a public, local or built-in signature"))?;
        let local_id = local_id
            .parse::<i64>()
            .map_err(|err| SignatureError::parse(input, format!("bad local id: {err}")))?;
        Ok(Self::file_local(Self::parse(container)?, local_id))
    }
}

impl PartialEq for Signature {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Public(a), Self::Public(b)) => a == b,
            (
                Self::FileLocal {
                    container: ca,
                    local_id: la,
                },
                Self::FileLocal {
                    container: cb,
                    local_id: lb,
                },
            ) => la == lb && ca == cb,
            (Self::BuiltIn { id: a, .. }, Self::BuiltIn { id: b, .. }) => a == b,
            (Self::Accessor { accessor: a, .. }, Self::Accessor { accessor: b, .. }) => a == b,
            _ => false,
        }
    }
}

impl Eq for Signature {}

impl Hash for Signature {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Public(public) => public.hash(state),
            Self::FileLocal {
                container,
                local_id,
            } => {
                container.hash(state);
                local_id.hash(state);
            }
            Self::BuiltIn { id, .. } => id.hash(state),
            Self::Accessor { accessor, .. } => accessor.hash(state),
        }
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scope = if self.is_public() { "public" } else { "private" };
        write!(f, "{scope} {}", self.render())
    }
}

impl FromStr for Signature {
    type Err = SignatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<PublicSignature> for Signature {
    fn from(public: PublicSignature) -> Self {
        Self::Public(public)
    }
}

#[cfg(test)]
#[path = "../tests/signature_tests.rs"]
mod tests;
