use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared visibility of a declaration.
///
/// | Visibility | Exported | Salted mangle (functions) |
/// |------------|----------|---------------------------|
/// | Public     | yes      | no                        |
/// | Protected  | yes      | no                        |
/// | Internal   | yes      | yes, with the module name |
/// | Private    | no       | no                        |
/// | Local      | no       | no                        |
///
/// Internal declarations stay on the exported surface; the cross-module
/// restriction is carried by the module salt in the mangle instead.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Internal,
    Private,
    /// Declared inside a function body.
    Local,
}

impl Visibility {
    /// Whether a declaration with this visibility can be part of the
    /// module's exported surface (before considering its ancestors).
    pub const fn is_publicly_visible(self) -> bool {
        matches!(self, Self::Public | Self::Protected | Self::Internal)
    }

    pub const fn is_internal(self) -> bool {
        matches!(self, Self::Internal)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Protected => "protected",
            Self::Internal => "internal",
            Self::Private => "private",
            Self::Local => "local",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
