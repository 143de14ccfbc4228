//! Structural mangling of declarations.
//!
//! Every declaration that may be linked across modules gets a canonical
//! string that encodes its full structural identity: its container chain,
//! its name, the shapes of its parameters and type parameters, and the
//! module salt of internal functions. The string is never used as a storage
//! key directly; the signature crate hashes it into signature ids.
//!
//! - [`ExportChecker`]: decides whether a declaration is on the exported surface
//! - [`type_encoder`]: renders resolved types without display names
//! - [`MangleComputer`]: the recursive visitor producing the mangle
//! - [`Mangler`]: facade combining the above with platform [`ManglerHooks`]

mod computer;
mod error;
mod export;
mod hooks;
mod mangler;
pub mod type_encoder;

pub use computer::MangleComputer;
pub use error::MangleError;
pub use export::ExportChecker;
pub use hooks::{DefaultManglerHooks, ManglerHooks};
pub use mangler::Mangler;
pub use type_encoder::{ClassifierEncoder, encode_type, encode_type_with};
