//! Library side of the `idsig` binary.
//!
//! The binary loads a JSON module description, assigns every declaration of
//! the module its mangle and signature, and prints the result as text or
//! JSON. The pieces live here so they can be tested without spawning the
//! binary.

pub mod args;
pub mod config;
pub mod driver;
pub mod hooks;
pub mod logging;
pub mod reporter;
