//! Common types and utilities for the idsig toolkit.
//!
//! This crate provides foundational types used across all idsig crates:
//! - Fully qualified names (`FqName`)
//! - Declaration visibility (`Visibility`)
//! - Well-known names shared by the mangler and its hosts
//! - Stable 64-bit hashing of mangled strings

// Dotted, segment-addressable names for packages and declaration paths
pub mod fq_name;
pub use fq_name::FqName;

// Declared visibility as reported by the type checker
pub mod visibility;
pub use visibility::Visibility;

// Well-known names (unit type, built-in function classes, special names)
pub mod names;

// Deterministic hashing of mangles into signature ids
pub mod hash;
pub use hash::{PUBLIC_MANGLE_FLAG, hash64, hash_mangle};
