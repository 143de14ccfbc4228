//! Module description loaded by the CLI.
//!
//! ```json
//! {
//!   "moduleName": "<main>",
//!   "startIndex": 0,
//!   "unitType": "lang.Unit",
//!   "builtins": [{ "declaration": 12 }, { "declaration": 13, "id": 4 }],
//!   "tree": { "fragments": [...], "declarations": [...] }
//! }
//! ```
//!
//! The tree is the serialized [`DeclArena`]. It is checked for dangling
//! references on load, since the mangler assumes every id it is handed
//! belongs to the tree.

use anyhow::{Context, Result, bail};
use idsig_tree::{
    Classifier, DeclArena, DeclId, Declaration, DeclarationTree, Parent, StructuralType,
    TypeArgument,
};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleConfig {
    /// Module whose declarations are dumped. Declarations of other modules
    /// (dependencies present in the tree) are only reached as containers.
    #[serde(default)]
    pub module_name: Option<String>,
    /// Seed for file-local ids.
    #[serde(default)]
    pub start_index: i64,
    /// Fully qualified name of the unit type, if not the default.
    #[serde(default)]
    pub unit_type: Option<String>,
    #[serde(default)]
    pub builtins: Vec<BuiltinEntry>,
    pub tree: DeclArena,
}

/// An intrinsic preloaded with a built-in signature. Without an explicit id
/// the id is derived from the declaration's mangle.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuiltinEntry {
    pub declaration: DeclId,
    #[serde(default)]
    pub id: Option<i64>,
}

pub fn load_config(path: &Path) -> Result<ModuleConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read module description {}", path.display()))?;
    parse_config(&text).with_context(|| format!("invalid module description {}", path.display()))
}

pub fn parse_config(text: &str) -> Result<ModuleConfig> {
    let config: ModuleConfig =
        serde_json::from_str(text).context("failed to parse module description JSON")?;
    check_tree(&config.tree)?;
    for entry in &config.builtins {
        if config.tree.get(entry.declaration).is_none() {
            bail!("builtin refers to unknown declaration {}", entry.declaration);
        }
    }
    Ok(config)
}

/// Reject trees the mangler cannot walk: references to missing declarations
/// or fragments, parents that do not precede their children, and
/// fake-override cycles.
pub fn check_tree(tree: &DeclArena) -> Result<()> {
    for (id, decl) in tree.iter() {
        match decl.parent {
            Parent::Package(fragment) => {
                if tree.fragment(fragment).is_none() {
                    bail!("{id} `{}` is in unknown fragment {}", decl.name, fragment.0);
                }
            }
            Parent::Declaration(parent) => {
                if parent >= id {
                    bail!("{id} `{}` has parent {parent} allocated after it", decl.name);
                }
            }
        }
        for reference in references(decl) {
            if tree.get(reference).is_none() {
                bail!("{id} `{}` refers to unknown declaration {reference}", decl.name);
            }
        }
        check_fake_override_chain(tree, id)?;
    }
    Ok(())
}

fn check_fake_override_chain(tree: &DeclArena, id: DeclId) -> Result<()> {
    let mut current = id;
    for _ in 0..=tree.len() {
        match tree.get(current).and_then(|decl| decl.fake_override_of) {
            Some(original) => current = original,
            None => return Ok(()),
        }
    }
    bail!("fake override chain of {id} `{}` is cyclic", tree.name(id))
}

fn references(decl: &Declaration) -> Vec<DeclId> {
    let mut out: Vec<DeclId> = decl
        .type_parameters
        .iter()
        .chain(&decl.value_parameters)
        .copied()
        .chain(decl.extension_receiver)
        .chain(decl.corresponding_property)
        .chain(decl.getter)
        .chain(decl.setter)
        .chain(decl.fake_override_of)
        .collect();
    let types = decl
        .return_type
        .iter()
        .chain(&decl.ty)
        .chain(&decl.super_types);
    for ty in types {
        collect_classifiers(ty, &mut out);
    }
    out
}

fn collect_classifiers(ty: &StructuralType, out: &mut Vec<DeclId>) {
    if let StructuralType::Simple {
        classifier,
        arguments,
        ..
    } = ty
    {
        match *classifier {
            Classifier::Class(id) | Classifier::TypeParameter(id) => out.push(id),
        }
        for argument in arguments {
            if let TypeArgument::Projection { ty, .. } = argument {
                collect_classifiers(ty, out);
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/config_tests.rs"]
mod tests;
