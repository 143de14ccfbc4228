//! Mangle and signature dump of one module.

use crate::config::{BuiltinEntry, ModuleConfig};
use crate::hooks::UnitTypeHooks;
use anyhow::{Context, Result};
use idsig_common::names::{DEFAULT_UNIT_FQN, module_salt};
use idsig_mangle::Mangler;
use idsig_signature::{BuiltinRegistry, Signature, SignatureTable};
use idsig_tree::{DeclArena, DeclId, DeclarationTree};
use serde::Serialize;
use tracing::{debug, info_span};

#[derive(Clone, Copy, Debug, Default)]
pub struct DumpOptions {
    /// Mangle without kind prefixes and `#expect` markers.
    pub raw: bool,
    pub only_exported: bool,
    /// Overrides the description's `startIndex`.
    pub start_index: Option<i64>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DumpEntry {
    pub declaration: DeclId,
    pub kind: &'static str,
    pub name: String,
    pub exported: bool,
    /// Absent for declarations local to a function body, which have no
    /// mangle of their own.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mangle: Option<String>,
    pub rendered: String,
    pub signature: Signature,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClashEntry {
    pub signature: String,
    pub first: DeclId,
    pub second: DeclId,
    pub first_mangle: String,
    pub second_mangle: String,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleDump {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module_name: Option<String>,
    pub start_index: i64,
    /// Last file-local id handed out; seed for the next file's table.
    pub local_index: i64,
    pub entries: Vec<DumpEntry>,
    pub clashes: Vec<ClashEntry>,
}

/// Assign signatures to every declaration of the configured module, in
/// allocation order.
pub fn dump_module(config: &ModuleConfig, options: &DumpOptions) -> Result<ModuleDump> {
    let _span = info_span!("dump_module", module = ?config.module_name).entered();

    let tree = &config.tree;
    let hooks = UnitTypeHooks::new(config.unit_type.as_deref().unwrap_or(DEFAULT_UNIT_FQN));
    let mangler = Mangler::with_hooks(tree, &hooks);
    let start_index = options.start_index.unwrap_or(config.start_index);
    let builtins = load_builtins(mangler, &config.builtins)?;
    let mut table = SignatureTable::with_builtins(mangler, start_index, builtins);

    let mut entries = Vec::new();
    for (id, decl) in tree.iter() {
        if !in_module(tree, id, config.module_name.as_deref()) {
            continue;
        }
        let exported = table.is_exported(id);
        if options.only_exported && !exported {
            continue;
        }

        let signature = table
            .signature_of(id)
            .with_context(|| format!("failed to compute signature of {}", tree.render(id)))?;
        let mangle = if decl.kind.is_body_local() {
            None
        } else {
            let mangle = mangler
                .compute_mangle(id, !options.raw)
                .with_context(|| format!("failed to mangle {}", tree.render(id)))?;
            Some(mangle)
        };

        entries.push(DumpEntry {
            declaration: id,
            kind: decl.kind.tag(),
            name: decl.name.clone(),
            exported,
            mangle,
            rendered: signature.render(),
            signature,
        });
    }

    let clashes = table
        .clashes()
        .iter()
        .map(|clash| ClashEntry {
            signature: clash.signature.render(),
            first: clash.first,
            second: clash.second,
            first_mangle: clash.first_mangle.clone(),
            second_mangle: clash.second_mangle.clone(),
        })
        .collect();

    debug!(
        entries = entries.len(),
        local_index = table.local_index(),
        "module dumped"
    );
    Ok(ModuleDump {
        module_name: config.module_name.clone(),
        start_index,
        local_index: table.local_index(),
        entries,
        clashes,
    })
}

fn load_builtins(mangler: Mangler<'_, DeclArena>, entries: &[BuiltinEntry]) -> Result<BuiltinRegistry> {
    let mut registry = BuiltinRegistry::new();
    for entry in entries {
        let mangle = mangler.mangle(entry.declaration).with_context(|| {
            format!(
                "failed to mangle builtin {}",
                mangler.tree().render(entry.declaration)
            )
        })?;
        match entry.id {
            Some(id) => {
                registry.register(entry.declaration, mangle, id);
            }
            None => {
                registry.register_mangle(entry.declaration, mangle);
            }
        }
    }
    Ok(registry)
}

fn in_module(tree: &DeclArena, id: DeclId, module: Option<&str>) -> bool {
    module.is_none_or(|name| module_salt(tree.module_of(id)) == module_salt(name))
}

#[cfg(test)]
#[path = "../tests/driver_tests.rs"]
mod tests;
