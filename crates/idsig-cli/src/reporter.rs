use crate::driver::{ClashEntry, DumpEntry, ModuleDump};
use anyhow::{Context, Result};
use colored::Colorize;

pub struct Reporter {
    color: bool,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Reporter { color }
    }

    pub fn render_text(&self, dump: &ModuleDump) -> String {
        let mut out = String::new();
        let module = dump.module_name.as_deref().unwrap_or("<all modules>");
        out.push_str(&self.header(&format!(
            "module {module} (start index {}, last local id {})",
            dump.start_index, dump.local_index
        )));
        out.push('\n');

        for entry in &dump.entries {
            out.push_str(&self.format_entry(entry));
            out.push('\n');
        }

        if !dump.clashes.is_empty() {
            out.push('\n');
            for clash in &dump.clashes {
                out.push_str(&self.format_clash(clash));
                out.push('\n');
            }
        }
        out
    }

    pub fn render_json(&self, dump: &ModuleDump, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(dump)
        } else {
            serde_json::to_string(dump)
        };
        json.context("failed to serialize module dump")
    }

    fn format_entry(&self, entry: &DumpEntry) -> String {
        let visibility = if entry.signature.is_public() {
            self.paint_public("public")
        } else {
            self.paint_private("private")
        };
        let mut line = format!(
            "{:>5} {:<14} {visibility} {}",
            entry.declaration.to_string(),
            entry.kind,
            entry.rendered
        );
        if let Some(mangle) = &entry.mangle {
            line.push_str("\n      ");
            line.push_str(&self.dim(mangle));
        }
        line
    }

    fn format_clash(&self, clash: &ClashEntry) -> String {
        let label = if self.color {
            "clash".red().bold().to_string()
        } else {
            "clash".to_string()
        };
        format!(
            "{label}: {} claimed by {} ({}) and {} ({})",
            clash.signature, clash.first, clash.first_mangle, clash.second, clash.second_mangle
        )
    }

    fn header(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn paint_public(&self, text: &str) -> String {
        if self.color {
            text.green().to_string()
        } else {
            text.to_string()
        }
    }

    fn paint_private(&self, text: &str) -> String {
        if self.color {
            text.yellow().to_string()
        } else {
            text.to_string()
        }
    }

    fn dim(&self, text: &str) -> String {
        if self.color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }
}

#[cfg(test)]
#[path = "../tests/reporter_tests.rs"]
mod tests;
