//! Declarative corrections for example commands scraped from tool help text.
//!
//! The table is data (`data/example_fixups.json`), not code: global fixups run
//! first for every tool, then each rule whose `tools` list names the tool,
//! in file order.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

const BUILTIN: &str = include_str!("../../data/example_fixups.json");

/// One textual correction.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Fixup {
    /// Replace every occurrence
    Replace { from: String, to: String },
    /// Replace the first occurrence only
    ReplaceFirst { from: String, to: String },
    /// Append text to the end
    Append { text: String },
    /// Discard the scraped example entirely
    Set { text: String },
}

impl Fixup {
    pub fn apply(&self, example: &str) -> String {
        match self {
            Fixup::Replace { from, to } => example.replace(from.as_str(), to),
            Fixup::ReplaceFirst { from, to } => example.replacen(from.as_str(), to, 1),
            Fixup::Append { text } => format!("{}{}", example, text),
            Fixup::Set { text } => text.clone(),
        }
    }
}

/// Fixups shared by a group of tools.
#[derive(Debug, Clone, Deserialize)]
pub struct FixupRule {
    pub tools: Vec<String>,
    pub fixups: Vec<Fixup>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FixupTable {
    #[serde(default)]
    pub global: Vec<Fixup>,
    #[serde(default)]
    pub rules: Vec<FixupRule>,
}

impl FixupTable {
    /// The table shipped with the generator.
    pub fn builtin() -> Result<Self> {
        serde_json::from_str(BUILTIN).context("built-in fixup table is invalid")
    }

    /// Load a replacement table from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read fixup table: {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("invalid fixup table: {}", path.display()))
    }

    /// Apply every fixup relevant to `tool`, in order.
    pub fn apply(&self, tool: &str, example: &str) -> String {
        let per_tool = self
            .rules
            .iter()
            .filter(|r| r.tools.iter().any(|t| t == tool))
            .flat_map(|r| r.fixups.iter());

        self.global
            .iter()
            .chain(per_tool)
            .fold(example.to_string(), |acc, fixup| fixup.apply(&acc))
    }
}
