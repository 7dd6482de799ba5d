//! tables_core - Builds validated loot tables from configuration trees
//!
//! Every top-level key of a table's configuration (except `draw`) describes
//! one loot entry. Entries are parsed in key order and the first invalid one
//! stops the build; [`LootTable::load`] logs the failure and keeps the
//! entries parsed before it.

mod config;
mod parser;
mod registry;
mod source;
mod table;
mod tree;

pub use config::{keys, ParserOptions, MAX_DRAW};
pub use parser::{BoundsRule, EntryParser, RecordShape};
pub use registry::LootTableRegistry;
pub use source::{DirectorySource, MemorySource, TableSource};
pub use table::{BuildFailure, BuildState, LootTable, LootTableBuilder};
pub use tree::ConfigTree;

pub use loot_core::{
    DynamicRange, Loot, ModifierKind, Modifiers, Quantity, StringEnchant, StringItem, StringPotion,
};

use std::path::PathBuf;
use thiserror::Error;

/// Error reading a configuration source
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading '{path:?}': {error}")]
    Io {
        error: std::io::Error,
        path: Option<PathBuf>,
    },
    #[error("Parse error in '{path}': {error}")]
    Parse {
        error: toml::de::Error,
        path: PathBuf,
    },
}

/// Invalid value found while building a loot table
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LootParseError {
    #[error("[{table}] Failed to parse {table}, please check draw number (must be between 0 and {max}, got {draw})")]
    DrawOutOfBounds { table: String, draw: i32, max: u32 },
    #[error("[{table}] Failed to parse {table}, please check item amount syntax at '{path}'")]
    ItemAmount { table: String, path: String },
    #[error("[{table}] Failed to parse {table}, please check enchant level amount syntax at '{path}'")]
    EnchantLevel { table: String, path: String },
    #[error("[{table}] Failed to parse {table}, please check potion amplifier level syntax at '{path}'")]
    PotionAmplifier { table: String, path: String },
    #[error("[{table}] Failed to parse {table}, missing {kind} type at '{path}'")]
    MissingModifierType {
        table: String,
        kind: ModifierKind,
        path: String,
    },
    #[error("[{table}] Failed to parse '{material}' in entry '{tag}', please check config file")]
    InvalidItem {
        table: String,
        tag: String,
        material: String,
    },
    #[error("[{table}] Failed to parse {table}, entry '{tag}' defines both enchant and potion")]
    MixedModifiers { table: String, tag: String },
}

impl LootParseError {
    /// Name of the table whose build failed
    pub fn table(&self) -> &str {
        match self {
            LootParseError::DrawOutOfBounds { table, .. }
            | LootParseError::ItemAmount { table, .. }
            | LootParseError::EnchantLevel { table, .. }
            | LootParseError::PotionAmplifier { table, .. }
            | LootParseError::MissingModifierType { table, .. }
            | LootParseError::InvalidItem { table, .. }
            | LootParseError::MixedModifiers { table, .. } => table,
        }
    }
}
