use crate::ConfigError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Upper bound for a table's draw count
pub const MAX_DRAW: u32 = 27;

/// Key names read from a loot table document
pub mod keys {
    pub const SEPARATOR: char = '.';

    /// Reserved top-level key holding the draw count
    pub const DRAW: &str = "draw";

    pub const AMOUNT: &str = "amount";
    pub const MATERIAL: &str = "material";
    pub const LUCK: &str = "luck";

    pub const ENCHANT: &str = "enchant";
    pub const ENCHANT_TYPE: &str = "type";
    pub const ENCHANT_LEVEL: &str = "level";

    pub const POTION: &str = "potion";
    pub const POTION_TYPE: &str = "type";
    pub const POTION_AMPLIFIER: &str = "amplifier";
    pub const POTION_DURATION: &str = "duration";

    /// Join path segments with [`SEPARATOR`]
    pub fn path(segments: &[&str]) -> String {
        let mut out = String::new();
        for segment in segments {
            if !out.is_empty() {
                out.push(SEPARATOR);
            }
            out.push_str(segment);
        }
        out
    }
}

/// Switches for behaviours that are kept for compatibility
///
/// ```toml
/// strict_potion_amplifier = true
/// reject_mixed_modifiers = false
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserOptions {
    /// Apply the single-record amplifier rule (no zero) to potion lists too.
    /// Off by default: lists accept an amplifier of `0`.
    pub strict_potion_amplifier: bool,
    /// Fail an entry that has both `enchant` and `potion` instead of
    /// dropping its potions.
    pub reject_mixed_modifiers: bool,
}

impl ParserOptions {
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load options from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        load_toml(path)
    }
}

/// Read and deserialize a TOML file
pub(crate) fn load_toml<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        error: e,
        path: Some(path.to_path_buf()),
    })?;

    toml::from_str(&content).map_err(|e| ConfigError::Parse {
        error: e,
        path: path.to_path_buf(),
    })
}
