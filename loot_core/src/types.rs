use crate::range::Quantity;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Item descriptor as written in configuration
///
/// `material` is an opaque identifier; it is not checked against any registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringItem {
    pub material: String,
    pub quantity: Quantity,
}

impl StringItem {
    pub fn new(material: impl Into<String>, quantity: impl Into<Quantity>) -> Self {
        StringItem {
            material: material.into(),
            quantity: quantity.into(),
        }
    }

    /// Whether the item names a material at all
    pub fn is_resolved(&self) -> bool {
        !self.material.trim().is_empty()
    }
}

impl fmt::Display for StringItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x{}", self.material, self.quantity)
    }
}

/// Enchantment modifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringEnchant {
    #[serde(rename = "type")]
    pub kind: String,
    pub level: Quantity,
}

impl StringEnchant {
    pub fn new(kind: impl Into<String>, level: impl Into<Quantity>) -> Self {
        StringEnchant {
            kind: kind.into(),
            level: level.into(),
        }
    }
}

/// Potion effect modifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringPotion {
    #[serde(rename = "type")]
    pub kind: String,
    pub amplifier: Quantity,
    /// Duration as configured; not interpreted here
    pub duration: i32,
}

impl StringPotion {
    pub fn new(kind: impl Into<String>, amplifier: impl Into<Quantity>, duration: i32) -> Self {
        StringPotion {
            kind: kind.into(),
            amplifier: amplifier.into(),
            duration,
        }
    }
}

/// Modifier category carried by a loot entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifierKind {
    Enchant,
    Potion,
}

impl ModifierKind {
    /// Key of the subsection holding this category
    pub fn key(&self) -> &'static str {
        match self {
            ModifierKind::Enchant => "enchant",
            ModifierKind::Potion => "potion",
        }
    }

    /// Number of fields in one record of this category
    pub fn field_count(&self) -> usize {
        match self {
            ModifierKind::Enchant => 2,
            ModifierKind::Potion => 3,
        }
    }
}

impl fmt::Display for ModifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModifierKind::Enchant => write!(f, "enchant"),
            ModifierKind::Potion => write!(f, "potion"),
        }
    }
}
