//! loot_core - Data model for configured loot entries
//!
//! A loot entry is an item (material and amount), a selection weight and at
//! most one category of modifiers: enchantments or potion effects. Amounts,
//! levels and amplifiers are either a fixed integer or an inclusive range.

mod loot;
mod range;
mod types;

pub use loot::{Loot, Modifiers};
pub use range::{DynamicRange, Quantity};
pub use types::{ModifierKind, StringEnchant, StringItem, StringPotion};
