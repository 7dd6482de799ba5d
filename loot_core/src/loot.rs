use crate::types::{StringEnchant, StringItem, StringPotion};
use serde::{Deserialize, Serialize};

/// Modifiers attached to a loot entry
///
/// The two categories are mutually exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "list", rename_all = "snake_case")]
pub enum Modifiers {
    #[default]
    None,
    Enchantments(Vec<StringEnchant>),
    Potions(Vec<StringPotion>),
}

impl Modifiers {
    /// Pick the category to keep from both parsed lists.
    ///
    /// Enchantments win over potions; empty lists collapse to `None`.
    pub fn select(enchantments: Vec<StringEnchant>, potions: Vec<StringPotion>) -> Self {
        if !enchantments.is_empty() {
            Modifiers::Enchantments(enchantments)
        } else if !potions.is_empty() {
            Modifiers::Potions(potions)
        } else {
            Modifiers::None
        }
    }
}

/// One entry of a loot table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loot {
    pub item: StringItem,
    /// Selection weight, read from `luck`
    pub weight: i32,
    #[serde(default)]
    pub modifiers: Modifiers,
}

impl Loot {
    /// Plain entry without modifiers
    pub fn new(item: StringItem, weight: i32) -> Self {
        Loot {
            item,
            weight,
            modifiers: Modifiers::None,
        }
    }

    pub fn with_enchantments(
        item: StringItem,
        weight: i32,
        enchantments: Vec<StringEnchant>,
    ) -> Self {
        Loot {
            item,
            weight,
            modifiers: Modifiers::Enchantments(enchantments),
        }
    }

    pub fn with_potions(item: StringItem, weight: i32, potions: Vec<StringPotion>) -> Self {
        Loot {
            item,
            weight,
            modifiers: Modifiers::Potions(potions),
        }
    }

    /// Combine an item with whichever modifier list applies.
    ///
    /// When both lists are non-empty the potions are discarded.
    pub fn assemble(
        item: StringItem,
        weight: i32,
        enchantments: Vec<StringEnchant>,
        potions: Vec<StringPotion>,
    ) -> Self {
        Loot {
            item,
            weight,
            modifiers: Modifiers::select(enchantments, potions),
        }
    }

    pub fn enchantments(&self) -> &[StringEnchant] {
        match &self.modifiers {
            Modifiers::Enchantments(list) => list,
            _ => &[],
        }
    }

    pub fn potions(&self) -> &[StringPotion] {
        match &self.modifiers {
            Modifiers::Potions(list) => list,
            _ => &[],
        }
    }

    /// Final check applied before an entry joins a table
    pub fn is_valid(&self) -> bool {
        self.item.is_resolved()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::{DynamicRange, Quantity};

    fn sword() -> StringItem {
        StringItem::new("IRON_SWORD", 1)
    }

    #[test]
    fn test_assemble_plain() {
        let loot = Loot::assemble(sword(), 10, Vec::new(), Vec::new());
        assert_eq!(loot, Loot::new(sword(), 10));
        assert!(loot.enchantments().is_empty());
        assert!(loot.potions().is_empty());
        assert_eq!(loot.modifiers, Modifiers::None);
    }

    #[test]
    fn test_enchantments_take_precedence() {
        let loot = Loot::assemble(
            sword(),
            5,
            vec![StringEnchant::new("SHARPNESS", 2)],
            vec![StringPotion::new("SPEED", 1, 200)],
        );
        assert_eq!(loot.enchantments().len(), 1);
        assert!(loot.potions().is_empty());
    }

    #[test]
    fn test_assemble_potions() {
        let potions = vec![StringPotion::new("SPEED", DynamicRange::new(1, 2), 200)];
        let loot = Loot::assemble(sword(), 5, Vec::new(), potions.clone());
        assert_eq!(loot.potions(), potions.as_slice());
        assert!(loot.enchantments().is_empty());
    }

    #[test]
    fn test_validity_requires_material() {
        assert!(Loot::new(sword(), 1).is_valid());
        assert!(!Loot::new(StringItem::new("", 1), 1).is_valid());
        assert!(!Loot::new(StringItem::new("  ", Quantity::Fixed(1)), 1).is_valid());
    }

    #[test]
    fn test_serializes_to_json() {
        let loot = Loot::with_enchantments(
            StringItem::new("IRON_SWORD", DynamicRange::new(2, 5)),
            3,
            vec![StringEnchant::new("SHARPNESS", DynamicRange::new(1, 3))],
        );
        let json = serde_json::to_value(&loot).unwrap();
        assert_eq!(json["item"]["quantity"]["min"], 2);
        assert_eq!(json["modifiers"]["kind"], "enchantments");
        assert_eq!(json["modifiers"]["list"][0]["type"], "SHARPNESS");

        let back: Loot = serde_json::from_value(json).unwrap();
        assert_eq!(back, loot);
    }
}
