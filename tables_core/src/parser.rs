//! Parsers for a single loot entry: item, enchantments, potions

use crate::config::keys::{self, path};
use crate::config::ParserOptions;
use crate::tree::ConfigTree;
use crate::LootParseError;
use log::warn;
use loot_core::{Loot, ModifierKind, Quantity, StringEnchant, StringItem, StringPotion};

/// How a modifier subsection lays out its records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordShape {
    /// The subsection itself is one record
    Single,
    /// Each child of the subsection is one record
    Multiple,
}

impl RecordShape {
    /// A subsection is a single record when its recursive key count equals
    /// the number of fields of one record of `kind`.
    ///
    /// A child whose name collides with a field name can be misread; an
    /// explicit list marker in the document would remove the guesswork.
    pub fn detect<T: ConfigTree>(section: &T, kind: ModifierKind) -> Self {
        if section.get_keys(true).len() == kind.field_count() {
            RecordShape::Single
        } else {
            RecordShape::Multiple
        }
    }
}

/// Bounds check applied to an amount, level or amplifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundsRule {
    /// Range bounds must be positive; a fixed value must not be zero
    Strict,
    /// Range min may be zero, max must be positive; a fixed value must not
    /// be negative. Only potion lists use it.
    Lenient,
}

impl BoundsRule {
    pub fn accepts(&self, quantity: &Quantity) -> bool {
        match (self, quantity) {
            (BoundsRule::Strict, Quantity::Range(r)) => r.min > 0 && r.max > 0,
            (BoundsRule::Strict, Quantity::Fixed(v)) => *v != 0,
            (BoundsRule::Lenient, Quantity::Range(r)) => r.min >= 0 && r.max > 0,
            (BoundsRule::Lenient, Quantity::Fixed(v)) => *v >= 0,
        }
    }
}

/// Read a fixed-or-range field.
///
/// A raw value containing `;` is a range literal; anything else is read as
/// an integer, defaulting to `0`. Returns `None` when the field is absent.
fn read_quantity<T: ConfigTree>(tree: &T, at: &str) -> Option<Quantity> {
    let raw = tree.get_string(at)?;
    if raw.contains(';') {
        Some(Quantity::parse(&raw))
    } else {
        Some(Quantity::Fixed(tree.get_int(at).unwrap_or(0)))
    }
}

/// Parses the entries of one named table
#[derive(Debug, Clone, Copy)]
pub struct EntryParser<'a> {
    table: &'a str,
    options: &'a ParserOptions,
}

impl<'a> EntryParser<'a> {
    pub fn new(table: &'a str, options: &'a ParserOptions) -> Self {
        EntryParser { table, options }
    }

    /// Parse the entry under `tag` into a loot record
    pub fn parse_loot<T: ConfigTree>(&self, tag: &str, tree: &T) -> Result<Loot, LootParseError> {
        let item = self.parse_item(tag, tree)?;
        let enchantments = self.parse_enchants(tag, tree)?;
        let potions = self.parse_potions(tag, tree)?;

        if !enchantments.is_empty() && !potions.is_empty() {
            if self.options.reject_mixed_modifiers {
                return Err(LootParseError::MixedModifiers {
                    table: self.table.to_string(),
                    tag: tag.to_string(),
                });
            }
            warn!(
                "[{}] Entry '{}' defines both enchant and potion, ignoring {} potion(s)",
                self.table,
                tag,
                potions.len()
            );
        }

        let weight = tree.get_int(&path(&[tag, keys::LUCK])).unwrap_or(0);
        let loot = Loot::assemble(item, weight, enchantments, potions);

        if !loot.is_valid() {
            return Err(LootParseError::InvalidItem {
                table: self.table.to_string(),
                tag: tag.to_string(),
                material: loot.item.material,
            });
        }

        Ok(loot)
    }

    /// Parse `<tag>.amount` and `<tag>.material`
    pub fn parse_item<T: ConfigTree>(
        &self,
        tag: &str,
        tree: &T,
    ) -> Result<StringItem, LootParseError> {
        let amount_path = path(&[tag, keys::AMOUNT]);
        let quantity = read_quantity(tree, &amount_path)
            .filter(|q| BoundsRule::Strict.accepts(q))
            .ok_or_else(|| LootParseError::ItemAmount {
                table: self.table.to_string(),
                path: amount_path.clone(),
            })?;

        let material = tree
            .get_string(&path(&[tag, keys::MATERIAL]))
            .unwrap_or_default();

        Ok(StringItem::new(material, quantity))
    }

    /// Parse `<tag>.enchant` into zero, one or many enchantments
    pub fn parse_enchants<T: ConfigTree>(
        &self,
        tag: &str,
        tree: &T,
    ) -> Result<Vec<StringEnchant>, LootParseError> {
        self.record_paths(tag, tree, ModifierKind::Enchant)
            .into_iter()
            .map(|(base, _)| self.parse_enchant_record(&base, tree))
            .collect()
    }

    /// Parse `<tag>.potion` into zero, one or many potion effects
    pub fn parse_potions<T: ConfigTree>(
        &self,
        tag: &str,
        tree: &T,
    ) -> Result<Vec<StringPotion>, LootParseError> {
        self.record_paths(tag, tree, ModifierKind::Potion)
            .into_iter()
            .map(|(base, shape)| {
                self.parse_potion_record(&base, tree, self.amplifier_rule(shape))
            })
            .collect()
    }

    /// Amplifier rule for a potion record of the given shape
    pub fn amplifier_rule(&self, shape: RecordShape) -> BoundsRule {
        match shape {
            RecordShape::Single => BoundsRule::Strict,
            RecordShape::Multiple if self.options.strict_potion_amplifier => BoundsRule::Strict,
            RecordShape::Multiple => BoundsRule::Lenient,
        }
    }

    /// Base paths of every record in the `kind` subsection of `tag`, in
    /// key order
    fn record_paths<T: ConfigTree>(
        &self,
        tag: &str,
        tree: &T,
        kind: ModifierKind,
    ) -> Vec<(String, RecordShape)> {
        let root = path(&[tag, kind.key()]);
        let Some(section) = tree.section(&root) else {
            return Vec::new();
        };

        match RecordShape::detect(section, kind) {
            RecordShape::Single => vec![(root, RecordShape::Single)],
            RecordShape::Multiple => section
                .get_keys(false)
                .into_iter()
                .map(|child| (path(&[root.as_str(), child.as_str()]), RecordShape::Multiple))
                .collect(),
        }
    }

    fn parse_enchant_record<T: ConfigTree>(
        &self,
        base: &str,
        tree: &T,
    ) -> Result<StringEnchant, LootParseError> {
        let level_path = path(&[base, keys::ENCHANT_LEVEL]);
        let level = read_quantity(tree, &level_path)
            .filter(|q| BoundsRule::Strict.accepts(q))
            .ok_or_else(|| LootParseError::EnchantLevel {
                table: self.table.to_string(),
                path: level_path.clone(),
            })?;

        let kind = self.read_type(base, keys::ENCHANT_TYPE, tree, ModifierKind::Enchant)?;
        Ok(StringEnchant::new(kind, level))
    }

    fn parse_potion_record<T: ConfigTree>(
        &self,
        base: &str,
        tree: &T,
        rule: BoundsRule,
    ) -> Result<StringPotion, LootParseError> {
        let amplifier_path = path(&[base, keys::POTION_AMPLIFIER]);
        let amplifier = read_quantity(tree, &amplifier_path)
            .filter(|a| rule.accepts(a))
            .ok_or_else(|| LootParseError::PotionAmplifier {
                table: self.table.to_string(),
                path: amplifier_path.clone(),
            })?;

        let kind = self.read_type(base, keys::POTION_TYPE, tree, ModifierKind::Potion)?;
        let duration = tree
            .get_int(&path(&[base, keys::POTION_DURATION]))
            .unwrap_or(0);

        Ok(StringPotion::new(kind, amplifier, duration))
    }

    fn read_type<T: ConfigTree>(
        &self,
        base: &str,
        key: &str,
        tree: &T,
        kind: ModifierKind,
    ) -> Result<String, LootParseError> {
        let type_path = path(&[base, key]);
        tree.get_string(&type_path)
            .ok_or_else(|| LootParseError::MissingModifierType {
                table: self.table.to_string(),
                kind,
                path: type_path,
            })
    }
}
