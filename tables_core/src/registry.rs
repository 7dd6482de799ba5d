use crate::config::{load_toml, ParserOptions};
use crate::table::LootTable;
use crate::ConfigError;
use log::{debug, error, warn};
use std::collections::HashMap;
use std::path::Path;

/// Every loot table found under a directory, keyed by file stem
#[derive(Debug, Default)]
pub struct LootTableRegistry {
    tables: HashMap<String, LootTable>,
    options: ParserOptions,
}

impl LootTableRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Load all loot tables from a directory (recursively)
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        Self::load_with_options(dir, ParserOptions::default())
    }

    pub fn load_with_options(dir: &Path, options: ParserOptions) -> Result<Self, ConfigError> {
        let mut registry = LootTableRegistry {
            tables: HashMap::new(),
            options,
        };
        registry.load_dir(dir)?;
        Ok(registry)
    }

    /// Walk a directory recursively. Unreadable directories are errors;
    /// a bad table file is logged and yields an empty or partial table.
    fn load_dir(&mut self, dir: &Path) -> Result<(), ConfigError> {
        if !dir.exists() {
            return Ok(());
        }

        let entries = std::fs::read_dir(dir).map_err(|e| ConfigError::Io {
            error: e,
            path: Some(dir.to_path_buf()),
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| ConfigError::Io {
                error: e,
                path: Some(dir.to_path_buf()),
            })?;
            let path = entry.path();

            if path.is_dir() {
                self.load_dir(&path)?;
            } else if path.extension().is_some_and(|ext| ext == "toml") {
                self.load_file(&path);
            }
        }

        Ok(())
    }

    fn load_file(&mut self, path: &Path) {
        let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
            warn!("Skipping loot table file with unreadable name: {:?}", path);
            return;
        };

        let table = match load_toml::<toml::Table>(path) {
            Ok(tree) => LootTable::load_with(name, &tree, &self.options),
            Err(e) => {
                error!("[{}] {}", name, e);
                LootTable::empty(name)
            }
        };

        debug!("Registered loot table '{}' from {:?}", name, path);
        if self.tables.insert(name.to_string(), table).is_some() {
            warn!("Loot table '{}' defined more than once, keeping {:?}", name, path);
        }
    }

    /// Add or replace a table
    pub fn insert(&mut self, table: LootTable) {
        self.tables.insert(table.name().to_string(), table);
    }

    /// Get a table by name
    pub fn get(&self, name: &str) -> Option<&LootTable> {
        self.tables.get(name)
    }

    /// Check if a table exists
    pub fn contains(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    /// List all table names
    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loot_core::{DynamicRange, Loot, StringItem};
    use std::io::Write;
    use tempfile::TempDir;

    fn create_test_table(dir: &Path, name: &str, content: &str) {
        let path = dir.join(format!("{}.toml", name));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
    }

    #[test]
    fn test_load_simple_table() {
        let dir = TempDir::new().unwrap();
        create_test_table(
            dir.path(),
            "goblin",
            r#"
draw = 3

[sword]
material = "IRON_SWORD"
amount = 1
luck = 10
"#,
        );

        let registry = LootTableRegistry::load(dir.path()).unwrap();
        assert!(registry.contains("goblin"));

        let table = registry.get("goblin").unwrap();
        assert_eq!(table.draw(), 3);
        assert_eq!(
            table.loots(),
            &[Loot::new(StringItem::new("IRON_SWORD", 1), 10)]
        );
    }

    #[test]
    fn test_nested_directories() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("dungeon");
        std::fs::create_dir(&nested).unwrap();

        create_test_table(dir.path(), "village", "draw = 1\n");
        create_test_table(&nested, "crypt", "draw = 2\n");
        create_test_table(dir.path(), "notes", "not a table");
        std::fs::write(dir.path().join("readme.txt"), "ignored").unwrap();

        let registry = LootTableRegistry::load(dir.path()).unwrap();
        let mut names: Vec<&str> = registry.table_names().collect();
        names.sort();
        assert_eq!(names, vec!["crypt", "notes", "village"]);
        assert_eq!(registry.get("crypt").unwrap().draw(), 2);
    }

    #[test]
    fn test_bad_file_yields_empty_table() {
        let dir = TempDir::new().unwrap();
        create_test_table(dir.path(), "broken", "draw = = 1");

        let registry = LootTableRegistry::load(dir.path()).unwrap();
        assert_eq!(registry.get("broken"), Some(&LootTable::empty("broken")));
    }

    #[test]
    fn test_invalid_entry_keeps_partial_table() {
        let dir = TempDir::new().unwrap();
        create_test_table(
            dir.path(),
            "mine",
            r#"
draw = 4

[coal]
material = "COAL"
amount = "[1;8]"
luck = 20

[iron]
material = "IRON_ORE"
amount = "[0;2]"
luck = 5
"#,
        );

        let registry = LootTableRegistry::load(dir.path()).unwrap();
        let table = registry.get("mine").unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(
            table.loots()[0].item.quantity.as_range(),
            DynamicRange::new(1, 8)
        );
    }

    #[test]
    fn test_options_are_applied() {
        let dir = TempDir::new().unwrap();
        create_test_table(
            dir.path(),
            "brew",
            r#"
[bottle]
material = "POTION"
amount = 1
luck = 1

[bottle.potion.speed]
type = "SPEED"
amplifier = 0
duration = 100
"#,
        );

        let lenient = LootTableRegistry::load(dir.path()).unwrap();
        assert_eq!(lenient.get("brew").unwrap().len(), 1);

        let options = ParserOptions {
            strict_potion_amplifier: true,
            ..ParserOptions::default()
        };
        let strict = LootTableRegistry::load_with_options(dir.path(), options).unwrap();
        assert!(strict.get("brew").unwrap().is_empty());
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let registry = LootTableRegistry::load(Path::new("/nonexistent/loot")).unwrap();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_insert_table() {
        let mut registry = LootTableRegistry::new();
        registry.insert(LootTable::empty("manual"));
        assert_eq!(registry.len(), 1);
        assert!(registry.contains("manual"));
    }
}
