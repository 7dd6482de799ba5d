use crate::config::load_toml;
use crate::tree::ConfigTree;
use crate::ConfigError;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Resolves a table name to its configuration document
pub trait TableSource {
    type Tree: ConfigTree;

    fn exists(&self, name: &str) -> bool;

    /// Load the document for `name`, or `None` if there is none
    fn load(&self, name: &str) -> Result<Option<Self::Tree>, ConfigError>;
}

/// Documents held in memory, keyed by table name
#[derive(Debug, Clone)]
pub struct MemorySource<T> {
    tables: HashMap<String, T>,
}

impl<T> Default for MemorySource<T> {
    fn default() -> Self {
        MemorySource {
            tables: HashMap::new(),
        }
    }
}

impl<T> MemorySource<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, tree: T) {
        self.tables.insert(name.into(), tree);
    }
}

impl<T: ConfigTree + Clone> TableSource for MemorySource<T> {
    type Tree = T;

    fn exists(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    fn load(&self, name: &str) -> Result<Option<T>, ConfigError> {
        Ok(self.tables.get(name).cloned())
    }
}

/// A directory of `<name>.toml` table files
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        DirectorySource { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.toml", name))
    }
}

impl TableSource for DirectorySource {
    type Tree = toml::Table;

    fn exists(&self, name: &str) -> bool {
        self.path_for(name).is_file()
    }

    fn load(&self, name: &str) -> Result<Option<toml::Table>, ConfigError> {
        let path = self.path_for(name);
        if !path.is_file() {
            return Ok(None);
        }
        load_toml(&path).map(Some)
    }
}
