use crate::config::{keys, ParserOptions, MAX_DRAW};
use crate::parser::EntryParser;
use crate::source::TableSource;
use crate::tree::ConfigTree;
use crate::LootParseError;
use log::{debug, error, warn};
use loot_core::Loot;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A named, ordered collection of loot entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LootTable {
    name: String,
    draw: u32,
    loots: Vec<Loot>,
}

impl LootTable {
    /// Table with no entries and a draw count of zero
    pub fn empty(name: impl Into<String>) -> Self {
        LootTable {
            name: name.into(),
            draw: 0,
            loots: Vec::new(),
        }
    }

    /// Build a table, returning the first parse error with the partial table
    pub fn build<T: ConfigTree>(
        name: &str,
        tree: &T,
        options: &ParserOptions,
    ) -> Result<Self, BuildFailure> {
        LootTableBuilder::new(name, tree)
            .with_options(options.clone())
            .build()
    }

    /// Build a table with default options, logging any failure.
    ///
    /// Always returns a table: on failure it holds the entries parsed before
    /// the offending one.
    pub fn load<T: ConfigTree>(name: &str, tree: &T) -> Self {
        Self::load_with(name, tree, &ParserOptions::default())
    }

    pub fn load_with<T: ConfigTree>(name: &str, tree: &T, options: &ParserOptions) -> Self {
        match Self::build(name, tree, options) {
            Ok(table) => {
                debug!(
                    "Loaded loot table '{}': {} entries, draw {}",
                    table.name,
                    table.loots.len(),
                    table.draw
                );
                table
            }
            Err(failure) => {
                error!("{}", failure.error);
                failure.partial
            }
        }
    }

    /// Resolve `name` through `source` and build it, logging any failure
    pub fn load_from<S: TableSource>(name: &str, source: &S, options: &ParserOptions) -> Self {
        match source.load(name) {
            Ok(Some(tree)) => Self::load_with(name, &tree, options),
            Ok(None) => {
                warn!("Loot table '{}' not found", name);
                Self::empty(name)
            }
            Err(e) => {
                error!("[{}] {}", name, e);
                Self::empty(name)
            }
        }
    }

    /// Whether `source` can supply a table called `name`
    pub fn exists<S: TableSource>(name: &str, source: &S) -> bool {
        source.exists(name)
    }

    /// Append an entry after construction
    pub fn add(&mut self, loot: Loot) {
        self.loots.push(loot);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn draw(&self) -> u32 {
        self.draw
    }

    pub fn loots(&self) -> &[Loot] {
        &self.loots
    }

    pub fn len(&self) -> usize {
        self.loots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loots.is_empty()
    }
}

/// A failed build: the error and the entries accumulated before it
#[derive(Debug, Error)]
#[error("{error}")]
pub struct BuildFailure {
    pub error: LootParseError,
    pub partial: LootTable,
}

/// Progress of a [`LootTableBuilder`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildState {
    Empty,
    Loading,
    Ready,
    Failed,
}

/// Drives parsing of one table document
#[derive(Debug)]
pub struct LootTableBuilder<'a, T: ConfigTree> {
    tree: &'a T,
    options: ParserOptions,
    state: BuildState,
    table: LootTable,
}

impl<'a, T: ConfigTree> LootTableBuilder<'a, T> {
    pub fn new(name: impl Into<String>, tree: &'a T) -> Self {
        LootTableBuilder {
            tree,
            options: ParserOptions::default(),
            state: BuildState::Empty,
            table: LootTable::empty(name),
        }
    }

    pub fn with_options(mut self, options: ParserOptions) -> Self {
        self.options = options;
        self
    }

    pub fn state(&self) -> BuildState {
        self.state
    }

    /// Parse the draw count, then every entry in key order.
    ///
    /// Stops at the first invalid value. The builder can be run again; each
    /// run starts from an empty table.
    pub fn build(&mut self) -> Result<LootTable, BuildFailure> {
        self.state = BuildState::Loading;

        let result = self.load();
        let name = self.table.name.clone();
        let table = std::mem::replace(&mut self.table, LootTable::empty(name));

        match result {
            Ok(()) => {
                self.state = BuildState::Ready;
                Ok(table)
            }
            Err(error) => {
                self.state = BuildState::Failed;
                Err(BuildFailure {
                    error,
                    partial: table,
                })
            }
        }
    }

    fn load(&mut self) -> Result<(), LootParseError> {
        let name = self.table.name.clone();

        let draw = self.tree.get_int(keys::DRAW).unwrap_or(0);
        self.table.draw = u32::try_from(draw)
            .ok()
            .filter(|d| *d <= MAX_DRAW)
            .ok_or_else(|| LootParseError::DrawOutOfBounds {
                table: name.clone(),
                draw,
                max: MAX_DRAW,
            })?;

        let parser = EntryParser::new(&name, &self.options);
        for tag in self.tree.get_keys(false) {
            if tag.eq_ignore_ascii_case(keys::DRAW) {
                continue;
            }
            let loot = parser.parse_loot(&tag, self.tree)?;
            self.table.loots.push(loot);
        }

        Ok(())
    }
}
