//! Static game catalog: loading, validation and lookup.

use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{info, warn};

use crate::{filter::filter_catalog, models::GameRecord};

const BUILTIN_CATALOG: &str = include_str!("../data/games.json");
const BUILTIN_SOURCE: &str = "built-in catalog";

/// Failure to read or decode catalog data.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("failed to read catalog {}", .path.display())]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The catalog contents are not a JSON array of games.
    #[error("failed to parse {source_name}")]
    Parse {
        /// Label of the data source (file path or built-in).
        source_name: String,
        /// Underlying decode error.
        #[source]
        source: serde_json::Error,
    },
}

/// Read-only, ordered collection of games backing the screen.
#[derive(Debug, Clone)]
pub struct Catalog {
    games: Vec<GameRecord>,
    source: String,
    loaded_at: DateTime<Utc>,
}

impl Catalog {
    /// Catalog bundled with the crate.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG, BUILTIN_SOURCE)
    }

    /// Load a JSON array of games from `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents, &path.display().to_string())
    }

    /// Load from `path` when given, otherwise fall back to the built-in data.
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self, CatalogError> {
        match path {
            Some(path) => Self::load(path),
            None => Self::builtin(),
        }
    }

    /// Decode `contents` and validate the records.
    pub fn from_json(contents: &str, source_name: &str) -> Result<Self, CatalogError> {
        let records: Vec<GameRecord> =
            serde_json::from_str(contents).map_err(|source| CatalogError::Parse {
                source_name: source_name.to_string(),
                source,
            })?;
        Ok(Self::from_records(records, source_name))
    }

    /// Build a catalog, keeping the first record for each id.
    pub fn from_records(records: Vec<GameRecord>, source_name: &str) -> Self {
        let mut seen = HashSet::with_capacity(records.len());
        let mut games = Vec::with_capacity(records.len());
        for record in records {
            if !seen.insert(record.id) {
                warn!(id = record.id, name = %record.name, source = source_name, "Skipping duplicate game id");
                continue;
            }
            if record.name.trim().is_empty() {
                warn!(id = record.id, source = source_name, "Game has no name");
            }
            games.push(record);
        }

        info!(total = games.len(), source = source_name, "Catalog loaded");
        Self {
            games,
            source: source_name.to_string(),
            loaded_at: Utc::now(),
        }
    }

    /// All games in catalog order.
    pub fn games(&self) -> &[GameRecord] {
        &self.games
    }

    /// Number of games.
    pub fn len(&self) -> usize {
        self.games.len()
    }

    /// `true` when the catalog holds no games.
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Look up a game by id.
    pub fn get(&self, id: u32) -> Option<&GameRecord> {
        self.games.iter().find(|game| game.id == id)
    }

    /// Games matching `term`, sorted by name.
    pub fn filtered(&self, term: &str) -> Vec<&GameRecord> {
        filter_catalog(&self.games, term)
    }

    /// Where the data came from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// When the catalog was decoded.
    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}
