//! The set of path definitions known to the player and their unlock state.
//!
//! Insertion order is display order, and it is the order matches are
//! reported in. The library is the only owner of unlock state; the matcher
//! and transformer only read it.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LibraryError, PathDataError};
use crate::events::{Notification, Notifier};
use crate::path::PathDefinition;

/// Stable handle to a library entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PathId(pub u32);

impl std::fmt::Display for PathId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "path#{}", self.0)
    }
}

#[derive(Debug, Clone)]
struct Entry {
    id: PathId,
    definition: PathDefinition,
    unlocked: bool,
}

/// One record of a path library file.
#[derive(Debug, Deserialize)]
struct AuthoredPath {
    #[serde(flatten)]
    definition: PathDefinition,
    #[serde(default = "starts_unlocked_default")]
    starts_unlocked: bool,
}

fn starts_unlocked_default() -> bool {
    true
}

#[derive(Debug, Clone, Default)]
pub struct PathLibrary {
    entries: Vec<Entry>,
    next_id: u32,
}

impl PathLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON array of authored paths. Invalid definitions are logged
    /// and left out; they are returned alongside the library.
    pub fn from_json(json: &str) -> Result<(Self, Vec<PathDataError>), LibraryError> {
        let authored: Vec<AuthoredPath> = serde_json::from_str(json)?;
        let mut library = Self::new();
        let mut rejected = Vec::new();

        for path in authored {
            if let Err(e) = library.add(path.definition, path.starts_unlocked) {
                log::warn!("rejected path definition: {}", e);
                rejected.push(e);
            }
        }

        log::info!(
            "path library loaded: {} paths ({} unlocked), {} rejected",
            library.len(),
            library.unlocked().count(),
            rejected.len()
        );
        Ok((library, rejected))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<(Self, Vec<PathDataError>), LibraryError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Validate and append a definition. Names must be unique.
    pub fn add(
        &mut self,
        definition: PathDefinition,
        unlocked: bool,
    ) -> Result<PathId, PathDataError> {
        if self.find(definition.name()).is_some() {
            return Err(PathDataError::DuplicateName {
                name: definition.name().to_string(),
            });
        }
        definition.validate()?;

        let id = PathId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            definition,
            unlocked,
        });
        Ok(id)
    }

    pub fn remove(&mut self, id: PathId) -> Option<PathDefinition> {
        let index = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(index).definition)
    }

    /// Returns true if the path was locked before.
    pub fn unlock(&mut self, id: PathId, events: &mut Notifier) -> bool {
        self.set_unlocked(id, true, events)
    }

    /// Returns true if the path was unlocked before.
    pub fn lock(&mut self, id: PathId, events: &mut Notifier) -> bool {
        self.set_unlocked(id, false, events)
    }

    fn set_unlocked(&mut self, id: PathId, unlocked: bool, events: &mut Notifier) -> bool {
        let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) else {
            return false;
        };
        if entry.unlocked == unlocked {
            return false;
        }
        entry.unlocked = unlocked;
        log::debug!(
            "{} `{}` {}",
            id,
            entry.definition.name(),
            if unlocked { "unlocked" } else { "locked" }
        );
        events.emit(Notification::InventoryChanged);
        true
    }

    pub fn is_unlocked(&self, id: PathId) -> bool {
        self.entries.iter().any(|e| e.id == id && e.unlocked)
    }

    pub fn get(&self, id: PathId) -> Option<&PathDefinition> {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .map(|e| &e.definition)
    }

    pub fn find(&self, name: &str) -> Option<PathId> {
        self.entries
            .iter()
            .find(|e| e.definition.name() == name)
            .map(|e| e.id)
    }

    /// All entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (PathId, &PathDefinition)> {
        self.entries.iter().map(|e| (e.id, &e.definition))
    }

    /// Unlocked entries in insertion order.
    pub fn unlocked(&self) -> impl Iterator<Item = (PathId, &PathDefinition)> {
        self.entries
            .iter()
            .filter(|e| e.unlocked)
            .map(|e| (e.id, &e.definition))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
