//! Boxer persistence
//!
//! [`BoxerStore`] is the narrow interface the engine needs from storage.
//! [`MemoryStore`] keeps records in memory and can snapshot them to JSON.

use std::path::Path;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::boxer::{Boxer, BoxerId, NewBoxer};
use crate::error::{Result, RingsideError};

/// Storage for boxer records
pub trait BoxerStore: Send + Sync {
    /// Store a new boxer under a fresh id. `Conflict` if the name is taken.
    fn insert(&self, new: NewBoxer) -> Result<Boxer>;

    fn get(&self, id: BoxerId) -> Result<Boxer>;

    /// Case-sensitive exact match
    fn get_by_name(&self, name: &str) -> Result<Boxer>;

    /// Remove and return the record
    fn remove(&self, id: BoxerId) -> Result<Boxer>;

    /// All boxers in creation order
    fn list(&self) -> Vec<Boxer>;

    /// Count a bout for both boxers and a win for `winner`.
    ///
    /// Both records are checked before either is touched, so a failure
    /// leaves the store unchanged.
    fn record_bout(&self, winner: BoxerId, loser: BoxerId) -> Result<()>;
}

#[derive(Default)]
struct StoreData {
    next_id: BoxerId,
    boxers: FxHashMap<BoxerId, Boxer>,
    by_name: FxHashMap<String, BoxerId>,
    /// Creation order (ids are monotonic, so this stays sorted)
    order: Vec<BoxerId>,
}

impl StoreData {
    fn with_boxers(next_id: BoxerId, mut boxers: Vec<Boxer>) -> Self {
        boxers.sort_by_key(|b| b.id);
        let max_id = boxers.last().map(|b| b.id).unwrap_or(0);
        let mut data = StoreData {
            next_id: next_id.max(max_id + 1),
            ..Default::default()
        };
        for boxer in boxers {
            data.by_name.insert(boxer.name.clone(), boxer.id);
            data.order.push(boxer.id);
            data.boxers.insert(boxer.id, boxer);
        }
        data
    }
}

/// On-disk snapshot format
#[derive(Serialize, Deserialize)]
struct Snapshot {
    next_id: BoxerId,
    boxers: Vec<Boxer>,
}

/// In-memory store behind a single `RwLock`
pub struct MemoryStore {
    data: RwLock<StoreData>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            data: RwLock::new(StoreData::with_boxers(1, Vec::new())),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, StoreData> {
        self.data.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreData> {
        self.data.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of stored boxers
    pub fn len(&self) -> usize {
        self.read().order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Load from a JSON snapshot
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let snapshot: Snapshot = serde_json::from_str(&content)?;

        {
            let mut seen: FxHashMap<&str, BoxerId> = FxHashMap::default();
            for boxer in &snapshot.boxers {
                if boxer.wins > boxer.fights {
                    anyhow::bail!("Boxer {} has more wins than fights", boxer.id);
                }
                if seen.insert(boxer.name.as_str(), boxer.id).is_some() {
                    anyhow::bail!("Duplicate boxer name in snapshot: {}", boxer.name);
                }
            }
        }

        Ok(Self {
            data: RwLock::new(StoreData::with_boxers(snapshot.next_id, snapshot.boxers)),
        })
    }

    /// Load from a snapshot if the file exists, otherwise start empty
    pub fn load_or_new(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::new())
        }
    }

    /// Save to a JSON snapshot.
    ///
    /// The snapshot goes to a temporary file in the same directory and is
    /// renamed over `path`, so readers never see a half-written file.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let snapshot = {
            let data = self.read();
            Snapshot {
                next_id: data.next_id,
                boxers: data
                    .order
                    .iter()
                    .filter_map(|id| data.boxers.get(id))
                    .cloned()
                    .collect(),
            }
        };
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut file = tempfile::NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut file, &snapshot)?;
        file.as_file().sync_all()?;
        file.persist(path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BoxerStore for MemoryStore {
    fn insert(&self, new: NewBoxer) -> Result<Boxer> {
        let mut data = self.write();
        if data.by_name.contains_key(&new.name) {
            return Err(RingsideError::Conflict(new.name));
        }

        let id = data.next_id;
        data.next_id += 1;

        let boxer = Boxer::from_new(id, new);
        data.by_name.insert(boxer.name.clone(), id);
        data.order.push(id);
        data.boxers.insert(id, boxer.clone());
        Ok(boxer)
    }

    fn get(&self, id: BoxerId) -> Result<Boxer> {
        self.read()
            .boxers
            .get(&id)
            .cloned()
            .ok_or_else(|| RingsideError::id_not_found(id))
    }

    fn get_by_name(&self, name: &str) -> Result<Boxer> {
        let data = self.read();
        data.by_name
            .get(name)
            .and_then(|id| data.boxers.get(id))
            .cloned()
            .ok_or_else(|| RingsideError::name_not_found(name))
    }

    fn remove(&self, id: BoxerId) -> Result<Boxer> {
        let mut data = self.write();
        let boxer = data
            .boxers
            .remove(&id)
            .ok_or_else(|| RingsideError::id_not_found(id))?;
        data.by_name.remove(&boxer.name);
        data.order.retain(|&o| o != id);
        Ok(boxer)
    }

    fn list(&self) -> Vec<Boxer> {
        let data = self.read();
        data.order
            .iter()
            .filter_map(|id| data.boxers.get(id))
            .cloned()
            .collect()
    }

    fn record_bout(&self, winner: BoxerId, loser: BoxerId) -> Result<()> {
        if winner == loser {
            return Err(RingsideError::validation(
                "bout",
                format!("boxer {} cannot fight itself", winner),
            ));
        }

        let mut data = self.write();
        for id in [winner, loser] {
            if !data.boxers.contains_key(&id) {
                return Err(RingsideError::id_not_found(id));
            }
        }

        // Counters saturate at u32::MAX; wins <= fights holds either way
        if let Some(w) = data.boxers.get_mut(&winner) {
            w.fights = w.fights.saturating_add(1);
            w.wins = w.wins.saturating_add(1);
        }
        if let Some(l) = data.boxers.get_mut(&loser) {
            l.fights = l.fights.saturating_add(1);
        }
        Ok(())
    }
}
