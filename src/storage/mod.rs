//! Sled-backed persistence for entity records and the inbound sequence
//! watermark.
//!
//! Each `save` call is atomic for its record; there is no cross-call
//! transaction. Every field of the entity round-trips through bincode, and
//! records are tagged with a schema version checked on load.

use std::path::{Path, PathBuf};

use sled::IVec;

use crate::arena::entity::{Entity, ENTITY_SCHEMA_VERSION};
use crate::arena::errors::ArenaError;

const TREE_ENTITIES: &str = "entities";
const TREE_META: &str = "meta";

const KEY_CURSOR: &[u8] = b"cursor";
const KEY_NEXT_BOT: &[u8] = b"next_bot_id";

/// Helper builder so tests can easily create throwaway stores with custom paths.
pub struct EntityStoreBuilder {
    path: PathBuf,
}

impl EntityStoreBuilder {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn open(self) -> Result<EntityStore, ArenaError> {
        EntityStore::open(self.path)
    }
}

/// Sled-backed store for all arena entities.
pub struct EntityStore {
    _db: sled::Db,
    entities: sled::Tree,
    meta: sled::Tree,
}

impl EntityStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ArenaError> {
        let path_ref = path.as_ref();
        std::fs::create_dir_all(path_ref)?;
        let db = sled::open(path_ref)?;
        let entities = db.open_tree(TREE_ENTITIES)?;
        let meta = db.open_tree(TREE_META)?;
        Ok(Self {
            _db: db,
            entities,
            meta,
        })
    }

    /// Big-endian with an offset so negative (bot) ids sort and scan cleanly.
    fn entity_key(id: i64) -> [u8; 8] {
        (id as u64 ^ (1u64 << 63)).to_be_bytes()
    }

    fn serialize<T: serde::Serialize>(value: &T) -> Result<Vec<u8>, ArenaError> {
        Ok(bincode::serialize(value)?)
    }

    fn deserialize<T: serde::de::DeserializeOwned>(bytes: IVec) -> Result<T, ArenaError> {
        Ok(bincode::deserialize::<T>(&bytes)?)
    }

    /// Insert or update one entity record.
    pub fn save(&self, entity: &Entity) -> Result<(), ArenaError> {
        let mut record = entity.clone();
        record.schema_version = ENTITY_SCHEMA_VERSION;
        let bytes = Self::serialize(&record)?;
        self.entities.insert(Self::entity_key(entity.id), bytes)?;
        self.entities.flush()?;
        Ok(())
    }

    /// Save several entities with one flush. Atomic per record only; used
    /// for fight pairs so both sides land together.
    pub fn save_batch(&self, batch: &[&Entity]) -> Result<(), ArenaError> {
        for entity in batch {
            let mut record = (*entity).clone();
            record.schema_version = ENTITY_SCHEMA_VERSION;
            let bytes = Self::serialize(&record)?;
            self.entities.insert(Self::entity_key(entity.id), bytes)?;
        }
        self.entities.flush()?;
        Ok(())
    }

    /// Fetch an entity, `Ok(None)` when absent.
    pub fn load(&self, id: i64) -> Result<Option<Entity>, ArenaError> {
        let Some(bytes) = self.entities.get(Self::entity_key(id))? else {
            return Ok(None);
        };
        let record: Entity = Self::deserialize(bytes)?;
        if record.schema_version != ENTITY_SCHEMA_VERSION {
            return Err(ArenaError::SchemaMismatch {
                entity: "entity",
                expected: ENTITY_SCHEMA_VERSION,
                found: record.schema_version,
            });
        }
        Ok(Some(record))
    }

    /// Batch fetch; absent ids are skipped.
    pub fn load_batch(&self, ids: &[i64]) -> Result<Vec<Entity>, ArenaError> {
        let mut out = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(entity) = self.load(*id)? {
                out.push(entity);
            }
        }
        Ok(out)
    }

    /// Full scan for cold-start index rebuilds.
    pub fn for_each(
        &self,
        mut visit: impl FnMut(&Entity) -> Result<(), ArenaError>,
    ) -> Result<(), ArenaError> {
        for entry in self.entities.iter() {
            let (_, bytes) = entry?;
            let record: Entity = Self::deserialize(bytes)?;
            visit(&record)?;
        }
        Ok(())
    }

    pub fn remove(&self, id: i64) -> Result<(), ArenaError> {
        self.entities.remove(Self::entity_key(id))?;
        self.entities.flush()?;
        Ok(())
    }

    /// Inbound sequence watermark: highest fully processed sequence id.
    pub fn get_cursor(&self) -> Result<u64, ArenaError> {
        let Some(bytes) = self.meta.get(KEY_CURSOR)? else {
            return Ok(0);
        };
        Ok(Self::deserialize(bytes)?)
    }

    pub fn set_cursor(&self, seq: u64) -> Result<(), ArenaError> {
        self.meta.insert(KEY_CURSOR, Self::serialize(&seq)?)?;
        self.meta.flush()?;
        Ok(())
    }

    /// Allocate the next bot id, counting down from -1.
    pub fn next_bot_id(&self) -> Result<i64, ArenaError> {
        let next = match self.meta.get(KEY_NEXT_BOT)? {
            Some(bytes) => Self::deserialize::<i64>(bytes)? - 1,
            None => -1,
        };
        self.meta.insert(KEY_NEXT_BOT, Self::serialize(&next)?)?;
        self.meta.flush()?;
        Ok(next)
    }
}
