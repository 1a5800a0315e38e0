//! Test fixtures: a tempdir-backed engine with a seeded RNG and an
//! outbound capture channel.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::TempDir;
use tokio::sync::mpsc;

use arenabot::arena::entity::Entity;
use arenabot::arena::Engine;
use arenabot::config::GameConfig;
use arenabot::gateway::{InboundMessage, OutgoingMessage};
use arenabot::storage::EntityStoreBuilder;

pub struct TestArena {
    pub engine: Engine<StdRng>,
    pub outbound: mpsc::UnboundedReceiver<OutgoingMessage>,
    seq: u64,
    _dir: TempDir,
}

#[allow(dead_code)] // not every suite uses every helper
impl TestArena {
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, GameConfig::default())
    }

    pub fn with_config(seed: u64, config: GameConfig) -> Self {
        let dir = TempDir::new().expect("tempdir");
        let store = EntityStoreBuilder::new(dir.path()).open().expect("store");
        let (tx, rx) = mpsc::unbounded_channel();
        let engine =
            Engine::new(store, tx, config, StdRng::seed_from_u64(seed)).expect("engine");
        Self {
            engine,
            outbound: rx,
            seq: 0,
            _dir: dir,
        }
    }

    /// Route one command through the engine as `sender` at time `now`.
    pub fn command(&mut self, sender: i64, name: &str, text: &str, now: i64) {
        self.seq += 1;
        let msg = InboundMessage {
            seq: self.seq,
            sender_id: sender,
            sender_name: name.to_string(),
            text: text.to_string(),
            timestamp: now,
        };
        self.engine.handle_message(&msg).expect("command");
    }

    /// Load a stored entity that must exist.
    pub fn entity(&self, id: i64) -> Entity {
        self.engine
            .store()
            .load(id)
            .expect("load")
            .expect("entity present")
    }

    /// Persist an entity directly, bypassing the command path.
    pub fn put(&self, entity: &Entity) {
        self.engine.store().save(entity).expect("save");
    }

    /// Drain all captured outbound messages.
    pub fn drain(&mut self) -> Vec<OutgoingMessage> {
        let mut out = Vec::new();
        while let Ok(msg) = self.outbound.try_recv() {
            out.push(msg);
        }
        out
    }

    /// Drain and keep only messages addressed to `target`.
    pub fn drain_for(&mut self, target: i64) -> Vec<OutgoingMessage> {
        self.drain()
            .into_iter()
            .filter(|m| m.target == target)
            .collect()
    }
}
