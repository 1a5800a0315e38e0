//! # Arenabot - a persistent turn-based combat and progression engine
//!
//! Arenabot runs a small arena RPG over any chat gateway: players register,
//! pick up daily tasks, brew potions, trade with a wandering peddler and
//! fight each other (or generated bots) in turn-based duels. The engine is
//! transport-agnostic: inbound commands and outbound notifications travel
//! over channels, and a local console transport ships for development.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use arenabot::arena::{ArenaServer, Engine};
//! use arenabot::config::Config;
//! use arenabot::storage::EntityStore;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.toml").await?;
//!     let store = EntityStore::open(&config.storage.data_dir)?;
//!     let channels = arenabot::gateway::channels();
//!     let engine = Engine::new(
//!         store,
//!         channels.outbound_tx.clone(),
//!         config.game.clone(),
//!         StdRng::from_entropy(),
//!     )?;
//!     ArenaServer::new(engine, channels.inbound_rx, config.gateway.tick_ms)
//!         .run()
//!         .await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`arena`] - the game state machine: entities, combat, trading, engine
//! - [`gateway`] - chat-gateway boundary types and channels
//! - [`storage`] - sled-backed entity persistence and the sequence watermark
//! - [`config`] - TOML configuration
//! - [`logutil`] - log sanitization helpers

pub mod arena;
pub mod config;
pub mod gateway;
pub mod logutil;
pub mod storage;
