//! Core game state machine: entities, combat, trading, effects, bots and
//! the session engine that routes inbound commands between them.

pub mod bots;
pub mod combat;
pub mod commands;
pub mod effects;
pub mod engine;
pub mod entity;
pub mod errors;
pub mod flavor;
pub mod items;
pub mod maintenance;
pub mod server;
pub mod trading;

pub use engine::Engine;
pub use errors::ArenaError;
pub use server::ArenaServer;
