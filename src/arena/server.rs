//! The run loop binding a chat gateway to the engine.
//!
//! Commands are processed strictly in sequence order, one at a time; the
//! maintenance sweep runs on a timer between commands. The highest fully
//! processed sequence id is persisted as a watermark so a restart resumes
//! where it left off.

use chrono::Utc;
use log::{error, info};
use rand::Rng;
use tokio::sync::mpsc;
use tokio::time::{interval, Duration};

use crate::arena::engine::Engine;
use crate::arena::errors::ArenaError;
use crate::gateway::InboundMessage;

pub struct ArenaServer<R: Rng> {
    engine: Engine<R>,
    inbound: mpsc::UnboundedReceiver<InboundMessage>,
    tick_ms: u64,
}

impl<R: Rng> ArenaServer<R> {
    pub fn new(
        engine: Engine<R>,
        inbound: mpsc::UnboundedReceiver<InboundMessage>,
        tick_ms: u64,
    ) -> Self {
        Self {
            engine,
            inbound,
            tick_ms,
        }
    }

    /// Run until the inbound channel closes. A failed command is logged and
    /// dropped; the watermark still advances so it is not replayed.
    pub async fn run(mut self) -> Result<(), ArenaError> {
        let mut cursor = self.engine.store().get_cursor()?;
        info!("arena server up, resuming after seq {cursor}");
        let mut ticker = interval(Duration::from_millis(self.tick_ms));
        loop {
            tokio::select! {
                inbound = self.inbound.recv() => {
                    let Some(msg) = inbound else {
                        info!("gateway closed, shutting down");
                        break;
                    };
                    if msg.seq <= cursor {
                        // Already processed before a restart.
                        continue;
                    }
                    if let Err(err) = self.engine.handle_message(&msg) {
                        error!("command seq {} dropped: {err}", msg.seq);
                    }
                    cursor = msg.seq;
                    self.engine.store().set_cursor(cursor)?;
                }
                _ = ticker.tick() => {
                    let now = Utc::now().timestamp();
                    if let Err(err) = self.engine.sweep(now) {
                        error!("maintenance sweep failed: {err}");
                    }
                }
            }
        }
        Ok(())
    }
}
