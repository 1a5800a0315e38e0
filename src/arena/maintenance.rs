//! The periodic maintenance sweep.
//!
//! Runs once per tick after command processing and walks the cached index
//! sets rather than the whole entity population: daily counter reset, boost
//! expiry, HP regeneration, bot auto-assignment and fight timeouts, in that
//! order.

use chrono::{DateTime, Timelike, Utc};
use log::{debug, warn};
use rand::Rng;

use crate::arena::combat::FIGHT_TIMEOUT_SECS;
use crate::arena::engine::Engine;
use crate::arena::entity::Status;
use crate::arena::errors::ArenaError;

/// Minimum age of the previous reset before the daily window may fire again.
const DAILY_RESET_MIN_AGE_SECS: i64 = 24 * 3600;

impl<R: Rng> Engine<R> {
    /// One full sweep at time `now` (Unix seconds).
    pub fn sweep(&mut self, now: i64) -> Result<(), ArenaError> {
        self.sweep_daily_reset(now)?;
        self.sweep_boosts(now)?;
        self.sweep_regen(now)?;
        self.sweep_bot_assignment(now)?;
        self.sweep_fight_timeouts(now)?;
        self.trim_active(now);
        Ok(())
    }

    /// Reset daily counters inside the configured one-hour UTC window. The
    /// 24h age check prevents a double reset within the same window.
    fn sweep_daily_reset(&mut self, now: i64) -> Result<(), ArenaError> {
        let Some(stamp) = DateTime::<Utc>::from_timestamp(now, 0) else {
            return Ok(());
        };
        if stamp.hour() != self.config.daily_reset_hour {
            return Ok(());
        }
        let ids: Vec<i64> = self.indices.active.keys().copied().collect();
        for entity in &mut self.store.load_batch(&ids)? {
            if now - entity.last_daily_reset < DAILY_RESET_MIN_AGE_SECS {
                continue;
            }
            entity.daily_tasks = 0;
            entity.last_daily_reset = now;
            self.store.save(entity)?;
            debug!("daily counters reset for {}", entity.id);
        }
        Ok(())
    }

    /// Expire potion boosts, notifying each entity once per expiry.
    fn sweep_boosts(&mut self, now: i64) -> Result<(), ArenaError> {
        let ids: Vec<i64> = self.indices.active.keys().copied().collect();
        for entity in &mut self.store.load_batch(&ids)? {
            let strength_gone = entity.strength_boost.expire(now);
            let luck_gone = entity.luck_boost.expire(now);
            if !strength_gone && !luck_gone {
                continue;
            }
            self.store.save(entity)?;
            if strength_gone {
                self.send(entity.id, "Your strength boost has worn off.");
            }
            if luck_gone {
                self.send(entity.id, "Your luck boost has worn off.");
            }
        }
        Ok(())
    }

    /// One HP per configured interval while idle and below max.
    fn sweep_regen(&mut self, now: i64) -> Result<(), ArenaError> {
        let ids: Vec<i64> = self.indices.injured.iter().copied().collect();
        for mut entity in self.store.load_batch(&ids)? {
            if entity.status != Status::Idle || !entity.is_injured() {
                if !entity.is_injured() {
                    self.indices.injured.remove(&entity.id);
                }
                continue;
            }
            if now - entity.last_restore < self.config.regen_interval_secs {
                continue;
            }
            entity.hp += 1;
            entity.last_restore = now;
            if !entity.is_injured() {
                self.indices.injured.remove(&entity.id);
            }
            self.store.save(&entity)?;
        }
        Ok(())
    }

    /// Anyone waiting past the ready window gets a generated bot opponent.
    fn sweep_bot_assignment(&mut self, now: i64) -> Result<(), ArenaError> {
        let ids: Vec<i64> = self.indices.ready.iter().copied().collect();
        for entity in self.store.load_batch(&ids)? {
            if entity.status != Status::ReadyToFight {
                warn!("ready index out of sync for {}", entity.id);
                self.indices.ready.remove(&entity.id);
                continue;
            }
            if now - entity.ready_since < self.config.ready_wait_secs {
                continue;
            }
            self.assign_bot(entity, now)?;
        }
        Ok(())
    }

    /// A fighter that sat on its turn past the timeout acts with an
    /// automatic failure; a bot opponent then answers immediately (inside
    /// `resolve_hit`).
    fn sweep_fight_timeouts(&mut self, now: i64) -> Result<(), ArenaError> {
        let ids: Vec<i64> = self.indices.fighting.iter().copied().collect();
        for entity in self.store.load_batch(&ids)? {
            if entity.status != Status::Fighting || !entity.has_turn {
                continue;
            }
            if now - entity.last_fight_activity < FIGHT_TIMEOUT_SECS {
                continue;
            }
            let Some(opponent_id) = entity.opponent else {
                warn!("fighting entity {} lost its opponent link", entity.id);
                continue;
            };
            let Some(opponent) = self.store.load(opponent_id)? else {
                return Err(ArenaError::MissingOpponent {
                    entity: entity.id,
                    opponent: opponent_id,
                });
            };
            debug!("fight timeout: forcing a missed strike for {}", entity.id);
            self.send(entity.id, "You hesitated too long and the strike goes wide.");
            self.resolve_hit(entity, opponent, false, now)?;
        }
        Ok(())
    }

    /// Drop identities that have not been seen within the active window.
    fn trim_active(&mut self, now: i64) {
        let window = self.config.active_window_secs;
        self.indices
            .active
            .retain(|_, last_seen| now - *last_seen <= window);
    }
}
