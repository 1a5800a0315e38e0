//! The session engine: one inbound command at a time, status-gated routing,
//! matchmaking and the four cached index sets.
//!
//! Every mutation runs to completion before the next command is considered.
//! Entities linked in a fight are loaded, mutated and persisted together, so
//! the fight can never be observed torn. The index sets mirror persisted
//! state; they are rebuilt from a full scan on cold start and updated next
//! to every mutation, never independently.

use std::collections::{HashMap, HashSet};

use log::{debug, info, warn};
use rand::Rng;
use tokio::sync::mpsc;

use crate::arena::bots::generate_bot;
use crate::arena::combat::{apply_hit, finish_fight, FightSummary, HitApplied, HitRoll, Loot};
use crate::arena::commands::{parse, valid_name, Command};
use crate::arena::effects::BOOST_LIFETIME_SECS;
use crate::arena::entity::{Entity, StatKind, Status};
use crate::arena::errors::ArenaError;
use crate::arena::flavor::{phrase_or_fallback, FlavorContext, FlavorProvider};
use crate::arena::items::{ItemKind, PotionKind, INGREDIENTS};
use crate::arena::trading::{accept, make_offer, offer_text, reject, TradeResult};
use crate::config::GameConfig;
use crate::gateway::{InboundMessage, OutgoingMessage};
use crate::logutil::escape_log;
use crate::storage::EntityStore;

/// Strength/luck potion magnitude.
pub const POTION_BONUS: u32 = 3;

/// Chance denominator for a task turning into a trade offer (1 in N).
const TRADE_CHANCE: u32 = 4;

pub const FIGHT_ACTIONS: &[&str] = &["/hit", "/miss"];
pub const TRADE_ACTIONS: &[&str] = &["/accept", "/reject"];

/// Process-local caches over persisted entity state.
#[derive(Debug, Default)]
pub struct Indices {
    /// Recently seen human identities, id -> last activity (Unix s).
    pub active: HashMap<i64, i64>,
    /// Entities with HP below max.
    pub injured: HashSet<i64>,
    /// Entities waiting for matchmaking.
    pub ready: HashSet<i64>,
    /// Entities currently in a fight.
    pub fighting: HashSet<i64>,
}

pub struct Engine<R: Rng> {
    pub(crate) store: EntityStore,
    pub(crate) outbound: mpsc::UnboundedSender<OutgoingMessage>,
    pub(crate) rng: R,
    pub(crate) config: GameConfig,
    pub(crate) indices: Indices,
    pub(crate) flavor: Option<Box<dyn FlavorProvider>>,
}

impl<R: Rng> Engine<R> {
    /// Build an engine over an opened store, rebuilding the index sets with
    /// one full scan.
    pub fn new(
        store: EntityStore,
        outbound: mpsc::UnboundedSender<OutgoingMessage>,
        config: GameConfig,
        rng: R,
    ) -> Result<Self, ArenaError> {
        let mut engine = Self {
            store,
            outbound,
            rng,
            config,
            indices: Indices::default(),
            flavor: None,
        };
        engine.rebuild_indices()?;
        Ok(engine)
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn with_flavor(mut self, provider: Box<dyn FlavorProvider>) -> Self {
        self.flavor = Some(provider);
        self
    }

    /// Cold-start rebuild of all four index sets from persisted state.
    pub fn rebuild_indices(&mut self) -> Result<(), ArenaError> {
        let mut indices = Indices::default();
        let window = self.config.active_window_secs;
        let now = chrono::Utc::now().timestamp();
        self.store.for_each(|entity| {
            if entity.is_injured() {
                indices.injured.insert(entity.id);
            }
            match entity.status {
                Status::ReadyToFight => {
                    indices.ready.insert(entity.id);
                }
                Status::Fighting => {
                    indices.fighting.insert(entity.id);
                }
                _ => {}
            }
            if !entity.is_bot() && now - entity.last_activity <= window {
                indices.active.insert(entity.id, entity.last_activity);
            }
            Ok(())
        })?;
        info!(
            "index rebuild: active={} injured={} ready={} fighting={}",
            indices.active.len(),
            indices.injured.len(),
            indices.ready.len(),
            indices.fighting.len()
        );
        self.indices = indices;
        Ok(())
    }

    /// Re-derive the injured/ready/fighting membership for one entity after
    /// a mutation. Always called right before or after persisting it.
    fn sync_indices(&mut self, entity: &Entity) {
        if entity.is_injured() {
            self.indices.injured.insert(entity.id);
        } else {
            self.indices.injured.remove(&entity.id);
        }
        if entity.status == Status::ReadyToFight {
            self.indices.ready.insert(entity.id);
        } else {
            self.indices.ready.remove(&entity.id);
        }
        if entity.status == Status::Fighting {
            self.indices.fighting.insert(entity.id);
        } else {
            self.indices.fighting.remove(&entity.id);
        }
    }

    /// Best-effort outbound send. Bots never receive messages.
    pub(crate) fn send(&self, target: i64, text: impl Into<String>) {
        self.send_with_actions(target, text, &[]);
    }

    pub(crate) fn send_with_actions(&self, target: i64, text: impl Into<String>, actions: &[&str]) {
        if target < 0 {
            return;
        }
        let msg = OutgoingMessage::with_actions(target, text, actions);
        if self.outbound.send(msg).is_err() {
            warn!("outbound channel closed; dropping message for {target}");
        }
    }

    // ------------------------------------------------------------------
    // Command entry point
    // ------------------------------------------------------------------

    pub fn handle_message(&mut self, msg: &InboundMessage) -> Result<(), ArenaError> {
        if msg.sender_id <= 0 {
            // Bots have no session-level commands.
            return Ok(());
        }
        let now = msg.timestamp;
        let command = parse(&msg.text);
        debug!(
            "seq={} from={} cmd={:?} text={}",
            msg.seq,
            msg.sender_id,
            command,
            escape_log(&msg.text)
        );

        let mut entity = match self.store.load(msg.sender_id)? {
            Some(e) => e,
            None => {
                // First contact creates the record regardless of command.
                let fresh = Entity::new(msg.sender_id, &msg.sender_name, now);
                self.store.save(&fresh)?;
                info!("registered entity {} ({})", fresh.id, escape_log(&fresh.name));
                fresh
            }
        };
        entity.touch(now);
        self.indices.active.insert(entity.id, now);

        // An open trade blocks everything except its own resolution.
        if entity.status == Status::Trading
            && !matches!(command, Command::TradeAccept | Command::TradeReject)
        {
            if let Some(offer) = entity.trade {
                self.send_with_actions(entity.id, offer_text(&offer), TRADE_ACTIONS);
            }
            self.store.save(&entity)?;
            return Ok(());
        }

        match command {
            Command::Start => {
                self.send(
                    entity.id,
                    format!(
                        "Welcome to the pit, {}! Type /fight to find an opponent, \
                         /task to earn ingredients, /profile to see yourself.",
                        entity.name
                    ),
                );
                self.store.save(&entity)?;
            }
            Command::Profile => {
                let text = self.profile_text(&entity, now);
                self.send(entity.id, text);
                self.store.save(&entity)?;
            }
            Command::Rename(new_name) => {
                if valid_name(&new_name) {
                    info!(
                        "rename {}: {} -> {}",
                        entity.id,
                        escape_log(&entity.name),
                        escape_log(&new_name)
                    );
                    entity.name = new_name.clone();
                    self.send(entity.id, format!("From now on you are {new_name}."));
                } else {
                    self.send(
                        entity.id,
                        "That name will not do: up to 24 letters, digits, spaces, _-' only.",
                    );
                }
                self.store.save(&entity)?;
            }
            Command::Allocate(stat) => {
                if entity.status == Status::Fighting {
                    self.send(entity.id, "Not while you are fighting.");
                } else if entity.allocate_point(stat) {
                    let label = match stat {
                        StatKind::Strength => "strength",
                        StatKind::Vitality => "vitality",
                        StatKind::Luck => "luck",
                    };
                    self.send(
                        entity.id,
                        format!(
                            "+1 {}. Points left: {}.",
                            label, entity.level_points
                        ),
                    );
                } else {
                    self.send(entity.id, "No level points to spend.");
                }
                self.store.save(&entity)?;
            }
            Command::SeekFight => {
                if entity.status != Status::Idle {
                    self.send(entity.id, "You cannot pick a fight right now.");
                    self.store.save(&entity)?;
                } else {
                    self.seek_fight(entity, now)?;
                }
            }
            Command::HitSuccess | Command::HitFailure => {
                let success = command == Command::HitSuccess;
                self.fight_action(entity, success, now)?;
            }
            Command::UsePotion(kind) => {
                self.use_potion(entity, kind, now)?;
            }
            Command::Brew(kind) => {
                if entity.status != Status::Idle {
                    self.send(entity.id, "Brewing needs a quiet moment outside the pit.");
                } else {
                    self.brew(&mut entity, kind);
                }
                self.sync_indices(&entity);
                self.store.save(&entity)?;
            }
            Command::PerformTask => {
                if entity.status != Status::Idle {
                    self.send(entity.id, "Finish what you are doing first.");
                    self.store.save(&entity)?;
                } else {
                    self.perform_task(entity, now)?;
                }
            }
            Command::ForcedRetreat => {
                if entity.status != Status::Fighting {
                    self.send(entity.id, "There is nothing to retreat from.");
                    self.store.save(&entity)?;
                } else {
                    self.forced_outcome(entity, false)?;
                }
            }
            Command::ForcedKill => {
                if entity.status != Status::Fighting {
                    self.send(entity.id, "There is no one to finish.");
                    self.store.save(&entity)?;
                } else {
                    self.forced_outcome(entity, true)?;
                }
            }
            Command::ForcedReset => {
                self.forced_reset(entity, now)?;
            }
            Command::TradeAccept => {
                if entity.status != Status::Trading {
                    self.send(entity.id, "No trade on the table.");
                    self.store.save(&entity)?;
                } else {
                    match accept(&mut entity) {
                        TradeResult::Completed(offer) => self.send(
                            entity.id,
                            format!(
                                "Done. You hand over your {} and pocket {}.",
                                offer.wanted.singular(),
                                offer.offered.counted(1)
                            ),
                        ),
                        TradeResult::Aborted => self.send(
                            entity.id,
                            "The trader squints at your empty hands and vanishes.",
                        ),
                    }
                    self.sync_indices(&entity);
                    self.store.save(&entity)?;
                }
            }
            Command::TradeReject => {
                if entity.status != Status::Trading {
                    self.send(entity.id, "No trade on the table.");
                } else {
                    reject(&mut entity);
                    self.send(entity.id, "You wave the trader off.");
                }
                self.sync_indices(&entity);
                self.store.save(&entity)?;
            }
            Command::Say(text) => {
                self.broadcast(&entity, &text, now);
                self.store.save(&entity)?;
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Handlers
    // ------------------------------------------------------------------

    fn profile_text(&self, entity: &Entity, now: i64) -> String {
        let mut lines = vec![
            format!("{}, level {}", entity.name, entity.level),
            format!(
                "HP {}/{} | exp {}/{}",
                entity.hp,
                entity.max_hp(),
                entity.experience,
                Entity::next_exp(entity.level)
            ),
            format!(
                "str {} | vit {} | luck {}",
                entity.effective_strength(now),
                entity.vitality,
                entity.effective_luck(now)
            ),
        ];
        if entity.strength_boost.is_active(now) {
            lines.push(format!(
                "strength boost +{} ({}s left)",
                entity.strength_boost.bonus,
                entity.strength_boost.remaining(now)
            ));
        }
        if entity.luck_boost.is_active(now) {
            lines.push(format!(
                "luck boost +{} ({}s left)",
                entity.luck_boost.bonus,
                entity.luck_boost.remaining(now)
            ));
        }
        if entity.level_points > 0 {
            lines.push(format!(
                "{} level point(s) to spend: /upstr /upvit /upluck",
                entity.level_points
            ));
        }
        lines.push(format!(
            "fights {} (won {}) | tasks today {}",
            entity.fights_total, entity.fights_won, entity.daily_tasks
        ));
        if entity.inventory.is_empty() {
            lines.push("pack: empty".to_string());
        } else {
            let items: Vec<String> = entity
                .inventory
                .iter()
                .map(|(kind, count)| kind.counted(*count))
                .collect();
            lines.push(format!("pack: {}", items.join(", ")));
        }
        lines.join("\n")
    }

    /// Matchmaking: join the earliest ready party, or start waiting.
    fn seek_fight(&mut self, mut entity: Entity, now: i64) -> Result<(), ArenaError> {
        let mut earliest: Option<Entity> = None;
        let candidates: Vec<i64> = self
            .indices
            .ready
            .iter()
            .copied()
            .filter(|id| *id != entity.id)
            .collect();
        for candidate in self.store.load_batch(&candidates)? {
            if candidate.status != Status::ReadyToFight {
                // Stale index entry; heal it rather than corrupt the match.
                warn!("ready index out of sync for {}", candidate.id);
                self.indices.ready.remove(&candidate.id);
                continue;
            }
            let earlier = earliest
                .as_ref()
                .map(|e| candidate.ready_since < e.ready_since)
                .unwrap_or(true);
            if earlier {
                earliest = Some(candidate);
            }
        }

        match earliest {
            Some(opponent) => self.start_fight(entity, opponent, now),
            None => {
                entity.set_ready(now);
                self.sync_indices(&entity);
                self.store.save(&entity)?;
                self.send(entity.id, "You step into the ring and wait for a challenger.");
                Ok(())
            }
        }
    }

    /// Begin a fight between `initiator` and `opponent`, draw the turn order
    /// and prompt the first actor. A bot first actor moves at once.
    pub(crate) fn start_fight(
        &mut self,
        mut initiator: Entity,
        mut opponent: Entity,
        now: i64,
    ) -> Result<(), ArenaError> {
        let first = crate::arena::combat::initiator_acts_first(
            initiator.effective_luck(now),
            opponent.effective_luck(now),
            &mut self.rng,
        );
        initiator.set_fighting(opponent.id, first, now);
        opponent.set_fighting(initiator.id, !first, now);
        self.sync_indices(&initiator);
        self.sync_indices(&opponent);
        self.store.save_batch(&[&initiator, &opponent])?;
        info!(
            "fight start: {} vs {} (initiator first: {})",
            initiator.id, opponent.id, first
        );

        let taunt = phrase_or_fallback(self.flavor.as_deref_mut(), FlavorContext::FightTaunt);
        self.send(
            initiator.id,
            format!(
                "{} You face {} (level {}, HP {}).",
                taunt,
                opponent.name,
                opponent.level,
                opponent.hp
            ),
        );
        self.send(
            opponent.id,
            format!(
                "{} challenges you! (level {}, HP {})",
                initiator.name, initiator.level, initiator.hp
            ),
        );

        let (actor, defender) = if first {
            (initiator, opponent)
        } else {
            (opponent, initiator)
        };
        if actor.is_bot() {
            self.bot_act(actor, defender, now)
        } else {
            self.send_with_actions(
                actor.id,
                "Your move: report your strike.",
                FIGHT_ACTIONS,
            );
            Ok(())
        }
    }

    /// A fight-turn report from a human entity.
    fn fight_action(&mut self, entity: Entity, success: bool, now: i64) -> Result<(), ArenaError> {
        if entity.status != Status::Fighting {
            self.send(entity.id, "You are not fighting anyone.");
            self.store.save(&entity)?;
            return Ok(());
        }
        if !entity.has_turn {
            self.send(entity.id, "Hold on, it is not your turn.");
            self.store.save(&entity)?;
            return Ok(());
        }
        let opponent_id = entity.opponent.ok_or_else(|| {
            ArenaError::Internal(format!("fighting entity {} has no opponent link", entity.id))
        })?;
        let opponent = self
            .store
            .load(opponent_id)?
            .ok_or(ArenaError::MissingOpponent {
                entity: entity.id,
                opponent: opponent_id,
            })?;
        self.resolve_hit(entity, opponent, success, now)
    }

    /// Apply one hit from `attacker` onto `defender`, emit all messages,
    /// persist both sides together and let a bot defender answer.
    pub(crate) fn resolve_hit(
        &mut self,
        mut attacker: Entity,
        mut defender: Entity,
        success: bool,
        now: i64,
    ) -> Result<(), ArenaError> {
        let applied = apply_hit(&mut attacker, &mut defender, success, now, &mut self.rng);
        match applied {
            HitApplied::Continues(roll) => {
                self.hit_messages(&attacker, &defender, roll);
                self.sync_indices(&attacker);
                self.sync_indices(&defender);
                self.store.save_batch(&[&attacker, &defender])?;
                if defender.is_bot() {
                    // Bots answer immediately with a coin-flip success.
                    self.bot_act(defender, attacker, now)
                } else {
                    self.send_with_actions(
                        defender.id,
                        "Your turn: report your strike.",
                        FIGHT_ACTIONS,
                    );
                    Ok(())
                }
            }
            HitApplied::Finished(roll, summary) => {
                self.hit_messages(&attacker, &defender, roll);
                self.finish_messages(&attacker, &defender, &summary);
                self.sync_indices(&attacker);
                self.sync_indices(&defender);
                self.store.save_batch(&[&attacker, &defender])?;
                Ok(())
            }
        }
    }

    /// One bot attack with a 50% success roll.
    pub(crate) fn bot_act(
        &mut self,
        bot: Entity,
        human: Entity,
        now: i64,
    ) -> Result<(), ArenaError> {
        let success = self.rng.gen_range(0..2u32) == 0;
        self.resolve_hit(bot, human, success, now)
    }

    fn hit_messages(&mut self, attacker: &Entity, defender: &Entity, roll: HitRoll) {
        let crit = if roll.critical { " Critical!" } else { "" };
        self.send(
            attacker.id,
            format!(
                "You strike {} for {} damage.{} ({} HP left)",
                defender.name, roll.damage, crit, defender.hp
            ),
        );
        self.send(
            defender.id,
            format!(
                "{} hits you for {} damage.{} You have {}/{} HP.",
                attacker.name,
                roll.damage,
                crit,
                defender.hp,
                defender.max_hp()
            ),
        );
    }

    fn finish_messages(&mut self, a: &Entity, b: &Entity, summary: &FightSummary) {
        let (winner, loser) = if a.id == summary.winner_id {
            (a, b)
        } else {
            (b, a)
        };
        let mut win_text = format!(
            "{} is down! You win and gain {} experience.",
            loser.name, summary.exp_gained
        );
        if summary.winner_leveled {
            win_text.push_str(" You reached a new level: one stat point to spend.");
        }
        match summary.loot {
            Loot::HealingPotion => win_text.push_str(" The healer slips you a healing potion."),
            Loot::BotItem(kind) => {
                win_text.push_str(&format!(" You pry {} from the loser.", kind.counted(1)))
            }
            Loot::Nothing => {}
        }
        self.send(winner.id, win_text);

        let mut lose_text = format!("{} beat you. You wake up at the healer's tent.", winner.name);
        if !summary.loser_losses.is_empty() {
            let lost: Vec<String> = summary
                .loser_losses
                .iter()
                .map(|(kind, count)| kind.counted(*count))
                .collect();
            lose_text.push_str(&format!(" Missing from your pack: {}.", lost.join(", ")));
        }
        self.send(loser.id, lose_text);
    }

    fn use_potion(
        &mut self,
        mut entity: Entity,
        kind: PotionKind,
        now: i64,
    ) -> Result<(), ArenaError> {
        if entity.status == Status::Trading || entity.status == Status::ReadyToFight {
            self.send(entity.id, "Not now.");
            self.store.save(&entity)?;
            return Ok(());
        }
        if entity.remove_item(kind.item(), 1) == 0 {
            self.send(
                entity.id,
                format!("You have no {}.", kind.item().singular()),
            );
            self.store.save(&entity)?;
            return Ok(());
        }
        match kind {
            PotionKind::Healing => {
                entity.restore_full();
                self.send(
                    entity.id,
                    format!("You drink the healing potion. HP {}/{}.", entity.hp, entity.max_hp()),
                );
            }
            PotionKind::Strength => {
                entity.strength_boost.apply(now, POTION_BONUS);
                self.send(
                    entity.id,
                    format!(
                        "Muscles swell: +{} strength for {}s (total +{}).",
                        POTION_BONUS, BOOST_LIFETIME_SECS, entity.strength_boost.bonus
                    ),
                );
            }
            PotionKind::Luck => {
                entity.luck_boost.apply(now, POTION_BONUS);
                self.send(
                    entity.id,
                    format!(
                        "The dice feel warmer: +{} luck for {}s (total +{}).",
                        POTION_BONUS, BOOST_LIFETIME_SECS, entity.luck_boost.bonus
                    ),
                );
            }
        }
        self.sync_indices(&entity);
        self.store.save(&entity)
    }

    fn brew(&mut self, entity: &mut Entity, kind: PotionKind) {
        let recipe = kind.recipe();
        let missing: Vec<&(ItemKind, u32)> = recipe
            .iter()
            .filter(|(item, count)| entity.item_count(*item) < *count)
            .collect();
        if !missing.is_empty() {
            self.send(
                entity.id,
                format!(
                    "You lack the ingredients. Needed: {}.",
                    kind.recipe_text()
                ),
            );
            return;
        }
        for (item, count) in recipe {
            entity.remove_item(*item, *count);
        }
        entity.add_item(kind.item(), 1);
        self.send(
            entity.id,
            format!("The cauldron hisses. You bottle {}.", kind.item().counted(1)),
        );
    }

    /// Perform-task: mostly an ingredient reward, occasionally a trade offer
    /// when there is something to trade for.
    fn perform_task(&mut self, mut entity: Entity, now: i64) -> Result<(), ArenaError> {
        let open_trade =
            entity.total_items() > 0 && self.rng.gen_range(0..TRADE_CHANCE) == 0;
        if open_trade {
            if let Some(offer) = make_offer(&entity, &mut self.rng) {
                entity.set_trading(offer);
                self.sync_indices(&entity);
                self.store.save(&entity)?;
                let greeting =
                    phrase_or_fallback(self.flavor.as_deref_mut(), FlavorContext::TradeGreeting);
                self.send_with_actions(
                    entity.id,
                    format!("{} {}", greeting, offer_text(&offer)),
                    TRADE_ACTIONS,
                );
                return Ok(());
            }
        }
        let reward = INGREDIENTS[self.rng.gen_range(0..INGREDIENTS.len())];
        entity.add_item(reward, 1);
        entity.daily_tasks += 1;
        self.store.save(&entity)?;
        let phrase = phrase_or_fallback(self.flavor.as_deref_mut(), FlavorContext::TaskSuccess);
        self.send(
            entity.id,
            format!(
                "{} You earn {}. (tasks today: {})",
                phrase,
                reward.counted(1),
                entity.daily_tasks
            ),
        );
        Ok(())
    }

    /// Forced retreat (actor loses) or forced kill (actor wins): straight to
    /// termination, no damage dealt.
    fn forced_outcome(&mut self, entity: Entity, actor_wins: bool) -> Result<(), ArenaError> {
        let opponent_id = entity.opponent.ok_or_else(|| {
            ArenaError::Internal(format!("fighting entity {} has no opponent link", entity.id))
        })?;
        let opponent = self
            .store
            .load(opponent_id)?
            .ok_or(ArenaError::MissingOpponent {
                entity: entity.id,
                opponent: opponent_id,
            })?;
        let (mut winner, mut loser) = if actor_wins {
            (entity, opponent)
        } else {
            (opponent, entity)
        };
        let summary = finish_fight(&mut winner, &mut loser, &mut self.rng);
        self.finish_messages(&winner, &loser, &summary);
        self.sync_indices(&winner);
        self.sync_indices(&loser);
        self.store.save_batch(&[&winner, &loser])
    }

    /// Destroy and recreate the entity. A fight in progress first resolves
    /// as a retreat so the opponent is not left dangling.
    fn forced_reset(&mut self, entity: Entity, now: i64) -> Result<(), ArenaError> {
        let id = entity.id;
        let name = entity.name.clone();
        if entity.status == Status::Fighting {
            self.forced_outcome(entity, false)?;
        }
        let fresh = Entity::new(id, &name, now);
        self.sync_indices(&fresh);
        self.store.save(&fresh)?;
        info!("entity {id} reset");
        self.send(id, "Everything you were is gone. Fresh sand, fresh start.");
        Ok(())
    }

    /// Relay non-command text to every other recently active human.
    fn broadcast(&mut self, sender: &Entity, text: &str, now: i64) {
        let window = self.config.active_window_secs;
        let targets: Vec<i64> = self
            .indices
            .active
            .iter()
            .filter(|(id, last)| **id != sender.id && now - **last <= window)
            .map(|(id, _)| *id)
            .collect();
        debug!(
            "broadcast from {} to {} targets: {}",
            sender.id,
            targets.len(),
            escape_log(text)
        );
        for target in targets {
            self.send(target, format!("{}: {}", sender.name, text));
        }
    }

    /// Assign a generated bot to an entity stuck waiting in matchmaking.
    pub(crate) fn assign_bot(&mut self, entity: Entity, now: i64) -> Result<(), ArenaError> {
        let bot_id = self.store.next_bot_id()?;
        let bot = generate_bot(bot_id, &entity, &mut self.rng, now);
        self.store.save(&bot)?;
        info!(
            "bot {} ({}) generated at level {} for {}",
            bot.id, bot.name, bot.level, entity.id
        );
        self.start_fight(entity, bot, now)
    }
}
