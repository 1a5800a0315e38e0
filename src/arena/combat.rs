//! Turn-based combat resolution: turn order, damage, crits, hit
//! application, termination and loot.
//!
//! All randomness comes through an explicit `Rng` so the dice can be seeded
//! in tests. Functions here mutate both sides of a fight in one step; the
//! engine persists the pair together so no torn fight state is observable.

use log::debug;
use rand::Rng;

use crate::arena::entity::{Entity, EXP_PER_LOSER_LEVEL};
use crate::arena::items::ItemKind;

/// Seconds of fight inactivity before the sweep forces a failure signal.
pub const FIGHT_TIMEOUT_SECS: i64 = 60 + 5;

/// One rolled attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitRoll {
    pub damage: u32,
    pub critical: bool,
}

/// What the winner walked away with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Loot {
    HealingPotion,
    BotItem(ItemKind),
    Nothing,
}

/// Outcome of a finished fight, for message composition by the caller.
#[derive(Debug, Clone)]
pub struct FightSummary {
    pub winner_id: i64,
    pub loser_id: i64,
    pub exp_gained: u64,
    pub winner_leveled: bool,
    pub loot: Loot,
    /// Inventory units the (human) loser dropped, grouped by kind.
    pub loser_losses: Vec<(ItemKind, u32)>,
}

/// Outcome of one applied hit.
#[derive(Debug, Clone)]
pub enum HitApplied {
    /// Fight continues; the defender now holds the turn.
    Continues(HitRoll),
    /// Defender reached zero HP; the fight terminated.
    Finished(HitRoll, FightSummary),
}

/// Decide whether the matchmaking initiator acts first. One uniform sample
/// in `[1, la+lb]`: at or below the opponent's effective luck the opponent
/// leads, so each side's chance of leading is its share of the combined luck.
pub fn initiator_acts_first(
    initiator_luck: u32,
    opponent_luck: u32,
    rng: &mut impl Rng,
) -> bool {
    let total = (initiator_luck + opponent_luck).max(1);
    let sample = rng.gen_range(1..=total);
    sample > opponent_luck
}

/// Roll damage for one attack. Success lands in the upper half of
/// `[1, max_damage]`; failure always deals 1. A crit sample strictly below
/// `luck^2` (out of 100) doubles the result; at luck >= 10 every hit crits,
/// an accepted escalation rather than a bug.
pub fn roll_hit(max_damage: u32, effective_luck: u32, success: bool, rng: &mut impl Rng) -> HitRoll {
    let base = if success {
        let max = max_damage.max(1);
        let min = (max + 2) / 2; // ceil((max + 1) / 2)
        rng.gen_range(min..=max)
    } else {
        1
    };
    let critical = u64::from(rng.gen_range(0..100u32)) < u64::from(effective_luck).pow(2);
    HitRoll {
        damage: if critical { base * 2 } else { base },
        critical,
    }
}

/// Apply one attack from `attacker` onto `defender`. Both must be fighting
/// each other; the caller checks the linkage. Only the defender's HP is
/// inspected afterwards, so in a same-exchange double zero the acting side
/// survives by evaluation order.
pub fn apply_hit(
    attacker: &mut Entity,
    defender: &mut Entity,
    success: bool,
    now: i64,
    rng: &mut impl Rng,
) -> HitApplied {
    let roll = roll_hit(
        attacker.max_damage(now),
        attacker.effective_luck(now),
        success,
        rng,
    );
    defender.take_damage(roll.damage);
    attacker.last_fight_activity = now;
    debug!(
        "hit: {} -> {} damage={} crit={} defender_hp={}",
        attacker.id, defender.id, roll.damage, roll.critical, defender.hp
    );

    if defender.hp == 0 {
        let summary = finish_fight(attacker, defender, rng);
        HitApplied::Finished(roll, summary)
    } else {
        attacker.has_turn = false;
        defender.has_turn = true;
        defender.last_fight_activity = now;
        HitApplied::Continues(roll)
    }
}

/// Terminate a fight with a known winner. Used by hit application when the
/// defender drops, and directly by the forced retreat / forced kill paths.
/// Idempotence is by construction: both sides leave `Fighting` here and the
/// engine never routes fight actions to idle entities.
pub fn finish_fight(winner: &mut Entity, loser: &mut Entity, rng: &mut impl Rng) -> FightSummary {
    loser.hp = 0;
    winner.fights_total += 1;
    loser.fights_total += 1;
    winner.fights_won += 1;

    let exp_gained = u64::from(loser.level) * EXP_PER_LOSER_LEVEL;
    winner.experience += exp_gained;
    // Exactly one level-up check per resolution.
    let winner_leveled = winner.try_level_up();

    let (loot, loser_losses) = if loser.is_bot() {
        (roll_bot_loot(loser, rng), Vec::new())
    } else {
        (Loot::HealingPotion, loser.lose_random_items(rng))
    };
    match loot {
        Loot::HealingPotion => winner.add_item(ItemKind::HealingPotion, 1),
        Loot::BotItem(kind) => winner.add_item(kind, 1),
        Loot::Nothing => {}
    }

    let summary = FightSummary {
        winner_id: winner.id,
        loser_id: loser.id,
        exp_gained,
        winner_leveled,
        loot,
        loser_losses,
    };
    winner.set_idle();
    loser.set_idle();
    debug!(
        "fight over: winner={} loser={} exp={} leveled={}",
        summary.winner_id, summary.loser_id, summary.exp_gained, summary.winner_leveled
    );
    summary
}

/// Loot roll against a defeated bot: d6 -> 1 healing potion, 2-3 one item
/// drawn count-proportionally from the bot's inventory, 4-6 nothing.
fn roll_bot_loot(bot: &mut Entity, rng: &mut impl Rng) -> Loot {
    match rng.gen_range(1..=6u32) {
        1 => Loot::HealingPotion,
        2 | 3 => match bot.random_owned_item(rng) {
            Some(kind) => {
                bot.remove_item(kind, 1);
                Loot::BotItem(kind)
            }
            None => Loot::Nothing,
        },
        _ => Loot::Nothing,
    }
}
