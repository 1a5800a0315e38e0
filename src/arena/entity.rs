//! The entity record: one player or bot, with status, vitals, timers,
//! counters, inventory and temporary boosts.
//!
//! Bots are entities with a negative id. They never receive messages and
//! never issue session commands, but otherwise share every field and rule.

use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::arena::effects::StatBoost;
use crate::arena::items::ItemKind;

pub const ENTITY_SCHEMA_VERSION: u8 = 1;

/// Starting stats for a freshly registered entity.
pub const START_STRENGTH: u32 = 3;
pub const START_VITALITY: u32 = 1;
pub const START_LUCK: u32 = 1;

/// Experience awarded to the winner per level of the loser.
pub const EXP_PER_LOSER_LEVEL: u64 = 10;

/// Exactly one of these holds at any time. Associated data (opponent link,
/// open trade offer) lives on the entity and must agree with the status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Idle,
    ReadyToFight,
    Fighting,
    Trading,
}

/// The stat a level point can be spent on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StatKind {
    Strength,
    Vitality,
    Luck,
}

/// An open trade proposal: the entity gives `wanted` and receives `offered`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TradeOffer {
    /// Item the trader wants from the entity (drawn from its inventory).
    pub wanted: ItemKind,
    /// Item the entity gets in exchange (drawn from the full catalog).
    pub offered: ItemKind,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Entity {
    pub id: i64,
    pub name: String,
    pub status: Status,

    pub level: u32,
    pub experience: u64,
    pub level_points: u32,
    pub strength: u32,
    pub vitality: u32,
    pub luck: u32,
    pub hp: u32,

    /// Opponent id; meaningful only while `Fighting`.
    pub opponent: Option<i64>,
    /// Whether this side currently holds the attack turn; only while `Fighting`.
    pub has_turn: bool,

    // Unix-second timers.
    pub last_activity: i64,
    pub last_restore: i64,
    pub ready_since: i64,
    pub last_fight_activity: i64,

    pub fights_total: u32,
    pub fights_won: u32,
    pub daily_tasks: u32,
    pub last_daily_reset: i64,

    /// Absent key means zero; helpers below keep it that way.
    #[serde(default)]
    pub inventory: BTreeMap<ItemKind, u32>,
    /// Open trade; meaningful only while `Trading`.
    pub trade: Option<TradeOffer>,

    #[serde(default)]
    pub strength_boost: StatBoost,
    #[serde(default)]
    pub luck_boost: StatBoost,

    pub schema_version: u8,
}

impl Entity {
    /// Fresh level-1 record: idle, full HP, empty inventory.
    pub fn new(id: i64, name: &str, now: i64) -> Self {
        let vitality = START_VITALITY;
        Self {
            id,
            name: name.to_string(),
            status: Status::Idle,
            level: 1,
            experience: 0,
            level_points: 0,
            strength: START_STRENGTH,
            vitality,
            luck: START_LUCK,
            hp: vitality * 2 + 5,
            opponent: None,
            has_turn: false,
            last_activity: now,
            last_restore: now,
            ready_since: 0,
            last_fight_activity: 0,
            fights_total: 0,
            fights_won: 0,
            daily_tasks: 0,
            last_daily_reset: now,
            inventory: BTreeMap::new(),
            trade: None,
            strength_boost: StatBoost::default(),
            luck_boost: StatBoost::default(),
            schema_version: ENTITY_SCHEMA_VERSION,
        }
    }

    pub fn is_bot(&self) -> bool {
        self.id < 0
    }

    // ------------------------------------------------------------------
    // Derived values
    // ------------------------------------------------------------------

    pub fn max_hp(&self) -> u32 {
        self.vitality * 2 + 5
    }

    pub fn effective_strength(&self, now: i64) -> u32 {
        self.strength + self.strength_boost.active_bonus(now)
    }

    pub fn effective_luck(&self, now: i64) -> u32 {
        self.luck + self.luck_boost.active_bonus(now)
    }

    /// Upper bound of a successful hit.
    pub fn max_damage(&self, now: i64) -> u32 {
        self.effective_strength(now)
    }

    pub fn is_injured(&self) -> bool {
        self.hp < self.max_hp()
    }

    pub fn win_ratio(&self) -> f64 {
        if self.fights_total == 0 {
            0.5
        } else {
            f64::from(self.fights_won) / f64::from(self.fights_total)
        }
    }

    // ------------------------------------------------------------------
    // Experience & levels
    // ------------------------------------------------------------------

    /// Experience needed to leave `level`: 30 + sum of i*100 for i in 2..=level.
    pub fn next_exp(level: u32) -> u64 {
        let mut total = 30u64;
        for i in 2..=u64::from(level) {
            total += i * 100;
        }
        total
    }

    /// Grant one level and one level point if the current threshold is met.
    /// At most one level per call: a big experience award still yields a
    /// single level from a single combat resolution.
    pub fn try_level_up(&mut self) -> bool {
        if self.experience >= Self::next_exp(self.level) {
            self.level += 1;
            self.level_points += 1;
            true
        } else {
            false
        }
    }

    /// Spend one unassigned level point on a stat. Returns false with no
    /// mutation if no points are available.
    pub fn allocate_point(&mut self, stat: StatKind) -> bool {
        if self.level_points == 0 {
            return false;
        }
        self.level_points -= 1;
        match stat {
            StatKind::Strength => self.strength += 1,
            StatKind::Vitality => self.vitality += 1,
            StatKind::Luck => self.luck += 1,
        }
        true
    }

    // ------------------------------------------------------------------
    // Hit points
    // ------------------------------------------------------------------

    /// Subtract damage, flooring at zero. Returns the HP actually lost.
    pub fn take_damage(&mut self, damage: u32) -> u32 {
        let lost = damage.min(self.hp);
        self.hp -= lost;
        lost
    }

    pub fn restore_full(&mut self) {
        self.hp = self.max_hp();
    }

    // ------------------------------------------------------------------
    // Inventory: absent key means zero, zero count removes the key
    // ------------------------------------------------------------------

    pub fn item_count(&self, kind: ItemKind) -> u32 {
        self.inventory.get(&kind).copied().unwrap_or(0)
    }

    pub fn total_items(&self) -> u32 {
        self.inventory.values().sum()
    }

    pub fn add_item(&mut self, kind: ItemKind, count: u32) {
        if count == 0 {
            return;
        }
        *self.inventory.entry(kind).or_insert(0) += count;
    }

    /// Remove up to `count` units; deletes the key when it hits zero.
    /// Returns the number of units actually removed.
    pub fn remove_item(&mut self, kind: ItemKind, count: u32) -> u32 {
        let Some(have) = self.inventory.get_mut(&kind) else {
            return 0;
        };
        let removed = count.min(*have);
        *have -= removed;
        if *have == 0 {
            self.inventory.remove(&kind);
        }
        removed
    }

    /// Draw one owned item kind with probability proportional to its count.
    /// None when the inventory is empty.
    pub fn random_owned_item(&self, rng: &mut impl Rng) -> Option<ItemKind> {
        let total = self.total_items();
        if total == 0 {
            return None;
        }
        let mut roll = rng.gen_range(0..total);
        for (kind, count) in &self.inventory {
            if roll < *count {
                return Some(*kind);
            }
            roll -= count;
        }
        None
    }

    /// Drop 1-3 item units drawn uniformly without replacement from a
    /// count-weighted bag of everything owned. Returns the per-kind summary
    /// of what was lost, empty when the inventory was already empty.
    /// Only ever applied to human losers.
    pub fn lose_random_items(&mut self, rng: &mut impl Rng) -> Vec<(ItemKind, u32)> {
        let mut bag: Vec<ItemKind> = Vec::with_capacity(self.total_items() as usize);
        for (kind, count) in &self.inventory {
            for _ in 0..*count {
                bag.push(*kind);
            }
        }
        if bag.is_empty() {
            return Vec::new();
        }
        let take = rng.gen_range(1..=3usize).min(bag.len());
        let mut lost: BTreeMap<ItemKind, u32> = BTreeMap::new();
        for _ in 0..take {
            let idx = rng.gen_range(0..bag.len());
            let kind = bag.swap_remove(idx);
            *lost.entry(kind).or_insert(0) += 1;
        }
        for (kind, count) in &lost {
            self.remove_item(*kind, *count);
        }
        lost.into_iter().collect()
    }

    // ------------------------------------------------------------------
    // Status transitions keep associated fields consistent
    // ------------------------------------------------------------------

    pub fn set_idle(&mut self) {
        self.status = Status::Idle;
        self.opponent = None;
        self.has_turn = false;
        self.trade = None;
        self.ready_since = 0;
    }

    pub fn set_ready(&mut self, now: i64) {
        self.status = Status::ReadyToFight;
        self.opponent = None;
        self.has_turn = false;
        self.trade = None;
        self.ready_since = now;
    }

    pub fn set_fighting(&mut self, opponent: i64, has_turn: bool, now: i64) {
        self.status = Status::Fighting;
        self.opponent = Some(opponent);
        self.has_turn = has_turn;
        self.trade = None;
        self.ready_since = 0;
        self.last_fight_activity = now;
    }

    pub fn set_trading(&mut self, offer: TradeOffer) {
        self.status = Status::Trading;
        self.opponent = None;
        self.has_turn = false;
        self.trade = Some(offer);
        self.ready_since = 0;
    }

    pub fn touch(&mut self, now: i64) {
        self.last_activity = now;
    }
}
