//! Bot opponents generated when matchmaking times out.
//!
//! Templates live in an immutable static table; generation is a pure
//! function of the reference entity and an explicit random source, so tests
//! can seed it.

use rand::Rng;

use crate::arena::entity::Entity;
use crate::arena::items::ItemKind;

/// How a template spreads stat points across strength / vitality / luck.
/// Weights need not sum to anything particular; sampling is proportional.
#[derive(Debug, Clone, Copy)]
pub struct StatWeights {
    pub strength: u32,
    pub vitality: u32,
    pub luck: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct BotTemplate {
    pub name: &'static str,
    /// Inclusive level range this template may be generated at.
    pub min_level: u32,
    pub max_level: u32,
    pub weights: StatWeights,
    /// Items granted at creation; also the bot-loser loot pool.
    pub loot: &'static [(ItemKind, u32)],
}

pub const BOT_TEMPLATES: &[BotTemplate] = &[
    BotTemplate {
        name: "Mangy Rat-Catcher",
        min_level: 1,
        max_level: 3,
        weights: StatWeights {
            strength: 2,
            vitality: 1,
            luck: 1,
        },
        loot: &[(ItemKind::NettleLeaf, 2), (ItemKind::MarrowBone, 1)],
    },
    BotTemplate {
        name: "Swamp Hermit",
        min_level: 1,
        max_level: 5,
        weights: StatWeights {
            strength: 1,
            vitality: 2,
            luck: 2,
        },
        loot: &[
            (ItemKind::SwampMoss, 2),
            (ItemKind::GlowCap, 1),
            (ItemKind::SpringWater, 1),
        ],
    },
    BotTemplate {
        name: "Pit Bruiser",
        min_level: 3,
        max_level: 8,
        weights: StatWeights {
            strength: 3,
            vitality: 2,
            luck: 1,
        },
        loot: &[(ItemKind::IronThorn, 2), (ItemKind::MarrowBone, 2)],
    },
    BotTemplate {
        name: "Ash Conjurer",
        min_level: 5,
        max_level: 12,
        weights: StatWeights {
            strength: 2,
            vitality: 1,
            luck: 3,
        },
        loot: &[
            (ItemKind::EmberDust, 2),
            (ItemKind::GlowCap, 2),
            (ItemKind::HealingPotion, 1),
        ],
    },
    BotTemplate {
        name: "Iron Veteran",
        min_level: 8,
        max_level: u32::MAX,
        weights: StatWeights {
            strength: 3,
            vitality: 3,
            luck: 2,
        },
        loot: &[
            (ItemKind::IronThorn, 3),
            (ItemKind::HealingPotion, 1),
            (ItemKind::StrengthPotion, 1),
        ],
    },
];

impl StatWeights {
    /// Pick one stat proportionally to the weights.
    fn sample(&self, rng: &mut impl Rng) -> usize {
        let total = self.strength + self.vitality + self.luck;
        let roll = rng.gen_range(0..total);
        if roll < self.strength {
            0
        } else if roll < self.strength + self.vitality {
            1
        } else {
            2
        }
    }
}

/// Level for a generated bot: the reference's level shifted by a signed
/// random delta whose direction is biased by the reference's win ratio
/// (winners get tougher opponents), floored at 1.
fn roll_level(reference: &Entity, rng: &mut impl Rng) -> u32 {
    let magnitude = rng.gen_range(0..=2i64);
    let up = (rng.gen_range(0.0..1.0f64)) < reference.win_ratio();
    let delta = if up { magnitude } else { -magnitude };
    (i64::from(reference.level) + delta).max(1) as u32
}

/// Templates whose level range contains `level`.
fn eligible(level: u32) -> Vec<&'static BotTemplate> {
    BOT_TEMPLATES
        .iter()
        .filter(|t| t.min_level <= level && level <= t.max_level)
        .collect()
}

/// Generate a bot entity matched against `reference`. The caller supplies a
/// fresh negative `id`; the bot starts at full HP with its template loot.
pub fn generate_bot(id: i64, reference: &Entity, rng: &mut impl Rng, now: i64) -> Entity {
    debug_assert!(id < 0, "bot ids are negative");
    let level = roll_level(reference, rng);
    let pool = eligible(level);
    // Every level matches at least one template by construction of the table.
    let template = pool[rng.gen_range(0..pool.len())];

    let mut bot = Entity::new(id, template.name, now);
    bot.level = level;
    // One stat point at a time, weighted by the template distribution.
    for _ in 1..level {
        match template.weights.sample(rng) {
            0 => bot.strength += 1,
            1 => bot.vitality += 1,
            _ => bot.luck += 1,
        }
    }
    bot.restore_full();
    for (kind, count) in template.loot {
        bot.add_item(*kind, *count);
    }
    bot
}
