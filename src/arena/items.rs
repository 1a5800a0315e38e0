//! Item catalog and brewing recipes.
//!
//! The catalog is a closed enumeration: storage round-trips it, the trading
//! protocol draws from it, and the three potion recipes consume from it.

use serde::{Deserialize, Serialize};

/// Every item kind the engine knows about. Adding a variant is a schema
/// change for persisted inventories, so the list is kept deliberately small.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    NettleLeaf,
    MarrowBone,
    SwampMoss,
    GlowCap,
    IronThorn,
    EmberDust,
    SpringWater,
    HealingPotion,
    StrengthPotion,
    LuckPotion,
}

/// Full catalog in display order. Trading offers draw uniformly from this.
pub const CATALOG: &[ItemKind] = &[
    ItemKind::NettleLeaf,
    ItemKind::MarrowBone,
    ItemKind::SwampMoss,
    ItemKind::GlowCap,
    ItemKind::IronThorn,
    ItemKind::EmberDust,
    ItemKind::SpringWater,
    ItemKind::HealingPotion,
    ItemKind::StrengthPotion,
    ItemKind::LuckPotion,
];

/// Ingredient kinds only, used by the perform-task reward draw.
pub const INGREDIENTS: &[ItemKind] = &[
    ItemKind::NettleLeaf,
    ItemKind::MarrowBone,
    ItemKind::SwampMoss,
    ItemKind::GlowCap,
    ItemKind::IronThorn,
    ItemKind::EmberDust,
    ItemKind::SpringWater,
];

impl ItemKind {
    pub fn singular(&self) -> &'static str {
        match self {
            ItemKind::NettleLeaf => "nettle leaf",
            ItemKind::MarrowBone => "marrow bone",
            ItemKind::SwampMoss => "clump of swamp moss",
            ItemKind::GlowCap => "glowcap mushroom",
            ItemKind::IronThorn => "iron thorn",
            ItemKind::EmberDust => "pinch of ember dust",
            ItemKind::SpringWater => "flask of spring water",
            ItemKind::HealingPotion => "healing potion",
            ItemKind::StrengthPotion => "strength potion",
            ItemKind::LuckPotion => "luck potion",
        }
    }

    pub fn plural(&self) -> &'static str {
        match self {
            ItemKind::NettleLeaf => "nettle leaves",
            ItemKind::MarrowBone => "marrow bones",
            ItemKind::SwampMoss => "clumps of swamp moss",
            ItemKind::GlowCap => "glowcap mushrooms",
            ItemKind::IronThorn => "iron thorns",
            ItemKind::EmberDust => "pinches of ember dust",
            ItemKind::SpringWater => "flasks of spring water",
            ItemKind::HealingPotion => "healing potions",
            ItemKind::StrengthPotion => "strength potions",
            ItemKind::LuckPotion => "luck potions",
        }
    }

    /// Display name matching a count: singular for one unit, plural otherwise.
    pub fn counted(&self, count: u32) -> String {
        if count == 1 {
            format!("1 {}", self.singular())
        } else {
            format!("{} {}", count, self.plural())
        }
    }
}

/// The three brewable potions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PotionKind {
    Healing,
    Strength,
    Luck,
}

impl PotionKind {
    pub fn item(&self) -> ItemKind {
        match self {
            PotionKind::Healing => ItemKind::HealingPotion,
            PotionKind::Strength => ItemKind::StrengthPotion,
            PotionKind::Luck => ItemKind::LuckPotion,
        }
    }

    /// Ordered ingredient list. Brewing consumes exactly these counts and
    /// yields one unit of [`PotionKind::item`].
    pub fn recipe(&self) -> &'static [(ItemKind, u32)] {
        match self {
            PotionKind::Healing => &[
                (ItemKind::SpringWater, 1),
                (ItemKind::NettleLeaf, 2),
                (ItemKind::MarrowBone, 1),
            ],
            PotionKind::Strength => &[
                (ItemKind::SpringWater, 1),
                (ItemKind::IronThorn, 2),
                (ItemKind::EmberDust, 1),
            ],
            PotionKind::Luck => &[
                (ItemKind::SpringWater, 1),
                (ItemKind::GlowCap, 2),
                (ItemKind::SwampMoss, 1),
            ],
        }
    }

    /// Human-readable recipe summary for rejection messages.
    pub fn recipe_text(&self) -> String {
        let parts: Vec<String> = self
            .recipe()
            .iter()
            .map(|(kind, count)| kind.counted(*count))
            .collect();
        parts.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_covers_every_variant() {
        assert_eq!(CATALOG.len(), 10);
        assert_eq!(INGREDIENTS.len(), 7);
        for kind in INGREDIENTS {
            assert!(CATALOG.contains(kind));
        }
    }

    #[test]
    fn healing_recipe_has_three_ingredient_kinds() {
        let recipe = PotionKind::Healing.recipe();
        assert_eq!(recipe.len(), 3);
        assert!(recipe.iter().all(|(kind, _)| INGREDIENTS.contains(kind)));
    }

    #[test]
    fn counted_switches_pluralization() {
        assert_eq!(ItemKind::NettleLeaf.counted(1), "1 nettle leaf");
        assert_eq!(ItemKind::NettleLeaf.counted(3), "3 nettle leaves");
    }
}
