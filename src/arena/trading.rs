//! The trading mini-protocol.
//!
//! A trade offer pins the entity in `Trading`: every command other than
//! accept/reject just re-presents the offer. Accept re-validates ownership
//! because a fight could have stripped the wanted item since the offer was
//! made.

use rand::Rng;

use crate::arena::entity::{Entity, Status, TradeOffer};
use crate::arena::items::CATALOG;

/// Build an offer from the entity's own inventory: the wanted item is drawn
/// count-weighted from what it owns, the offered item uniformly from the
/// full catalog. None when the inventory is empty.
pub fn make_offer(entity: &Entity, rng: &mut impl Rng) -> Option<TradeOffer> {
    let wanted = entity.random_owned_item(rng)?;
    let offered = CATALOG[rng.gen_range(0..CATALOG.len())];
    Some(TradeOffer { wanted, offered })
}

/// Offer text shown on creation and re-shown on every intercepted command.
pub fn offer_text(offer: &TradeOffer) -> String {
    format!(
        "A hooded trader wants your {} and offers {} in return. Take the deal?",
        offer.wanted.singular(),
        offer.offered.counted(1),
    )
}

/// How an accept resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeResult {
    /// Items swapped one for one.
    Completed(TradeOffer),
    /// The wanted item was no longer owned; trade aborted with no change.
    Aborted,
}

/// Resolve an accept. Either way the entity returns to `Idle` with the
/// offer cleared.
pub fn accept(entity: &mut Entity) -> TradeResult {
    debug_assert_eq!(entity.status, Status::Trading);
    let Some(offer) = entity.trade else {
        entity.set_idle();
        return TradeResult::Aborted;
    };
    if entity.remove_item(offer.wanted, 1) == 0 {
        entity.set_idle();
        return TradeResult::Aborted;
    }
    entity.add_item(offer.offered, 1);
    entity.set_idle();
    TradeResult::Completed(offer)
}

/// Resolve a reject: back to `Idle`, inventory untouched.
pub fn reject(entity: &mut Entity) {
    entity.set_idle();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::items::ItemKind;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn trader_with(kind: ItemKind, count: u32) -> Entity {
        let mut e = Entity::new(1, "T", 1_000);
        e.add_item(kind, count);
        e
    }

    #[test]
    fn no_offer_from_empty_inventory() {
        let mut rng = StdRng::seed_from_u64(1);
        let e = Entity::new(1, "T", 1_000);
        assert!(make_offer(&e, &mut rng).is_none());
    }

    #[test]
    fn offer_wants_an_owned_item() {
        let mut rng = StdRng::seed_from_u64(2);
        let e = trader_with(ItemKind::GlowCap, 3);
        for _ in 0..20 {
            let offer = make_offer(&e, &mut rng).expect("offer");
            assert_eq!(offer.wanted, ItemKind::GlowCap);
            assert!(CATALOG.contains(&offer.offered));
        }
    }

    #[test]
    fn accept_swaps_one_for_one() {
        let mut e = trader_with(ItemKind::GlowCap, 2);
        e.set_trading(TradeOffer {
            wanted: ItemKind::GlowCap,
            offered: ItemKind::IronThorn,
        });
        let result = accept(&mut e);
        assert!(matches!(result, TradeResult::Completed(_)));
        assert_eq!(e.status, Status::Idle);
        assert_eq!(e.item_count(ItemKind::GlowCap), 1);
        assert_eq!(e.item_count(ItemKind::IronThorn), 1);
        assert!(e.trade.is_none());
    }

    #[test]
    fn accept_aborts_when_item_was_lost() {
        let mut e = Entity::new(1, "T", 1_000);
        // Offer made earlier; the item has since been lost to a fight.
        e.set_trading(TradeOffer {
            wanted: ItemKind::GlowCap,
            offered: ItemKind::IronThorn,
        });
        let result = accept(&mut e);
        assert_eq!(result, TradeResult::Aborted);
        assert_eq!(e.status, Status::Idle);
        assert!(e.inventory.is_empty());
    }

    #[test]
    fn reject_keeps_inventory() {
        let mut e = trader_with(ItemKind::GlowCap, 2);
        e.set_trading(TradeOffer {
            wanted: ItemKind::GlowCap,
            offered: ItemKind::IronThorn,
        });
        reject(&mut e);
        assert_eq!(e.status, Status::Idle);
        assert_eq!(e.item_count(ItemKind::GlowCap), 2);
    }
}
