//! Trading protocol as seen through the engine: interception, accept,
//! abort and reject.

mod common;

use arenabot::arena::entity::{Status, TradeOffer};
use arenabot::arena::items::ItemKind;
use common::TestArena;

const T0: i64 = 1_700_000_000;

/// Register an entity, hand it some leaves and pin it in an open trade.
fn entity_in_trade(arena: &mut TestArena, id: i64) -> TradeOffer {
    arena.command(id, "Trader", "/start", T0);
    let mut e = arena.entity(id);
    e.add_item(ItemKind::NettleLeaf, 2);
    let offer = TradeOffer {
        wanted: ItemKind::NettleLeaf,
        offered: ItemKind::IronThorn,
    };
    e.set_trading(offer);
    arena.put(&e);
    arena.drain();
    offer
}

#[test]
fn open_trade_intercepts_other_commands() {
    let mut arena = TestArena::new(41);
    entity_in_trade(&mut arena, 10);

    for cmd in ["/fight", "/profile", "/task", "/hit", "hello there"] {
        arena.command(10, "Trader", cmd, T0 + 5);
        let replies = arena.drain_for(10);
        assert_eq!(replies.len(), 1, "one re-offer per blocked command");
        assert!(replies[0].text.contains("hooded trader"));
        assert_eq!(replies[0].actions, vec!["/accept", "/reject"]);
    }

    let e = arena.entity(10);
    assert_eq!(e.status, Status::Trading);
    assert_eq!(e.item_count(ItemKind::NettleLeaf), 2, "inventory untouched");
}

#[test]
fn accept_swaps_the_items() {
    let mut arena = TestArena::new(42);
    entity_in_trade(&mut arena, 10);

    arena.command(10, "Trader", "/accept", T0 + 5);
    let e = arena.entity(10);
    assert_eq!(e.status, Status::Idle);
    assert!(e.trade.is_none());
    assert_eq!(e.item_count(ItemKind::NettleLeaf), 1);
    assert_eq!(e.item_count(ItemKind::IronThorn), 1);
    let replies = arena.drain_for(10);
    assert!(replies.last().map(|m| m.text.contains("Done.")).unwrap_or(false));
}

#[test]
fn accept_aborts_when_the_item_is_gone() {
    let mut arena = TestArena::new(43);
    entity_in_trade(&mut arena, 10);
    // The wanted item disappears while the offer sits open.
    let mut e = arena.entity(10);
    e.remove_item(ItemKind::NettleLeaf, 2);
    arena.put(&e);

    arena.command(10, "Trader", "/accept", T0 + 5);
    let e = arena.entity(10);
    assert_eq!(e.status, Status::Idle);
    assert_eq!(e.item_count(ItemKind::IronThorn), 0, "nothing changes hands");
    let replies = arena.drain_for(10);
    assert!(replies.last().map(|m| m.text.contains("vanishes")).unwrap_or(false));
}

#[test]
fn reject_releases_without_changes() {
    let mut arena = TestArena::new(44);
    entity_in_trade(&mut arena, 10);

    arena.command(10, "Trader", "/reject", T0 + 5);
    let e = arena.entity(10);
    assert_eq!(e.status, Status::Idle);
    assert!(e.trade.is_none());
    assert_eq!(e.item_count(ItemKind::NettleLeaf), 2);
    assert_eq!(e.item_count(ItemKind::IronThorn), 0);
}

#[test]
fn accept_without_an_open_trade_is_rejected() {
    let mut arena = TestArena::new(45);
    arena.command(10, "Trader", "/start", T0);
    arena.drain();
    arena.command(10, "Trader", "/accept", T0 + 1);
    let replies = arena.drain_for(10);
    assert!(replies[0].text.contains("No trade on the table"));
}

#[test]
fn tasks_eventually_open_a_trade() {
    let mut arena = TestArena::new(46);
    arena.command(10, "Trader", "/start", T0);
    let mut e = arena.entity(10);
    e.add_item(ItemKind::GlowCap, 5);
    arena.put(&e);
    arena.drain();

    // One-in-four odds per task with a non-empty pack; 64 attempts make a
    // miss astronomically unlikely. Reject each offer to keep going.
    let mut opened = false;
    for i in 0..64 {
        arena.command(10, "Trader", "/task", T0 + 10 + i);
        if arena.entity(10).status == Status::Trading {
            opened = true;
            let offer = arena.entity(10).trade.expect("open trade carries an offer");
            assert!(arena.entity(10).item_count(offer.wanted) > 0);
            arena.command(10, "Trader", "/reject", T0 + 10 + i);
        }
    }
    assert!(opened, "no trade offer in 64 tasks");
}

#[test]
fn tasks_with_an_empty_pack_always_pay_an_ingredient() {
    let mut arena = TestArena::new(47);
    arena.command(10, "Trader", "/start", T0);
    arena.drain();

    // Drain the pack before every task so the trade branch never arms.
    for i in 0..16 {
        let mut e = arena.entity(10);
        e.inventory.clear();
        arena.put(&e);
        arena.command(10, "Trader", "/task", T0 + 10 + i);
        let e = arena.entity(10);
        assert_eq!(e.status, Status::Idle);
        assert_eq!(e.total_items(), 1, "one ingredient per task");
    }
    assert_eq!(arena.entity(10).daily_tasks, 16);
}
