//! The periodic sweep: daily reset, boost expiry, regeneration, bot
//! auto-assignment and fight timeouts.

mod common;

use arenabot::arena::entity::Status;
use common::TestArena;

const T0: i64 = 1_700_000_000;
/// 2023-11-15 00:00:00 UTC, inside the default reset window (hour 0).
const MIDNIGHT: i64 = 1_700_006_400;

#[test]
fn idle_injured_entities_regenerate_one_hp_per_interval() {
    let mut arena = TestArena::new(61);
    arena.command(10, "Alice", "/fight", T0);
    arena.command(11, "Bob", "/fight", T0 + 2);
    arena.command(10, "Alice", "/finish", T0 + 5);
    let loser = arena.entity(11);
    assert_eq!(loser.hp, 0);
    assert_eq!(loser.status, Status::Idle);

    // One point per elapsed interval, no catch-up within the same interval.
    arena.engine.sweep(T0 + 60).expect("sweep");
    assert_eq!(arena.entity(11).hp, 1);
    arena.engine.sweep(T0 + 61).expect("sweep");
    assert_eq!(arena.entity(11).hp, 1, "second sweep in the interval is a no-op");

    for k in 2..=7 {
        arena.engine.sweep(T0 + 60 * k).expect("sweep");
    }
    let healed = arena.entity(11);
    assert_eq!(healed.hp, healed.max_hp());

    arena.engine.sweep(T0 + 60 * 9).expect("sweep");
    let healed = arena.entity(11);
    assert_eq!(healed.hp, healed.max_hp(), "regen stops at full");
}

#[test]
fn waiting_past_the_window_draws_a_generated_bot() {
    let mut arena = TestArena::new(62);
    arena.command(10, "Alice", "/start", T0);
    // Bulk the entity up so a bot's opening strike cannot end the fight
    // before we look at it.
    let mut e = arena.entity(10);
    e.vitality = 50;
    e.hp = e.max_hp();
    arena.put(&e);

    arena.command(10, "Alice", "/fight", T0 + 1);
    arena.engine.sweep(T0 + 10).expect("sweep");
    assert_eq!(
        arena.entity(10).status,
        Status::ReadyToFight,
        "window not yet elapsed"
    );

    arena.engine.sweep(T0 + 11).expect("sweep");
    let alice = arena.entity(10);
    assert_eq!(alice.status, Status::Fighting);
    let bot_id = alice.opponent.expect("assigned opponent");
    assert!(bot_id < 0, "generated opponents use negative ids");
    let bot = arena.entity(bot_id);
    assert!(bot.is_bot());
    assert_eq!(bot.status, Status::Fighting);
    assert_eq!(bot.opponent, Some(10));
}

#[test]
fn sitting_on_a_turn_past_the_timeout_forces_a_miss() {
    let mut arena = TestArena::new(63);
    arena.command(10, "Alice", "/fight", T0);
    arena.command(11, "Bob", "/fight", T0 + 2);
    let (holder, other) = if arena.entity(10).has_turn {
        (10, 11)
    } else {
        (11, 10)
    };
    let other_hp = arena.entity(other).hp;
    arena.drain();

    arena.engine.sweep(T0 + 2 + 64).expect("sweep");
    assert!(arena.entity(holder).has_turn, "timeout not yet reached");
    assert_eq!(arena.entity(other).hp, other_hp);

    arena.engine.sweep(T0 + 2 + 65).expect("sweep");
    let holder_e = arena.entity(holder);
    let other_e = arena.entity(other);
    assert!(!holder_e.has_turn, "a forced miss passes the turn");
    assert!(other_e.has_turn);
    assert_eq!(other_e.hp, other_hp - 1, "a miss still grazes for one point");
    let notices = arena.drain_for(holder);
    assert!(notices.iter().any(|m| m.text.contains("goes wide")));
}

#[test]
fn daily_counters_reset_inside_the_window_only() {
    let mut arena = TestArena::new(64);
    arena.command(10, "Alice", "/start", MIDNIGHT - 30);
    let mut e = arena.entity(10);
    e.daily_tasks = 5;
    e.last_daily_reset = MIDNIGHT - 90_000;
    arena.put(&e);

    // An hour past the window: nothing happens despite the stale stamp.
    arena.engine.sweep(MIDNIGHT + 3_700).expect("sweep");
    assert_eq!(arena.entity(10).daily_tasks, 5);

    arena.engine.sweep(MIDNIGHT + 10).expect("sweep");
    let e = arena.entity(10);
    assert_eq!(e.daily_tasks, 0);
    assert_eq!(e.last_daily_reset, MIDNIGHT + 10);

    // A second pass in the same window must not rewind the stamp.
    let mut e = arena.entity(10);
    e.daily_tasks = 2;
    arena.put(&e);
    arena.engine.sweep(MIDNIGHT + 20).expect("sweep");
    assert_eq!(arena.entity(10).daily_tasks, 2, "within 24h of the last reset");
}

#[test]
fn boost_expiry_notifies_exactly_once() {
    let mut arena = TestArena::new(65);
    arena.command(10, "Alice", "/start", T0);
    let mut e = arena.entity(10);
    e.luck_boost.apply(T0, 3);
    arena.put(&e);
    arena.drain();

    arena.engine.sweep(T0 + 100).expect("sweep");
    assert!(arena.drain_for(10).is_empty(), "boost still live");
    assert_eq!(arena.entity(10).effective_luck(T0 + 100), 4);

    arena.engine.sweep(T0 + 200).expect("sweep");
    let notices = arena.drain_for(10);
    assert_eq!(notices.len(), 1);
    assert!(notices[0].text.contains("luck boost has worn off"));
    assert_eq!(arena.entity(10).effective_luck(T0 + 200), 1);

    arena.engine.sweep(T0 + 300).expect("sweep");
    assert!(arena.drain_for(10).is_empty(), "expiry reported only once");
}
