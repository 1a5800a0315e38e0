//! Temporary stat boosts granted by strength and luck potions.
//!
//! A boost applied while a previous one is still active stacks its magnitude
//! and pushes the expiry out to the full lifetime from the latest drink.

use serde::{Deserialize, Serialize};

/// Lifetime of a boost counted from the most recent application, in seconds.
pub const BOOST_LIFETIME_SECS: i64 = 180;

/// One tracked temporary bonus. `bonus == 0 && expires_at == 0` means inactive.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatBoost {
    pub bonus: u32,
    pub expires_at: i64,
}

impl StatBoost {
    pub fn is_active(&self, now: i64) -> bool {
        self.expires_at > now
    }

    /// Bonus currently in force, zero once expired.
    pub fn active_bonus(&self, now: i64) -> u32 {
        if self.is_active(now) {
            self.bonus
        } else {
            0
        }
    }

    /// Apply a potion of magnitude `value` at time `now`. Stacks onto a live
    /// boost, replaces a dead one; the expiry always restarts at the full
    /// lifetime from `now`.
    pub fn apply(&mut self, now: i64, value: u32) {
        if self.is_active(now) {
            self.bonus += value;
        } else {
            self.bonus = value;
        }
        self.expires_at = now + BOOST_LIFETIME_SECS;
    }

    /// Clear the boost if it has run out. Returns true exactly when the boost
    /// was still recorded as nonzero before this call, so callers can emit a
    /// one-time expiry notification. Idempotent.
    pub fn expire(&mut self, now: i64) -> bool {
        if self.is_active(now) || (self.bonus == 0 && self.expires_at == 0) {
            return false;
        }
        self.bonus = 0;
        self.expires_at = 0;
        true
    }

    /// Seconds of lifetime left, zero once expired.
    pub fn remaining(&self, now: i64) -> i64 {
        (self.expires_at - now).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_application_replaces() {
        let mut boost = StatBoost::default();
        boost.apply(1_000, 3);
        assert_eq!(boost.bonus, 3);
        assert_eq!(boost.expires_at, 1_000 + BOOST_LIFETIME_SECS);
        assert_eq!(boost.active_bonus(1_000), 3);
    }

    #[test]
    fn stacking_adds_and_extends() {
        let mut boost = StatBoost::default();
        boost.apply(1_000, 3);
        boost.apply(1_010, 3);
        assert_eq!(boost.bonus, 6);
        assert_eq!(boost.expires_at, 1_010 + BOOST_LIFETIME_SECS);
    }

    #[test]
    fn expired_application_replaces_not_stacks() {
        let mut boost = StatBoost::default();
        boost.apply(1_000, 3);
        boost.apply(1_000 + BOOST_LIFETIME_SECS + 1, 2);
        assert_eq!(boost.bonus, 2);
    }

    #[test]
    fn expire_reports_once() {
        let mut boost = StatBoost::default();
        boost.apply(1_000, 3);
        let later = 1_000 + BOOST_LIFETIME_SECS + 1;
        assert_eq!(boost.active_bonus(later), 0);
        assert!(boost.expire(later), "first sweep should report expiry");
        assert!(!boost.expire(later), "second sweep must be silent");
        assert_eq!(boost.bonus, 0);
        assert_eq!(boost.expires_at, 0);
    }

    #[test]
    fn expire_leaves_live_boost_alone() {
        let mut boost = StatBoost::default();
        boost.apply(1_000, 3);
        assert!(!boost.expire(1_010));
        assert_eq!(boost.bonus, 3);
    }

    #[test]
    fn remaining_clamps_to_zero() {
        let mut boost = StatBoost::default();
        boost.apply(1_000, 3);
        assert_eq!(boost.remaining(1_060), BOOST_LIFETIME_SECS - 60);
        assert_eq!(boost.remaining(1_000 + BOOST_LIFETIME_SECS + 50), 0);
    }
}
