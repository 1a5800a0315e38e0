//! Inbound command parsing.
//!
//! The gateway hands the engine raw text; this thin layer turns it into a
//! tagged [`Command`] by exact or prefix match. Anything unrecognized is a
//! free-text broadcast to the other active entities.

use crate::arena::entity::StatKind;
use crate::arena::items::PotionKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Registration / first contact.
    Start,
    Profile,
    Rename(String),
    Allocate(StatKind),
    SeekFight,
    /// Fight-turn report: the attack landed.
    HitSuccess,
    /// Fight-turn report: the attack missed.
    HitFailure,
    UsePotion(PotionKind),
    Brew(PotionKind),
    PerformTask,
    /// Privileged: current actor concedes, fight ends with no damage.
    ForcedRetreat,
    /// Privileged: current actor wins immediately.
    ForcedKill,
    /// Privileged: destroy and recreate the entity from scratch.
    ForcedReset,
    TradeAccept,
    TradeReject,
    /// Non-command text, relayed to other active entities.
    Say(String),
}

/// Parse one inbound text. Exact matches first, then the one prefix form
/// (`/name`), then broadcast fallthrough.
pub fn parse(text: &str) -> Command {
    let trimmed = text.trim();
    match trimmed {
        "/start" => return Command::Start,
        "/profile" => return Command::Profile,
        "/upstr" => return Command::Allocate(StatKind::Strength),
        "/upvit" => return Command::Allocate(StatKind::Vitality),
        "/upluck" => return Command::Allocate(StatKind::Luck),
        "/fight" => return Command::SeekFight,
        "/hit" => return Command::HitSuccess,
        "/miss" => return Command::HitFailure,
        "/use_heal" => return Command::UsePotion(PotionKind::Healing),
        "/use_str" => return Command::UsePotion(PotionKind::Strength),
        "/use_luck" => return Command::UsePotion(PotionKind::Luck),
        "/brew_heal" => return Command::Brew(PotionKind::Healing),
        "/brew_str" => return Command::Brew(PotionKind::Strength),
        "/brew_luck" => return Command::Brew(PotionKind::Luck),
        "/task" => return Command::PerformTask,
        "/retreat" => return Command::ForcedRetreat,
        "/finish" => return Command::ForcedKill,
        "/reset" => return Command::ForcedReset,
        "/accept" => return Command::TradeAccept,
        "/reject" => return Command::TradeReject,
        _ => {}
    }
    if let Some(rest) = trimmed.strip_prefix("/name ") {
        return Command::Rename(rest.trim().to_string());
    }
    Command::Say(trimmed.to_string())
}

/// Rename validation: 1-24 chars of letters, digits, spaces and `_-'`.
/// Control and markup characters are rejected outright.
pub fn valid_name(name: &str) -> bool {
    let len = name.chars().count();
    if len == 0 || len > 24 {
        return false;
    }
    name.chars()
        .all(|c| c.is_alphanumeric() || c == ' ' || c == '_' || c == '-' || c == '\'')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_commands_parse() {
        assert_eq!(parse("/start"), Command::Start);
        assert_eq!(parse("  /fight "), Command::SeekFight);
        assert_eq!(parse("/upluck"), Command::Allocate(StatKind::Luck));
        assert_eq!(parse("/brew_heal"), Command::Brew(PotionKind::Healing));
        assert_eq!(parse("/use_str"), Command::UsePotion(PotionKind::Strength));
        assert_eq!(parse("/accept"), Command::TradeAccept);
        assert_eq!(parse("/hit"), Command::HitSuccess);
        assert_eq!(parse("/miss"), Command::HitFailure);
    }

    #[test]
    fn name_prefix_carries_argument() {
        assert_eq!(parse("/name Sir Pokes"), Command::Rename("Sir Pokes".into()));
        // Bare "/name" is not a rename, it falls through to broadcast.
        assert_eq!(parse("/name"), Command::Say("/name".into()));
    }

    #[test]
    fn unknown_text_broadcasts() {
        assert_eq!(parse("hello pit"), Command::Say("hello pit".into()));
        assert_eq!(parse("/unknown"), Command::Say("/unknown".into()));
    }

    #[test]
    fn name_validation() {
        assert!(valid_name("Sir Pokes-a-lot"));
        assert!(valid_name("O'Malley_3"));
        assert!(!valid_name(""));
        assert!(!valid_name("way too long a name for the arena roster"));
        assert!(!valid_name("bad\nname"));
        assert!(!valid_name("<b>markup</b>"));
    }
}
