//! Flavor text: short templated phrases sprinkled into task and fight
//! messages.
//!
//! Providers are pluggable and allowed to fail; every call site has a
//! deterministic fallback so a broken provider never surfaces to the user.

use rand::Rng;

/// Where a phrase will be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlavorContext {
    TaskSuccess,
    FightTaunt,
    TradeGreeting,
}

/// A phrase source. Returning `None` (or an empty string, which callers
/// treat the same) falls back to the built-in default.
pub trait FlavorProvider: Send {
    fn phrase(&mut self, context: FlavorContext) -> Option<String>;
}

/// Deterministic fallback for every context.
pub fn fallback(context: FlavorContext) -> &'static str {
    match context {
        FlavorContext::TaskSuccess => "The day's work is done.",
        FlavorContext::FightTaunt => "The crowd roars.",
        FlavorContext::TradeGreeting => "A hooded figure approaches.",
    }
}

/// Resolve a phrase through an optional provider, falling back on failure
/// or empty output.
pub fn phrase_or_fallback(
    provider: Option<&mut (dyn FlavorProvider + 'static)>,
    context: FlavorContext,
) -> String {
    if let Some(p) = provider {
        if let Some(text) = p.phrase(context) {
            if !text.trim().is_empty() {
                return text;
            }
        }
    }
    fallback(context).to_string()
}

/// Built-in provider sampling from small static phrase pools.
pub struct TemplateFlavor<R: Rng + Send> {
    rng: R,
}

impl<R: Rng + Send> TemplateFlavor<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

const TASK_PHRASES: &[&str] = &[
    "You haul crates until your arms ache.",
    "You sweep the arena sand into neat ridges.",
    "You mend torn training dummies by lamplight.",
    "You run errands across the old market.",
];

const TAUNT_PHRASES: &[&str] = &[
    "The crowd bays for blood.",
    "Dust swirls around your boots.",
    "Somewhere a bell tolls for the loser.",
];

const TRADE_PHRASES: &[&str] = &[
    "A hooded trader slides out of the shadows.",
    "A peddler rattles a sack of oddities at you.",
];

impl<R: Rng + Send> FlavorProvider for TemplateFlavor<R> {
    fn phrase(&mut self, context: FlavorContext) -> Option<String> {
        let pool = match context {
            FlavorContext::TaskSuccess => TASK_PHRASES,
            FlavorContext::FightTaunt => TAUNT_PHRASES,
            FlavorContext::TradeGreeting => TRADE_PHRASES,
        };
        let idx = self.rng.gen_range(0..pool.len());
        Some(pool[idx].to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    struct Broken;
    impl FlavorProvider for Broken {
        fn phrase(&mut self, _: FlavorContext) -> Option<String> {
            None
        }
    }

    struct Empty;
    impl FlavorProvider for Empty {
        fn phrase(&mut self, _: FlavorContext) -> Option<String> {
            Some("   ".to_string())
        }
    }

    #[test]
    fn broken_provider_falls_back() {
        let mut broken = Broken;
        let text = phrase_or_fallback(Some(&mut broken), FlavorContext::TaskSuccess);
        assert_eq!(text, fallback(FlavorContext::TaskSuccess));
    }

    #[test]
    fn empty_output_falls_back() {
        let mut empty = Empty;
        let text = phrase_or_fallback(Some(&mut empty), FlavorContext::FightTaunt);
        assert_eq!(text, fallback(FlavorContext::FightTaunt));
    }

    #[test]
    fn template_provider_draws_from_pool() {
        let mut provider = TemplateFlavor::new(StdRng::seed_from_u64(1));
        let text = provider.phrase(FlavorContext::TradeGreeting).unwrap();
        assert!(TRADE_PHRASES.contains(&text.as_str()));
    }
}
