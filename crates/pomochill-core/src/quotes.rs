//! Motivational quotes shown when a break begins.

use rand::Rng;

pub const QUOTES: [&str; 9] = [
    "The only way to do great work is to love what you do.",
    "Success is not the key to happiness. Happiness is the key to success.",
    "The best way to predict the future is to create it.",
    "The only limit to our realization of tomorrow will be our doubts of today.",
    "The best preparation for tomorrow is doing your best today.",
    "The future belongs to those who believe in the beauty of their dreams.",
    "The secret of getting ahead is getting started.",
    "You are never too old to set another goal or to dream a new dream.",
    "The best way to get something done is to begin.",
];

/// Pick a quote from a caller-supplied random source, so selection is
/// reproducible under a seeded generator.
pub fn pick_quote<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    QUOTES[rng.gen_range(0..QUOTES.len())]
}

/// Convenience for shells that don't need determinism.
pub fn random_quote() -> &'static str {
    pick_quote(&mut rand::thread_rng())
}
