//! Rejection-sampling search for batches of line-disjoint cards.
//!
//! Candidates are drawn at random and kept only if none of their lines
//! already appears on an accepted card. The attempt budget applies to each
//! slot separately: it resets whenever a card is accepted. Running out of
//! budget is a normal outcome and yields a short batch, not an error.

use std::collections::HashSet;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::card::Card;
use crate::core::lines::{LINES_PER_CARD, Line, LineSet};

pub const DEFAULT_NUM_CARDS: usize = 20;
pub const DEFAULT_MAX_ATTEMPTS: usize = 100_000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenerateError {
    #[error("number of cards must be at least 1")]
    NoCards,
    #[error("attempt budget must be at least 1")]
    NoAttempts,
}

/// Parameters for one generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub num_cards: usize,
    /// Candidates tried per slot before giving up on the batch.
    pub max_attempts: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            num_cards: DEFAULT_NUM_CARDS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl GeneratorConfig {
    pub fn new(num_cards: usize, max_attempts: usize) -> Self {
        Self {
            num_cards,
            max_attempts,
        }
    }

    pub fn validate(&self) -> Result<(), GenerateError> {
        if self.num_cards == 0 {
            return Err(GenerateError::NoCards);
        }
        if self.max_attempts == 0 {
            return Err(GenerateError::NoAttempts);
        }
        Ok(())
    }
}

/// Accepted cards plus the union of their lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardBatch {
    cards: Vec<Card>,
    lines: HashSet<Line>,
}

impl CardBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(cards: usize) -> Self {
        Self {
            cards: Vec::with_capacity(cards),
            lines: HashSet::with_capacity(cards * LINES_PER_CARD),
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Whether `card` has no line in common with any accepted card.
    pub fn accepts(&self, card: &Card) -> bool {
        LineSet::of(card).iter().all(|line| !self.lines.contains(line))
    }

    /// Append `card` if it is compatible with the batch. Returns whether it was kept.
    pub fn try_push(&mut self, card: Card) -> bool {
        if !self.accepts(&card) {
            return false;
        }
        self.lines.extend(LineSet::of(&card));
        self.cards.push(card);
        true
    }

    pub fn into_cards(self) -> Vec<Card> {
        self.cards
    }
}

/// Outcome of a generation run, complete or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub batch: CardBatch,
    pub requested: usize,
    pub max_attempts: usize,
    /// Candidates drawn for each accepted card, in acceptance order.
    pub attempts: Vec<usize>,
}

impl GenerationReport {
    pub fn produced(&self) -> usize {
        self.batch.len()
    }

    pub fn is_complete(&self) -> bool {
        self.batch.len() >= self.requested
    }

    pub fn total_attempts(&self) -> usize {
        self.attempts.iter().sum()
    }
}

/// Generate a batch drawing candidates from `rng`.
pub fn generate_unique_cards<R: Rng + ?Sized>(
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<GenerationReport, GenerateError> {
    generate_with(config, || Card::random(rng))
}

/// Generate a batch drawing candidates from an arbitrary sampler.
pub fn generate_with<F>(
    config: &GeneratorConfig,
    mut sample: F,
) -> Result<GenerationReport, GenerateError>
where
    F: FnMut() -> Card,
{
    config.validate()?;

    let mut batch = CardBatch::with_capacity(config.num_cards);
    let mut accepted_after = Vec::with_capacity(config.num_cards);
    let mut attempts = 0usize;

    while batch.len() < config.num_cards && attempts < config.max_attempts {
        attempts += 1;
        if batch.try_push(sample()) {
            debug!(
                card = batch.len(),
                requested = config.num_cards,
                attempts,
                "accepted card"
            );
            accepted_after.push(attempts);
            attempts = 0;
        }
    }

    if batch.len() < config.num_cards {
        warn!(
            produced = batch.len(),
            requested = config.num_cards,
            max_attempts = config.max_attempts,
            "attempt budget exhausted before the batch was filled"
        );
    }

    Ok(GenerationReport {
        batch,
        requested: config.num_cards,
        max_attempts: config.max_attempts,
        attempts: accepted_after,
    })
}

/// Deterministic random source for a given seed.
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Use `seed` when given, otherwise derive one from the current time.
pub fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| {
        let now = chrono::Utc::now();
        now.timestamp_nanos_opt()
            .map(|nanos| nanos as u64)
            .unwrap_or_else(|| now.timestamp_micros() as u64)
    })
}
