//! Core domain primitives: cards, their lines, and batch generation.

pub mod card;
pub mod generator;
pub mod lines;
pub mod verify;

pub use card::{CELLS, Card, CardError, GRID, MAX_VALUE};
pub use generator::{
    CardBatch, DEFAULT_MAX_ATTEMPTS, DEFAULT_NUM_CARDS, GenerateError, GenerationReport,
    GeneratorConfig, generate_unique_cards, generate_with, resolve_seed, seeded_rng,
};
pub use lines::{LINES_PER_CARD, Line, LineKind, LineSet, cards_share_line, labelled_lines};
pub use verify::{LineConflict, VerificationReport, verify_cards};
