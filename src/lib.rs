//! Core library for generating line-disjoint bingo card batches and rendering them.

pub mod core;
mod manifest;
mod media;
mod render;
mod text;

pub use crate::core::{
    CELLS, Card, CardBatch, CardError, DEFAULT_MAX_ATTEMPTS, DEFAULT_NUM_CARDS, GRID,
    GenerateError, GenerationReport, GeneratorConfig, LINES_PER_CARD, Line, LineConflict,
    LineKind, LineSet, MAX_VALUE, VerificationReport, cards_share_line, generate_unique_cards,
    generate_with, labelled_lines, resolve_seed, seeded_rng, verify_cards,
};
pub use manifest::{BatchManifest, fingerprint};
pub use media::{ImageMap, MediaError, REQUIRED_IMAGES};
pub use render::{
    CompositeOptions, DEFAULT_BORDER_SIZE, DEFAULT_CELL_SIZE, DEFAULT_JPEG_QUALITY, MAX_CANVAS_SIZE,
    OutputFormat, TileSet, card_file_name, compose_card, render_cards, save_card_image,
};
pub use text::{ParseError, SEPARATOR_WIDTH, format_card, format_cards, parse_cards};

/// Run the generator with a ChaCha8 source seeded from `seed`, or from the clock when absent.
///
/// Returns the seed actually used alongside the report so a run can be repeated.
pub fn generate_batch(
    config: &GeneratorConfig,
    seed: Option<u64>,
) -> Result<(u64, GenerationReport), GenerateError> {
    let seed = resolve_seed(seed);
    let mut rng = seeded_rng(seed);
    let report = generate_unique_cards(config, &mut rng)?;
    Ok((seed, report))
}
