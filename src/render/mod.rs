//! Composite JPEG/PNG rendering of cards from a photo set.

mod composite;

pub use composite::{
    CompositeOptions, DEFAULT_BORDER_SIZE, DEFAULT_CELL_SIZE, DEFAULT_JPEG_QUALITY, MAX_CANVAS_SIZE,
    OutputFormat, TileSet, card_file_name, compose_card, render_cards, save_card_image,
};
