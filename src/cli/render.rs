//! Composite image rendering (`bingo render`).

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use bingocard::{
    CompositeOptions, DEFAULT_BORDER_SIZE, DEFAULT_CELL_SIZE, DEFAULT_JPEG_QUALITY, ImageMap,
    TileSet, render_cards,
};
use clap::Args;

use crate::cli::common::ImageFormatArg;
use crate::cli::mapping::print_mapping;
use crate::cli::utils::load_cards;

/// Arguments for `bingo render`.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Card file to render: text dump or JSON manifest.
    #[arg(long = "cards", default_value = "bingo_cards.txt")]
    pub cards: PathBuf,
    /// Folder holding exactly 25 JPEG photos.
    #[arg(long = "media", default_value = "media")]
    pub media: PathBuf,
    /// Folder to write the card images to.
    #[arg(short = 'o', long = "output", default_value = "output_cards")]
    pub output: PathBuf,
    /// Edge length of each photo cell, in pixels.
    #[arg(long = "cell-size", default_value_t = DEFAULT_CELL_SIZE)]
    pub cell_size: u32,
    /// Border around and between cells, in pixels.
    #[arg(long = "border-size", default_value_t = DEFAULT_BORDER_SIZE)]
    pub border_size: u32,
    /// Image format of the rendered cards.
    #[arg(long, default_value_t = ImageFormatArg::Jpeg, value_enum)]
    pub format: ImageFormatArg,
    /// JPEG quality (1-100).
    #[arg(long, default_value_t = DEFAULT_JPEG_QUALITY)]
    pub quality: u8,
    /// Print the number-to-photo mapping before rendering.
    #[arg(long = "show-mapping")]
    pub show_mapping: bool,
}

/// Execute `bingo render`.
pub fn handle(args: RenderArgs) -> Result<()> {
    let options = CompositeOptions {
        cell_size: args.cell_size,
        border_size: args.border_size,
        format: args.format.into(),
        jpeg_quality: args.quality,
        ..CompositeOptions::default()
    };
    options.validate()?;

    if !args.media.is_dir() {
        return Err(anyhow!("media folder not found: {}", args.media.display()));
    }

    println!("Loading images from: {}", args.media.display());
    let map = ImageMap::load(&args.media)?;
    println!("Loaded {} images", map.len());
    if args.show_mapping {
        print_mapping(&map);
    }

    println!("Reading cards from: {}", args.cards.display());
    let cards = load_cards(&args.cards)?;
    println!("Loaded {} cards", cards.len());

    let tiles = TileSet::load(&map, options.cell_size)
        .with_context(|| format!("failed to prepare photos from {}", args.media.display()))?;

    let size = options.canvas_size()?;
    println!("Cell size: {0}x{0} pixels", options.cell_size);
    println!("Border size: {} pixels", options.border_size);
    println!("Total image size: {0}x{0} pixels", size);

    let written = render_cards(&cards, &tiles, &options, &args.output)?;
    for path in &written {
        println!("Saved {}", path.display());
    }
    println!(
        "Rendered {} card image(s) to {}",
        written.len(),
        args.output.display()
    );
    Ok(())
}
