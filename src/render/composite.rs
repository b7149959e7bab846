use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::{FilterType, overlay};
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb, RgbImage};
use tracing::{debug, info};

use crate::core::{Card, GRID};
use crate::media::{ImageMap, REQUIRED_IMAGES};

pub const DEFAULT_CELL_SIZE: u32 = 200;
pub const DEFAULT_BORDER_SIZE: u32 = 10;
pub const DEFAULT_JPEG_QUALITY: u8 = 95;
/// Largest canvas edge accepted, in pixels.
pub const MAX_CANVAS_SIZE: u32 = 16_384;

/// File format for rendered cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Jpeg,
    Png,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Png => "png",
        }
    }
}

/// Geometry and encoding of a composite card image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompositeOptions {
    /// Edge length of each square photo cell, in pixels.
    pub cell_size: u32,
    /// Gap around and between cells, in pixels.
    pub border_size: u32,
    pub background: Rgb<u8>,
    pub format: OutputFormat,
    pub jpeg_quality: u8,
}

impl Default for CompositeOptions {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            border_size: DEFAULT_BORDER_SIZE,
            background: Rgb([0xff, 0xff, 0xff]),
            format: OutputFormat::Jpeg,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl CompositeOptions {
    pub fn validate(&self) -> Result<()> {
        if self.cell_size == 0 {
            return Err(anyhow!("cell size must be at least 1 pixel"));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(anyhow!(
                "JPEG quality must be within 1..=100 (got {})",
                self.jpeg_quality
            ));
        }
        self.canvas_size()?;
        Ok(())
    }

    /// Side length of the square canvas: five cells and six borders.
    pub fn canvas_size(&self) -> Result<u32> {
        let grid = GRID as u32;
        self.cell_size
            .checked_mul(grid)
            .zip(self.border_size.checked_mul(grid + 1))
            .and_then(|(cells, borders)| cells.checked_add(borders))
            .filter(|size| *size <= MAX_CANVAS_SIZE)
            .ok_or_else(|| {
                anyhow!(
                    "{}px cells with {}px borders exceed the {}px canvas limit",
                    self.cell_size,
                    self.border_size,
                    MAX_CANVAS_SIZE
                )
            })
    }

    /// Top-left pixel of the cell at `row`, `col`, or `None` if it does not fit in `u32`.
    pub fn cell_origin(&self, row: usize, col: usize) -> Option<(u32, u32)> {
        let stride = self.cell_size.checked_add(self.border_size)?;
        let offset = |idx: usize| {
            u32::try_from(idx)
                .ok()
                .and_then(|idx| idx.checked_mul(stride))
                .and_then(|pos| pos.checked_add(self.border_size))
        };
        Some((offset(col)?, offset(row)?))
    }
}

/// The 25 photos, resized once to the cell size.
#[derive(Debug, Clone)]
pub struct TileSet {
    cell_size: u32,
    tiles: Vec<RgbImage>,
}

impl TileSet {
    /// Decode and resize every photo in `map`.
    pub fn load(map: &ImageMap, cell_size: u32) -> Result<Self> {
        let mut images = Vec::with_capacity(map.len());
        for (value, path) in map.iter() {
            debug!(value, path = %path.display(), "loading tile");
            let image = image::open(path)
                .with_context(|| format!("failed to open image {}", path.display()))?;
            images.push(image);
        }
        Self::from_images(images, cell_size)
    }

    /// Build tiles from decoded images; `images[0]` becomes value 1.
    pub fn from_images(images: Vec<DynamicImage>, cell_size: u32) -> Result<Self> {
        if images.len() != REQUIRED_IMAGES {
            return Err(anyhow!(
                "expected {} tile images, got {}",
                REQUIRED_IMAGES,
                images.len()
            ));
        }
        if cell_size == 0 || cell_size > MAX_CANVAS_SIZE {
            return Err(anyhow!(
                "cell size must be within 1..={} pixels (got {})",
                MAX_CANVAS_SIZE,
                cell_size
            ));
        }
        let tiles = images
            .into_iter()
            .map(|image| {
                image
                    .resize_exact(cell_size, cell_size, FilterType::Lanczos3)
                    .to_rgb8()
            })
            .collect();
        Ok(Self { cell_size, tiles })
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    pub fn tile(&self, value: u8) -> Option<&RgbImage> {
        (value as usize)
            .checked_sub(1)
            .and_then(|idx| self.tiles.get(idx))
    }
}

/// Lay the card's photos out on a fresh canvas.
pub fn compose_card(card: &Card, tiles: &TileSet, options: &CompositeOptions) -> Result<RgbImage> {
    if tiles.cell_size() != options.cell_size {
        return Err(anyhow!(
            "tiles were prepared at {}px but cells are {}px",
            tiles.cell_size(),
            options.cell_size
        ));
    }
    let size = options.canvas_size()?;
    let mut canvas = ImageBuffer::from_pixel(size, size, options.background);
    for (row, values) in card.rows().iter().enumerate() {
        for (col, &value) in values.iter().enumerate() {
            let tile = tiles
                .tile(value)
                .ok_or_else(|| anyhow!("no tile for value {}", value))?;
            let (x, y) = options
                .cell_origin(row, col)
                .ok_or_else(|| anyhow!("cell {},{} is off the canvas", row, col))?;
            overlay(&mut canvas, tile, x as i64, y as i64);
        }
    }
    Ok(canvas)
}

/// Encode `image` to `path` in the configured format.
pub fn save_card_image(image: &RgbImage, path: &Path, options: &CompositeOptions) -> Result<()> {
    match options.format {
        OutputFormat::Jpeg => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            let encoder = JpegEncoder::new_with_quality(&mut writer, options.jpeg_quality);
            image
                .write_with_encoder(encoder)
                .with_context(|| format!("failed to encode {}", path.display()))?;
            writer.flush()?;
        }
        OutputFormat::Png => {
            image
                .save_with_format(path, ImageFormat::Png)
                .with_context(|| format!("failed to write {}", path.display()))?;
        }
    }
    Ok(())
}

/// `bingo_card_NN.<ext>` for the 1-based card `number`.
pub fn card_file_name(number: usize, format: OutputFormat) -> String {
    format!("bingo_card_{:02}.{}", number, format.extension())
}

/// Render every card into `output_dir`, creating it if needed. Returns the written paths.
pub fn render_cards(
    cards: &[Card],
    tiles: &TileSet,
    options: &CompositeOptions,
    output_dir: &Path,
) -> Result<Vec<PathBuf>> {
    options.validate()?;
    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output directory {}", output_dir.display()))?;
    let mut written = Vec::with_capacity(cards.len());
    for (idx, card) in cards.iter().enumerate() {
        let path = output_dir.join(card_file_name(idx + 1, options.format));
        let image = compose_card(card, tiles, options)?;
        save_card_image(&image, &path, options)?;
        info!(card = idx + 1, path = %path.display(), "saved card image");
        written.push(path);
    }
    Ok(written)
}
