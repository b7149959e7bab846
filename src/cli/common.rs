//! Shared clap helper types for CLI commands.

use std::fmt;

use bingocard::OutputFormat;
use clap::ValueEnum;

/// Serialization used for generated card files.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardFormatArg {
    /// Plain-text card blocks.
    Text,
    /// JSON manifest with seed and fingerprint.
    Json,
}

impl CardFormatArg {
    /// Output file used by `bingo generate` when `-o` is not given.
    pub fn default_file_name(self) -> &'static str {
        match self {
            CardFormatArg::Text => "bingo_cards.txt",
            CardFormatArg::Json => "bingo_cards.json",
        }
    }
}

impl fmt::Display for CardFormatArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardFormatArg::Text => write!(f, "text"),
            CardFormatArg::Json => write!(f, "json"),
        }
    }
}

/// Image formats available for rendered cards.
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum ImageFormatArg {
    Jpeg,
    Png,
}

impl From<ImageFormatArg> for OutputFormat {
    fn from(value: ImageFormatArg) -> OutputFormat {
        match value {
            ImageFormatArg::Jpeg => OutputFormat::Jpeg,
            ImageFormatArg::Png => OutputFormat::Png,
        }
    }
}
