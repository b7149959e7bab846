//! Command-line interface wiring for the `bingo` binary.
//!
//! This module owns the clap definitions and delegates execution to
//! one submodule per command.

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

pub mod common;
pub mod generate;
pub mod mapping;
pub mod render;
pub mod utils;
pub mod verify;

/// Parsed CLI entrypoint for the `bingo` binary.
#[derive(Parser, Debug)]
#[command(
    name = "bingo",
    version,
    about = "Generate 5x5 bingo cards with no shared lines and render them from photos"
)]
pub struct Cli {
    /// Increase log detail (-v info, -vv debug, -vvv trace). `RUST_LOG` takes precedence.
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a batch of cards that share no row, column or diagonal.
    Generate(generate::GenerateArgs),
    /// Check a card file for shared lines.
    Verify(verify::VerifyArgs),
    /// Render composite images for every card in a card file.
    Render(render::RenderArgs),
    /// Show which photo stands for each number.
    Mapping(mapping::MappingArgs),
}

/// Execute the requested command.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Generate(args) => generate::handle(args),
        Command::Verify(args) => verify::handle(args),
        Command::Render(args) => render::handle(args),
        Command::Mapping(args) => mapping::handle(args),
    }
}
