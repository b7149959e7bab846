//! Batch generation (`bingo generate`).

use std::path::PathBuf;

use anyhow::Result;
use bingocard::{
    BatchManifest, DEFAULT_MAX_ATTEMPTS, DEFAULT_NUM_CARDS, GenerationReport, GeneratorConfig,
    format_card, format_cards, generate_batch, verify_cards,
};
use clap::Args;
use tracing::info;

use crate::cli::common::CardFormatArg;
use crate::cli::utils::{is_stdio, write_output};

/// Arguments for `bingo generate`.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Number of cards in the batch.
    #[arg(short = 'n', long = "count", default_value_t = DEFAULT_NUM_CARDS)]
    pub count: usize,
    /// Candidates to try for each card before giving up.
    #[arg(long = "max-attempts", default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: usize,
    /// Seed for the random generator (defaults to time-based seeding).
    #[arg(long)]
    pub seed: Option<u64>,
    /// Output file (`-` for stdout). Defaults to `bingo_cards.txt` or `bingo_cards.json`.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
    /// Output format.
    #[arg(long, default_value_t = CardFormatArg::Text, value_enum)]
    pub format: CardFormatArg,
    /// Print every card after generation.
    #[arg(long)]
    pub print: bool,
    /// Write the file even when fewer cards than requested were produced.
    #[arg(long = "allow-partial")]
    pub allow_partial: bool,
}

/// Execute `bingo generate`.
pub fn handle(args: GenerateArgs) -> Result<()> {
    let config = GeneratorConfig::new(args.count, args.max_attempts);
    config.validate()?;
    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(args.format.default_file_name()));

    // Keep stdout clean for the card data when it is the output target.
    let to_stdout = is_stdio(&output);
    let status = |line: String| {
        if to_stdout {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    };

    status(format!(
        "Generating {} unique 5x5 cards with numbers 1-25...",
        config.num_cards
    ));
    status("Ensuring no two cards share any row, column, or diagonal.".to_string());

    let (seed, report) = generate_batch(&config, args.seed)?;
    if args.seed.is_some() {
        status(format!("Using seed: {}", seed));
    } else {
        status(format!("Using time-based seed: {}", seed));
    }
    info!(
        seed,
        produced = report.produced(),
        attempts = report.total_attempts(),
        "generation finished"
    );

    if report.is_complete() {
        status(format!(
            "Successfully generated all {} cards ({} candidates drawn)",
            report.produced(),
            report.total_attempts()
        ));
    } else {
        status(format!(
            "Warning: could only generate {} of {} cards after {} attempts for the next card.",
            report.produced(),
            report.requested,
            report.max_attempts
        ));
        if !args.allow_partial {
            status(
                "Nothing written. Retry with a larger --max-attempts, another --seed, \
                 or pass --allow-partial to keep the short batch."
                    .to_string(),
            );
            return Ok(());
        }
    }

    if args.print {
        for (idx, card) in report.batch.cards().iter().enumerate() {
            status(format!("\n{}", format_card(card, idx + 1).trim_end()));
        }
    }

    let content = render_output(&report, seed, args.format)?;
    write_output(&output, &content)?;
    if !to_stdout {
        status(format!(
            "Cards saved to {} ({})",
            output.display(),
            args.format
        ));
    }

    let verification = verify_cards(report.batch.cards());
    status(format!(
        "Total lines (rows, cols, diags): {}",
        verification.total_lines
    ));
    status(format!("Unique lines: {}", verification.unique_lines));
    status(format!(
        "All lines are unique: {}",
        verification.all_unique()
    ));
    Ok(())
}

fn render_output(report: &GenerationReport, seed: u64, format: CardFormatArg) -> Result<String> {
    match format {
        CardFormatArg::Text => Ok(format_cards(report.batch.cards())),
        CardFormatArg::Json => BatchManifest::from_report(report, Some(seed)).to_json(),
    }
}
