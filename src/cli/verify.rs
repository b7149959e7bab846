//! Line uniqueness check (`bingo verify`).

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use bingocard::{Card, labelled_lines, verify_cards};
use clap::Args;

use crate::cli::utils::load_cards;

/// Arguments for `bingo verify`.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Card file to check: text dump, JSON manifest, or `-` for stdin.
    #[arg(default_value = "bingo_cards.txt")]
    pub cards: PathBuf,
    /// Treat any shared line as an error.
    #[arg(long)]
    pub strict: bool,
}

/// Execute `bingo verify`.
pub fn handle(args: VerifyArgs) -> Result<()> {
    let cards = load_cards(&args.cards)?;
    let report = verify_cards(&cards);

    println!("Cards: {}", report.cards);
    println!("Total lines (rows, cols, diags): {}", report.total_lines);
    println!("Unique lines: {}", report.unique_lines);
    println!("All lines are unique: {}", report.all_unique());

    for conflict in &report.conflicts {
        let (first, second) = (&cards[conflict.first], &cards[conflict.second]);
        let place = |card: &Card| {
            labelled_lines(card)
                .into_iter()
                .find(|(_, line)| *line == conflict.line)
                .map(|(kind, _)| kind.to_string())
                .unwrap_or_default()
        };
        println!(
            "  cards {} and {} share {} ({} / {})",
            conflict.first + 1,
            conflict.second + 1,
            conflict.line,
            place(first),
            place(second)
        );
    }

    if args.strict && !report.all_unique() {
        return Err(anyhow!(
            "{} shared line(s) found in {}",
            report.conflicts.len(),
            args.cards.display()
        ));
    }
    Ok(())
}
