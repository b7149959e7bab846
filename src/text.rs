//! Plain-text card dump.
//!
//! Each card is written as a block:
//!
//! ```text
//! ===========================
//!   CARD  1
//! ===========================
//!    7  12  25   3  19
//!   ...four more rows...
//! ===========================
//!
//! ```
//!
//! Parsing accepts the same layout. Separator and blank lines are
//! structural, a `CARD n` header starts a new card, and every other line
//! must hold exactly five numbers.

use thiserror::Error;

use crate::core::{Card, CardError, GRID};

/// Width of the `=` separator line.
pub const SEPARATOR_WIDTH: usize = 27;
const HEADER_PREFIX: &str = "CARD";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("line {line}: expected 5 numbers, found {found}")]
    RowWidth { line: usize, found: usize },
    #[error("line {line}: '{token}' is not a card value")]
    NotANumber { line: usize, token: String },
    #[error("line {line}: card has more than 5 rows")]
    TooManyRows { line: usize },
    #[error("line {line}: card ended after {rows} of 5 rows")]
    IncompleteCard { line: usize, rows: usize },
    #[error("card ending at line {line} is invalid: {source}")]
    InvalidCard {
        line: usize,
        #[source]
        source: CardError,
    },
}

pub fn separator() -> String {
    "=".repeat(SEPARATOR_WIDTH)
}

/// Format one card block. `number` is the 1-based index shown in the header.
pub fn format_card(card: &Card, number: usize) -> String {
    let sep = separator();
    format!("{sep}\n  {HEADER_PREFIX} {number:2}\n{sep}\n{card}\n{sep}\n")
}

/// Format a whole batch, one block per card followed by a blank line.
pub fn format_cards(cards: &[Card]) -> String {
    let mut out = String::new();
    for (idx, card) in cards.iter().enumerate() {
        out.push_str(&format_card(card, idx + 1));
        out.push('\n');
    }
    out
}

/// Parse every card in `input`.
pub fn parse_cards(input: &str) -> Result<Vec<Card>, ParseError> {
    let mut cards = Vec::new();
    let mut rows: Vec<[u8; GRID]> = Vec::with_capacity(GRID);

    for (idx, raw) in input.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        if is_separator(line) {
            flush(&mut rows, &mut cards, line_no)?;
            continue;
        }
        if is_header(line) {
            flush(&mut rows, &mut cards, line_no)?;
            continue;
        }
        if rows.len() == GRID {
            return Err(ParseError::TooManyRows { line: line_no });
        }
        rows.push(parse_row(line, line_no)?);
    }
    let last = input.lines().count();
    flush(&mut rows, &mut cards, last)?;
    Ok(cards)
}

fn is_separator(line: &str) -> bool {
    line.chars().all(|c| c == '=')
}

fn is_header(line: &str) -> bool {
    line.get(..HEADER_PREFIX.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(HEADER_PREFIX))
}

fn parse_row(line: &str, line_no: usize) -> Result<[u8; GRID], ParseError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != GRID {
        return Err(ParseError::RowWidth {
            line: line_no,
            found: tokens.len(),
        });
    }
    let mut row = [0u8; GRID];
    for (slot, token) in row.iter_mut().zip(&tokens) {
        *slot = token.parse().map_err(|_| ParseError::NotANumber {
            line: line_no,
            token: token.to_string(),
        })?;
    }
    Ok(row)
}

fn flush(
    rows: &mut Vec<[u8; GRID]>,
    cards: &mut Vec<Card>,
    line_no: usize,
) -> Result<(), ParseError> {
    if rows.is_empty() {
        return Ok(());
    }
    if rows.len() != GRID {
        return Err(ParseError::IncompleteCard {
            line: line_no,
            rows: rows.len(),
        });
    }
    let grid: [[u8; GRID]; GRID] = std::array::from_fn(|i| rows[i]);
    let card = Card::from_rows(grid).map_err(|source| ParseError::InvalidCard {
        line: line_no,
        source,
    })?;
    cards.push(card);
    rows.clear();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GeneratorConfig, generate_unique_cards, seeded_rng};
    use pretty_assertions::assert_eq;

    fn ordered() -> Card {
        Card::from_rows(std::array::from_fn(|r| {
            std::array::from_fn(|c| (r * GRID + c + 1) as u8)
        }))
        .unwrap()
    }

    #[test]
    fn card_block_layout() {
        let block = format_card(&ordered(), 3);
        let expected = "\
===========================
  CARD  3
===========================
   1   2   3   4   5
   6   7   8   9  10
  11  12  13  14  15
  16  17  18  19  20
  21  22  23  24  25
===========================
";
        assert_eq!(block, expected);
    }

    #[test]
    fn batch_ends_each_block_with_blank_line() {
        let text = format_cards(&[ordered(), ordered().transposed()]);
        assert!(text.contains("  CARD  2\n"));
        assert!(text.ends_with("===========================\n\n"));
        assert_eq!(text.lines().filter(|l| l.is_empty()).count(), 2);
    }

    #[test]
    fn parses_formatted_batch() {
        let report =
            generate_unique_cards(&GeneratorConfig::new(6, 10_000), &mut seeded_rng(17)).unwrap();
        let text = format_cards(report.batch.cards());
        assert_eq!(parse_cards(&text).unwrap(), report.batch.cards());
    }

    #[test]
    fn parses_bare_rows_without_headers() {
        let text = "1 2 3 4 5\n6 7 8 9 10\n11 12 13 14 15\n16 17 18 19 20\n21 22 23 24 25\n";
        assert_eq!(parse_cards(text).unwrap(), vec![ordered()]);
        assert_eq!(parse_cards("").unwrap(), Vec::<Card>::new());
    }

    #[test]
    fn short_row_reports_line() {
        let mut text = format_card(&ordered(), 1);
        text = text.replace("   6   7   8   9  10", "   6   7   8   9");
        assert_eq!(
            parse_cards(&text),
            Err(ParseError::RowWidth { line: 5, found: 4 })
        );
    }

    #[test]
    fn bad_token_reports_line() {
        let text = format_card(&ordered(), 1).replace("  13  ", "  xx  ");
        assert_eq!(
            parse_cards(&text),
            Err(ParseError::NotANumber {
                line: 6,
                token: "xx".to_string()
            })
        );
    }

    #[test]
    fn missing_row_is_incomplete() {
        let text = format_card(&ordered(), 1).replace("  21  22  23  24  25\n", "");
        assert_eq!(
            parse_cards(&text),
            Err(ParseError::IncompleteCard { line: 8, rows: 4 })
        );
    }

    #[test]
    fn extra_row_is_rejected() {
        let text = format_card(&ordered(), 1).replace(
            "  21  22  23  24  25\n",
            "  21  22  23  24  25\n   1   2   3   4   5\n",
        );
        assert_eq!(parse_cards(&text), Err(ParseError::TooManyRows { line: 9 }));
    }

    #[test]
    fn duplicate_value_is_invalid_card() {
        let text = format_card(&ordered(), 1).replace("  25\n", "  24\n");
        assert!(matches!(
            parse_cards(&text),
            Err(ParseError::InvalidCard {
                line: 9,
                source: CardError::Duplicate { value: 24, .. }
            })
        ));
    }
}
