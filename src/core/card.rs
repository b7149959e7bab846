use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};
use thiserror::Error;

/// Cards are always square: 5 rows of 5 cells.
pub const GRID: usize = 5;
pub const CELLS: usize = GRID * GRID;
/// Highest value printed on a card; values run 1..=MAX_VALUE.
pub const MAX_VALUE: u8 = CELLS as u8;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CardError {
    #[error("value {value} at row {row}, column {col} is outside 1..=25")]
    OutOfRange { row: usize, col: usize, value: u8 },
    #[error("value {value} appears more than once (again at row {row}, column {col})")]
    Duplicate { row: usize, col: usize, value: u8 },
}

/// A 5x5 bingo card holding each of 1..=25 exactly once, row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "[[u8; GRID]; GRID]", into = "[[u8; GRID]; GRID]")]
pub struct Card {
    rows: [[u8; GRID]; GRID],
}

impl Card {
    /// Build a card from explicit rows, checking that the grid is a permutation of 1..=25.
    pub fn from_rows(rows: [[u8; GRID]; GRID]) -> Result<Self, CardError> {
        let mut seen = [false; CELLS + 1];
        for (row, values) in rows.iter().enumerate() {
            for (col, &value) in values.iter().enumerate() {
                if value == 0 || value > MAX_VALUE {
                    return Err(CardError::OutOfRange { row, col, value });
                }
                let slot = &mut seen[value as usize];
                if *slot {
                    return Err(CardError::Duplicate { row, col, value });
                }
                *slot = true;
            }
        }
        // 25 in-range values with no repeats covers the whole range.
        Ok(Self { rows })
    }

    /// Sample a uniformly random card: a shuffle of 1..=25 laid out row by row.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut values: Vec<u8> = (1..=MAX_VALUE).collect();
        values.shuffle(rng);
        let mut rows = [[0u8; GRID]; GRID];
        for (row, chunk) in rows.iter_mut().zip(values.chunks_exact(GRID)) {
            row.copy_from_slice(chunk);
        }
        Self { rows }
    }

    pub fn rows(&self) -> &[[u8; GRID]; GRID] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> [u8; GRID] {
        self.rows[index]
    }

    pub fn column(&self, index: usize) -> [u8; GRID] {
        std::array::from_fn(|row| self.rows[row][index])
    }

    /// Cells where row index == column index.
    pub fn main_diagonal(&self) -> [u8; GRID] {
        std::array::from_fn(|i| self.rows[i][i])
    }

    /// Cells where row index + column index == 4.
    pub fn anti_diagonal(&self) -> [u8; GRID] {
        std::array::from_fn(|i| self.rows[i][GRID - 1 - i])
    }

    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        self.rows.get(row).and_then(|r| r.get(col)).copied()
    }

    /// All 25 values in row-major order.
    pub fn values(&self) -> impl Iterator<Item = u8> + '_ {
        self.rows.iter().flatten().copied()
    }

    pub fn transposed(&self) -> Self {
        Self {
            rows: std::array::from_fn(|i| self.column(i)),
        }
    }
}

impl TryFrom<[[u8; GRID]; GRID]> for Card {
    type Error = CardError;

    fn try_from(rows: [[u8; GRID]; GRID]) -> Result<Self, Self::Error> {
        Card::from_rows(rows)
    }
}

impl From<Card> for [[u8; GRID]; GRID] {
    fn from(card: Card) -> Self {
        card.rows
    }
}

/// Renders the five number rows, each value padded to two characters.
impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, row) in self.rows.iter().enumerate() {
            if idx > 0 {
                f.write_char('\n')?;
            }
            f.write_str("  ")?;
            for (col, value) in row.iter().enumerate() {
                if col > 0 {
                    f.write_str("  ")?;
                }
                write!(f, "{:2}", value)?;
            }
        }
        Ok(())
    }
}
