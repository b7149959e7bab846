//! Line statistics over an arbitrary list of cards.

use std::collections::HashSet;

use crate::core::card::Card;
use crate::core::lines::{Line, LineSet};

/// Two cards holding the same line. Indexes are zero-based positions in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineConflict {
    pub first: usize,
    pub second: usize,
    pub line: Line,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationReport {
    pub cards: usize,
    /// Sum of each card's line count.
    pub total_lines: usize,
    /// Distinct lines across all cards.
    pub unique_lines: usize,
    pub conflicts: Vec<LineConflict>,
}

impl VerificationReport {
    pub fn all_unique(&self) -> bool {
        self.total_lines == self.unique_lines && self.conflicts.is_empty()
    }
}

/// Count lines across `cards` and list every pair that shares one.
pub fn verify_cards(cards: &[Card]) -> VerificationReport {
    let sets: Vec<LineSet> = cards.iter().map(LineSet::of).collect();

    let total_lines = sets.iter().map(LineSet::len).sum();
    let unique_lines = sets
        .iter()
        .flat_map(|set| set.iter().copied())
        .collect::<HashSet<Line>>()
        .len();

    let mut conflicts = Vec::new();
    for (first, a) in sets.iter().enumerate() {
        for (offset, b) in sets[first + 1..].iter().enumerate() {
            for line in a.shared_with(b) {
                conflicts.push(LineConflict {
                    first,
                    second: first + 1 + offset,
                    line,
                });
            }
        }
    }

    VerificationReport {
        cards: cards.len(),
        total_lines,
        unique_lines,
        conflicts,
    }
}
