//! Canonical rows, columns and diagonals of a card.
//!
//! Two cards "share a line" when any of their lines hold the same five
//! values, regardless of order or cell position. Every line is therefore
//! stored sorted, so `[5, 4, 3, 2, 1]` and `[1, 2, 3, 4, 5]` compare equal.

use std::collections::BTreeSet;
use std::fmt;

use crate::core::card::{Card, GRID};

/// Number of lines on one card: 5 rows, 5 columns and 2 diagonals.
pub const LINES_PER_CARD: usize = 2 * GRID + 2;

/// An order-independent set of five card values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Line([u8; GRID]);

impl Line {
    pub fn new(mut values: [u8; GRID]) -> Self {
        values.sort_unstable();
        Self(values)
    }

    /// The five values in ascending order.
    pub fn values(&self) -> &[u8; GRID] {
        &self.0
    }
}

impl From<[u8; GRID]> for Line {
    fn from(values: [u8; GRID]) -> Self {
        Line::new(values)
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|v| v.to_string()).collect();
        write!(f, "{{{}}}", parts.join(", "))
    }
}

/// Where on a card a line was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    Row(usize),
    Column(usize),
    MainDiagonal,
    AntiDiagonal,
}

impl fmt::Display for LineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineKind::Row(idx) => write!(f, "row {}", idx + 1),
            LineKind::Column(idx) => write!(f, "column {}", idx + 1),
            LineKind::MainDiagonal => f.write_str("main diagonal"),
            LineKind::AntiDiagonal => f.write_str("anti-diagonal"),
        }
    }
}

/// Every line of `card` tagged with its origin: rows, then columns, then diagonals.
pub fn labelled_lines(card: &Card) -> [(LineKind, Line); LINES_PER_CARD] {
    std::array::from_fn(|idx| match idx {
        i if i < GRID => (LineKind::Row(i), Line::new(card.row(i))),
        i if i < 2 * GRID => {
            let col = i - GRID;
            (LineKind::Column(col), Line::new(card.column(col)))
        }
        i if i == 2 * GRID => (LineKind::MainDiagonal, Line::new(card.main_diagonal())),
        _ => (LineKind::AntiDiagonal, Line::new(card.anti_diagonal())),
    })
}

/// The set of canonical lines belonging to one card.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineSet(BTreeSet<Line>);

impl LineSet {
    pub fn of(card: &Card) -> Self {
        Self(labelled_lines(card).into_iter().map(|(_, line)| line).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, line: &Line) -> bool {
        self.0.contains(line)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Line> {
        self.0.iter()
    }

    pub fn is_disjoint(&self, other: &LineSet) -> bool {
        self.0.is_disjoint(&other.0)
    }

    /// Lines present in both sets, ascending.
    pub fn shared_with(&self, other: &LineSet) -> Vec<Line> {
        self.0.intersection(&other.0).copied().collect()
    }
}

impl IntoIterator for LineSet {
    type Item = Line;
    type IntoIter = std::collections::btree_set::IntoIter<Line>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// True when the two cards have at least one line in common.
pub fn cards_share_line(a: &Card, b: &Card) -> bool {
    !LineSet::of(a).is_disjoint(&LineSet::of(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn ordered() -> Card {
        Card::from_rows(std::array::from_fn(|r| {
            std::array::from_fn(|c| (r * GRID + c + 1) as u8)
        }))
        .unwrap()
    }

    // Shares no row, column or diagonal with `ordered()`.
    fn disjoint_from_ordered() -> Card {
        Card::from_rows([
            [1, 15, 24, 8, 17],
            [9, 18, 2, 11, 25],
            [12, 21, 10, 19, 3],
            [20, 4, 13, 22, 6],
            [23, 7, 16, 5, 14],
        ])
        .unwrap()
    }

    #[test]
    fn line_order_is_irrelevant() {
        assert_eq!(Line::new([1, 2, 3, 4, 5]), Line::new([5, 4, 3, 2, 1]));
        assert_eq!(Line::new([9, 1, 25, 3, 14]).values(), &[1, 3, 9, 14, 25]);
        assert_eq!(Line::new([3, 1, 2, 5, 4]).to_string(), "{1, 2, 3, 4, 5}");
    }

    #[test]
    fn twelve_lines_per_card() {
        assert_eq!(LineSet::of(&ordered()).len(), LINES_PER_CARD);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..100 {
            assert_eq!(LineSet::of(&Card::random(&mut rng)).len(), 12);
        }
    }

    #[test]
    fn labelled_lines_follow_card_layout() {
        let lines = labelled_lines(&ordered());
        assert_eq!(lines[0], (LineKind::Row(0), Line::new([1, 2, 3, 4, 5])));
        assert_eq!(
            lines[6],
            (LineKind::Column(1), Line::new([2, 7, 12, 17, 22]))
        );
        assert_eq!(
            lines[10],
            (LineKind::MainDiagonal, Line::new([1, 7, 13, 19, 25]))
        );
        assert_eq!(
            lines[11],
            (LineKind::AntiDiagonal, Line::new([5, 9, 13, 17, 21]))
        );
        assert_eq!(LineKind::Column(1).to_string(), "column 2");
    }

    #[test]
    fn transposed_card_shares_every_line() {
        let card = ordered();
        let transposed = card.transposed();
        assert!(cards_share_line(&card, &transposed));
        assert_eq!(
            LineSet::of(&card).shared_with(&LineSet::of(&transposed)).len(),
            12
        );
    }

    #[test]
    fn reordered_values_still_count_as_shared() {
        let card = ordered();
        let other = disjoint_from_ordered();
        assert!(!cards_share_line(&card, &other));

        // Column 1 of `other` rearranged so it holds the values of `card`'s main diagonal.
        let mut rows = *other.rows();
        let wanted = [25u8, 13, 1, 19, 7];
        for (row, &value) in wanted.iter().enumerate() {
            let (r, c) = position(&rows, value);
            let displaced = rows[row][0];
            rows[row][0] = value;
            rows[r][c] = displaced;
        }
        let rearranged = Card::from_rows(rows).unwrap();

        assert!(cards_share_line(&card, &rearranged));
        assert!(
            LineSet::of(&card)
                .shared_with(&LineSet::of(&rearranged))
                .contains(&Line::new([1, 7, 13, 19, 25]))
        );
    }

    fn position(rows: &[[u8; GRID]; GRID], value: u8) -> (usize, usize) {
        for (r, row) in rows.iter().enumerate() {
            if let Some(c) = row.iter().position(|v| *v == value) {
                return (r, c);
            }
        }
        panic!("value {} not on card", value);
    }

    proptest! {
        #[test]
        fn canonical_form_ignores_permutation(
            values in Just((1u8..=25).collect::<Vec<u8>>()).prop_shuffle(),
            order in Just((0usize..5).collect::<Vec<usize>>()).prop_shuffle(),
        ) {
            let picked: [u8; GRID] = std::array::from_fn(|i| values[i]);
            let permuted: [u8; GRID] = std::array::from_fn(|i| picked[order[i]]);
            prop_assert_eq!(Line::new(picked), Line::new(permuted));
        }

        #[test]
        fn random_cards_always_have_twelve_lines(seed in any::<u64>()) {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let card = Card::random(&mut rng);
            prop_assert_eq!(LineSet::of(&card).len(), LINES_PER_CARD);
        }
    }
}
