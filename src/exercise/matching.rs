//! Column matching exercise.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::models::MatchPair;

/// Pair items in the left column with their shuffled counterparts on the
/// right.
///
/// Selection is a two-step gesture: confirm a left row to pick it up,
/// then confirm a right row to drop the connection. This is the keyboard
/// rendition of drag-and-drop matching.
pub struct Matching {
    pairs: Vec<MatchPair>,
    /// Display row on the right -> index of the pair whose right text
    /// shows there.
    right_order: Vec<usize>,
    cursor: usize,
    /// Left row picked up and awaiting a right-side drop.
    pending_left: Option<usize>,
    /// Left row -> chosen right display row.
    matches: Vec<Option<usize>>,
    checked: bool,
}

impl Matching {
    pub fn new<R: Rng + ?Sized>(pairs: Vec<MatchPair>, rng: &mut R) -> Self {
        let count = pairs.len();
        Self {
            pairs,
            right_order: shuffled_order(count, rng),
            cursor: 0,
            pending_left: None,
            matches: vec![None; count],
            checked: false,
        }
    }

    pub fn pairs(&self) -> &[MatchPair] {
        &self.pairs
    }

    /// Right-column texts in display order.
    pub fn right_rows(&self) -> Vec<&str> {
        self.right_order
            .iter()
            .map(|pair| self.pairs[*pair].right.as_str())
            .collect()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether the cursor is currently on the right column.
    pub fn focus_right(&self) -> bool {
        self.pending_left.is_some()
    }

    pub fn pending_left(&self) -> Option<usize> {
        self.pending_left
    }

    pub fn matches(&self) -> &[Option<usize>] {
        &self.matches
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    pub fn move_down(&mut self) {
        self.cursor = (self.cursor + 1) % self.pairs.len();
    }

    pub fn move_up(&mut self) {
        self.cursor = (self.cursor + self.pairs.len() - 1) % self.pairs.len();
    }

    /// Confirm the row under the cursor: pick up a left row, or drop the
    /// pending connection onto a free right row.
    pub fn select(&mut self) {
        if self.checked {
            return;
        }
        match self.pending_left {
            None => {
                self.matches[self.cursor] = None;
                self.pending_left = Some(self.cursor);
            }
            Some(left) => {
                if !self.right_row_taken(self.cursor) {
                    self.matches[left] = Some(self.cursor);
                    self.pending_left = None;
                    self.cursor = left;
                }
            }
        }
    }

    /// Put a picked-up left row back down without connecting it.
    pub fn cancel(&mut self) {
        if let Some(left) = self.pending_left.take() {
            self.cursor = left;
        }
    }

    /// Clear the connection of the left row under the cursor.
    pub fn unmatch(&mut self) {
        if self.checked || self.pending_left.is_some() {
            return;
        }
        self.matches[self.cursor] = None;
    }

    fn right_row_taken(&self, row: usize) -> bool {
        self.matches.iter().any(|m| *m == Some(row))
    }

    pub fn all_matched(&self) -> bool {
        self.matches.iter().all(|m| m.is_some())
    }

    /// Grade the connections. Returns false while rows are unmatched.
    pub fn check(&mut self) -> bool {
        if !self.all_matched() {
            return false;
        }
        self.checked = true;
        true
    }

    /// Per-left-row verdicts, available after check.
    pub fn verdicts(&self) -> Vec<bool> {
        self.matches
            .iter()
            .enumerate()
            .map(|(left, chosen)| {
                chosen.is_some_and(|row| self.right_order[row] == left)
            })
            .collect()
    }

    pub fn score(&self) -> Option<(usize, usize)> {
        if !self.checked {
            return None;
        }
        let correct = self.verdicts().iter().filter(|v| **v).count();
        Some((correct, self.pairs.len()))
    }

    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.right_order = shuffled_order(self.pairs.len(), rng);
        self.cursor = 0;
        self.pending_left = None;
        self.matches = vec![None; self.pairs.len()];
        self.checked = false;
    }
}

/// A permutation of `0..count`, reshuffled a few times if it comes out as
/// the identity (which would present the columns pre-aligned).
pub(super) fn shuffled_order<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<usize> {
    let mut order: Vec<usize> = (0..count).collect();
    if count < 2 {
        return order;
    }
    for _ in 0..8 {
        order.shuffle(rng);
        if order.iter().enumerate().any(|(i, v)| i != *v) {
            break;
        }
    }
    order
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn pairs() -> Vec<MatchPair> {
        [
            ("move", "ownership transfer"),
            ("borrow", "temporary access"),
            ("clone", "explicit deep copy"),
        ]
        .into_iter()
        .map(|(left, right)| MatchPair {
            left: left.to_string(),
            right: right.to_string(),
        })
        .collect()
    }

    /// Connect left row `left` with whichever right row shows its
    /// counterpart.
    fn match_correctly(exercise: &mut Matching, left: usize) {
        while exercise.cursor() != left {
            exercise.move_down();
        }
        exercise.select();
        let target = exercise
            .right_rows()
            .iter()
            .position(|text| *text == exercise.pairs()[left].right)
            .unwrap();
        while exercise.cursor() != target {
            exercise.move_down();
        }
        exercise.select();
    }

    #[test]
    fn test_select_connects_left_to_right() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut exercise = Matching::new(pairs(), &mut rng);

        assert!(!exercise.focus_right());
        exercise.select();
        assert!(exercise.focus_right());
        assert_eq!(exercise.pending_left(), Some(0));

        exercise.select();
        assert!(!exercise.focus_right());
        assert_eq!(exercise.matches()[0], Some(0));
    }

    #[test]
    fn test_taken_right_row_is_refused() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut exercise = Matching::new(pairs(), &mut rng);

        exercise.select();
        exercise.select();

        exercise.move_down();
        exercise.select();
        // Right row 0 is taken by left row 0; the drop must not land.
        while exercise.cursor() != 0 {
            exercise.move_down();
        }
        exercise.select();
        assert!(exercise.focus_right());
        assert_eq!(exercise.matches()[1], None);
    }

    #[test]
    fn test_full_correct_matching_scores_full() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut exercise = Matching::new(pairs(), &mut rng);

        for left in 0..3 {
            match_correctly(&mut exercise, left);
        }

        assert!(exercise.all_matched());
        assert!(exercise.check());
        assert_eq!(exercise.score(), Some((3, 3)));
        assert_eq!(exercise.verdicts(), vec![true, true, true]);
    }

    #[test]
    fn test_check_requires_all_matches() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut exercise = Matching::new(pairs(), &mut rng);

        exercise.select();
        exercise.select();
        assert!(!exercise.check());
        assert_eq!(exercise.score(), None);
    }

    #[test]
    fn test_unmatch_frees_the_right_row() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut exercise = Matching::new(pairs(), &mut rng);

        exercise.select();
        exercise.select();
        assert_eq!(exercise.matches()[0], Some(0));

        exercise.unmatch();
        assert_eq!(exercise.matches()[0], None);
        assert!(!exercise.right_row_taken(0));
    }

    #[test]
    fn test_cancel_returns_to_left_column() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut exercise = Matching::new(pairs(), &mut rng);

        exercise.move_down();
        exercise.select();
        assert!(exercise.focus_right());

        exercise.cancel();
        assert!(!exercise.focus_right());
        assert_eq!(exercise.cursor(), 1);
    }

    #[test]
    fn test_shuffled_order_is_a_permutation() {
        let mut rng = StdRng::seed_from_u64(42);
        for count in 0..10 {
            let mut order = shuffled_order(count, &mut rng);
            order.sort_unstable();
            let expected: Vec<usize> = (0..count).collect();
            assert_eq!(order, expected);
        }
    }

    #[test]
    fn test_reset_clears_matches() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut exercise = Matching::new(pairs(), &mut rng);

        for left in 0..3 {
            match_correctly(&mut exercise, left);
        }
        exercise.check();

        exercise.reset(&mut rng);
        assert!(!exercise.is_checked());
        assert!(exercise.matches().iter().all(|m| m.is_none()));
    }
}
