//! Step ordering exercise.

use rand::Rng;

use super::matching::shuffled_order;

/// Restore a shuffled list of steps to its authored order.
///
/// The cursor moves freely over the rows; grabbing a row makes the
/// up/down keys carry it along instead, the keyboard rendition of
/// dragging an item through the list.
pub struct Sequence {
    /// Steps in their authored (correct) order.
    steps: Vec<String>,
    /// Display row -> step index.
    order: Vec<usize>,
    cursor: usize,
    grabbed: bool,
    checked: bool,
}

impl Sequence {
    pub fn new<R: Rng + ?Sized>(steps: Vec<String>, rng: &mut R) -> Self {
        let count = steps.len();
        Self {
            steps,
            order: shuffled_order(count, rng),
            cursor: 0,
            grabbed: false,
            checked: false,
        }
    }

    /// Step texts in current display order.
    pub fn rows(&self) -> Vec<&str> {
        self.order
            .iter()
            .map(|step| self.steps[*step].as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_grabbed(&self) -> bool {
        self.grabbed
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    /// Pick up or put down the row under the cursor.
    pub fn toggle_grab(&mut self) {
        if !self.checked {
            self.grabbed = !self.grabbed;
        }
    }

    /// Move the cursor down, carrying the grabbed row with it.
    pub fn move_down(&mut self) {
        if self.grabbed {
            if self.cursor + 1 < self.order.len() {
                self.order.swap(self.cursor, self.cursor + 1);
                self.cursor += 1;
            }
        } else {
            self.cursor = (self.cursor + 1) % self.order.len();
        }
    }

    /// Move the cursor up, carrying the grabbed row with it.
    pub fn move_up(&mut self) {
        if self.grabbed {
            if self.cursor > 0 {
                self.order.swap(self.cursor, self.cursor - 1);
                self.cursor -= 1;
            }
        } else {
            self.cursor = (self.cursor + self.order.len() - 1) % self.order.len();
        }
    }

    /// Grade the current order.
    pub fn check(&mut self) -> bool {
        self.grabbed = false;
        self.checked = true;
        true
    }

    /// Per-row verdicts, available after check.
    pub fn verdicts(&self) -> Vec<bool> {
        self.order
            .iter()
            .enumerate()
            .map(|(row, step)| row == *step)
            .collect()
    }

    pub fn score(&self) -> Option<(usize, usize)> {
        if !self.checked {
            return None;
        }
        let correct = self.verdicts().iter().filter(|v| **v).count();
        Some((correct, self.steps.len()))
    }

    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.order = shuffled_order(self.steps.len(), rng);
        self.cursor = 0;
        self.grabbed = false;
        self.checked = false;
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn steps() -> Vec<String> {
        ["declare", "borrow", "mutate", "drop"]
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Selection-sort the rows into their correct order via grab moves.
    fn solve(exercise: &mut Sequence) {
        for target in 0..exercise.len() {
            let row = exercise
                .rows()
                .iter()
                .position(|text| *text == steps()[target])
                .unwrap();
            while exercise.cursor() != row {
                if exercise.cursor() < row {
                    exercise.move_down();
                } else {
                    exercise.move_up();
                }
            }
            exercise.toggle_grab();
            while exercise.cursor() > target {
                exercise.move_up();
            }
            exercise.toggle_grab();
        }
    }

    #[test]
    fn test_starts_shuffled() {
        let mut rng = StdRng::seed_from_u64(5);
        let exercise = Sequence::new(steps(), &mut rng);
        let rows: Vec<String> = exercise.rows().iter().map(|s| s.to_string()).collect();
        assert_ne!(rows, steps(), "presentation must not start solved");
    }

    #[test]
    fn test_grabbed_row_travels_with_cursor() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut exercise = Sequence::new(steps(), &mut rng);
        let first = exercise.rows()[0].to_string();

        exercise.toggle_grab();
        exercise.move_down();
        assert_eq!(exercise.cursor(), 1);
        assert_eq!(exercise.rows()[1], first);
    }

    #[test]
    fn test_grabbed_row_stops_at_edges() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut exercise = Sequence::new(steps(), &mut rng);

        exercise.toggle_grab();
        exercise.move_up();
        assert_eq!(exercise.cursor(), 0);

        for _ in 0..10 {
            exercise.move_down();
        }
        assert_eq!(exercise.cursor(), exercise.len() - 1);
    }

    #[test]
    fn test_free_cursor_wraps() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut exercise = Sequence::new(steps(), &mut rng);

        exercise.move_up();
        assert_eq!(exercise.cursor(), exercise.len() - 1);
        exercise.move_down();
        assert_eq!(exercise.cursor(), 0);
    }

    #[test]
    fn test_solved_order_scores_full() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut exercise = Sequence::new(steps(), &mut rng);

        solve(&mut exercise);
        exercise.check();
        assert_eq!(exercise.score(), Some((4, 4)));
        assert_eq!(exercise.verdicts(), vec![true; 4]);
    }

    #[test]
    fn test_partial_order_scores_partially() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut exercise = Sequence::new(steps(), &mut rng);

        exercise.check();
        let (correct, total) = exercise.score().unwrap();
        assert_eq!(total, 4);
        assert!(correct < 4, "shuffled start must not be fully correct");
    }

    #[test]
    fn test_reset_reshuffles_and_unchecks() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut exercise = Sequence::new(steps(), &mut rng);

        solve(&mut exercise);
        exercise.check();

        exercise.reset(&mut rng);
        assert!(!exercise.is_checked());
        assert_eq!(exercise.score(), None);
    }
}
