//! Inline exercise state machines.
//!
//! Each exercise is a pure state struct driven by key events from the
//! app loop; rendering reads the state and never mutates it.

mod matching;
mod sequence;
mod true_false;

pub use matching::Matching;
pub use sequence::Sequence;
pub use true_false::TrueFalse;

use rand::Rng;

use crate::models::ExerciseSpec;

/// Runtime state for one exercise slot of a section.
pub enum Exercise {
    TrueFalse(TrueFalse),
    Matching(Matching),
    Sequence(Sequence),
}

impl Exercise {
    /// Instantiate runtime state from an authored exercise definition.
    pub fn from_spec<R: Rng + ?Sized>(spec: &ExerciseSpec, rng: &mut R) -> Self {
        match spec {
            ExerciseSpec::TrueFalse { statements } => {
                Exercise::TrueFalse(TrueFalse::new(statements.clone()))
            }
            ExerciseSpec::Matching { pairs } => Exercise::Matching(Matching::new(pairs.clone(), rng)),
            ExerciseSpec::Sequence { steps } => Exercise::Sequence(Sequence::new(steps.clone(), rng)),
        }
    }

    pub fn kind_label(&self) -> &'static str {
        match self {
            Exercise::TrueFalse(_) => "true/false",
            Exercise::Matching(_) => "matching",
            Exercise::Sequence(_) => "sequence",
        }
    }

    pub fn is_checked(&self) -> bool {
        match self {
            Exercise::TrueFalse(e) => e.is_checked(),
            Exercise::Matching(e) => e.is_checked(),
            Exercise::Sequence(e) => e.is_checked(),
        }
    }

    /// `(correct, total)` once checked.
    pub fn score(&self) -> Option<(usize, usize)> {
        match self {
            Exercise::TrueFalse(e) => e.score(),
            Exercise::Matching(e) => e.score(),
            Exercise::Sequence(e) => e.score(),
        }
    }

    /// Return the exercise to a pristine, reshuffled state.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        match self {
            Exercise::TrueFalse(e) => e.reset(),
            Exercise::Matching(e) => e.reset(rng),
            Exercise::Sequence(e) => e.reset(rng),
        }
    }
}
