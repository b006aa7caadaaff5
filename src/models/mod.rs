//! Data models for lesson content and generated questions.

mod lesson;
mod question;

pub use lesson::{ExerciseSpec, Lesson, MatchPair, Section, TrueFalseStatement};
pub use question::Question;
