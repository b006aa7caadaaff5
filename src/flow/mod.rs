//! Drill question flow.
//!
//! Wraps a question generator with segment rotation and a one-ahead
//! prefetch cache, so the next question is usually ready by the time the
//! learner asks for it.

mod cloze;
mod generator;
mod pipeline;

pub use cloze::ClozeGenerator;
pub use generator::{GenerateError, QuestionGenerator};
pub use pipeline::QuestionFlow;
