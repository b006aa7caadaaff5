//! Question generator seam.

use futures_util::future::BoxFuture;

use crate::models::Question;

/// Error producing a question.
#[derive(Debug)]
pub enum GenerateError {
    /// The lesson yielded no theory segments to generate from.
    EmptyPool,
    /// The generator could not produce a question from the segment.
    Failed(String),
}

impl std::fmt::Display for GenerateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerateError::EmptyPool => {
                write!(f, "lesson has no theory segments to generate questions from")
            }
            GenerateError::Failed(reason) => write!(f, "question generation failed: {}", reason),
        }
    }
}

impl std::error::Error for GenerateError {}

/// Produces one multiple-choice question from a theory segment.
///
/// Implementations run asynchronously so the flow can generate in the
/// background while the learner works on the current question. The
/// `source_segment` tag on the returned question is overwritten by the
/// flow; generators do not need to set it.
pub trait QuestionGenerator: Send + Sync {
    fn generate<'a>(&'a self, segment: &'a str) -> BoxFuture<'a, Result<Question, GenerateError>>;
}
