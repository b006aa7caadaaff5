//! Generated drill question model.

/// A generated multiple-choice question.
#[derive(Debug, Clone)]
pub struct Question {
    /// Question text shown to the learner.
    pub prompt: String,
    /// The four answer options, in display order.
    pub options: [String; 4],
    /// Index of the correct option.
    pub correct_answer: usize,
    /// Which theory segment this question was generated from. Tagged by
    /// the question flow so usage can be recorded at consumption time.
    pub source_segment: usize,
}
