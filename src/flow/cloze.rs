//! Built-in offline question source.
//!
//! Produces fill-in-the-blank questions directly from lesson text: the
//! most substantial word of a segment is blanked out and the options are
//! drawn from the rest of the lesson's vocabulary. This keeps the drill
//! usable without any remote generation endpoint; a remote generator
//! plugs in through the same [`QuestionGenerator`] trait.

use std::collections::BTreeSet;
use std::sync::Mutex;

use futures_util::future::BoxFuture;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::Question;

use super::generator::{GenerateError, QuestionGenerator};

/// Words shorter than this are not worth blanking or offering as options.
const MIN_WORD_CHARS: usize = 5;

const BLANK: &str = "_____";

/// Cloze-style generator over a lesson's vocabulary.
pub struct ClozeGenerator {
    vocabulary: Vec<String>,
    rng: Mutex<StdRng>,
}

impl ClozeGenerator {
    /// Build a generator whose distractor pool is the vocabulary of the
    /// given segments.
    pub fn new(segments: &[String]) -> Self {
        Self::with_rng(segments, StdRng::from_os_rng())
    }

    /// Build a generator with a deterministic option-selection seed.
    pub fn with_seed(segments: &[String], seed: u64) -> Self {
        Self::with_rng(segments, StdRng::seed_from_u64(seed))
    }

    fn with_rng(segments: &[String], rng: StdRng) -> Self {
        // BTreeSet gives a stable vocabulary order, so a fixed seed yields
        // the same options regardless of segment iteration order.
        let vocabulary: BTreeSet<String> = segments
            .iter()
            .flat_map(|segment| words_of(segment))
            .map(|word| word.to_lowercase())
            .collect();

        Self {
            vocabulary: vocabulary.into_iter().collect(),
            rng: Mutex::new(rng),
        }
    }

    fn build_question(&self, segment: &str) -> Result<Question, GenerateError> {
        let keyword = words_of(segment)
            .max_by_key(|word| word.chars().count())
            .ok_or_else(|| {
                GenerateError::Failed("segment has no word worth blanking".to_string())
            })?;

        let prompt = format!(
            "Fill in the blank:\n\n{}",
            segment.replacen(keyword, BLANK, 1)
        );
        let answer = keyword.to_lowercase();

        let candidates: Vec<&String> = self
            .vocabulary
            .iter()
            .filter(|word| **word != answer)
            .collect();
        if candidates.len() < 3 {
            return Err(GenerateError::Failed(
                "lesson vocabulary is too small for distractor options".to_string(),
            ));
        }

        let mut rng = self.rng.lock().unwrap();

        let mut distractors: BTreeSet<&String> = BTreeSet::new();
        while distractors.len() < 3 {
            distractors.insert(candidates[rng.random_range(0..candidates.len())]);
        }

        let correct_answer = rng.random_range(0..4);
        let mut distractors = distractors.into_iter();
        let mut options: [String; 4] = Default::default();
        for (slot, option) in options.iter_mut().enumerate() {
            if slot == correct_answer {
                *option = answer.clone();
            } else {
                *option = distractors.next().expect("three distractors").clone();
            }
        }

        Ok(Question {
            prompt,
            options,
            correct_answer,
            source_segment: 0,
        })
    }
}

impl QuestionGenerator for ClozeGenerator {
    fn generate<'a>(&'a self, segment: &'a str) -> BoxFuture<'a, Result<Question, GenerateError>> {
        Box::pin(async move { self.build_question(segment) })
    }
}

fn words_of(segment: &str) -> impl Iterator<Item = &str> {
    segment
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| word.chars().count() >= MIN_WORD_CHARS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_segments() -> Vec<String> {
        vec![
            "Ownership transfers responsibility for freeing memory to exactly one binding."
                .to_string(),
            "Borrowing grants temporary access without transferring ownership anywhere."
                .to_string(),
            "Lifetimes describe how long references remain valid inside functions.".to_string(),
        ]
    }

    #[tokio::test]
    async fn test_generates_blank_and_four_options() {
        let segments = sample_segments();
        let generator = ClozeGenerator::with_seed(&segments, 3);

        let question = generator.generate(&segments[0]).await.unwrap();
        assert!(question.prompt.contains(BLANK));
        assert!(question.correct_answer < 4);

        let mut options = question.options.to_vec();
        options.sort();
        options.dedup();
        assert_eq!(options.len(), 4, "options must be distinct");
    }

    #[tokio::test]
    async fn test_correct_option_is_the_blanked_word() {
        let segments = sample_segments();
        let generator = ClozeGenerator::with_seed(&segments, 9);

        let question = generator.generate(&segments[2]).await.unwrap();
        // Longest word of the segment, lowercased.
        assert_eq!(question.options[question.correct_answer], "references");
    }

    #[tokio::test]
    async fn test_tiny_vocabulary_fails_cleanly() {
        let segments = vec!["Ownership matters.".to_string()];
        let generator = ClozeGenerator::with_seed(&segments, 1);

        let result = generator.generate(&segments[0]).await;
        assert!(matches!(result, Err(GenerateError::Failed(_))));
    }

    #[tokio::test]
    async fn test_wordless_segment_fails_cleanly() {
        let segments = sample_segments();
        let generator = ClozeGenerator::with_seed(&segments, 1);

        let result = generator.generate("a b c").await;
        assert!(matches!(result, Err(GenerateError::Failed(_))));
    }
}
