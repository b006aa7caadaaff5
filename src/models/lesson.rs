//! Lesson content model.
//!
//! A lesson is a sequence of sections, each carrying theory text and an
//! optional set of inline exercises. Lessons are authored as JSON.

use serde::Deserialize;

/// Paragraphs shorter than this are skipped during segmentation; they are
/// usually headings or transitions with too little substance to quiz on.
const MIN_SEGMENT_CHARS: usize = 40;

/// A complete lesson loaded from JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct Lesson {
    pub title: String,
    pub sections: Vec<Section>,
}

/// One section of a lesson: a titled block of theory text plus exercises.
#[derive(Debug, Clone, Deserialize)]
pub struct Section {
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub exercises: Vec<ExerciseSpec>,
}

/// Authored definition of an inline exercise.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ExerciseSpec {
    /// Mark each statement as true or false.
    TrueFalse { statements: Vec<TrueFalseStatement> },

    /// Match items in the left column with their counterparts on the right.
    Matching { pairs: Vec<MatchPair> },

    /// Restore a shuffled list of steps to its correct order.
    Sequence { steps: Vec<String> },
}

/// A single statement with its expected answer.
#[derive(Debug, Clone, Deserialize)]
pub struct TrueFalseStatement {
    pub text: String,
    pub answer: bool,
}

/// One left/right pair of a matching exercise.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchPair {
    pub left: String,
    pub right: String,
}

impl Lesson {
    /// Split all section bodies into theory segments.
    ///
    /// Segments are blank-line delimited paragraphs across the whole
    /// lesson; each one is the source text for a single generated drill
    /// question. The drill scheduler only ever sees the segment count.
    pub fn theory_segments(&self) -> Vec<String> {
        self.sections
            .iter()
            .flat_map(|section| section.body.split("\n\n"))
            .map(str::trim)
            .filter(|paragraph| paragraph.chars().count() >= MIN_SEGMENT_CHARS)
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lesson_with_body(body: &str) -> Lesson {
        Lesson {
            title: "t".to_string(),
            sections: vec![Section {
                title: "s".to_string(),
                body: body.to_string(),
                exercises: Vec::new(),
            }],
        }
    }

    #[test]
    fn test_theory_segments_split_on_blank_lines() {
        let body = format!("{}\n\n{}", "a".repeat(50), "b".repeat(50));
        let segments = lesson_with_body(&body).theory_segments();
        assert_eq!(segments.len(), 2);
        assert!(segments[0].starts_with('a'));
        assert!(segments[1].starts_with('b'));
    }

    #[test]
    fn test_theory_segments_drop_short_fragments() {
        let body = format!("heading\n\n{}", "x".repeat(80));
        let segments = lesson_with_body(&body).theory_segments();
        assert_eq!(segments.len(), 1);
    }

    #[test]
    fn test_exercise_spec_deserializes_tagged() {
        let json = r#"{
            "type": "matching",
            "pairs": [
                { "left": "ownership", "right": "one owner per value" },
                { "left": "borrow", "right": "temporary access" }
            ]
        }"#;
        let spec: ExerciseSpec = serde_json::from_str(json).unwrap();
        assert!(matches!(spec, ExerciseSpec::Matching { ref pairs } if pairs.len() == 2));
    }
}
