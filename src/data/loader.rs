//! JSON lesson loader.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::models::{ExerciseSpec, Lesson};

/// Error loading a lesson from disk.
#[derive(Debug)]
pub enum LoadError {
    /// Reading the file failed.
    Io { path: PathBuf, source: io::Error },
    /// The file is not valid lesson JSON.
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// The lesson parsed but has no sections.
    EmptyLesson(PathBuf),
    /// An exercise definition is too small to be playable.
    InvalidExercise { section: String, reason: String },
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Io { path, source } => {
                write!(f, "failed to read {}: {}", path.display(), source)
            }
            LoadError::Parse { path, source } => {
                write!(f, "failed to parse {}: {}", path.display(), source)
            }
            LoadError::EmptyLesson(path) => {
                write!(f, "{} must contain at least one section", path.display())
            }
            LoadError::InvalidExercise { section, reason } => {
                write!(f, "invalid exercise in section '{}': {}", section, reason)
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io { source, .. } => Some(source),
            LoadError::Parse { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Load and validate a lesson from a JSON file.
pub fn load_lesson_from_json<P: AsRef<Path>>(path: P) -> Result<Lesson, LoadError> {
    let path = path.as_ref();

    let json_content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let lesson: Lesson = serde_json::from_str(&json_content).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    if lesson.sections.is_empty() {
        return Err(LoadError::EmptyLesson(path.to_path_buf()));
    }

    validate_exercises(&lesson)?;

    Ok(lesson)
}

fn validate_exercises(lesson: &Lesson) -> Result<(), LoadError> {
    for section in &lesson.sections {
        for exercise in &section.exercises {
            let reason = match exercise {
                ExerciseSpec::TrueFalse { statements } if statements.is_empty() => {
                    Some("true/false exercise has no statements".to_string())
                }
                ExerciseSpec::Matching { pairs } if pairs.len() < 2 => {
                    Some("matching exercise needs at least two pairs".to_string())
                }
                ExerciseSpec::Matching { pairs } if pairs.len() > 8 => {
                    Some("matching exercise is limited to eight pairs".to_string())
                }
                ExerciseSpec::Sequence { steps } if steps.len() < 2 => {
                    Some("sequence exercise needs at least two steps".to_string())
                }
                _ => None,
            };

            if let Some(reason) = reason {
                return Err(LoadError::InvalidExercise {
                    section: section.title.clone(),
                    reason,
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<Lesson, LoadError> {
        let lesson: Lesson = serde_json::from_str(json).map_err(|source| LoadError::Parse {
            path: PathBuf::from("inline"),
            source,
        })?;
        if lesson.sections.is_empty() {
            return Err(LoadError::EmptyLesson(PathBuf::from("inline")));
        }
        validate_exercises(&lesson)?;
        Ok(lesson)
    }

    #[test]
    fn test_valid_lesson_parses() {
        let json = r#"{
            "title": "Ownership",
            "sections": [
                {
                    "title": "Moves",
                    "body": "Assignment transfers ownership of heap values.",
                    "exercises": [
                        {
                            "type": "true_false",
                            "statements": [
                                { "text": "Copy types are moved", "answer": false }
                            ]
                        }
                    ]
                }
            ]
        }"#;
        let lesson = parse(json).unwrap();
        assert_eq!(lesson.sections.len(), 1);
        assert_eq!(lesson.sections[0].exercises.len(), 1);
    }

    #[test]
    fn test_empty_lesson_rejected() {
        let json = r#"{ "title": "Empty", "sections": [] }"#;
        assert!(matches!(parse(json), Err(LoadError::EmptyLesson(_))));
    }

    #[test]
    fn test_underfilled_matching_rejected() {
        let json = r#"{
            "title": "Ownership",
            "sections": [
                {
                    "title": "Moves",
                    "body": "x",
                    "exercises": [
                        {
                            "type": "matching",
                            "pairs": [ { "left": "a", "right": "b" } ]
                        }
                    ]
                }
            ]
        }"#;
        assert!(matches!(
            parse(json),
            Err(LoadError::InvalidExercise { .. })
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = load_lesson_from_json("definitely/not/here.json");
        assert!(matches!(result, Err(LoadError::Io { .. })));
    }
}
