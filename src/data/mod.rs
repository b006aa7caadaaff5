//! Lesson loading.

mod loader;

pub use loader::{LoadError, load_lesson_from_json};
