//! # studyhall
//!
//! A terminal e-learning app: lessons authored as JSON, read section by
//! section, with inline exercises and an endless generated-question
//! drill.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use studyhall::{Study, StudyError, StudyOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), StudyError> {
//!     // Load a lesson from a JSON file
//!     let study = Study::from_json("lessons/ownership.json", StudyOptions::default())?;
//!
//!     // Run the app in the terminal
//!     study.run().await?;
//!
//!     Ok(())
//! }
//! ```

mod app;
pub mod data;
pub mod exercise;
pub mod flow;
pub mod models;
pub mod scheduler;
pub mod terminal;
mod ui;

use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};

pub use app::{App, DrillState, View};
pub use data::{LoadError, load_lesson_from_json};
use flow::{ClozeGenerator, QuestionFlow, QuestionGenerator};
use models::Lesson;
use terminal::AppTerminal;

/// Error type for study sessions.
#[derive(Debug)]
pub enum StudyError {
    /// Error loading the lesson file.
    Load(LoadError),
    /// IO error during app execution.
    Io(io::Error),
}

impl std::fmt::Display for StudyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StudyError::Load(e) => write!(f, "Failed to load lesson: {}", e),
            StudyError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for StudyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StudyError::Load(e) => Some(e),
            StudyError::Io(e) => Some(e),
        }
    }
}

impl From<LoadError> for StudyError {
    fn from(err: LoadError) -> Self {
        StudyError::Load(err)
    }
}

impl From<io::Error> for StudyError {
    fn from(err: io::Error) -> Self {
        StudyError::Io(err)
    }
}

/// Session configuration.
#[derive(Debug, Clone)]
pub struct StudyOptions {
    /// Questions per drill round; 0 means endless.
    pub drill_length: usize,
    /// Seed for shuffles and segment selection. Random when `None`.
    pub seed: Option<u64>,
}

impl Default for StudyOptions {
    fn default() -> Self {
        Self {
            drill_length: 10,
            seed: None,
        }
    }
}

/// What a key press asks the event loop to do beyond mutating state.
enum Action {
    None,
    RequestQuestion,
}

/// A study session that can be run in the terminal.
pub struct Study {
    app: App,
    flow: QuestionFlow,
}

impl Study {
    /// Create a session over an already-loaded lesson.
    pub fn new(lesson: Lesson, options: StudyOptions) -> Self {
        let segments = lesson.theory_segments();

        let generator: Arc<dyn QuestionGenerator> = match options.seed {
            Some(seed) => Arc::new(ClozeGenerator::with_seed(&segments, seed.wrapping_add(1))),
            None => Arc::new(ClozeGenerator::new(&segments)),
        };
        let flow = match options.seed {
            Some(seed) => QuestionFlow::with_seed(segments, generator, seed),
            None => QuestionFlow::new(segments, generator),
        };

        let app = App::new(lesson, options.drill_length, options.seed);
        Self { app, flow }
    }

    /// Load a session from a lesson JSON file.
    pub fn from_json<P: AsRef<Path>>(path: P, options: StudyOptions) -> Result<Self, StudyError> {
        let lesson = load_lesson_from_json(path)?;
        Ok(Self::new(lesson, options))
    }

    /// Run the app in the terminal.
    ///
    /// This will take over the terminal, display the study UI, and return
    /// when the user quits.
    pub async fn run(mut self) -> Result<(), StudyError> {
        let mut term = terminal::init()?;
        let result = self.event_loop(&mut term).await;
        terminal::restore()?;
        result
    }

    /// Get a reference to the underlying app for custom handling.
    pub fn app(&self) -> &App {
        &self.app
    }

    async fn event_loop(&mut self, terminal: &mut AppTerminal) -> Result<(), StudyError> {
        loop {
            terminal.draw(|frame| ui::render(frame, &self.app))?;

            if self.app.should_quit {
                break;
            }

            if !event::poll(Duration::from_millis(50))? {
                continue;
            }
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }

            if let Action::RequestQuestion = self.handle_input(key.code) {
                // Draw the generating indicator before the synchronous
                // path blocks on the generator.
                self.app.begin_generation();
                terminal.draw(|frame| ui::render(frame, &self.app))?;

                match self.flow.request_next().await {
                    Ok(question) => self.app.set_question(question),
                    Err(error) => self.app.set_drill_error(error.to_string()),
                }
            }
        }

        Ok(())
    }

    fn handle_input(&mut self, key: KeyCode) -> Action {
        match self.app.view {
            View::Welcome => self.handle_welcome_input(key),
            View::Reading { section } => self.handle_reading_input(key, section),
            View::Exercise { section, slot } => self.handle_exercise_input(key, section, slot),
            View::Drill => self.handle_drill_input(key),
            View::Summary => self.handle_summary_input(key),
        }
    }

    fn handle_welcome_input(&mut self, key: KeyCode) -> Action {
        match key {
            KeyCode::Enter => {
                self.app.open_reading(0);
                Action::None
            }
            KeyCode::Char('d') | KeyCode::Char('D') => self.enter_drill(),
            KeyCode::Char('q') | KeyCode::Char('Q') => self.quit(),
            _ => Action::None,
        }
    }

    fn handle_reading_input(&mut self, key: KeyCode, section: usize) -> Action {
        match key {
            KeyCode::Down | KeyCode::Char('j') => self.app.scroll_down(),
            KeyCode::Up | KeyCode::Char('k') => self.app.scroll_up(),
            KeyCode::Tab | KeyCode::Char('n') => self.app.next_section(),
            KeyCode::BackTab | KeyCode::Char('p') => self.app.previous_section(),
            KeyCode::Char('e') => self.app.open_exercise(section, 0),
            KeyCode::Char('d') => return self.enter_drill(),
            KeyCode::Char('s') => self.app.open_summary(),
            KeyCode::Char('q') | KeyCode::Char('Q') => return self.quit(),
            _ => {}
        }
        Action::None
    }

    fn handle_exercise_input(&mut self, key: KeyCode, section: usize, slot: usize) -> Action {
        use crate::exercise::Exercise;

        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') => return self.quit(),
            KeyCode::Char('n') => {
                self.app.next_exercise();
                return Action::None;
            }
            KeyCode::Char('r') => {
                self.app.reset_exercise(section, slot);
                return Action::None;
            }
            KeyCode::Esc => {
                // A picked-up matching row is put down first; a second
                // escape leaves the exercise.
                if let Exercise::Matching(state) = self.app.exercise_mut(section, slot) {
                    if state.focus_right() {
                        state.cancel();
                        return Action::None;
                    }
                }
                self.app.open_reading(section);
                return Action::None;
            }
            _ => {}
        }

        match self.app.exercise_mut(section, slot) {
            Exercise::TrueFalse(state) => match key {
                KeyCode::Down | KeyCode::Char('j') => state.move_down(),
                KeyCode::Up | KeyCode::Char('k') => state.move_up(),
                KeyCode::Char('t') => state.mark(true),
                KeyCode::Char('f') => state.mark(false),
                KeyCode::Enter => {
                    state.check();
                }
                _ => {}
            },
            Exercise::Matching(state) => match key {
                KeyCode::Down | KeyCode::Char('j') => state.move_down(),
                KeyCode::Up | KeyCode::Char('k') => state.move_up(),
                KeyCode::Enter | KeyCode::Char(' ') => state.select(),
                KeyCode::Backspace => state.unmatch(),
                KeyCode::Char('c') => {
                    state.check();
                }
                _ => {}
            },
            Exercise::Sequence(state) => match key {
                KeyCode::Down | KeyCode::Char('j') => state.move_down(),
                KeyCode::Up | KeyCode::Char('k') => state.move_up(),
                KeyCode::Char(' ') => state.toggle_grab(),
                KeyCode::Enter => {
                    state.check();
                }
                _ => {}
            },
        }

        Action::None
    }

    fn handle_drill_input(&mut self, key: KeyCode) -> Action {
        if self.app.drill.generating {
            return Action::None;
        }

        match key {
            KeyCode::Down | KeyCode::Char('j') => self.app.select_next_option(),
            KeyCode::Up | KeyCode::Char('k') => self.app.select_previous_option(),
            KeyCode::Enter | KeyCode::Char(' ') => {
                if self.app.drill.current.is_none() {
                    // Covers the fresh drill and the retry-after-failure
                    // case alike.
                    return Action::RequestQuestion;
                }
                if !self.app.drill.revealed {
                    self.app.reveal_answer();
                } else if self.app.drill.round_complete() {
                    self.app.open_summary();
                } else {
                    return Action::RequestQuestion;
                }
            }
            KeyCode::Char('s') => self.app.open_summary(),
            KeyCode::Char('q') | KeyCode::Char('Q') => return self.quit(),
            _ => {}
        }
        Action::None
    }

    fn handle_summary_input(&mut self, key: KeyCode) -> Action {
        match key {
            KeyCode::Char('r') | KeyCode::Char('R') => self.app.restart(),
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return self.quit(),
            _ => {}
        }
        Action::None
    }

    fn enter_drill(&mut self) -> Action {
        self.app.open_drill();
        if self.app.drill.current.is_none() && self.app.drill.error.is_none() {
            Action::RequestQuestion
        } else {
            Action::None
        }
    }

    fn quit(&mut self) -> Action {
        self.app.should_quit = true;
        Action::None
    }
}
