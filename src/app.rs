//! Application state.

use rand::SeedableRng;
use rand::rngs::StdRng;
use uuid::Uuid;

use crate::exercise::Exercise;
use crate::models::{Lesson, Question, Section};

const NUM_OPTIONS: usize = 4;

/// Which screen is active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Welcome,
    Reading { section: usize },
    Exercise { section: usize, slot: usize },
    Drill,
    Summary,
}

/// State of the endless-question drill screen.
pub struct DrillState {
    pub current: Option<Question>,
    pub selected_option: usize,
    /// Whether the answer for the current question has been revealed.
    pub revealed: bool,
    pub answered: usize,
    pub correct: usize,
    /// Questions per round; 0 means endless.
    pub target: usize,
    /// User-visible generation failure, cleared on retry.
    pub error: Option<String>,
    /// A question is being generated on the synchronous path.
    pub generating: bool,
}

impl DrillState {
    fn new(target: usize) -> Self {
        Self {
            current: None,
            selected_option: 0,
            revealed: false,
            answered: 0,
            correct: 0,
            target,
            error: None,
            generating: false,
        }
    }

    pub fn round_complete(&self) -> bool {
        self.target > 0 && self.answered >= self.target
    }
}

pub struct App {
    pub lesson: Lesson,
    pub view: View,
    pub session_id: Uuid,
    pub drill: DrillState,
    pub should_quit: bool,
    /// Scroll offset of the reading view; reset on section change.
    pub scroll: u16,
    exercises: Vec<Vec<Exercise>>,
    rng: StdRng,
}

impl App {
    pub fn new(lesson: Lesson, drill_target: usize, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let exercises = lesson
            .sections
            .iter()
            .map(|section| {
                section
                    .exercises
                    .iter()
                    .map(|spec| Exercise::from_spec(spec, &mut rng))
                    .collect()
            })
            .collect();

        Self {
            lesson,
            view: View::Welcome,
            session_id: Uuid::new_v4(),
            drill: DrillState::new(drill_target),
            should_quit: false,
            scroll: 0,
            exercises,
            rng,
        }
    }

    pub fn section_count(&self) -> usize {
        self.lesson.sections.len()
    }

    pub fn section(&self, index: usize) -> &Section {
        &self.lesson.sections[index]
    }

    pub fn exercise(&self, section: usize, slot: usize) -> &Exercise {
        &self.exercises[section][slot]
    }

    pub fn exercise_mut(&mut self, section: usize, slot: usize) -> &mut Exercise {
        &mut self.exercises[section][slot]
    }

    pub fn exercise_count(&self, section: usize) -> usize {
        self.exercises[section].len()
    }

    /// Reshuffle and clear one exercise.
    pub fn reset_exercise(&mut self, section: usize, slot: usize) {
        let Self {
            exercises, rng, ..
        } = self;
        exercises[section][slot].reset(rng);
    }

    // View transitions.

    pub fn open_reading(&mut self, section: usize) {
        self.view = View::Reading { section };
        self.scroll = 0;
    }

    pub fn next_section(&mut self) {
        if let View::Reading { section } = self.view {
            self.open_reading((section + 1) % self.section_count());
        }
    }

    pub fn previous_section(&mut self) {
        if let View::Reading { section } = self.view {
            self.open_reading((section + self.section_count() - 1) % self.section_count());
        }
    }

    /// Enter an exercise slot of a section, if it exists.
    pub fn open_exercise(&mut self, section: usize, slot: usize) {
        if slot < self.exercise_count(section) {
            self.view = View::Exercise { section, slot };
        }
    }

    /// Advance to the next exercise of the section, or back to reading
    /// after the last one.
    pub fn next_exercise(&mut self) {
        if let View::Exercise { section, slot } = self.view {
            if slot + 1 < self.exercise_count(section) {
                self.view = View::Exercise {
                    section,
                    slot: slot + 1,
                };
            } else {
                self.open_reading(section);
            }
        }
    }

    pub fn open_drill(&mut self) {
        self.view = View::Drill;
    }

    pub fn open_summary(&mut self) {
        self.view = View::Summary;
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(1);
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    // Drill interaction.

    pub fn select_next_option(&mut self) {
        if self.drill.current.is_some() && !self.drill.revealed {
            self.drill.selected_option = (self.drill.selected_option + 1) % NUM_OPTIONS;
        }
    }

    pub fn select_previous_option(&mut self) {
        if self.drill.current.is_some() && !self.drill.revealed {
            self.drill.selected_option =
                (self.drill.selected_option + NUM_OPTIONS - 1) % NUM_OPTIONS;
        }
    }

    /// Mark the start of a synchronous generation request.
    pub fn begin_generation(&mut self) {
        self.drill.generating = true;
        self.drill.error = None;
    }

    pub fn set_question(&mut self, question: Question) {
        self.drill.current = Some(question);
        self.drill.selected_option = 0;
        self.drill.revealed = false;
        self.drill.generating = false;
    }

    pub fn set_drill_error(&mut self, message: String) {
        self.drill.current = None;
        self.drill.error = Some(message);
        self.drill.generating = false;
    }

    /// Reveal the answer for the current question and score the selection.
    pub fn reveal_answer(&mut self) {
        let Some(question) = &self.drill.current else {
            return;
        };
        if self.drill.revealed {
            return;
        }
        if self.drill.selected_option == question.correct_answer {
            self.drill.correct += 1;
        }
        self.drill.answered += 1;
        self.drill.revealed = true;
    }

    /// Restart the whole session: pristine exercises, zeroed drill stats.
    pub fn restart(&mut self) {
        for section in 0..self.exercises.len() {
            for slot in 0..self.exercises[section].len() {
                self.reset_exercise(section, slot);
            }
        }
        let target = self.drill.target;
        self.drill = DrillState::new(target);
        self.view = View::Welcome;
        self.scroll = 0;
    }

    /// Section title, exercise kind and score for every exercise slot,
    /// for the summary view.
    pub fn exercise_summaries(&self) -> Vec<(&str, &'static str, Option<(usize, usize)>)> {
        self.lesson
            .sections
            .iter()
            .zip(self.exercises.iter())
            .flat_map(|(section, exercises)| {
                exercises.iter().map(move |exercise| {
                    (
                        section.title.as_str(),
                        exercise.kind_label(),
                        exercise.score(),
                    )
                })
            })
            .collect()
    }
}
