mod drill;
mod exercise;
mod reading;
mod summary;
mod welcome;

use ratatui::{prelude::*, widgets::Block};

use crate::app::{App, View};

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match app.view {
        View::Welcome => welcome::render(frame, area, app),
        View::Reading { section } => reading::render(frame, area, app, section),
        View::Exercise { section, slot } => exercise::render(frame, area, app, section, slot),
        View::Drill => drill::render(frame, area, app),
        View::Summary => summary::render(frame, area, app),
    }
}
