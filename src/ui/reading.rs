use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::app::App;

pub fn render(frame: &mut Frame, area: Rect, app: &App, section: usize) {
    let chunks = Layout::vertical([
        Constraint::Length(2),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    render_header(frame, chunks[0], app, section);
    render_body(frame, chunks[1], app, section);
    render_controls(frame, chunks[2], app, section);
}

fn render_header(frame: &mut Frame, area: Rect, app: &App, section: usize) {
    let title = &app.section(section).title;
    let progress = format!("{}/{}", section + 1, app.section_count());

    let line = Line::from(vec![
        Span::styled(title.as_str(), Style::default().fg(Color::Cyan).bold()),
        Span::raw("  "),
        Span::styled(progress, Style::default().fg(Color::DarkGray)),
    ]);

    let widget = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_body(frame: &mut Frame, area: Rect, app: &App, section: usize) {
    let widget = Paragraph::new(app.section(section).body.as_str())
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .scroll((app.scroll, 0))
        .block(Block::default().padding(Padding::horizontal(1)));
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, app: &App, section: usize) {
    let exercises = app.exercise_count(section);
    let exercise_key = if exercises > 0 {
        format!("e exercises ({})  ·  ", exercises)
    } else {
        String::new()
    };

    let controls = format!(
        "j/k scroll  ·  tab section  ·  {}d drill  ·  s summary  ·  q quit",
        exercise_key
    );
    let widget = Paragraph::new(controls)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
