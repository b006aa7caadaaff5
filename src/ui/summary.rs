use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::app::App;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(6),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    render_drill_summary(frame, chunks[1], app);
    render_exercise_breakdown(frame, chunks[2], app);
    render_controls(frame, chunks[3], app);
}

fn render_drill_summary(frame: &mut Frame, area: Rect, app: &App) {
    let drill = &app.drill;
    let percentage = if drill.answered > 0 {
        (drill.correct as f64 / drill.answered as f64) * 100.0
    } else {
        0.0
    };
    let grade_color = get_grade_color(percentage);

    let drill_line = if drill.answered > 0 {
        Line::from(Span::styled(
            format!("Drill  {} / {}  ({:.0}%)", drill.correct, drill.answered, percentage),
            Style::default().fg(grade_color).bold(),
        ))
    } else {
        Line::from("Drill not attempted".fg(Color::DarkGray))
    };

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "SESSION SUMMARY",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        drill_line,
        Line::from(""),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn get_grade_color(percentage: f64) -> Color {
    match percentage as u32 {
        90..=100 => Color::Green,
        70..=89 => Color::Cyan,
        50..=69 => Color::Yellow,
        _ => Color::Red,
    }
}

fn render_exercise_breakdown(frame: &mut Frame, area: Rect, app: &App) {
    let lines: Vec<Line> = app
        .exercise_summaries()
        .iter()
        .map(|(section, kind, score)| {
            let (symbol, color, detail) = match score {
                Some((correct, total)) if correct == total => {
                    ("+", Color::Green, format!("{}/{}", correct, total))
                }
                Some((correct, total)) => ("-", Color::Yellow, format!("{}/{}", correct, total)),
                None => ("·", Color::DarkGray, "not done".to_string()),
            };

            Line::from(vec![
                Span::styled(format!(" {} ", symbol), Style::default().fg(color)),
                Span::styled(format!("{:12}", kind), Style::default().fg(Color::Gray)),
                Span::styled(format!("{:8}", detail), Style::default().fg(color)),
                Span::styled(section.to_string(), Style::default().fg(Color::DarkGray)),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines).block(Block::default().padding(Padding::horizontal(1)));
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, app: &App) {
    let session = app.session_id.simple().to_string();
    let content = vec![
        Line::from("r restart  ·  q quit".fg(Color::DarkGray)),
        Line::from(format!("session {}", &session[..8]).fg(Color::DarkGray)),
    ];
    let widget = Paragraph::new(content).alignment(Alignment::Center);
    frame.render_widget(widget, area);
}
