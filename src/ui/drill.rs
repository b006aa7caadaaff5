use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::models::Question;

const OPTION_LABELS: [char; 4] = ['A', 'B', 'C', 'D'];

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(10),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    render_progress(frame, chunks[0], app);

    if let Some(message) = &app.drill.error {
        render_error(frame, chunks[1], message);
    } else if app.drill.generating {
        render_generating(frame, chunks[1]);
    } else if let Some(question) = &app.drill.current {
        render_prompt(frame, chunks[1], question);
        render_options(frame, chunks[2], app, question);
    } else {
        render_idle(frame, chunks[1]);
    }

    render_controls(frame, chunks[3], app);
}

fn render_progress(frame: &mut Frame, area: Rect, app: &App) {
    let drill = &app.drill;
    let progress = if drill.target > 0 {
        format!(
            "{} correct · {}/{}",
            drill.correct, drill.answered, drill.target
        )
    } else {
        format!("{} correct · {} answered", drill.correct, drill.answered)
    };
    let widget = Paragraph::new(progress)
        .alignment(Alignment::Right)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

fn render_prompt(frame: &mut Frame, area: Rect, question: &Question) {
    let widget = Paragraph::new(question.prompt.as_str())
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .block(Block::default().padding(Padding::horizontal(1)));
    frame.render_widget(widget, area);
}

fn render_options(frame: &mut Frame, area: Rect, app: &App, question: &Question) {
    let mut lines: Vec<Line> = Vec::with_capacity(question.options.len() * 2);

    for (index, option) in question.options.iter().enumerate() {
        let is_selected = index == app.drill.selected_option;
        let style = option_style(app, question, index, is_selected);
        let marker = if is_selected { ">" } else { " " };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(format!("{}. ", OPTION_LABELS[index]), style),
            Span::styled(option.as_str(), style),
        ]));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn option_style(app: &App, question: &Question, index: usize, is_selected: bool) -> Style {
    if app.drill.revealed {
        if index == question.correct_answer {
            Style::default().fg(Color::Green).bold()
        } else if is_selected {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    } else if is_selected {
        Style::default().fg(Color::Cyan).bold()
    } else {
        Style::default().fg(Color::Gray)
    }
}

fn render_generating(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("Generating question...")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

fn render_idle(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("Press ENTER for the first question")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

fn render_error(frame: &mut Frame, area: Rect, message: &str) {
    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "QUESTION GENERATION FAILED",
            Style::default().fg(Color::Red).bold(),
        )),
        Line::from(""),
        Line::from(message.to_string().fg(Color::Gray)),
        Line::from(""),
        Line::from("enter retry".fg(Color::DarkGray)),
    ];
    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, app: &App) {
    let controls = if app.drill.revealed {
        "enter next question  ·  s summary  ·  q quit"
    } else {
        "j/k navigate  ·  enter check  ·  s summary  ·  q quit"
    };
    let widget = Paragraph::new(controls)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
