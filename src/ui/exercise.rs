use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::app::App;
use crate::exercise::{Exercise, Matching, Sequence, TrueFalse};

const RIGHT_LABELS: [char; 8] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H'];

pub fn render(frame: &mut Frame, area: Rect, app: &App, section: usize, slot: usize) {
    let chunks = Layout::vertical([
        Constraint::Length(2),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    let exercise = app.exercise(section, slot);

    render_header(frame, chunks[0], app, section, slot);

    match exercise {
        Exercise::TrueFalse(state) => render_true_false(frame, chunks[1], state),
        Exercise::Matching(state) => render_matching(frame, chunks[1], state),
        Exercise::Sequence(state) => render_sequence(frame, chunks[1], state),
    }

    render_controls(frame, chunks[2], exercise);
}

fn render_header(frame: &mut Frame, area: Rect, app: &App, section: usize, slot: usize) {
    let exercise = app.exercise(section, slot);
    let mut spans = vec![
        Span::styled(
            format!("Exercise {}/{}", slot + 1, app.exercise_count(section)),
            Style::default().fg(Color::Cyan).bold(),
        ),
        Span::raw("  "),
        Span::styled(exercise.kind_label(), Style::default().fg(Color::DarkGray)),
    ];

    if let Some((correct, total)) = exercise.score() {
        let color = if correct == total {
            Color::Green
        } else {
            Color::Yellow
        };
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("{}/{}", correct, total),
            Style::default().fg(color).bold(),
        ));
    }

    let widget = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_true_false(frame: &mut Frame, area: Rect, state: &TrueFalse) {
    let verdicts = state.is_checked().then(|| state.verdicts());
    let mut lines: Vec<Line> = Vec::with_capacity(state.statements().len() * 2);

    for (index, statement) in state.statements().iter().enumerate() {
        let is_cursor = index == state.cursor() && !state.is_checked();
        let marker = if is_cursor { ">" } else { " " };

        let mark = match state.marks()[index] {
            Some(true) => "T",
            Some(false) => "F",
            None => "·",
        };

        let style = row_style(is_cursor, verdicts.as_ref().map(|v| v[index]));

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(format!("[{}] ", mark), style),
            Span::styled(statement.text.as_str(), style),
        ]));
        lines.push(Line::from(""));
    }

    let widget = Paragraph::new(lines).block(Block::default().padding(Padding::horizontal(1)));
    frame.render_widget(widget, area);
}

fn render_matching(frame: &mut Frame, area: Rect, state: &Matching) {
    let columns = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let verdicts = state.is_checked().then(|| state.verdicts());
    let right_rows = state.right_rows();

    // Left column: the fixed terms, with the label of the connected row.
    let mut left_lines: Vec<Line> = Vec::with_capacity(state.pairs().len() * 2);
    for (index, pair) in state.pairs().iter().enumerate() {
        let is_cursor = !state.focus_right() && index == state.cursor() && !state.is_checked();
        let is_pending = state.pending_left() == Some(index);
        let marker = if is_cursor || is_pending { ">" } else { " " };

        let connection = match state.matches()[index] {
            Some(row) => RIGHT_LABELS[row].to_string(),
            None => "·".to_string(),
        };

        let mut style = row_style(is_cursor, verdicts.as_ref().map(|v| v[index]));
        if is_pending {
            style = Style::default().fg(Color::Yellow).bold();
        }

        left_lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(format!("[{}] ", connection), style),
            Span::styled(pair.left.as_str(), style),
        ]));
        left_lines.push(Line::from(""));
    }

    // Right column: the shuffled definitions.
    let mut right_lines: Vec<Line> = Vec::with_capacity(right_rows.len() * 2);
    for (row, text) in right_rows.iter().enumerate() {
        let is_cursor = state.focus_right() && row == state.cursor();
        let taken = state.matches().iter().any(|m| *m == Some(row));
        let marker = if is_cursor { ">" } else { " " };

        let style = if is_cursor {
            Style::default().fg(Color::Cyan).bold()
        } else if taken {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::Gray)
        };

        right_lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(format!("{}. ", RIGHT_LABELS[row]), style),
            Span::styled(*text, style),
        ]));
        right_lines.push(Line::from(""));
    }

    frame.render_widget(
        Paragraph::new(left_lines).block(Block::default().padding(Padding::horizontal(1))),
        columns[0],
    );
    frame.render_widget(
        Paragraph::new(right_lines).block(Block::default().padding(Padding::horizontal(1))),
        columns[1],
    );
}

fn render_sequence(frame: &mut Frame, area: Rect, state: &Sequence) {
    let verdicts = state.is_checked().then(|| state.verdicts());
    let rows = state.rows();
    let mut lines: Vec<Line> = Vec::with_capacity(rows.len() * 2);

    for (row, text) in rows.iter().enumerate() {
        let is_cursor = row == state.cursor() && !state.is_checked();
        let marker = match (is_cursor, state.is_grabbed()) {
            (true, true) => "≡",
            (true, false) => ">",
            _ => " ",
        };

        let mut style = row_style(is_cursor, verdicts.as_ref().map(|v| v[row]));
        if is_cursor && state.is_grabbed() {
            style = Style::default().fg(Color::Yellow).bold();
        }

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(format!("{}. ", row + 1), style),
            Span::styled(*text, style),
        ]));
        lines.push(Line::from(""));
    }

    let widget = Paragraph::new(lines).block(Block::default().padding(Padding::horizontal(1)));
    frame.render_widget(widget, area);
}

fn row_style(is_cursor: bool, verdict: Option<bool>) -> Style {
    match verdict {
        Some(true) => Style::default().fg(Color::Green),
        Some(false) => Style::default().fg(Color::Red),
        None if is_cursor => Style::default().fg(Color::Cyan).bold(),
        None => Style::default().fg(Color::Gray),
    }
}

fn render_controls(frame: &mut Frame, area: Rect, exercise: &Exercise) {
    let controls = if exercise.is_checked() {
        "n next  ·  r retry  ·  esc back  ·  q quit"
    } else {
        match exercise {
            Exercise::TrueFalse(_) => "j/k move  ·  t/f mark  ·  enter check  ·  esc back",
            Exercise::Matching(_) => "j/k move  ·  enter pair  ·  backspace clear  ·  c check",
            Exercise::Sequence(_) => "j/k move  ·  space grab  ·  enter check  ·  esc back",
        }
    };
    let widget = Paragraph::new(controls)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
