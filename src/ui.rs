//! User interface rendering functions for all application screens.

use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Clear, Paragraph},
    Frame,
};

use crate::{
    render::{self, Glyph},
    session::SessionState,
    types::Screen,
    App,
};

/// Updates the application UI based on the persistent state.
///
/// This function renders different screens based on the current state stored in the [`App`]
/// structure, dispatching to the appropriate rendering function for each screen type.
pub(crate) fn draw(app: &App, frame: &mut Frame) {
    match app.screen {
        Screen::Instructions => instructions(app, frame),
        Screen::InGame => in_game(app, frame),
        Screen::Cleared(_) => {
            in_game(app, frame);
            cleared_banner(app, frame);
        }
        Screen::Victory => victory(app, frame),
    }
}

/// Clears the terminal screen by rendering a [`Clear`] widget.
///
/// This function renders a clear widget over the entire area of the frame to prepare for
/// rendering new content without artifacts from previous buffers rendered on the same frame.
pub(crate) fn clear(frame: &mut Frame) {
    let clear = Clear;
    frame.render_widget(clear, frame.area());
}

/// Converts a character count into terminal cells, saturating on huge values.
fn cells(count: usize) -> u16 {
    u16::try_from(count).unwrap_or(u16::MAX)
}

/// Returns a `width` by `height` rectangle centered within `area`.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [column] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(column);

    cell
}

/// Renders lines inside a rounded, green, centered block sized to fit them.
fn boxed_text(frame: &mut Frame, lines: Vec<String>, title: &str, hint: &str) {
    let width = lines
        .iter()
        .map(|line| line.chars().count())
        .chain([title.len(), hint.len()])
        .max()
        .unwrap_or_default();
    let area = centered(frame.area(), cells(width + 4), cells(lines.len() + 2));

    let block = Block::bordered()
        .title(title)
        .title_bottom(hint)
        .title_alignment(Alignment::Center)
        .style(Color::Green)
        .border_type(BorderType::Rounded);
    let text: Vec<Line> = lines.into_iter().map(Line::raw).collect();

    frame.render_widget(Paragraph::new(text).block(block), area);
}

/// Renders the instructions shown before the session starts.
pub(crate) fn instructions(app: &App, frame: &mut Frame) {
    clear(frame);

    let mut lines = render::instructions(app.session.catalog().total());
    lines.push(String::new());
    lines.push("Press Enter to start...".to_owned());

    boxed_text(frame, lines, "Labyrintime", "(enter) start / (esc) quit");
}

/// Returns the style a glyph is drawn with.
fn glyph_style(glyph: Glyph) -> Style {
    match glyph {
        Glyph::Wall => Style::new().fg(Color::Green),
        Glyph::Floor => Style::new(),
        Glyph::Start | Glyph::Exit => Style::new().fg(Color::Yellow),
        Glyph::Player => Style::new().fg(Color::White).add_modifier(Modifier::BOLD),
    }
}

/// Renders the in-game screen: heading with the clock, the maze, feedback and the input line.
pub(crate) fn in_game(app: &App, frame: &mut Frame) {
    clear(frame);

    let session = &app.session;
    let catalog = session.catalog();
    let grid = session.grid();

    let [header_area, maze_area, feedback_area, prompt_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
        Constraint::Length(3),
    ])
    .areas(frame.area());

    let mut heading = render::heading(catalog.current(), catalog.total());
    if !catalog.has_next() {
        heading.push_str(" (final)");
    }
    let header = Line::styled(
        format!(
            "{heading}   Time: {}",
            render::format_elapsed(session.elapsed())
        ),
        Style::new().fg(Color::Green),
    )
    .centered();
    frame.render_widget(header, header_area);

    let maze: Vec<Line> = render::glyph_rows(grid, session.position())
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|glyph| Span::styled(glyph.as_str(), glyph_style(glyph)))
                .collect::<Vec<Span>>()
                .into()
        })
        .collect();
    let maze_space = centered(maze_area, cells(grid.width() * 2), cells(grid.height()));
    frame.render_widget(Paragraph::new(maze), maze_space);

    if let Some(feedback) = &app.feedback {
        frame.render_widget(Line::raw(feedback.as_str()).centered(), feedback_area);
    }

    let prompt = Block::bordered()
        .title("Enter your move (W/A/S/D)")
        .title_bottom("(enter) submit / (q) quit")
        .title_alignment(Alignment::Center)
        .style(Color::Green)
        .border_type(BorderType::Rounded);
    frame.render_widget(
        Paragraph::new(format!("> {}", app.input)).block(prompt),
        prompt_area,
    );
}

/// Renders the banner shown while the next maze is being announced.
pub(crate) fn cleared_banner(app: &App, frame: &mut Frame) {
    let message = app.feedback.clone().unwrap_or_default();
    let area = centered(frame.area(), cells(message.chars().count() + 4), 3);

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(message).alignment(Alignment::Center).block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .style(Color::Yellow),
        ),
        area,
    );
}

/// Renders the summary shown once every maze has been cleared.
pub(crate) fn victory(app: &App, frame: &mut Frame) {
    clear(frame);

    let elapsed = match app.session.state() {
        SessionState::Won(elapsed) => elapsed,
        _ => app.session.elapsed(),
    };

    boxed_text(
        frame,
        render::victory(app.session.catalog().total(), elapsed),
        "Victory",
        "(any key) exit",
    );
}
