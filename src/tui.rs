//! Terminal chat widget
//!
//! Draws the shared transcript and turns key presses into submissions. The
//! widget never touches conversation state; it only reads the transcript and
//! sends [`Event::UserSubmit`] when the control is enabled.

use crate::state_machine::Event;
use crate::view::{input, SharedTranscript, Speaker, Transcript, Turn};
use crossterm::event::{self, Event as TermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::{Frame, Terminal};
use std::io;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Redraw interval; also drives the pending animation
const TICK: Duration = Duration::from_millis(100);
const SCROLL_STEP: u16 = 5;

/// One cycle of the waiting animation
const WAVE_PERIOD_MS: u128 = 1300;
/// Per-dot phase offsets, so the dots rise one after another
const WAVE_OFFSETS_MS: [u128; 3] = [0, 1100, 900];

#[derive(Debug, PartialEq, Eq)]
enum Action {
    None,
    Quit,
    Submit(String),
}

struct ChatApp {
    transcript: SharedTranscript,
    input: String,
    title: String,
    started: Instant,
    /// Turn count when the last submission was sent; submitting stays
    /// blocked until the runtime has rendered that user turn
    sent_at: Option<usize>,
}

/// Run the widget until the user quits or the runtime goes away.
pub async fn run(
    transcript: SharedTranscript,
    events: mpsc::Sender<Event>,
    title: String,
) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _cleanup = TerminalCleanup;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let mut app = ChatApp {
        transcript,
        input: String::new(),
        title,
        started: Instant::now(),
        sent_at: None,
    };

    loop {
        terminal.draw(|frame| app.render(frame))?;

        if !event::poll(TICK)? {
            continue;
        }

        match app.handle_event(&event::read()?) {
            Action::None => {}
            Action::Quit => break,
            Action::Submit(text) => {
                if events.send(Event::UserSubmit { text }).await.is_err() {
                    tracing::warn!("Conversation runtime stopped, closing chat");
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Restores the terminal even if the loop bails out early
struct TerminalCleanup;

impl Drop for TerminalCleanup {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

impl ChatApp {
    fn handle_event(&mut self, event: &TermEvent) -> Action {
        let TermEvent::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return Action::None;
        };

        match code {
            KeyCode::Esc => Action::Quit,
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
            KeyCode::Enter => {
                let (ready, turns) = self
                    .transcript
                    .with(|t| (self.can_submit(t), t.turns().len()));
                if !ready {
                    return Action::None;
                }
                match input::capture(&mut self.input) {
                    Some(text) => {
                        self.sent_at = Some(turns);
                        Action::Submit(text)
                    }
                    None => Action::None,
                }
            }
            KeyCode::Char(c) => {
                self.input.push(*c);
                Action::None
            }
            KeyCode::Backspace => {
                self.input.pop();
                Action::None
            }
            KeyCode::PageUp => {
                self.transcript.with(|t| t.scroll_up(SCROLL_STEP));
                Action::None
            }
            KeyCode::PageDown => {
                self.transcript.with(|t| t.scroll_down(SCROLL_STEP));
                Action::None
            }
            _ => Action::None,
        }
    }

    /// The control is enabled and the runtime has caught up with our last send
    fn can_submit(&self, t: &Transcript) -> bool {
        t.control().enabled && self.sent_at.is_none_or(|at| t.turns().len() > at)
    }

    fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(3)])
            .split(frame.area());

        let elapsed = self.started.elapsed();
        self.transcript.with(|t| {
            self.render_transcript(frame, chunks[0], t, elapsed);
            self.render_input(frame, chunks[1], t);
        });
    }

    fn render_transcript(&self, frame: &mut Frame, area: Rect, t: &Transcript, elapsed: Duration) {
        let lines: Vec<Line> = t
            .turns()
            .iter()
            .flat_map(|turn| turn_lines(turn, elapsed))
            .collect();

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });

        // Rows as the word wrapper lays them out, so the tail stays in view
        let inner_width = area.width.saturating_sub(2);
        let inner_height = area.height.saturating_sub(2);
        let total = u16::try_from(paragraph.line_count(inner_width)).unwrap_or(u16::MAX);
        let top = total
            .saturating_sub(inner_height)
            .saturating_sub(t.scroll_offset());

        let mut title = format!(" {} ", self.title);
        if t.has_pending() {
            title.push_str("· waiting for reply ");
        }

        let paragraph = paragraph
            .block(Block::default().borders(Borders::ALL).title(title))
            .scroll((top, 0));
        frame.render_widget(paragraph, area);
    }

    fn render_input(&self, frame: &mut Frame, area: Rect, t: &Transcript) {
        let control = t.control();
        let ready = self.can_submit(t);
        let style = if ready {
            Style::default()
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(style)
            .title(format!(" {} ", control.label));
        frame.render_widget(
            Paragraph::new(self.input.as_str()).style(style).block(block),
            area,
        );

        if ready {
            let typed = u16::try_from(self.input.chars().count()).unwrap_or(u16::MAX);
            let x = area
                .x
                .saturating_add(1)
                .saturating_add(typed)
                .min(area.right().saturating_sub(2));
            frame.set_cursor_position((x, area.y.saturating_add(1)));
        }
    }
}

/// Header, body and spacer lines for one turn
fn turn_lines(turn: &Turn, elapsed: Duration) -> Vec<Line<'static>> {
    let (name, color) = match turn.speaker {
        Speaker::User => ("You", Color::Cyan),
        Speaker::Assistant => ("Interviewer", Color::Green),
    };

    let mut lines = vec![Line::from(vec![
        Span::styled(
            name,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {}", turn.at.format("%H:%M")),
            Style::default().fg(Color::DarkGray),
        ),
    ])];

    if turn.pending {
        lines.push(Line::from(pending_dots(elapsed)));
    } else {
        lines.extend(turn.text.lines().map(|l| Line::from(l.to_string())));
    }
    lines.push(Line::default());
    lines
}

/// Three dots, each raised for part of its staggered cycle
fn pending_dots(elapsed: Duration) -> String {
    let ms = elapsed.as_millis();
    let raised = (WAVE_PERIOD_MS * 2 / 10)..(WAVE_PERIOD_MS * 4 / 10);
    WAVE_OFFSETS_MS
        .iter()
        .map(|offset| {
            if raised.contains(&((ms + offset) % WAVE_PERIOD_MS)) {
                "●"
            } else {
                "·"
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
