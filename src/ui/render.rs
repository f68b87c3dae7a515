//! Terminal content generation.
//!
//! `render` is a pure function from session state to a styled text tree.
//! It knows nothing about geometry beyond what the input screens need for
//! trimming; placement is the layout service's job.

use crossterm::style::Color;

use super::model::{Job, Model, Phase};
use crate::id::PasteId;

/// Placement the layout service applies to a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Start,
    Center,
}

/// Text attributes for one span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    pub fg: Option<Color>,
    pub bold: bool,
    pub underline: bool,
    pub blink: bool,
}

/// A run of text under one style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub style: Style,
}

impl Span {
    pub fn styled(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::styled(text, Style::default())
    }
}

/// One row of spans.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Line {
    pub spans: Vec<Span>,
}

impl Line {
    pub fn new(spans: Vec<Span>) -> Self {
        Self { spans }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(vec![Span::plain(text)])
    }

    /// Printed width in characters.
    pub fn width(&self) -> usize {
        self.spans.iter().map(|s| s.text.chars().count()).sum()
    }
}

impl From<Span> for Line {
    fn from(span: Span) -> Self {
        Self::new(vec![span])
    }
}

/// Styled content for one screen, before geometry-aware layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub lines: Vec<Line>,
    pub align: Alignment,
}

const TITLE: Color = Color::Rgb {
    r: 0x87,
    g: 0x4B,
    b: 0xFC,
};
const ACCENT: Color = Color::Rgb {
    r: 0xF8,
    g: 0x49,
    b: 0xA3,
};
const ACTION: Color = Color::Rgb {
    r: 0x00,
    g: 0xF3,
    b: 0xCF,
};
const DULL: Color = Color::Rgb {
    r: 0x87,
    g: 0x8B,
    b: 0x7D,
};

fn title(text: impl Into<String>) -> Span {
    Span::styled(
        text,
        Style {
            fg: Some(TITLE),
            bold: true,
            ..Style::default()
        },
    )
}

fn accent(text: impl Into<String>) -> Span {
    Span::styled(
        text,
        Style {
            fg: Some(ACCENT),
            bold: true,
            underline: true,
            ..Style::default()
        },
    )
}

fn accent_soft(text: impl Into<String>) -> Span {
    Span::styled(
        text,
        Style {
            fg: Some(ACCENT),
            bold: true,
            ..Style::default()
        },
    )
}

fn action(text: impl Into<String>) -> Span {
    Span::styled(
        text,
        Style {
            fg: Some(ACTION),
            blink: true,
            ..Style::default()
        },
    )
}

fn action_alt(text: impl Into<String>) -> Span {
    Span::styled(
        text,
        Style {
            fg: Some(ACCENT),
            blink: true,
            ..Style::default()
        },
    )
}

fn dull(text: impl Into<String>) -> Span {
    Span::styled(
        text,
        Style {
            fg: Some(DULL),
            ..Style::default()
        },
    )
}

/// Produce the screen for the current state. Same state, same frame.
pub fn render(model: &Model) -> Frame {
    match model.phase() {
        Phase::Menu => menu(),
        Phase::About => about(),
        Phase::CreatePaste => input_screen("Paste your content below:", model),
        Phase::RetrievePaste => input_screen("Enter paste id:", model),
        Phase::Working { job } => working(*job, model.progress()),
        Phase::Created { id } => created(id),
        Phase::Copied => copied(),
        Phase::KeyNotFound => key_not_found(),
        Phase::Error { message } => error_screen(message),
    }
}

fn menu() -> Frame {
    Frame {
        lines: vec![
            Line::new(vec![Span::plain("Welcome to "), title("termpaste")]),
            Line::plain("the place you reach for your pastes"),
            Line::from(action("Press x to create a new paste")),
            Line::from(action_alt("Press r to retrieve a paste")),
            Line::from(dull("Press a to learn more, q to quit")),
        ],
        align: Alignment::Center,
    }
}

fn about() -> Frame {
    Frame {
        lines: vec![
            Line::from(title("About")),
            Line::new(vec![
                accent_soft("termpaste"),
                Span::plain(" keeps short text snippets behind 8-character ids."),
            ]),
            Line::plain("Store something here, fetch it from any other terminal."),
            Line::from(dull("Press b to go back")),
        ],
        align: Alignment::Center,
    }
}

fn input_screen(prompt: &str, model: &Model) -> Frame {
    Frame {
        lines: vec![
            Line::from(action(prompt)),
            Line::default(),
            Line::new(vec![
                Span::plain("> "),
                Span::plain(visible_tail(model.buffer(), model.width())),
                accent_soft("▏"),
            ]),
            Line::default(),
            Line::from(dull("enter to submit, esc to cancel")),
        ],
        align: Alignment::Start,
    }
}

// Keep the tail of long input visible next to the cursor.
fn visible_tail(buffer: &str, width: u16) -> String {
    let max_shown = usize::from(width).saturating_sub(4).max(10);
    let chars = buffer.chars().count();
    if chars <= max_shown {
        buffer.to_owned()
    } else {
        let tail: String = buffer.chars().skip(chars - max_shown + 1).collect();
        format!("…{tail}")
    }
}

const PROGRESS_COLS: usize = 30;

fn working(job: Job, progress: u8) -> Frame {
    let filled = usize::from(progress) * PROGRESS_COLS / 100;
    let mut bar = "█".repeat(filled);
    bar.push_str(&"░".repeat(PROGRESS_COLS - filled));
    let label = match job {
        Job::Create => "saving…",
        Job::Retrieve => "fetching…",
    };
    Frame {
        lines: vec![
            Line::new(vec![accent_soft(bar), Span::plain(format!(" {progress:>3}%"))]),
            Line::from(dull(label)),
        ],
        align: Alignment::Start,
    }
}

fn created(id: &PasteId) -> Frame {
    Frame {
        lines: vec![
            Line::plain("🚀 Paste saved!"),
            Line::from(accent(format!("ID: {id}"))),
            Line::from(dull("press b for the menu")),
        ],
        align: Alignment::Start,
    }
}

fn copied() -> Frame {
    Frame {
        lines: vec![
            Line::from(accent_soft("🚀 Copied to your clipboard!")),
            Line::from(dull("press b for the menu")),
        ],
        align: Alignment::Start,
    }
}

fn key_not_found() -> Frame {
    Frame {
        lines: vec![
            Line::plain("No paste with that id."),
            Line::from(dull("press b for the menu")),
        ],
        align: Alignment::Start,
    }
}

fn error_screen(message: &str) -> Frame {
    Frame {
        lines: vec![
            Line::from(accent_soft("Uh oh, that didn't work:")),
            Line::plain(message),
            Line::from(dull("press b for the menu, then try again")),
        ],
        align: Alignment::Start,
    }
}
