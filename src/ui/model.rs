//! The per-session workflow state machine.

use super::event::{InputEvent, KeyInput, SessionEvent, WorkOutcome};
use crate::id::PasteId;

/// Character cap on the text-input buffer.
pub const MAX_INPUT_LEN: usize = 100_000;

const PROGRESS_STEP: u8 = 25;

/// Which store workflow is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Job {
    Create,
    Retrieve,
}

/// Workflow phase. A closed set: every screen the session can show is a
/// variant here, and result-carrying phases hold their data directly.
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Menu,
    CreatePaste,
    RetrievePaste,
    About,
    /// A store call is in flight; `job` says which workflow started it.
    Working { job: Job },
    Created { id: PasteId },
    Copied,
    KeyNotFound,
    Error { message: String },
}

/// Store work the runner must start on the session's behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkRequest {
    Create { content: String },
    Retrieve { input: String },
}

/// What the caller must do after an event was applied.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    None,
    /// Terminate the session.
    Quit,
    /// Kick off a store workflow; its completion comes back as
    /// [`SessionEvent::WorkDone`].
    Start(WorkRequest),
}

/// One session's entire in-memory state.
#[derive(Debug, Clone)]
pub struct Model {
    phase: Phase,
    buffer: String,
    buffer_chars: usize,
    width: u16,
    height: u16,
    progress: u8,
}

impl Model {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            phase: Phase::Menu,
            buffer: String::new(),
            buffer_chars: 0,
            width,
            height,
            progress: 0,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Progress indicator percentage, meaningful only while `Working`.
    pub fn progress(&self) -> u8 {
        self.progress
    }

    /// Apply one event from the session's queue.
    pub fn update(&mut self, event: SessionEvent) -> Action {
        match event {
            SessionEvent::Input(InputEvent::Resize { width, height }) => {
                self.width = width;
                self.height = height;
                Action::None
            }
            SessionEvent::Input(InputEvent::Disconnect) => Action::Quit,
            SessionEvent::Input(InputEvent::Key(key)) => self.handle_key(key),
            SessionEvent::Tick => {
                if matches!(self.phase, Phase::Working { .. }) {
                    self.progress = self.progress.saturating_add(PROGRESS_STEP).min(100);
                }
                Action::None
            }
            SessionEvent::WorkDone(outcome) => {
                // A completion only means something while its job is in
                // flight. Anything else is a stale result for a workflow
                // the user already left.
                if !matches!(self.phase, Phase::Working { .. }) {
                    return Action::None;
                }
                self.phase = match outcome {
                    WorkOutcome::Created(id) => Phase::Created { id },
                    WorkOutcome::Copied => Phase::Copied,
                    WorkOutcome::NotFound => Phase::KeyNotFound,
                    WorkOutcome::Failed(message) => Phase::Error { message },
                };
                Action::None
            }
        }
    }

    fn handle_key(&mut self, key: KeyInput) -> Action {
        // Honored from every reachable state.
        if key == KeyInput::CtrlC {
            return Action::Quit;
        }
        match self.phase {
            Phase::Menu => match key {
                KeyInput::Char('x' | 'X') => {
                    self.enter_input(Phase::CreatePaste);
                    Action::None
                }
                KeyInput::Char('r' | 'R') => {
                    self.enter_input(Phase::RetrievePaste);
                    Action::None
                }
                KeyInput::Char('a' | 'A') => {
                    self.phase = Phase::About;
                    Action::None
                }
                KeyInput::Char('q' | 'Q') => Action::Quit,
                _ => Action::None,
            },
            Phase::About => match key {
                KeyInput::Char('b' | 'B') | KeyInput::Esc => {
                    self.phase = Phase::Menu;
                    Action::None
                }
                KeyInput::Char('q' | 'Q') => Action::Quit,
                _ => Action::None,
            },
            Phase::CreatePaste => self.handle_entry_key(key, Job::Create),
            Phase::RetrievePaste => self.handle_entry_key(key, Job::Retrieve),
            Phase::Working { .. } => match key {
                KeyInput::Char('q' | 'Q') => Action::Quit,
                _ => Action::None,
            },
            Phase::Created { .. } | Phase::Copied | Phase::KeyNotFound | Phase::Error { .. } => {
                match key {
                    KeyInput::Char('b' | 'B') | KeyInput::Esc | KeyInput::Enter => {
                        self.phase = Phase::Menu;
                        Action::None
                    }
                    KeyInput::Char('q' | 'Q') => Action::Quit,
                    _ => Action::None,
                }
            }
        }
    }

    fn handle_entry_key(&mut self, key: KeyInput, job: Job) -> Action {
        match key {
            KeyInput::Esc => {
                self.clear_buffer();
                self.phase = Phase::Menu;
                Action::None
            }
            KeyInput::Backspace => {
                if self.buffer.pop().is_some() {
                    self.buffer_chars -= 1;
                }
                Action::None
            }
            KeyInput::Enter => {
                // Submitting an empty buffer is a no-op.
                if self.buffer.is_empty() {
                    return Action::None;
                }
                let text = std::mem::take(&mut self.buffer);
                self.buffer_chars = 0;
                self.progress = 0;
                self.phase = Phase::Working { job };
                Action::Start(match job {
                    Job::Create => WorkRequest::Create { content: text },
                    Job::Retrieve => WorkRequest::Retrieve { input: text },
                })
            }
            KeyInput::Char(c) => {
                if self.buffer_chars < MAX_INPUT_LEN {
                    self.buffer.push(c);
                    self.buffer_chars += 1;
                }
                Action::None
            }
            KeyInput::CtrlC => Action::Quit,
        }
    }

    fn enter_input(&mut self, phase: Phase) {
        self.clear_buffer();
        self.phase = phase;
    }

    fn clear_buffer(&mut self) {
        self.buffer.clear();
        self.buffer_chars = 0;
    }
}
