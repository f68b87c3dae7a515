//! Session event types.
//!
//! A session's stimuli all travel through one ordered queue: transport
//! input, the cosmetic progress tick, and store-work completions. The
//! state machine never sees two of them concurrently.

use crate::id::PasteId;

/// A key press, reduced to what the workflow reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// A printable character.
    Char(char),
    Enter,
    Backspace,
    Esc,
    CtrlC,
}

impl KeyInput {
    /// Map a symbolic key name from the session provider to an input key.
    ///
    /// Names this workflow has no use for (arrows, function keys) map to
    /// `None` and are dropped at the transport boundary.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "enter" | "return" => Some(Self::Enter),
            "backspace" => Some(Self::Backspace),
            "esc" | "escape" => Some(Self::Esc),
            "ctrl+c" => Some(Self::CtrlC),
            "space" => Some(Self::Char(' ')),
            "tab" => Some(Self::Char('\t')),
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(Self::Char(c)),
                    _ => None,
                }
            }
        }
    }
}

/// What the session provider feeds into a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyInput),
    Resize { width: u16, height: u16 },
    /// The peer detached; the session must wind down.
    Disconnect,
}

/// One entry in a session's ordered event queue.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Input(InputEvent),
    /// Periodic cosmetic tick; advances the progress indicator and
    /// nothing else.
    Tick,
    /// A store call finished on behalf of this session.
    WorkDone(WorkOutcome),
}

/// Result of a store workflow, ready to map onto a terminal phase.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkOutcome {
    /// Create succeeded; the paste lives under this identifier.
    Created(PasteId),
    /// Retrieve succeeded and the content went out to the clipboard sink.
    Copied,
    /// Retrieve missed: nothing stored under the submitted identifier.
    NotFound,
    /// The store or the identifier generator failed.
    Failed(String),
}
