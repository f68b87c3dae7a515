//! Per-session interaction: events, the workflow state machine, and
//! terminal-content generation.
//!
//! Everything here is synchronous and I/O-free. The state machine consumes
//! events from a single ordered queue and tells its caller what to do next;
//! `render` turns the current state into a styled text tree, and `layout`
//! turns that tree into bytes for a concrete viewport.

mod event;
mod layout;
mod model;
mod render;

pub use event::{InputEvent, KeyInput, SessionEvent, WorkOutcome};
pub use layout::layout;
pub use model::{Action, Job, Model, Phase, WorkRequest, MAX_INPUT_LEN};
pub use render::{render, Alignment, Frame, Line, Span, Style};
