//! Geometry-aware layout: styled text tree in, terminal bytes out.

use std::io;

use crossterm::cursor::{Hide, MoveTo};
use crossterm::queue;
use crossterm::style::{Attribute, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};

use super::render::{Alignment, Frame};

/// Paint `frame` for a `width` x `height` viewport.
///
/// The returned buffer repaints the whole screen. Writing to the
/// in-memory buffer cannot fail, so layout itself has no failure mode.
pub fn layout(frame: &Frame, width: u16, height: u16) -> Vec<u8> {
    paint(frame, width, height).unwrap_or_default()
}

fn paint(frame: &Frame, width: u16, height: u16) -> io::Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(256);
    queue!(buf, Hide, Clear(ClearType::All))?;

    let rows = frame.lines.len() as u16;
    let top = match frame.align {
        Alignment::Center => height.saturating_sub(rows) / 2,
        Alignment::Start => 0,
    };

    for (row, line) in frame.lines.iter().enumerate() {
        let col = match frame.align {
            Alignment::Center => width.saturating_sub(line.width() as u16) / 2,
            Alignment::Start => 0,
        };
        queue!(buf, MoveTo(col, top.saturating_add(row as u16)))?;
        for span in &line.spans {
            if let Some(fg) = span.style.fg {
                queue!(buf, SetForegroundColor(fg))?;
            }
            if span.style.bold {
                queue!(buf, SetAttribute(Attribute::Bold))?;
            }
            if span.style.underline {
                queue!(buf, SetAttribute(Attribute::Underlined))?;
            }
            if span.style.blink {
                queue!(buf, SetAttribute(Attribute::SlowBlink))?;
            }
            queue!(buf, Print(&span.text), SetAttribute(Attribute::Reset), ResetColor)?;
        }
    }
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::render::{Line, Span};

    fn sample(align: Alignment) -> Frame {
        Frame {
            lines: vec![Line::plain("hello"), Line::plain("hi")],
            align,
        }
    }

    #[test]
    fn test_layout_is_deterministic() {
        let frame = sample(Alignment::Center);
        assert_eq!(layout(&frame, 80, 24), layout(&frame, 80, 24));
    }

    #[test]
    fn test_layout_contains_text_bytes() {
        let bytes = layout(&sample(Alignment::Start), 80, 24);
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("hello"));
        assert!(text.contains("hi"));
    }

    #[test]
    fn test_center_differs_from_start() {
        let centered = layout(&sample(Alignment::Center), 80, 24);
        let flush = layout(&sample(Alignment::Start), 80, 24);
        assert_ne!(centered, flush);
    }

    #[test]
    fn test_tiny_viewport_does_not_panic() {
        let bytes = layout(&sample(Alignment::Center), 1, 1);
        assert!(!bytes.is_empty());
    }

    #[test]
    fn test_styles_emit_escape_codes() {
        let frame = Frame {
            lines: vec![Line::from(Span::styled(
                "styled",
                crate::ui::Style {
                    fg: Some(crossterm::style::Color::Red),
                    bold: true,
                    ..Default::default()
                },
            ))],
            align: Alignment::Start,
        };
        let plain = Frame {
            lines: vec![Line::plain("styled")],
            align: Alignment::Start,
        };
        assert!(layout(&frame, 80, 24).len() > layout(&plain, 80, 24).len());
    }
}
