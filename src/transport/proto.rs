//! Wire protocol for terminal clients.

use serde::{Deserialize, Serialize};

/// Messages a terminal client sends over the WebSocket.
///
/// The first message on a connection must be `attach`; `key` and
/// `resize` events follow. Rendered screens travel the other way as
/// binary frames and are painted verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Introduce the terminal: geometry plus the terminal type string.
    Attach {
        width: u16,
        height: u16,
        #[serde(default = "default_term")]
        term: String,
    },
    /// A key press, named symbolically (`"x"`, `"enter"`, `"ctrl+c"`).
    Key { name: String },
    /// The client's viewport changed.
    Resize { width: u16, height: u16 },
}

fn default_term() -> String {
    "xterm".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attach_parse() {
        let json = r#"{"type": "attach", "width": 120, "height": 40, "term": "xterm-256color"}"#;
        let msg: ClientMessage = serde_json::from_str(json).unwrap();
        assert_eq!(
            msg,
            ClientMessage::Attach {
                width: 120,
                height: 40,
                term: "xterm-256color".into()
            }
        );
    }

    #[test]
    fn test_attach_default_term() {
        let json = r#"{"type": "attach", "width": 80, "height": 24}"#;
        let msg: ClientMessage = serde_json::from_str(json).unwrap();
        match msg {
            ClientMessage::Attach { term, .. } => assert_eq!(term, "xterm"),
            _ => panic!("expected Attach message"),
        }
    }

    #[test]
    fn test_key_parse() {
        let json = r#"{"type": "key", "name": "enter"}"#;
        let msg: ClientMessage = serde_json::from_str(json).unwrap();
        assert_eq!(msg, ClientMessage::Key { name: "enter".into() });
    }

    #[test]
    fn test_resize_parse() {
        let json = r#"{"type": "resize", "width": 100, "height": 30}"#;
        let msg: ClientMessage = serde_json::from_str(json).unwrap();
        assert_eq!(
            msg,
            ClientMessage::Resize {
                width: 100,
                height: 30
            }
        );
    }

    #[test]
    fn test_unknown_type_rejected() {
        let json = r#"{"type": "execute", "command": "rm -rf /"}"#;
        assert!(serde_json::from_str::<ClientMessage>(json).is_err());
    }
}
