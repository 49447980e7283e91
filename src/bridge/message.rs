use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::HostError;

/// Message tag asking the host to show a transient notice.
pub const SHOW_TOAST: &str = "showToast";

/// Notice text used when a `showToast` message carries no payload.
pub const FALLBACK_NOTICE: &str = "just-call-on-message";

/// A message sent from page script to the host.
///
/// Wire shape: `{ "type": string, "payload"?: any }`. The payload is opaque
/// here and only interpreted by the handler matching `type`; an explicit
/// `null` payload decodes the same as an absent one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeMessage {
    /// Message tag, e.g. `"showToast"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Free-form payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

/// What the host should do with a decoded [`BridgeMessage`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Display a short notice with the given text.
    ShowToast {
        /// Stringified payload, or [`FALLBACK_NOTICE`].
        text: String,
    },
    /// A tag with no handler. Carries the tag for logging.
    Unrecognized(String),
}

impl BridgeMessage {
    /// Build a message with the given tag and payload.
    #[must_use]
    pub fn new(kind: impl Into<String>, payload: Option<Value>) -> Self {
        Self {
            kind: kind.into(),
            payload,
        }
    }

    /// Decode a raw JSON string posted by page script.
    pub fn decode(raw: &str) -> Result<Self, HostError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Classify the message by its tag.
    #[must_use]
    pub fn command(&self) -> Command {
        if self.kind == SHOW_TOAST {
            Command::ShowToast {
                text: self.notice_text(),
            }
        } else {
            Command::Unrecognized(self.kind.clone())
        }
    }

    /// Text a notice for this message would display.
    ///
    /// String payloads render bare; any other value renders as compact
    /// JSON.
    #[must_use]
    pub fn notice_text(&self) -> String {
        match &self.payload {
            None | Some(Value::Null) => FALLBACK_NOTICE.to_owned(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn toast_text(raw: &str) -> Option<String> {
        match BridgeMessage::decode(raw).ok()?.command() {
            Command::ShowToast { text } => Some(text),
            Command::Unrecognized(_) => None,
        }
    }

    #[test]
    fn show_toast_uses_stringified_payload() {
        assert_eq!(
            toast_text(r#"{"type":"showToast","payload":"hello"}"#).as_deref(),
            Some("hello")
        );
        assert_eq!(
            toast_text(r#"{"type":"showToast","payload":1245}"#).as_deref(),
            Some("1245")
        );
        assert_eq!(
            toast_text(r#"{"type":"showToast","payload":{"value":900}}"#)
                .as_deref(),
            Some(r#"{"value":900}"#)
        );
        assert_eq!(
            toast_text(r#"{"type":"showToast","payload":[1,"-"]}"#).as_deref(),
            Some(r#"[1,"-"]"#)
        );
    }

    #[test]
    fn show_toast_without_payload_uses_fallback() {
        assert_eq!(
            toast_text(r#"{"type":"showToast"}"#).as_deref(),
            Some(FALLBACK_NOTICE)
        );
        assert_eq!(
            toast_text(r#"{"type":"showToast","payload":null}"#).as_deref(),
            Some(FALLBACK_NOTICE)
        );
    }

    #[test]
    fn other_tags_are_unrecognized() {
        let msg =
            BridgeMessage::decode(r#"{"type":"resize","payload":3}"#).unwrap();
        assert_eq!(msg.command(), Command::Unrecognized("resize".into()));
        // Tags are case-sensitive.
        let msg = BridgeMessage::decode(r#"{"type":"ShowToast"}"#).unwrap();
        assert!(matches!(msg.command(), Command::Unrecognized(_)));
    }

    #[test]
    fn malformed_input_is_an_error() {
        assert!(BridgeMessage::decode("not json").is_err());
        assert!(BridgeMessage::decode("").is_err());
        assert!(BridgeMessage::decode(r#"{"payload":1}"#).is_err());
        assert!(BridgeMessage::decode(r#"{"type":7}"#).is_err());
        assert!(BridgeMessage::decode("[1,2]").is_err());
    }

    #[test]
    fn absent_payload_is_not_serialized() {
        let msg = BridgeMessage::new(SHOW_TOAST, None);
        assert_eq!(
            serde_json::to_value(&msg).unwrap(),
            json!({ "type": "showToast" })
        );
    }
}
