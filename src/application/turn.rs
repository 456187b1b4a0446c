//! Per-turn input and output of the fulfillment handlers.
//!
//! Handlers are pure with respect to conversation state: the current slot
//! values and utterance come in, reply messages and slot-mutation events go
//! out. The dialogue engine applies the events; nothing here mutates shared
//! state.

use chrono::NaiveDate;
use serde_json::Value;

use crate::domain::{SlotEvent, SlotValues};

/// Input for one fulfillment turn.
#[derive(Debug, Clone)]
pub struct TurnContext {
    /// Conversation slots as tracked by the dialogue engine.
    pub slots: SlotValues,
    /// Raw text of the user's latest utterance, for slot recovery.
    pub message_text: String,
    /// The date to treat as "today" for date defaults and parsing.
    pub today: NaiveDate,
}

impl TurnContext {
    pub fn new(slots: SlotValues, message_text: impl Into<String>, today: NaiveDate) -> Self {
        Self {
            slots,
            message_text: message_text.into(),
            today,
        }
    }
}

/// One reply to the user, optionally with a structured side-payload for
/// richer client surfaces.
#[derive(Debug, Clone, PartialEq)]
pub struct BotMessage {
    pub text: String,
    pub payload: Option<Value>,
}

impl BotMessage {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            payload: None,
        }
    }

    pub fn with_payload(text: impl Into<String>, payload: Value) -> Self {
        Self {
            text: text.into(),
            payload: Some(payload),
        }
    }
}

/// Everything a handler returns for one turn.
///
/// Handlers never fail: errors become apologetic replies, so an outcome
/// always carries at least one message.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TurnOutcome {
    pub messages: Vec<BotMessage>,
    pub events: Vec<SlotEvent>,
}

impl TurnOutcome {
    /// Single plain-text reply, no slot changes.
    pub fn reply(text: impl Into<String>) -> Self {
        Self {
            messages: vec![BotMessage::text(text)],
            events: Vec::new(),
        }
    }

    /// Single reply carrying a structured payload.
    pub fn reply_with_payload(text: impl Into<String>, payload: Value) -> Self {
        Self {
            messages: vec![BotMessage::with_payload(text, payload)],
            events: Vec::new(),
        }
    }

    /// Appends a slot event.
    pub fn with_event(mut self, event: SlotEvent) -> Self {
        self.events.push(event);
        self
    }
}
