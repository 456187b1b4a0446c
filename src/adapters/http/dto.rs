//! Wire types for the dialogue-engine webhook.
//!
//! The engine POSTs the action name plus a tracker snapshot; the reply
//! carries slot events and response messages. Unknown fields on the request
//! are ignored so the engine can evolve independently.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::application::turn::BotMessage;
use crate::application::TurnOutcome;
use crate::domain::SlotEvent;

/// Webhook request body.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookRequest {
    /// Name of the custom action to run.
    pub next_action: String,
    /// Conversation identifier.
    #[serde(default)]
    pub sender_id: String,
    /// Tracker snapshot for this conversation.
    #[serde(default)]
    pub tracker: Tracker,
}

/// The slice of the tracker this service consumes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Tracker {
    /// Current slot values.
    #[serde(default)]
    pub slots: HashMap<String, Value>,
    /// The user's latest utterance.
    #[serde(default)]
    pub latest_message: LatestMessage,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LatestMessage {
    #[serde(default)]
    pub text: String,
}

/// Webhook response body.
#[derive(Debug, Clone, Serialize)]
pub struct WebhookResponse {
    pub events: Vec<EventDto>,
    pub responses: Vec<ResponseMessage>,
}

/// One tracker event; this service only ever emits slot events.
#[derive(Debug, Clone, Serialize)]
pub struct EventDto {
    pub event: &'static str,
    pub name: String,
    pub value: Value,
}

/// One reply message, optionally with a structured payload under `custom`.
#[derive(Debug, Clone, Serialize)]
pub struct ResponseMessage {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom: Option<Value>,
}

impl From<SlotEvent> for EventDto {
    fn from(event: SlotEvent) -> Self {
        match event {
            SlotEvent::Set { name, value } => EventDto {
                event: "slot",
                name,
                value,
            },
            SlotEvent::Clear { name } => EventDto {
                event: "slot",
                name,
                value: Value::Null,
            },
        }
    }
}

impl From<BotMessage> for ResponseMessage {
    fn from(message: BotMessage) -> Self {
        ResponseMessage {
            text: message.text,
            custom: message.payload,
        }
    }
}

impl From<TurnOutcome> for WebhookResponse {
    fn from(outcome: TurnOutcome) -> Self {
        WebhookResponse {
            events: outcome.events.into_iter().map(EventDto::from).collect(),
            responses: outcome
                .messages
                .into_iter()
                .map(ResponseMessage::from)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_tolerates_minimal_body() {
        let request: WebhookRequest =
            serde_json::from_value(json!({"next_action": "action_get_showtimes"})).unwrap();
        assert_eq!(request.next_action, "action_get_showtimes");
        assert!(request.tracker.slots.is_empty());
        assert!(request.tracker.latest_message.text.is_empty());
    }

    #[test]
    fn request_reads_slots_and_latest_message() {
        let request: WebhookRequest = serde_json::from_value(json!({
            "next_action": "action_create_booking",
            "sender_id": "user_42",
            "tracker": {
                "slots": {"showtime_id": 5},
                "latest_message": {"text": "Đặt vé suất 5, ghế A1", "intent": {"name": "book"}}
            }
        }))
        .unwrap();
        assert_eq!(request.tracker.slots["showtime_id"], json!(5));
        assert_eq!(request.tracker.latest_message.text, "Đặt vé suất 5, ghế A1");
    }

    #[test]
    fn clear_events_serialize_with_null_value() {
        let dto = EventDto::from(SlotEvent::clear("showtime_id"));
        let value = serde_json::to_value(&dto).unwrap();
        assert_eq!(
            value,
            json!({"event": "slot", "name": "showtime_id", "value": null})
        );
    }

    #[test]
    fn payload_only_appears_when_present() {
        let plain = serde_json::to_value(ResponseMessage {
            text: "hi".to_string(),
            custom: None,
        })
        .unwrap();
        assert!(plain.get("custom").is_none());

        let rich = serde_json::to_value(ResponseMessage {
            text: "hi".to_string(),
            custom: Some(json!({"order_id": "99"})),
        })
        .unwrap();
        assert_eq!(rich["custom"]["order_id"], "99");
    }
}
