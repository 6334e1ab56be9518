//! LINE Messaging API wire types.
//!
//! These types represent the subset of the Messaging API needed by the bot:
//! inbound webhook events (text and location messages) and outbound text,
//! quick-reply, and buttons-template messages.
//!
//! See: <https://developers.line.biz/en/reference/messaging-api/>

use serde::{Deserialize, Serialize};

// =============================================================================
// Inbound: webhook payloads
// =============================================================================

/// A webhook delivery: an ordered batch of events.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookPayload {
    /// Bot user ID that events were sent to.
    #[serde(default)]
    pub destination: Option<String>,
    /// Events in this delivery.
    #[serde(default)]
    pub events: Vec<Event>,
}

/// A single webhook event.
///
/// Only message events carry behavior; everything else (follow, unfollow,
/// join, ...) deserializes to [`Event::Other`] and produces no reply.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Event {
    /// A user sent a message.
    #[serde(rename_all = "camelCase")]
    Message {
        /// Token for sending the correlated reply, valid once.
        reply_token: String,
        /// Who sent the event.
        source: EventSource,
        /// The message itself.
        message: MessageContent,
        /// Unique event id, stable across redeliveries.
        #[serde(default)]
        webhook_event_id: Option<String>,
        /// Redelivery metadata.
        #[serde(default)]
        delivery_context: Option<DeliveryContext>,
    },
    /// Any event type the bot does not handle.
    #[serde(other)]
    Other,
}

/// Sender of a webhook event.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSource {
    /// Source type ("user", "group", "room").
    #[serde(rename = "type")]
    pub source_type: String,
    /// LINE user ID of the sender, when available.
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Redelivery metadata attached to each event.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryContext {
    /// True when LINE is redelivering after a failed webhook response.
    pub is_redelivery: bool,
}

/// Content of a message event.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum MessageContent {
    /// Plain text message.
    Text { text: String },
    /// Shared location.
    Location { latitude: f64, longitude: f64 },
    /// Stickers, images, and anything else the bot ignores.
    #[serde(other)]
    Other,
}

// =============================================================================
// Outbound: reply messages
// =============================================================================

/// An outbound message.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Message {
    /// Plain text, optionally with quick-reply options.
    #[serde(rename_all = "camelCase")]
    Text {
        text: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        quick_reply: Option<QuickReply>,
    },
    /// Template message (buttons).
    #[serde(rename_all = "camelCase")]
    Template {
        /// Fallback text for clients that cannot render templates.
        alt_text: String,
        template: Template,
    },
}

impl Message {
    /// Create a plain text message.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text {
            text: text.into(),
            quick_reply: None,
        }
    }

    /// Create a text message with quick-reply options.
    #[must_use]
    pub fn text_with_quick_reply(text: impl Into<String>, items: Vec<QuickReplyItem>) -> Self {
        Self::Text {
            text: text.into(),
            quick_reply: Some(QuickReply { items }),
        }
    }

    /// Create a buttons template message.
    #[must_use]
    pub fn buttons(
        alt_text: impl Into<String>,
        title: impl Into<String>,
        text: impl Into<String>,
        actions: Vec<Action>,
    ) -> Self {
        Self::Template {
            alt_text: alt_text.into(),
            template: Template::Buttons {
                title: Some(title.into()),
                text: text.into(),
                actions,
            },
        }
    }
}

/// Quick-reply options attached to a message.
#[derive(Debug, Clone, Serialize)]
pub struct QuickReply {
    pub items: Vec<QuickReplyItem>,
}

/// A single quick-reply option.
#[derive(Debug, Clone, Serialize)]
pub struct QuickReplyItem {
    #[serde(rename = "type")]
    pub item_type: &'static str,
    pub action: Action,
}

impl QuickReplyItem {
    /// Wrap an action as a quick-reply option.
    #[must_use]
    pub const fn new(action: Action) -> Self {
        Self {
            item_type: "action",
            action,
        }
    }
}

/// Template payloads.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Template {
    /// Buttons template: a titled list of actions.
    Buttons {
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        text: String,
        actions: Vec<Action>,
    },
}

/// Actions that re-submit as text commands when tapped.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Action {
    /// Sends `text` back into the conversation, displayed as `label`.
    Message { label: String, text: String },
}

impl Action {
    /// Create a message action.
    #[must_use]
    pub fn message(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Message {
            label: label.into(),
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_message_serializes_without_quick_reply_field() {
        let value = serde_json::to_value(Message::text("hello")).expect("serializes");
        assert_eq!(value, json!({ "type": "text", "text": "hello" }));
    }

    #[test]
    fn test_quick_reply_shape() {
        let message = Message::text_with_quick_reply(
            "選んでください",
            vec![QuickReplyItem::new(Action::message("田中ベーカリー", "お店 tanaka"))],
        );
        let value = serde_json::to_value(message).expect("serializes");
        assert_eq!(
            value,
            json!({
                "type": "text",
                "text": "選んでください",
                "quickReply": {
                    "items": [{
                        "type": "action",
                        "action": {
                            "type": "message",
                            "label": "田中ベーカリー",
                            "text": "お店 tanaka"
                        }
                    }]
                }
            })
        );
    }

    #[test]
    fn test_buttons_template_shape() {
        let message = Message::buttons(
            "商品一覧",
            "田中ベーカリー",
            "商品を選んでください",
            vec![Action::message("bread 100円", "予約 tanaka bread 1")],
        );
        let value = serde_json::to_value(message).expect("serializes");
        assert_eq!(
            value,
            json!({
                "type": "template",
                "altText": "商品一覧",
                "template": {
                    "type": "buttons",
                    "title": "田中ベーカリー",
                    "text": "商品を選んでください",
                    "actions": [{
                        "type": "message",
                        "label": "bread 100円",
                        "text": "予約 tanaka bread 1"
                    }]
                }
            })
        );
    }

    #[test]
    fn test_webhook_text_event_deserializes() {
        let payload: WebhookPayload = serde_json::from_str(
            r#"{
                "destination": "U_bot",
                "events": [{
                    "type": "message",
                    "replyToken": "rt-1",
                    "webhookEventId": "we-1",
                    "deliveryContext": { "isRedelivery": false },
                    "source": { "type": "user", "userId": "U1" },
                    "message": { "id": "m1", "type": "text", "text": "お店 tanaka" }
                }]
            }"#,
        )
        .expect("deserializes");

        assert_eq!(payload.events.len(), 1);
        match payload.events.first().expect("one event") {
            Event::Message {
                reply_token,
                source,
                message: MessageContent::Text { text },
                webhook_event_id,
                delivery_context,
            } => {
                assert_eq!(reply_token, "rt-1");
                assert_eq!(source.user_id.as_deref(), Some("U1"));
                assert_eq!(text, "お店 tanaka");
                assert_eq!(webhook_event_id.as_deref(), Some("we-1"));
                assert!(
                    delivery_context
                        .as_ref()
                        .is_some_and(|c| !c.is_redelivery)
                );
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_webhook_location_event_deserializes() {
        let payload: WebhookPayload = serde_json::from_str(
            r#"{
                "events": [{
                    "type": "message",
                    "replyToken": "rt-2",
                    "source": { "type": "user", "userId": "U2" },
                    "message": {
                        "id": "m2",
                        "type": "location",
                        "title": "here",
                        "latitude": 35.6812,
                        "longitude": 139.7671
                    }
                }]
            }"#,
        )
        .expect("deserializes");

        match payload.events.first().expect("one event") {
            Event::Message {
                message: MessageContent::Location { latitude, longitude },
                ..
            } => {
                assert!((latitude - 35.6812).abs() < 1e-9);
                assert!((longitude - 139.7671).abs() < 1e-9);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_event_and_message_types_fall_through() {
        let payload: WebhookPayload = serde_json::from_str(
            r#"{
                "events": [
                    { "type": "follow", "replyToken": "rt-3" },
                    {
                        "type": "message",
                        "replyToken": "rt-4",
                        "source": { "type": "user", "userId": "U3" },
                        "message": { "id": "m3", "type": "sticker" }
                    }
                ]
            }"#,
        )
        .expect("deserializes");

        assert!(matches!(payload.events.first(), Some(Event::Other)));
        assert!(matches!(
            payload.events.get(1),
            Some(Event::Message {
                message: MessageContent::Other,
                ..
            })
        ));
    }
}
