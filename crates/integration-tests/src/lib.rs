//! Integration tests for Otoku.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p otoku-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `engine_replies` - End-to-end event handling with fake collaborators
//! - `reservation_concurrency` - Concurrent reservation intake
//! - `bot_messages` - Outbound LINE message construction
//!
//! The helpers here build a [`ConversationEngine`] around in-memory
//! collaborators and a [`RecordingGateway`] that captures replies instead of
//! calling the LINE API.

use std::sync::{Arc, Mutex};

use rust_decimal::Decimal;

use otoku_bot::engine::MessagingGateway;
use otoku_bot::line::{
    DeliveryContext, Event, EventSource, LineError, Message, MessageContent,
};
use otoku_core::{GeoPoint, ItemRecord, ShopKey, ShopRecord};

/// Gateway fake that records replies instead of sending them.
///
/// Cheaply cloneable; clones share the same recording.
#[derive(Debug, Clone, Default)]
pub struct RecordingGateway {
    sent: Arc<Mutex<Vec<(String, Vec<Message>)>>>,
}

impl RecordingGateway {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded (reply token, messages) pairs.
    #[must_use]
    pub fn sent(&self) -> Vec<(String, Vec<Message>)> {
        self.sent.lock().expect("recorder lock").clone()
    }

    /// Number of replies recorded so far.
    #[must_use]
    pub fn reply_count(&self) -> usize {
        self.sent.lock().expect("recorder lock").len()
    }

    /// All recorded messages serialized to a single JSON string, for
    /// content assertions.
    #[must_use]
    pub fn sent_json(&self) -> String {
        serde_json::to_string(&self.sent()).expect("messages serialize")
    }
}

impl MessagingGateway for RecordingGateway {
    async fn reply(&self, reply_token: &str, messages: Vec<Message>) -> Result<(), LineError> {
        self.sent
            .lock()
            .expect("recorder lock")
            .push((reply_token.to_owned(), messages));
        Ok(())
    }
}

/// Build a text message event from `user` with the given reply token.
#[must_use]
pub fn text_event(user: &str, reply_token: &str, text: &str) -> Event {
    Event::Message {
        reply_token: reply_token.to_owned(),
        source: EventSource {
            source_type: "user".to_owned(),
            user_id: Some(user.to_owned()),
        },
        message: MessageContent::Text {
            text: text.to_owned(),
        },
        webhook_event_id: None,
        delivery_context: Some(DeliveryContext {
            is_redelivery: false,
        }),
    }
}

/// Build a location message event.
#[must_use]
pub fn location_event(user: &str, reply_token: &str, lat: f64, lng: f64) -> Event {
    Event::Message {
        reply_token: reply_token.to_owned(),
        source: EventSource {
            source_type: "user".to_owned(),
            user_id: Some(user.to_owned()),
        },
        message: MessageContent::Location {
            latitude: lat,
            longitude: lng,
        },
        webhook_event_id: None,
        delivery_context: None,
    }
}

/// A shop record at the given location.
#[must_use]
pub fn shop(key: &str, name: &str, lat: f64, lng: f64, items: Vec<ItemRecord>) -> ShopRecord {
    ShopRecord {
        key: ShopKey::new(key),
        name: name.to_owned(),
        location: GeoPoint::new(lat, lng),
        items,
    }
}

/// An item priced in whole yen.
#[must_use]
pub fn item(name: &str, discount_price: u32, price: u32) -> ItemRecord {
    ItemRecord {
        name: name.to_owned(),
        price: Decimal::from(price),
        discount_price: Decimal::from(discount_price),
        deadline: "19:00".to_owned(),
    }
}
