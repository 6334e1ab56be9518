//! LINE Messaging API integration.
//!
//! This module provides:
//! - [`LineClient`] for sending reply and push messages
//! - Wire types for webhook payloads and outbound messages
//! - Webhook signature verification
//!
//! # Flow
//!
//! 1. LINE delivers a batch of events to `POST /webhook`
//! 2. The handler verifies the `x-line-signature` header against the raw body
//! 3. Each event is classified and handled by the conversation engine
//! 4. Replies are sent through the reply token attached to the event

mod client;
mod error;
mod types;

pub use client::LineClient;
pub use error::LineError;
pub use types::{
    Action, DeliveryContext, Event, EventSource, Message, MessageContent, QuickReply,
    QuickReplyItem, Template, WebhookPayload,
};
