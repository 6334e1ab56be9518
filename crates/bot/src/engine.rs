//! Conversation engine: per-event orchestration.
//!
//! Each inbound event is classified independently - there is no multi-turn
//! session state. Location messages go through the geo ranker, text messages
//! through the command parser, and everything else is ignored. The only
//! side-effectful branch is `予約`, which performs exactly one ledger append.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache;
use thiserror::Error;
use tracing::{debug, info, instrument};

use otoku_core::{
    Command, CommandParser, GeoPoint, ReservationEntry, ReserveArgumentMode, ShopRecord, UserId,
    nearest,
};

use crate::catalog::{Catalog, CatalogError};
use crate::line::{Event, EventSource, LineClient, LineError, Message, MessageContent};
use crate::messages;
use crate::reservation::{LedgerError, ReservationLedger};

/// Fixed shortlist size for nearby-shop suggestions.
const NEARBY_SHOP_COUNT: usize = 3;

/// How long processed webhook event ids are remembered.
///
/// LINE's redelivery window is shorter than this, so a retried batch skips
/// events that already ran.
const EVENT_DEDUP_TTL: Duration = Duration::from_secs(600);

/// Upper bound on remembered event ids.
const EVENT_DEDUP_CAPACITY: u64 = 10_000;

/// Errors the engine propagates to the batch layer.
///
/// These are collaborator failures; user-facing conditions (unknown shop,
/// malformed command) never surface here.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Catalog lookup failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Ledger append failed.
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    /// Reply delivery failed.
    #[error("Gateway error: {0}")]
    Gateway(#[from] LineError),
}

/// Outbound side of the messaging gateway.
///
/// [`LineClient`] is the production implementation; tests substitute a
/// recording fake.
pub trait MessagingGateway: Send + Sync {
    /// Send reply messages for an inbound event's reply token.
    fn reply(
        &self,
        reply_token: &str,
        messages: Vec<Message>,
    ) -> impl Future<Output = Result<(), LineError>> + Send;
}

impl MessagingGateway for LineClient {
    async fn reply(&self, reply_token: &str, messages: Vec<Message>) -> Result<(), LineError> {
        Self::reply(self, reply_token, messages).await
    }
}

/// Routes inbound events to the catalog, ledger, and gateway.
pub struct ConversationEngine<G> {
    gateway: G,
    catalog: Arc<dyn Catalog>,
    ledger: Arc<dyn ReservationLedger>,
    parser: CommandParser,
    seen_events: Cache<String, ()>,
}

impl<G: MessagingGateway> ConversationEngine<G> {
    /// Create an engine with injected collaborators.
    #[must_use]
    pub fn new(
        gateway: G,
        catalog: Arc<dyn Catalog>,
        ledger: Arc<dyn ReservationLedger>,
        reserve_mode: ReserveArgumentMode,
    ) -> Self {
        Self {
            gateway,
            catalog,
            ledger,
            parser: CommandParser::new(reserve_mode),
            seen_events: Cache::builder()
                .max_capacity(EVENT_DEDUP_CAPACITY)
                .time_to_live(EVENT_DEDUP_TTL)
                .build(),
        }
    }

    /// Handle one webhook event.
    ///
    /// Non-message events and non-text/non-location messages produce no
    /// reply. Events whose id was already processed within the dedup window
    /// are skipped, so an at-least-once redelivery does not double-append
    /// reservations.
    ///
    /// # Errors
    ///
    /// Returns error on collaborator failure (catalog, ledger, or reply
    /// delivery); the batch layer fails the whole delivery so the gateway
    /// retries it.
    #[instrument(skip(self, event))]
    pub async fn handle(&self, event: &Event) -> Result<(), EngineError> {
        let Event::Message {
            reply_token,
            source,
            message,
            webhook_event_id,
            ..
        } = event
        else {
            debug!("Ignoring non-message event");
            return Ok(());
        };

        if let Some(event_id) = webhook_event_id {
            if self.seen_events.contains_key(event_id) {
                debug!(event_id, "Skipping already-processed event");
                return Ok(());
            }
        }

        let reply = match message {
            MessageContent::Location {
                latitude,
                longitude,
            } => Some(self.nearby_shops(GeoPoint::new(*latitude, *longitude))?),
            MessageContent::Text { text } => Some(self.dispatch_text(source, text)?),
            MessageContent::Other => {
                debug!("Ignoring unsupported message type");
                None
            }
        };

        if let Some(messages) = reply {
            self.gateway.reply(reply_token, messages).await?;
        }

        // Mark processed only after the reply went out, so failures retry
        if let Some(event_id) = webhook_event_id {
            self.seen_events.insert(event_id.clone(), ());
        }

        Ok(())
    }

    /// Rank catalog shops by distance and offer the top candidates.
    fn nearby_shops(&self, origin: GeoPoint) -> Result<Vec<Message>, EngineError> {
        let mut shops = Vec::new();
        for key in self.catalog.keys()? {
            if let Some(shop) = self.catalog.get(&key)? {
                shops.push(shop);
            }
        }

        let ranked = nearest(
            origin,
            shops.iter().map(|s| (s.key.clone(), s.location)),
            NEARBY_SHOP_COUNT,
        );
        debug!(candidates = ranked.len(), "Ranked nearby shops");

        let shortlist: Vec<&ShopRecord> = ranked
            .iter()
            .filter_map(|candidate| shops.iter().find(|s| s.key == candidate.shop_key))
            .collect();

        Ok(vec![messages::build_nearby_quick_reply(shortlist)])
    }

    /// Parse a text message and dispatch the resulting command.
    fn dispatch_text(
        &self,
        source: &EventSource,
        text: &str,
    ) -> Result<Vec<Message>, EngineError> {
        let command = self.parser.parse(text);
        debug!(?command, "Parsed command");

        match command {
            Command::WhoAmI => {
                let user_id = source.user_id.as_deref().unwrap_or("unknown");
                Ok(vec![Message::text(user_id)])
            }
            Command::SelectShop { shop_key } => match self.catalog.get(&shop_key)? {
                Some(shop) => Ok(vec![messages::build_item_buttons(&shop)]),
                None => Ok(vec![messages::build_not_found()]),
            },
            Command::ListToday { shop_key } => match self.catalog.get(&shop_key)? {
                Some(shop) => Ok(vec![messages::build_today_listing(&shop)]),
                None => Ok(vec![messages::build_not_found()]),
            },
            Command::Reserve {
                shop_key,
                item_name,
                quantity,
            } => {
                // Shop existence is confirmed here, once; the ledger does
                // not validate it again.
                let Some(shop) = self.catalog.get(&shop_key)? else {
                    return Ok(vec![messages::build_not_found()]);
                };

                let user_id =
                    UserId::new(source.user_id.clone().unwrap_or_else(|| "unknown".to_owned()));
                let entry = ReservationEntry::new(user_id, item_name.clone(), quantity);
                self.ledger.append(&shop_key, entry)?;

                info!(shop = %shop_key, quantity, "Reservation recorded");
                Ok(vec![messages::build_reservation_confirmation(
                    &shop.name,
                    item_name.as_deref(),
                    quantity,
                )])
            }
            Command::ShowHelp => Ok(vec![messages::build_help()]),
        }
    }
}

impl<G> std::fmt::Debug for ConversationEngine<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversationEngine")
            .field("parser", &self.parser)
            .finish_non_exhaustive()
    }
}
