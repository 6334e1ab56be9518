//! Application state shared across handlers.

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::config::BotConfig;
use crate::engine::ConversationEngine;
use crate::line::LineClient;
use crate::reservation::ReservationLedger;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// LINE client, the conversation engine, and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: BotConfig,
    line: LineClient,
    engine: ConversationEngine<LineClient>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Bot configuration
    /// * `catalog` - Shop catalog collaborator
    /// * `ledger` - Reservation ledger collaborator
    #[must_use]
    pub fn new(
        config: BotConfig,
        catalog: Arc<dyn Catalog>,
        ledger: Arc<dyn ReservationLedger>,
    ) -> Self {
        let line = LineClient::new(
            config.channel_access_token.clone(),
            config.channel_secret.clone(),
        );
        let engine = ConversationEngine::new(line.clone(), catalog, ledger, config.reserve_mode);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                line,
                engine,
            }),
        }
    }

    /// Get a reference to the bot configuration.
    #[must_use]
    pub fn config(&self) -> &BotConfig {
        &self.inner.config
    }

    /// Get a reference to the LINE client.
    #[must_use]
    pub fn line(&self) -> &LineClient {
        &self.inner.line
    }

    /// Get a reference to the conversation engine.
    #[must_use]
    pub fn engine(&self) -> &ConversationEngine<LineClient> {
        &self.inner.engine
    }
}
