//! LINE Messaging API client.
//!
//! Provides methods for sending reply and push messages and for verifying
//! webhook signatures.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use hmac::{Hmac, Mac};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use tracing::{debug, instrument};

use super::error::LineError;
use super::types::Message;

/// LINE Messaging API base URL.
const LINE_API_BASE: &str = "https://api.line.me/v2/bot";

/// Messaging API client for replying to and pushing messages at users.
#[derive(Clone)]
pub struct LineClient {
    /// HTTP client.
    client: Client,
    /// Channel access token for authentication.
    channel_access_token: SecretString,
    /// Channel secret for verifying webhooks.
    channel_secret: SecretString,
}

impl std::fmt::Debug for LineClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineClient")
            .field("channel_access_token", &"[REDACTED]")
            .field("channel_secret", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl LineClient {
    /// Create a new LINE client.
    #[must_use]
    pub fn new(channel_access_token: SecretString, channel_secret: SecretString) -> Self {
        Self {
            client: Client::new(),
            channel_access_token,
            channel_secret,
        }
    }

    /// Send reply messages correlated to an inbound event.
    ///
    /// The reply token comes from the webhook event and is valid for a
    /// single use.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the API rejects it.
    #[instrument(skip(self, messages), fields(message_count = messages.len()))]
    pub async fn reply(&self, reply_token: &str, messages: Vec<Message>) -> Result<(), LineError> {
        #[derive(serde::Serialize)]
        #[serde(rename_all = "camelCase")]
        struct ReplyRequest {
            reply_token: String,
            messages: Vec<Message>,
        }

        let request = ReplyRequest {
            reply_token: reply_token.to_owned(),
            messages,
        };

        self.post_json("message/reply", &request).await?;
        debug!("Reply sent");
        Ok(())
    }

    /// Push messages at a user outside the reply flow.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the API rejects it.
    #[instrument(skip(self, messages), fields(to = %to, message_count = messages.len()))]
    pub async fn push(&self, to: &str, messages: Vec<Message>) -> Result<(), LineError> {
        #[derive(serde::Serialize)]
        struct PushRequest {
            to: String,
            messages: Vec<Message>,
        }

        let request = PushRequest {
            to: to.to_owned(),
            messages,
        };

        self.post_json("message/push", &request).await?;
        debug!("Push sent");
        Ok(())
    }

    async fn post_json<T: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<(), LineError> {
        let response = self
            .client
            .post(format!("{LINE_API_BASE}/{path}"))
            .bearer_auth(self.channel_access_token.expose_secret())
            .json(body)
            .send()
            .await
            .map_err(|e| LineError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .text()
                .await
                .map_err(|e| LineError::Response(e.to_string()))?;
            return Err(LineError::Api(format!("{status}: {detail}")));
        }

        Ok(())
    }

    /// Verify a LINE webhook signature.
    ///
    /// LINE signs the raw request body with HMAC-SHA256 keyed by the channel
    /// secret and sends the base64 digest in the `x-line-signature` header:
    /// <https://developers.line.biz/en/docs/messaging-api/receiving-messages/#verifying-signatures>
    ///
    /// # Errors
    ///
    /// Returns error if the signature does not match the body.
    #[instrument(skip(self, body, signature))]
    pub fn verify_signature(&self, body: &[u8], signature: &str) -> Result<(), LineError> {
        let mut mac = Hmac::<Sha256>::new_from_slice(self.channel_secret.expose_secret().as_bytes())
            .map_err(|e| LineError::InvalidSignature(e.to_string()))?;

        mac.update(body);

        let expected = BASE64.encode(mac.finalize().into_bytes());

        // Constant-time comparison
        if !constant_time_compare(&expected, signature) {
            return Err(LineError::InvalidSignature(
                "Signature mismatch".to_string(),
            ));
        }

        debug!("LINE signature verified");

        Ok(())
    }
}

/// Constant-time string comparison to prevent timing attacks.
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result: u8 = 0;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }

    result == 0
}
