//! HTTP client: open a conversation, ask a question, ingest a data source.
//!
//! Every call is one POST with a JSON body followed by a JSON decode of the
//! full response body. No timeout, no retry.

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::{ApiKey, Settings};
use crate::messages::{ChatRequest, ChatResponse, IngestRequest, JsonMap, NewConversationRequest};

pub const NEW_CONVERSATION: &str = "newConversation";
pub const CHAT: &str = "mendableChat";
pub const INGEST_DATA: &str = "ingestData";

/// Client for one API key and base URL.
pub struct MendableClient {
    http: reqwest::Client,
    base_url: String,
    api_key: ApiKey,
}

/// Request failure, by stage.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("cannot encode request: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("cannot decode response: {0}")]
    Decode(#[source] serde_json::Error),
}

impl MendableClient {
    pub fn new(settings: &Settings) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
        }
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint)
    }

    /// POST `body` as JSON to `endpoint` and decode the response body as `R`.
    ///
    /// The response is read to the end before decoding, so the connection is
    /// released when this returns on every path.
    async fn post_json<B, R>(
        &self,
        endpoint: &str,
        body: &B,
        accept: &str,
    ) -> Result<R, ClientError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let payload = serde_json::to_vec(body).map_err(ClientError::Encode)?;
        let response = self
            .http
            .post(self.url(endpoint))
            .header(ACCEPT, accept)
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        tracing::debug!(endpoint, %status, len = bytes.len(), "response received");
        serde_json::from_slice(&bytes).map_err(ClientError::Decode)
    }

    /// Open a conversation; returns the raw response map.
    pub async fn new_conversation(&self) -> Result<JsonMap, ClientError> {
        let body = NewConversationRequest {
            api_key: self.api_key.expose(),
        };
        self.post_json(NEW_CONVERSATION, &body, "application/json").await
    }

    /// Ask `question` within `conversation_id`.
    ///
    /// Sent with `Accept: text/event-stream` even though the body asks for a
    /// non-streamed reply; the server answers with plain JSON either way.
    pub async fn chat(
        &self,
        question: &str,
        conversation_id: &serde_json::Value,
    ) -> Result<ChatResponse, ClientError> {
        let body = ChatRequest::new(self.api_key.expose(), question, conversation_id);
        self.post_json(CHAT, &body, "text/event-stream").await
    }

    /// Submit a data source; returns the raw response map.
    pub async fn ingest_data(&self, url: &str, typ: &str) -> Result<JsonMap, ClientError> {
        let body = IngestRequest {
            api_key: self.api_key.expose(),
            url,
            typ,
        };
        self.post_json(INGEST_DATA, &body, "application/json").await
    }
}
