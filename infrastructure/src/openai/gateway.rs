//! OpenAI Chat Gateway implementation

use crate::openai::protocol::{ChatCompletionRequest, ModerationRequest, ModerationResponse};
use async_trait::async_trait;
use explain_application::ports::chat_gateway::{
    ChatGateway, ChatRequest, ChunkStream, GatewayConnector, GatewayError, ModerationVerdict,
};
use explain_domain::ApiKey;
use futures::StreamExt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Connection settings shared by every gateway the connector builds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenAiSettings {
    pub base_url: String,
    pub connect_timeout: Option<Duration>,
}

impl Default for OpenAiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: None,
        }
    }
}

/// Chat Gateway bound to one API key
pub struct OpenAiGateway {
    client: reqwest::Client,
    base_url: String,
    api_key: ApiKey,
}

impl OpenAiGateway {
    pub fn new(api_key: ApiKey, settings: &OpenAiSettings) -> Result<Self, GatewayError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| GatewayError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post<B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<reqwest::Response, GatewayError> {
        let url = self.url(path);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.api_key.expose())
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    warn!("Could not read error body from {} ({}): {}", url, status, e);
                    String::new()
                }
            };
            debug!("POST {} failed with {}", url, status);
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl ChatGateway for OpenAiGateway {
    async fn moderate(&self, input: &str, model: &str) -> Result<ModerationVerdict, GatewayError> {
        let response = self
            .post("/v1/moderations", &ModerationRequest { input, model })
            .await?;

        let raw: serde_json::Value = response.json().await.map_err(transport_error)?;
        let parsed: ModerationResponse = serde_json::from_value(raw.clone())
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;

        Ok(ModerationVerdict {
            flagged: parsed.flagged(),
            raw,
        })
    }

    async fn stream_chat(&self, request: &ChatRequest) -> Result<ChunkStream, GatewayError> {
        let body = ChatCompletionRequest {
            model: &request.model,
            messages: &request.messages,
            temperature: request.temperature,
            stream: true,
        };
        let response = self.post("/v1/chat/completions", &body).await?;
        debug!("Chat stream opened ({})", request.model);

        let stream = response
            .bytes_stream()
            .map(|chunk| chunk.map(|bytes| bytes.to_vec()).map_err(transport_error));
        Ok(stream.boxed())
    }
}

fn transport_error(e: reqwest::Error) -> GatewayError {
    if e.is_decode() {
        GatewayError::InvalidResponse(e.to_string())
    } else {
        GatewayError::Connection(e.to_string())
    }
}

/// Builds [`OpenAiGateway`]s for the credential service.
pub struct OpenAiConnector {
    settings: OpenAiSettings,
}

impl OpenAiConnector {
    pub fn new(settings: OpenAiSettings) -> Self {
        Self { settings }
    }
}

impl GatewayConnector for OpenAiConnector {
    fn connect(&self, key: &ApiKey) -> Result<Arc<dyn ChatGateway>, GatewayError> {
        let gateway = OpenAiGateway::new(key.clone(), &self.settings)?;
        info!("OpenAI gateway ready ({})", self.settings.base_url);
        Ok(Arc::new(gateway))
    }
}
