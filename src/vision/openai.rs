//! OpenAI-compatible chat completions client for receipt photos

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::config::settings::VisionSettings;
use crate::error::{SplitterError, SplitterResult};
use crate::session::ports::{VisionBridge, VisionExchange, VisionTurn};

/// Instructions sent with every photo
pub const RECEIPT_PROMPT: &str = r#"Please find attached a photograph of a grocery receipt.

Parse the photo and return the items in the exact JSON format of the example below. Output only
the JSON array: no greeting, no explanation and no backticks wrapper.

If there are fees at the end of the receipt, include them as items. Discounts should also be
included and have negative prices.

Example:

[
	{"name":"Smoky BBQ wings","euro_cents":399},
	{"name":"Smoky BBQ wings Discount","euro_cents":-399},
	{"name":"PopChips BBQ 5pk","euro_cents":249},
	{"name":"Whole Milk 2L","euro_cents":209}
]"#;

/// Chat completions client holding an API key
pub struct OpenAiVision {
    http: reqwest::Client,
    api_key: String,
    settings: VisionSettings,
}

impl OpenAiVision {
    pub fn new(api_key: String, settings: VisionSettings) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            settings,
        }
    }
}

#[async_trait]
impl VisionBridge for OpenAiVision {
    async fn read_receipt(&self, exchange: &VisionExchange) -> SplitterResult<String> {
        let body = build_request(&self.settings, exchange);
        info!(
            model = %self.settings.model,
            image_bytes = exchange.image.len(),
            turns = exchange.turns.len(),
            "sending receipt photo to vision model"
        );

        let response = self
            .http
            .post(&self.settings.api_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| SplitterError::Vision(format!("request failed: {}", e)))?;

        let status = response.status();
        let payload: Value = response
            .json()
            .await
            .map_err(|e| SplitterError::Vision(format!("unreadable response ({}): {}", status, e)))?;
        if !status.is_success() {
            return Err(SplitterError::Vision(format!(
                "API returned {}: {}",
                status,
                error_message(&payload)
            )));
        }

        let content = reply_content(&payload)
            .ok_or_else(|| SplitterError::Vision("response has no message content".into()))?;
        debug!(chars = content.len(), "vision reply received");
        Ok(content)
    }
}

/// Vision bridge selected from the available credentials
pub enum VisionClient {
    Active(OpenAiVision),
    /// No API key: photos are refused
    Disabled,
}

impl VisionClient {
    pub fn from_key(api_key: Option<String>, settings: &VisionSettings) -> Self {
        match api_key {
            Some(key) if !key.trim().is_empty() => {
                VisionClient::Active(OpenAiVision::new(key, settings.clone()))
            }
            _ => VisionClient::Disabled,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, VisionClient::Active(_))
    }
}

#[async_trait]
impl VisionBridge for VisionClient {
    async fn read_receipt(&self, exchange: &VisionExchange) -> SplitterResult<String> {
        match self {
            VisionClient::Active(client) => client.read_receipt(exchange).await,
            VisionClient::Disabled => Err(SplitterError::Vision(
                "photo reading is disabled, set OPENAI_API_KEY to enable it".into(),
            )),
        }
    }
}

/// Build the chat completions request body
///
/// The first user message carries the instructions and the image; the
/// turns follow as assistant replies and user follow-ups.
pub fn build_request(settings: &VisionSettings, exchange: &VisionExchange) -> Value {
    let image_url = format!(
        "data:{};base64,{}",
        image_media_type(&exchange.image),
        STANDARD.encode(&exchange.image)
    );

    let mut messages = vec![json!({
        "role": "user",
        "content": [
            { "type": "text", "text": RECEIPT_PROMPT },
            { "type": "image_url", "image_url": { "url": image_url } }
        ]
    })];
    messages.extend(exchange.turns.iter().map(|turn| match turn {
        VisionTurn::Reply(text) => json!({ "role": "assistant", "content": text }),
        VisionTurn::FollowUp(text) => json!({ "role": "user", "content": text }),
    }));

    json!({
        "model": settings.model,
        "max_tokens": settings.max_tokens,
        "messages": messages
    })
}

fn image_media_type(image: &[u8]) -> &'static str {
    if image.starts_with(b"\x89PNG") {
        "image/png"
    } else {
        "image/jpeg"
    }
}

fn reply_content(payload: &Value) -> Option<String> {
    payload
        .get("choices")?
        .get(0)?
        .get("message")?
        .get("content")?
        .as_str()
        .map(str::to_string)
}

fn error_message(payload: &Value) -> String {
    payload
        .get("error")
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| payload.to_string())
}
