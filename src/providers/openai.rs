use super::http_client::build_provider_client;
use super::traits::{CompletionRequest, GeneratedImage, ImageRequest, Provider};
use anyhow::Context;
use async_trait::async_trait;
use base64::Engine as _;
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

pub struct OpenAiProvider {
    base_url: String,
    /// Pre-computed `"Bearer <key>"` header value (avoids `format!` per request).
    cached_auth_header: Option<String>,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    r#type: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Serialize)]
struct ImagesRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    size: &'a str,
    n: u8,
}

#[derive(Debug, Deserialize)]
struct ImagesResponse {
    #[serde(default)]
    data: Vec<ImageData>,
}

#[derive(Debug, Deserialize)]
struct ImageData {
    url: Option<String>,
    b64_json: Option<String>,
}

impl OpenAiProvider {
    /// Any OpenAI-compatible endpoint, e.g. a proxy or a local mock.
    pub fn with_base_url(base_url: &str, api_key: Option<&str>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            cached_auth_header: api_key.map(|k| format!("Bearer {k}")),
            client: build_provider_client(),
        }
    }

    fn build_chat_request<'a>(request: &CompletionRequest<'a>) -> ChatRequest<'a> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = request.system_prompt {
            messages.push(Message {
                role: "system",
                content: system,
            });
        }
        messages.push(Message {
            role: "user",
            content: request.prompt,
        });

        ChatRequest {
            model: request.model,
            messages,
            temperature: request.temperature,
            response_format: request.json_object.then_some(ResponseFormat {
                r#type: "json_object",
            }),
        }
    }

    fn extract_text(chat_response: ChatResponse) -> anyhow::Result<String> {
        chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| anyhow::anyhow!("No response from OpenAI"))
    }

    fn extract_image(response: ImagesResponse) -> anyhow::Result<GeneratedImage> {
        let first = response
            .data
            .into_iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("OpenAI returned no image"))?;
        if let Some(url) = first.url
            && !url.is_empty()
        {
            return Ok(GeneratedImage::Url(url));
        }
        let encoded = first
            .b64_json
            .ok_or_else(|| anyhow::anyhow!("OpenAI image carried neither url nor b64_json"))?;
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(encoded.trim())
            .context("OpenAI image b64_json decode failed")?;
        Ok(GeneratedImage::Bytes(bytes))
    }

    fn auth_header(&self) -> anyhow::Result<&str> {
        self.cached_auth_header.as_deref().ok_or_else(|| {
            anyhow::anyhow!("OpenAI API key not set. Set OPENAI_API_KEY or edit blog-generator.toml.")
        })
    }

    async fn post_json<B, R>(&self, endpoint: &str, body: &B) -> anyhow::Result<R>
    where
        B: Serialize + Sync,
        R: serde::de::DeserializeOwned,
    {
        let auth_header = self.auth_header()?;

        let response = self
            .client
            .post(format!("{}/{endpoint}", self.base_url))
            .header("Authorization", auth_header)
            .json(body)
            .send()
            .await
            .context("OpenAI request failed")?;

        if !response.status().is_success() {
            return Err(super::api_error("OpenAI", response).await);
        }

        response
            .json()
            .await
            .context("OpenAI response JSON decode failed")
    }
}

#[async_trait]
impl Provider for OpenAiProvider {
    fn name(&self) -> &str {
        "OpenAI"
    }

    async fn complete(&self, request: &CompletionRequest<'_>) -> anyhow::Result<String> {
        let body = Self::build_chat_request(request);
        tracing::debug!(model = request.model, json = request.json_object, "chat completion");
        let response: ChatResponse = self.post_json("chat/completions", &body).await?;
        Self::extract_text(response)
    }

    async fn generate_image(&self, request: &ImageRequest<'_>) -> anyhow::Result<GeneratedImage> {
        let body = ImagesRequest {
            model: request.model,
            prompt: request.prompt,
            size: request.size,
            n: 1,
        };
        tracing::debug!(model = request.model, size = request.size, "image generation");
        let response: ImagesResponse = self.post_json("images/generations", &body).await?;
        Self::extract_image(response)
    }
}
