/// LLM Client: the single point of entry for all inference calls in SkillSense.
///
/// ARCHITECTURAL RULE: No other module may call the Ollama HTTP API directly.
/// Handlers depend on `InferenceBackend`; `OllamaClient` is the production implementation.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::Config;

pub mod prompts;

const GENERATE_PATH: &str = "/api/generate";
const TAGS_PATH: &str = "/api/tags";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Cannot reach inference endpoint: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Inference endpoint returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Inference call exceeded {0:?}")]
    Timeout(Duration),

    #[error("Malformed inference response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Sampling options forwarded verbatim as Ollama's `options` object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GenerationOptions {
    pub temperature: f32,
    pub num_predict: u32,
}

impl GenerationOptions {
    pub const fn new(temperature: f32, num_predict: u32) -> Self {
        Self {
            temperature,
            num_predict,
        }
    }
}

/// Anything that can turn a prompt into generated text.
///
/// Carried in `AppState` as `Arc<dyn InferenceBackend>` so tests can swap in a fake.
#[async_trait]
pub trait InferenceBackend: Send + Sync {
    /// Model identifier sent with every generation request.
    fn model(&self) -> &str;

    /// Runs one non-streaming generation and returns the model's text.
    async fn generate(&self, prompt: &str, options: GenerationOptions)
        -> Result<String, LlmError>;

    /// Lightweight connectivity check.
    async fn ping(&self) -> Result<(), LlmError>;
}

/// Calls `backend.generate` once, failing with `LlmError::Timeout` if it runs past `limit`.
/// No retries.
pub async fn generate_bounded(
    backend: &dyn InferenceBackend,
    prompt: &str,
    options: GenerationOptions,
    limit: Duration,
) -> Result<String, LlmError> {
    match tokio::time::timeout(limit, backend.generate(prompt, options)).await {
        Ok(result) => result,
        Err(_) => Err(LlmError::Timeout(limit)),
    }
}

#[derive(Debug, Serialize)]
struct OllamaGenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerationOptions,
}

#[derive(Debug, Deserialize)]
struct OllamaGenerateResponse {
    #[serde(default)]
    response: String,
    #[serde(default)]
    prompt_eval_count: Option<u32>,
    #[serde(default)]
    eval_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct OllamaError {
    error: String,
}

/// Ollama HTTP client. Cheap to clone; the inner `reqwest::Client` pools connections.
#[derive(Clone)]
pub struct OllamaClient {
    client: Client,
    base_url: String,
    model: String,
    inference_timeout: Duration,
    health_timeout: Duration,
}

impl OllamaClient {
    pub fn new(config: &Config) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(config.inference_timeout).build()?,
            base_url: config.ollama_base_url.trim_end_matches('/').to_string(),
            model: config.ollama_model.clone(),
            inference_timeout: config.inference_timeout,
            health_timeout: config.health_timeout,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn classify(err: reqwest::Error, limit: Duration) -> LlmError {
    if err.is_timeout() {
        LlmError::Timeout(limit)
    } else {
        LlmError::Http(err)
    }
}

#[async_trait]
impl InferenceBackend for OllamaClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(
        &self,
        prompt: &str,
        options: GenerationOptions,
    ) -> Result<String, LlmError> {
        let request_body = OllamaGenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            options,
        };

        let response = self
            .client
            .post(self.url(GENERATE_PATH))
            .json(&request_body)
            .send()
            .await
            .map_err(|e| classify(e, self.inference_timeout))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| classify(e, self.inference_timeout))?;

        if !status.is_success() {
            let message = serde_json::from_str::<OllamaError>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let generated: OllamaGenerateResponse = serde_json::from_str(&body)?;

        debug!(
            "Generation succeeded: model={}, prompt_tokens={:?}, output_tokens={:?}",
            self.model, generated.prompt_eval_count, generated.eval_count
        );

        Ok(generated.response.trim().to_string())
    }

    async fn ping(&self) -> Result<(), LlmError> {
        let response = self
            .client
            .get(self.url(TAGS_PATH))
            .timeout(self.health_timeout)
            .send()
            .await
            .map_err(|e| classify(e, self.health_timeout))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(LlmError::Api {
                status: status.as_u16(),
                message: "model listing failed".to_string(),
            })
        }
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let inner = if let Some(stripped) = text.strip_prefix("```json") {
        stripped
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
    } else {
        return text;
    };
    let inner = inner.trim_start();
    inner
        .strip_suffix("```")
        .map(|s| s.trim())
        .unwrap_or(inner.trim_end())
}

/// Narrows model output to its outermost `{ ... }` span, if there is one.
pub fn extract_json_object(text: &str) -> &str {
    let text = strip_json_fences(text);
    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if end > start => &text[start..=end],
        _ => text,
    }
}

/// Deserializes the JSON object embedded in a model reply.
pub fn parse_json_reply<T: DeserializeOwned>(text: &str) -> Result<T, LlmError> {
    serde_json::from_str(extract_json_object(text)).map_err(LlmError::Parse)
}
