//! Ollama reasoner for the `--backend ollama` option
//!
//! Talks to a local Ollama server over its HTTP API and is injected into the
//! library as an external [`ReasoningBackend`].

use async_trait::async_trait;
use chronosense::backend::{BackendError, BackendResult, ReasoningBackend};
use chronosense::BackendConfig;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub struct OllamaBackend {
    client: Client,
    api_base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl OllamaBackend {
    pub fn new(config: &BackendConfig) -> BackendResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| BackendError::Unavailable(e.to_string()))?;

        Ok(Self {
            client,
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }
}

#[async_trait]
impl ReasoningBackend for OllamaBackend {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn probe(&self) -> BackendResult<()> {
        let url = format!("{}/api/tags", self.api_base_url);
        let resp = self
            .client
            .get(&url)
            .timeout(Duration::from_secs(5))
            .send()
            .await
            .map_err(|e| BackendError::NetworkError(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(BackendError::Unavailable(format!("Ollama status: {}", resp.status())));
        }
        Ok(())
    }

    async fn generate(&self, prompt: &str) -> BackendResult<String> {
        #[derive(Serialize)]
        struct Options {
            temperature: f32,
            num_predict: u32,
        }

        #[derive(Serialize)]
        struct Request<'a> {
            model: &'a str,
            prompt: &'a str,
            stream: bool,
            options: Options,
        }

        #[derive(Deserialize)]
        struct Response {
            response: String,
        }

        let url = format!("{}/api/generate", self.api_base_url);
        let resp = self
            .client
            .post(&url)
            .json(&Request {
                model: &self.model,
                prompt,
                stream: false,
                options: Options {
                    temperature: self.temperature,
                    num_predict: self.max_tokens,
                },
            })
            .send()
            .await
            .map_err(|e| BackendError::NetworkError(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(BackendError::ApiError(format!("Ollama error {}: {}", status, text)));
        }

        let result: Response = resp
            .json()
            .await
            .map_err(|e| BackendError::SerializationError(e.to_string()))?;
        Ok(result.response)
    }
}
