use super::SpeechBackend;
use crate::config::ElevenLabsConfig;
use crate::error::BackendError;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

const XI_API_KEY_HEADER: &str = "xi-api-key";
const REQUEST_TIMEOUT_SECS: u64 = 60;

#[derive(Clone)]
pub struct ElevenLabsService {
    client: Client,
    base_url: String,
    api_key: String,
    model_id: String,
    output_format: String,
}

#[derive(Serialize)]
struct SpeechRequest<'a> {
    text: &'a str,
    model_id: &'a str,
}

impl ElevenLabsService {
    /// Requests raw PCM at `sample_rate` so responses decode without a codec.
    pub fn new(config: &ElevenLabsConfig, sample_rate: u32) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .unwrap_or_default(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model_id: config.model_id.clone(),
            output_format: format!("pcm_{}", sample_rate),
        }
    }
}

#[async_trait]
impl SpeechBackend for ElevenLabsService {
    async fn synthesize(&self, text: &str, voice_id: &str) -> Result<Vec<u8>, BackendError> {
        let url = format!("{}/v1/text-to-speech/{}", self.base_url, voice_id);

        let response = self
            .client
            .post(url)
            .query(&[("output_format", self.output_format.as_str())])
            .header(XI_API_KEY_HEADER, &self.api_key)
            .json(&SpeechRequest {
                text,
                model_id: &self.model_id,
            })
            .send()
            .await
            .map_err(|e| BackendError::new(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            // The body carries the provider's reason (e.g. quota_exceeded)
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::new(format!("{}: {}", status, body)));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| BackendError::new(e.to_string()))?;
        debug!("Backend returned {} bytes", bytes.len());
        Ok(bytes.to_vec())
    }
}
