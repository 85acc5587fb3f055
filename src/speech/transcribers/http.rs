//! Remote speech-to-text over HTTP.
//!
//! Posts the recording as the raw request body (`Content-Type: audio/wav`) to
//! `<base_url>/audio/transcriptions` and expects `{"text": "..."}` back.

use async_trait::async_trait;
use log::{debug, info};
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;

use crate::speech::{TranscribeError, Transcriber};

#[derive(Deserialize)]
struct TranscriptionResponse {
    text: String,
}

pub struct HttpTranscriber {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    model: Option<String>,
}

impl HttpTranscriber {
    pub fn new(base_url: String, api_key: Option<String>, model: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            api_key,
            model,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/audio/transcriptions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl Transcriber for HttpTranscriber {
    fn name(&self) -> &str {
        "http"
    }

    async fn transcribe(&self, audio: &[u8]) -> Result<String, TranscribeError> {
        if self.base_url.trim().is_empty() {
            return Err(TranscribeError::Config("transcriber base_url is empty".into()));
        }

        let url = self.endpoint();
        info!("Sending {} bytes of audio to {}", audio.len(), url);

        let mut request = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "audio/wav")
            .body(audio.to_vec());
        if let Some(ref model) = self.model {
            request = request.query(&[("model", model.as_str())]);
        }
        if let Some(ref key) = self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| TranscribeError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(TranscribeError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: TranscriptionResponse = response
            .json()
            .await
            .map_err(|e| TranscribeError::Parse(e.to_string()))?;
        debug!("Transcription response: {} chars", body.text.len());
        Ok(body.text)
    }
}
