use base64::{engine::general_purpose::STANDARD, Engine as _};
use log::{debug, error};
use reqwest::Client;
use serde_json::{json, Value};
use std::error::Error;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::config::OcrConfig;
use crate::error::PipelineError;

/// Google Cloud Vision text recognition, configured for one language.
///
/// Each call to [`OcrEngine::recognize`] acquires a fresh [`OcrWorker`] and
/// releases it before returning, whether recognition succeeded or not.
#[derive(Debug, Clone)]
pub struct OcrEngine {
    api_key: Option<String>,
    base_url: String,
    language: String,
    timeout: Duration,
    active_workers: Arc<AtomicUsize>,
}

impl OcrEngine {
    pub fn new(config: &OcrConfig) -> Self {
        Self {
            api_key: config.resolve_api_key(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            language: config.language.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
            active_workers: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of workers currently alive
    pub fn active_workers(&self) -> usize {
        self.active_workers.load(Ordering::SeqCst)
    }

    /// Recognize all text in an image
    ///
    /// # Errors
    /// Any failure (missing API key, transport error, API error, no text
    /// detected) is reported as [`PipelineError::OcrFailed`].
    pub async fn recognize(&self, image: &[u8], mime_type: &str) -> Result<String, PipelineError> {
        debug!(
            "Running OCR on {} byte {} image (language: {})",
            image.len(),
            mime_type,
            self.language
        );

        let result = match self.acquire() {
            Ok(worker) => worker.recognize(image).await,
            Err(e) => Err(e),
        };

        result.map_err(|e| {
            error!("OCR failed: {}", e);
            PipelineError::OcrFailed
        })
    }

    fn acquire(&self) -> Result<OcrWorker, Box<dyn Error + Send + Sync>> {
        let api_key = self
            .api_key
            .clone()
            .ok_or("GOOGLE_API_KEY not found in config or environment")?;

        let client = Client::builder().timeout(self.timeout).build()?;

        self.active_workers.fetch_add(1, Ordering::SeqCst);
        debug!("Acquired OCR worker");

        Ok(OcrWorker {
            client,
            api_key,
            endpoint: format!("{}/v1/images:annotate", self.base_url),
            language: self.language.clone(),
            active_workers: Arc::clone(&self.active_workers),
        })
    }
}

/// A single-use recognition session. Released on drop.
pub struct OcrWorker {
    client: Client,
    api_key: String,
    endpoint: String,
    language: String,
    active_workers: Arc<AtomicUsize>,
}

impl OcrWorker {
    /// Calls the Vision API on the full image, no cropping
    pub async fn recognize(&self, image: &[u8]) -> Result<String, Box<dyn Error + Send + Sync>> {
        let request_body = json!({
            "requests": [{
                "image": {
                    "content": STANDARD.encode(image)
                },
                "features": [{
                    "type": "TEXT_DETECTION"
                }],
                "imageContext": {
                    "languageHints": [self.language]
                }
            }]
        });

        debug!("Sending OCR request to Google Vision API");

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .header("Accept-Encoding", "identity")
            .json(&request_body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            return Err(format!("Google Vision API error ({}): {}", status, error_text).into());
        }

        let response_body: Value = response.json().await?;

        if let Some(message) = response_body["responses"][0]["error"]["message"].as_str() {
            return Err(format!("Google Vision API error: {}", message).into());
        }

        // The API returns all detected text in the full text annotation
        let text = response_body["responses"][0]["fullTextAnnotation"]["text"]
            .as_str()
            .ok_or("No text found in image")?
            .to_string();

        if text.trim().is_empty() {
            return Err("No text detected in image".into());
        }

        debug!("Extracted text from image: {} characters", text.chars().count());

        Ok(text)
    }
}

impl Drop for OcrWorker {
    fn drop(&mut self) {
        self.active_workers.fetch_sub(1, Ordering::SeqCst);
        debug!("Released OCR worker");
    }
}
