pub mod image;
pub mod text;
pub mod url;

use crate::config::{AppConfig, LimitsConfig};
use crate::error::PipelineError;
use crate::images_to_text::OcrEngine;
use crate::model::{InputVariant, NormalizedContent};
use crate::url_to_text::fetchers::RequestFetcher;

/// Converts any [`InputVariant`] into [`NormalizedContent`].
///
/// Each variant narrows its failures to a single error kind: `FetchFailed`
/// for pages and `OcrFailed` for images. Malformed input of any kind is
/// `InvalidInput`.
#[derive(Debug, Clone)]
pub struct ContentExtractor {
    fetcher: RequestFetcher,
    ocr: OcrEngine,
    limits: LimitsConfig,
}

impl ContentExtractor {
    pub fn new(fetcher: RequestFetcher, ocr: OcrEngine, limits: LimitsConfig) -> Self {
        Self {
            fetcher,
            ocr,
            limits,
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, reqwest::Error> {
        let fetcher = RequestFetcher::new(&config.fetch, config.limits.max_page_bytes)?;
        let ocr = OcrEngine::new(&config.ocr);
        Ok(Self::new(fetcher, ocr, config.limits.clone()))
    }

    pub fn ocr_engine(&self) -> &OcrEngine {
        &self.ocr
    }

    pub async fn extract(&self, input: &InputVariant) -> Result<NormalizedContent, PipelineError> {
        match input {
            InputVariant::Text(body) => text::process(body, self.limits.max_text_chars),
            InputVariant::Url(address) => url::process(&self.fetcher, address).await,
            InputVariant::Image { bytes, mime_type } => {
                image::process(&self.ocr, bytes, mime_type, self.limits.max_image_bytes).await
            }
        }
    }
}
