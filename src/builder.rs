use std::sync::Arc;
use std::time::Duration;

use log::{info, warn};

use crate::config::AppConfig;
use crate::error::SetupError;
use crate::generator::SeoGenerator;
use crate::pipelines::ContentExtractor;
use crate::providers::{GenerationClient, HuggingFaceProvider, LlmProvider};

/// Builder for configuring a [`SeoGenerator`]
#[derive(Default)]
pub struct SeoGeneratorBuilder {
    config: Option<AppConfig>,
    provider: Option<Arc<dyn LlmProvider>>,
    api_key: Option<String>,
    model: Option<String>,
    timeout: Option<Duration>,
}

impl SeoGeneratorBuilder {
    /// Use a loaded configuration instead of the defaults
    ///
    /// # Example
    /// ```
    /// use seo_meta_gen::{AppConfig, SeoGenerator};
    ///
    /// let builder = SeoGenerator::builder().config(AppConfig::default());
    /// ```
    pub fn config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the inference API key
    ///
    /// This allows passing the key directly instead of relying on
    /// environment variables or config files.
    ///
    /// # Example
    /// ```
    /// use seo_meta_gen::SeoGenerator;
    ///
    /// let builder = SeoGenerator::builder().api_key("hf_xxx");
    /// ```
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the model identifier on the inference endpoint
    ///
    /// # Example
    /// ```
    /// use seo_meta_gen::SeoGenerator;
    ///
    /// let builder = SeoGenerator::builder()
    ///     .model("mistralai/Mistral-7B-Instruct-v0.2");
    /// ```
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the timeout for each generation call
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Use a custom provider instead of the Hugging Face endpoint.
    ///
    /// Credential settings are ignored when a provider is given.
    pub fn provider(mut self, provider: Arc<dyn LlmProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Build the generator
    ///
    /// A missing inference credential is not an error here: the generator is
    /// built without a client and reports
    /// [`crate::PipelineError::MissingCredential`] on each request.
    ///
    /// # Errors
    /// Returns [`SetupError::HttpClient`] if an HTTP client cannot be created.
    ///
    /// # Example
    /// ```no_run
    /// # use seo_meta_gen::{InputVariant, SeoGenerator};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let generator = SeoGenerator::builder().api_key("hf_xxx").build()?;
    /// let result = generator
    ///     .generate(&InputVariant::Url("https://example.com/post".to_string()))
    ///     .await?;
    /// println!("{}\n{}", result.title, result.description);
    /// # Ok(())
    /// # }
    /// ```
    pub fn build(self) -> Result<SeoGenerator, SetupError> {
        let mut config = self.config.unwrap_or_default();
        if let Some(key) = self.api_key {
            config.inference.api_key = Some(key);
        }
        if let Some(model) = self.model {
            config.inference.model = model;
        }
        if let Some(timeout) = self.timeout {
            config.inference.timeout_secs = timeout.as_secs().max(1);
        }

        let extractor = ContentExtractor::from_config(&config)?;

        let client = match self.provider {
            Some(provider) => Some(GenerationClient::new(provider)),
            None => match config.inference.resolve_api_key() {
                Some(key) => {
                    let provider = HuggingFaceProvider::new(key, &config.inference)?;
                    info!("Using inference endpoint {}", provider.endpoint());
                    Some(GenerationClient::new(Arc::new(provider)))
                }
                None => {
                    warn!("No inference API key configured; generation requests will fail");
                    None
                }
            },
        };

        Ok(SeoGenerator {
            extractor,
            client,
            min_content_chars: config.limits.min_content_chars,
        })
    }
}

impl SeoGenerator {
    /// Creates a new builder
    ///
    /// # Example
    /// ```
    /// use seo_meta_gen::SeoGenerator;
    ///
    /// let builder = SeoGenerator::builder();
    /// ```
    pub fn builder() -> SeoGeneratorBuilder {
        SeoGeneratorBuilder::default()
    }
}
