use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Text-generation endpoint settings
    #[serde(default)]
    pub inference: InferenceConfig,
    /// Web page fetching settings
    #[serde(default)]
    pub fetch: FetchConfig,
    /// Image text recognition settings
    #[serde(default)]
    pub ocr: OcrConfig,
    /// Input size bounds
    #[serde(default)]
    pub limits: LimitsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Socket address the HTTP server binds to
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
        }
    }
}

/// Configuration for the hosted inference endpoint
#[derive(Debug, Deserialize, Clone)]
pub struct InferenceConfig {
    /// Bearer token (can also be set via the HF_API_KEY environment variable)
    pub api_key: Option<String>,
    /// Base URL; the model identifier is appended as a path segment
    #[serde(default = "default_inference_base_url")]
    pub base_url: String,
    /// Model identifier (e.g., "mistralai/Mixtral-8x7B-Instruct-v0.1")
    #[serde(default = "default_model")]
    pub model: String,
    /// Request timeout in seconds
    #[serde(default = "default_inference_timeout")]
    pub timeout_secs: u64,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_inference_base_url(),
            model: default_model(),
            timeout_secs: default_inference_timeout(),
        }
    }
}

impl InferenceConfig {
    /// Resolve the credential from config first, then the environment
    pub fn resolve_api_key(&self) -> Option<String> {
        resolve_key(self.api_key.as_deref(), || std::env::var("HF_API_KEY").ok())
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct FetchConfig {
    /// Page fetch timeout in seconds
    #[serde(default = "default_fetch_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_fetch_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

/// Configuration for the Google Cloud Vision OCR backend
#[derive(Debug, Deserialize, Clone)]
pub struct OcrConfig {
    /// API key (can also be set via the GOOGLE_API_KEY environment variable)
    pub api_key: Option<String>,
    #[serde(default = "default_ocr_base_url")]
    pub base_url: String,
    /// Language hint passed to the recognizer (BCP-47, e.g. "ja")
    #[serde(default = "default_ocr_language")]
    pub language: String,
    #[serde(default = "default_ocr_timeout")]
    pub timeout_secs: u64,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_ocr_base_url(),
            language: default_ocr_language(),
            timeout_secs: default_ocr_timeout(),
        }
    }
}

impl OcrConfig {
    pub fn resolve_api_key(&self) -> Option<String> {
        resolve_key(self.api_key.as_deref(), || std::env::var("GOOGLE_API_KEY").ok())
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LimitsConfig {
    /// Normalized content shorter than this is rejected before generation
    #[serde(default = "default_min_content_chars")]
    pub min_content_chars: usize,
    #[serde(default = "default_max_text_chars")]
    pub max_text_chars: usize,
    #[serde(default = "default_max_page_bytes")]
    pub max_page_bytes: usize,
    #[serde(default = "default_max_image_bytes")]
    pub max_image_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            min_content_chars: default_min_content_chars(),
            max_text_chars: default_max_text_chars(),
            max_page_bytes: default_max_page_bytes(),
            max_image_bytes: default_max_image_bytes(),
        }
    }
}

// Default value functions
/// A blank key counts as unset at both levels
fn resolve_key(configured: Option<&str>, env: impl FnOnce() -> Option<String>) -> Option<String> {
    let not_blank = |key: &String| !key.trim().is_empty();
    configured
        .map(str::to_string)
        .filter(not_blank)
        .or_else(env)
        .filter(not_blank)
}

fn default_listen_addr() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_inference_base_url() -> String {
    "https://api-inference.huggingface.co/models".to_string()
}

fn default_model() -> String {
    "mistralai/Mixtral-8x7B-Instruct-v0.1".to_string()
}

fn default_inference_timeout() -> u64 {
    60
}

fn default_fetch_timeout() -> u64 {
    10
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (compatible; SeoMetaGen/1.0)".to_string()
}

fn default_ocr_base_url() -> String {
    "https://vision.googleapis.com".to_string()
}

fn default_ocr_language() -> String {
    "ja".to_string()
}

fn default_ocr_timeout() -> u64 {
    30
}

fn default_min_content_chars() -> usize {
    50
}

fn default_max_text_chars() -> usize {
    100_000
}

fn default_max_page_bytes() -> usize {
    5 * 1024 * 1024
}

fn default_max_image_bytes() -> usize {
    10 * 1024 * 1024
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with SEOGEN__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: SEOGEN__INFERENCE__API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
///
/// See [`AppConfig::load`] for the source priority.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("config").required(false))
        // Use double underscore for nested: SEOGEN__INFERENCE__API_KEY
        .add_source(
            Environment::with_prefix("SEOGEN")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
