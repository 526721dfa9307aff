use thiserror::Error;

/// Errors that can occur while generating SEO metadata.
///
/// The `Display` text is the message shown to the end user, so it is written
/// in the output language.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// The request is missing its source or the source is malformed
    #[error("{0}")]
    InvalidInput(String),

    /// The web page could not be retrieved
    #[error("URLからのコンテンツ取得に失敗しました。サイトが存在しないか、アクセスがブロックされている可能性があります。")]
    FetchFailed,

    /// Text recognition on the uploaded image failed
    #[error("画像からのテキスト抽出（OCR）に失敗しました。")]
    OcrFailed,

    /// Normalized content is below the minimum length
    #[error("生成するにはコンテンツが短すぎます。{min_chars}文字以上の日本語テキストを入力してください。")]
    InsufficientContent { min_chars: usize },

    /// The inference endpoint rejected the credential
    #[error("Hugging Face APIの認証に失敗しました。APIキーが正しいか確認してください。")]
    AuthError,

    /// The model is still being loaded by the provider
    #[error("AIモデルを準備中です。少し待ってからもう一度お試しください。")]
    ModelWarming,

    /// The inference call exceeded its timeout
    #[error("AIの応答がタイムアウトしました。サーバーが混み合っている可能性があります。")]
    Timeout,

    /// The provider returned an error payload
    #[error("AI APIエラー: {0}")]
    ProviderError(String),

    /// Generation failed for an unclassified reason
    #[error("AIによる{task}の生成中に予期せぬエラーが発生しました。")]
    UnknownGenerationError { task: String },

    /// No inference credential is configured
    #[error("APIキーがサーバーに設定されていません。")]
    MissingCredential,
}

impl PipelineError {
    /// Stable identifier for logs and tests
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::InvalidInput(_) => "invalid_input",
            PipelineError::FetchFailed => "fetch_failed",
            PipelineError::OcrFailed => "ocr_failed",
            PipelineError::InsufficientContent { .. } => "insufficient_content",
            PipelineError::AuthError => "auth_error",
            PipelineError::ModelWarming => "model_warming",
            PipelineError::Timeout => "timeout",
            PipelineError::ProviderError(_) => "provider_error",
            PipelineError::UnknownGenerationError { .. } => "unknown_generation_error",
            PipelineError::MissingCredential => "missing_credential",
        }
    }

    /// Whether the failure was caused by what the caller sent
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            PipelineError::InvalidInput(_) | PipelineError::InsufficientContent { .. }
        )
    }

    pub(crate) fn invalid_url() -> Self {
        PipelineError::InvalidInput("有効なURLを入力してください。".to_string())
    }
}

/// Errors raised while wiring up the service, before any request is served
#[derive(Error, Debug)]
pub enum SetupError {
    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// An HTTP client could not be created
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// The listen address could not be bound
    #[error("Failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// The server stopped with an I/O error
    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}
