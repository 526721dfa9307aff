use crate::config::InferenceConfig;
use crate::error::PipelineError;
use crate::providers::{GenerationTask, InferenceRequest, LlmProvider};
use async_trait::async_trait;
use log::{debug, error};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use std::time::Duration;

const LOADING_MARKER: &str = "is currently loading";

/// Hugging Face serverless Inference API
pub struct HuggingFaceProvider {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl HuggingFaceProvider {
    /// Create a new provider from configuration and a resolved credential
    ///
    /// Credential lookup lives with the caller so that a missing key can be
    /// reported per request instead of at startup.
    pub fn new(api_key: String, config: &InferenceConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(HuggingFaceProvider {
            client,
            api_key,
            endpoint: format!(
                "{}/{}",
                config.base_url.trim_end_matches('/'),
                config.model.trim_start_matches('/')
            ),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl LlmProvider for HuggingFaceProvider {
    fn provider_name(&self) -> &str {
        "huggingface"
    }

    async fn generate(&self, request: &InferenceRequest) -> Result<String, PipelineError> {
        let task = request.task;

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&json!({
                "inputs": request.prompt,
                "parameters": {
                    "max_new_tokens": request.max_new_tokens,
                    "return_full_text": false
                }
            }))
            .send()
            .await
            .map_err(|e| classify_transport_error(task, &e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| classify_transport_error(task, &e))?;
        debug!("Inference response for {} ({}): {}", task.as_str(), status, body);

        let payload: Option<Value> = serde_json::from_str(&body).ok();

        if !status.is_success() {
            return Err(classify_error_response(task, status, payload.as_ref()));
        }

        let payload = payload.ok_or_else(|| {
            error!("AI Generation Error for {}: response is not JSON", task.as_str());
            unknown(task)
        })?;

        // Some deployments report failures with a 200 and an error payload
        if error_message(&payload).is_some() {
            return Err(classify_error_response(task, status, Some(&payload)));
        }

        first_generated_text(&payload).ok_or_else(|| {
            error!(
                "AI Generation Error for {}: no generated_text in response",
                task.as_str()
            );
            unknown(task)
        })
    }
}

fn unknown(task: GenerationTask) -> PipelineError {
    PipelineError::UnknownGenerationError {
        task: task.label().to_string(),
    }
}

fn classify_transport_error(task: GenerationTask, err: &reqwest::Error) -> PipelineError {
    error!("AI Generation Error for {}: {}", task.as_str(), err);
    if err.is_timeout() {
        PipelineError::Timeout
    } else {
        unknown(task)
    }
}

fn classify_error_response(
    task: GenerationTask,
    status: StatusCode,
    payload: Option<&Value>,
) -> PipelineError {
    let message = payload.and_then(error_message);
    error!(
        "AI Generation Error for {} ({}): {}",
        task.as_str(),
        status,
        message.as_deref().unwrap_or("<no error message>")
    );

    if status == StatusCode::UNAUTHORIZED {
        return PipelineError::AuthError;
    }

    match message {
        Some(message) if message.contains(LOADING_MARKER) => PipelineError::ModelWarming,
        Some(message) => PipelineError::ProviderError(message),
        None => unknown(task),
    }
}

/// The provider's `error` field, which is either a string or a list of strings
fn error_message(payload: &Value) -> Option<String> {
    match payload.get("error")? {
        Value::String(message) => Some(message.clone()),
        Value::Array(messages) => {
            let joined = messages
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join("; ");
            (!joined.is_empty()).then_some(joined)
        }
        _ => None,
    }
}

fn first_generated_text(payload: &Value) -> Option<String> {
    let candidate = match payload {
        Value::Array(candidates) => candidates.first()?,
        other => other,
    };
    candidate["generated_text"].as_str().map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    const MODEL: &str = "mistralai/Mixtral-8x7B-Instruct-v0.1";

    fn provider(base_url: &str, timeout_secs: u64) -> HuggingFaceProvider {
        let config = InferenceConfig {
            api_key: None,
            base_url: base_url.to_string(),
            model: MODEL.to_string(),
            timeout_secs,
        };
        HuggingFaceProvider::new("hf_test".to_string(), &config).unwrap()
    }

    fn request(task: GenerationTask) -> InferenceRequest {
        InferenceRequest {
            task,
            prompt: task.build_prompt("本文"),
            max_new_tokens: task.max_new_tokens(),
        }
    }

    #[tokio::test]
    async fn test_generate() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", format!("/{MODEL}").as_str())
            .match_header("authorization", "Bearer hf_test")
            .match_body(Matcher::PartialJson(json!({
                "parameters": { "max_new_tokens": 64, "return_full_text": false }
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"generated_text": " 最高のタイトル\n"}]"#)
            .create_async()
            .await;

        let text = provider(&server.url(), 5)
            .generate(&request(GenerationTask::Title))
            .await
            .unwrap();

        assert_eq!(text, " 最高のタイトル\n");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_unauthorized_is_auth_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", format!("/{MODEL}").as_str())
            .with_status(401)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": "Invalid credentials in Authorization header"}"#)
            .create_async()
            .await;

        let result = provider(&server.url(), 5)
            .generate(&request(GenerationTask::Title))
            .await;
        assert_eq!(result, Err(PipelineError::AuthError));
    }

    #[tokio::test]
    async fn test_loading_model_is_model_warming() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", format!("/{MODEL}").as_str())
            .with_status(503)
            .with_header("content-type", "application/json")
            .with_body(format!(
                r#"{{"error": "Model {MODEL} is currently loading", "estimated_time": 20.0}}"#
            ))
            .create_async()
            .await;

        let result = provider(&server.url(), 5)
            .generate(&request(GenerationTask::Description))
            .await;
        assert_eq!(result, Err(PipelineError::ModelWarming));
    }

    #[tokio::test]
    async fn test_error_payload_is_provider_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", format!("/{MODEL}").as_str())
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": ["Input validation error: inputs too long"]}"#)
            .create_async()
            .await;

        let result = provider(&server.url(), 5)
            .generate(&request(GenerationTask::Title))
            .await;
        assert_eq!(
            result,
            Err(PipelineError::ProviderError(
                "Input validation error: inputs too long".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_error_without_payload_is_unknown() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", format!("/{MODEL}").as_str())
            .with_status(502)
            .with_body("<html>Bad Gateway</html>")
            .create_async()
            .await;

        let result = provider(&server.url(), 5)
            .generate(&request(GenerationTask::Description))
            .await;
        assert_eq!(
            result,
            Err(PipelineError::UnknownGenerationError {
                task: "ディスクリプション".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_unexpected_success_shape_is_unknown() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", format!("/{MODEL}").as_str())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[]"#)
            .create_async()
            .await;

        let result = provider(&server.url(), 5)
            .generate(&request(GenerationTask::Title))
            .await;
        assert!(matches!(
            result,
            Err(PipelineError::UnknownGenerationError { .. })
        ));
    }

    #[tokio::test]
    async fn test_slow_provider_is_timeout() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        use tokio::net::TcpListener;

        // Accepts the connection and reads the request but never answers
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            if let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = [0u8; 4096];
                let _ = socket.read(&mut buf).await;
                tokio::time::sleep(Duration::from_secs(30)).await;
                let _ = socket.shutdown().await;
            }
        });

        let result = provider(&format!("http://{addr}"), 1)
            .generate(&request(GenerationTask::Title))
            .await;
        assert_eq!(result, Err(PipelineError::Timeout));
    }

    #[test]
    fn test_endpoint_joins_model_path() {
        let provider = provider("https://example.test/models/", 5);
        assert_eq!(provider.endpoint(), format!("https://example.test/models/{MODEL}"));
        assert_eq!(provider.provider_name(), "huggingface");
    }
}
