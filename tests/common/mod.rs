#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request};
use seo_meta_gen::providers::InferenceRequest;
use seo_meta_gen::{GenerationTask, LlmProvider, PipelineError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub const BOUNDARY: &str = "----seo-meta-gen-test-boundary";

pub const STUB_TITLE: &str = "スタブの見出し";
pub const STUB_DESCRIPTION: &str = "スタブが返すメタディスクリプションです。";

/// Deterministic provider that counts calls
#[derive(Default)]
pub struct StubProvider {
    calls: AtomicUsize,
}

impl StubProvider {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmProvider for StubProvider {
    fn provider_name(&self) -> &str {
        "stub"
    }

    async fn generate(&self, request: &InferenceRequest) -> Result<String, PipelineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(match request.task {
            GenerationTask::Title => format!("「{STUB_TITLE}」"),
            GenerationTask::Description => format!("  {STUB_DESCRIPTION}\n"),
        })
    }
}

/// One multipart part
pub enum Part<'a> {
    Text(&'a str, &'a str),
    File {
        name: &'a str,
        filename: &'a str,
        content_type: &'a str,
        bytes: &'a [u8],
    },
}

pub fn multipart_body(parts: &[Part]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File {
                name,
                filename,
                content_type,
                bytes,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn analyze_request(parts: &[Part]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/analyze")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(parts)))
        .expect("request builder should not fail")
}

/// A Japanese article of exactly 600 characters
pub fn article_600() -> String {
    let sentence = "本記事ではウェブページの要約とメタディスクリプションの作り方を解説します。";
    sentence.chars().cycle().take(600).collect()
}
