// PROMPTOID Inference Bridge - Sidecar-Hosted Capabilities
// Copyright (c) 2026 Xing_The_Creator | PROMPTOID
//
// Talks to a local HF-style inference server, one route per model id.
// Every heavyweight capability except sentence encoding goes through
// this bridge; the encoder runs natively via candle (embedder.rs).

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use crate::engine::capabilities::{
    DepToken, DependencyParser, EntityRecognizer, MorphemeTagger, NamedEntity, PosToken,
    ScoredLabel, SpanExtractor, TextContinuer, ZeroShotClassifier,
};
use crate::engine::error::EngineError;

/// Shared HTTP plumbing for one model route on the sidecar.
#[derive(Clone)]
pub struct ModelRoute {
    client: reqwest::Client,
    endpoint: String,
    capability: &'static str,
    timeout: Duration,
}

impl ModelRoute {
    pub fn new(
        api_url: &str,
        model_id: &str,
        capability: &'static str,
        timeout: Duration,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: format!("{}/models/{}", api_url.trim_end_matches('/'), model_id),
            capability,
            timeout,
        }
    }

    /// POST a task payload and deserialize the response body.
    async fn post<T: for<'de> Deserialize<'de>>(
        &self,
        payload: serde_json::Value,
    ) -> Result<T, EngineError> {
        let call = self.client.post(&self.endpoint).json(&payload).send();

        let resp = tokio::time::timeout(self.timeout, call)
            .await
            .map_err(|_| EngineError::ModelTimeout {
                capability: self.capability,
                elapsed: self.timeout,
            })?
            .map_err(|e| EngineError::ModelUnavailable {
                capability: self.capability,
                reason: e.to_string(),
            })?;

        if !resp.status().is_success() {
            return Err(EngineError::ModelUnavailable {
                capability: self.capability,
                reason: format!("API Error: {}", resp.status()),
            });
        }

        resp.json::<T>().await.map_err(|e| EngineError::MalformedResponse {
            capability: self.capability,
            detail: e.to_string(),
        })
    }
}

/// Dependency parse over the sidecar's parsing route.
pub struct BridgeParser {
    route: ModelRoute,
}

impl BridgeParser {
    pub fn new(route: ModelRoute) -> Self {
        Self { route }
    }
}

#[async_trait]
impl DependencyParser for BridgeParser {
    async fn parse(&self, text: &str) -> Result<Vec<DepToken>, EngineError> {
        self.route.post(json!({ "inputs": text })).await
    }
}

/// Morpheme tagging over the sidecar's tagging route.
pub struct BridgeTagger {
    route: ModelRoute,
}

impl BridgeTagger {
    pub fn new(route: ModelRoute) -> Self {
        Self { route }
    }
}

#[async_trait]
impl MorphemeTagger for BridgeTagger {
    async fn tag(&self, text: &str, stem: bool) -> Result<Vec<PosToken>, EngineError> {
        self.route
            .post(json!({ "inputs": text, "parameters": { "stem": stem } }))
            .await
    }
}

/// Named-entity recognition with aggregated entity groups.
pub struct BridgeRecognizer {
    route: ModelRoute,
}

impl BridgeRecognizer {
    pub fn new(route: ModelRoute) -> Self {
        Self { route }
    }
}

#[async_trait]
impl EntityRecognizer for BridgeRecognizer {
    async fn entities(&self, text: &str) -> Result<Vec<NamedEntity>, EngineError> {
        self.route
            .post(json!({ "inputs": text, "parameters": { "aggregation_strategy": "simple" } }))
            .await
    }
}

#[derive(Deserialize)]
struct QaAnswer {
    answer: String,
}

/// Extractive question answering.
pub struct BridgeSpanExtractor {
    route: ModelRoute,
}

impl BridgeSpanExtractor {
    pub fn new(route: ModelRoute) -> Self {
        Self { route }
    }
}

#[async_trait]
impl SpanExtractor for BridgeSpanExtractor {
    async fn answer(&self, question: &str, context: &str) -> Result<String, EngineError> {
        let answer: QaAnswer = self
            .route
            .post(json!({ "inputs": { "question": question, "context": context } }))
            .await?;
        Ok(answer.answer)
    }
}

#[derive(Deserialize)]
struct ZeroShotResponse {
    labels: Vec<String>,
    scores: Vec<f32>,
}

/// Zero-shot classification with a hypothesis template.
pub struct BridgeClassifier {
    route: ModelRoute,
}

impl BridgeClassifier {
    pub fn new(route: ModelRoute) -> Self {
        Self { route }
    }
}

#[async_trait]
impl ZeroShotClassifier for BridgeClassifier {
    async fn classify(
        &self,
        text: &str,
        labels: &[&str],
        hypothesis_template: &str,
    ) -> Result<Vec<ScoredLabel>, EngineError> {
        let resp: ZeroShotResponse = self
            .route
            .post(json!({
                "inputs": text,
                "parameters": {
                    "candidate_labels": labels,
                    "hypothesis_template": hypothesis_template,
                }
            }))
            .await?;
        Ok(resp
            .labels
            .into_iter()
            .zip(resp.scores)
            .map(|(label, score)| ScoredLabel { label, score })
            .collect())
    }
}

#[derive(Deserialize)]
struct GeneratedText {
    generated_text: String,
}

/// Bounded causal continuation.
pub struct BridgeContinuer {
    route: ModelRoute,
}

impl BridgeContinuer {
    pub fn new(route: ModelRoute) -> Self {
        Self { route }
    }
}

#[async_trait]
impl TextContinuer for BridgeContinuer {
    async fn continue_text(
        &self,
        prompt: &str,
        max_new_tokens: usize,
    ) -> Result<String, EngineError> {
        let mut outputs: Vec<GeneratedText> = self
            .route
            .post(json!({
                "inputs": prompt,
                "parameters": {
                    "max_new_tokens": max_new_tokens,
                    "return_full_text": true,
                }
            }))
            .await?;
        if outputs.is_empty() {
            return Err(EngineError::MalformedResponse {
                capability: self.route.capability,
                detail: "empty generation batch".to_string(),
            });
        }
        Ok(outputs.remove(0).generated_text)
    }
}
