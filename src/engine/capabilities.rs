// PROMPTOID Model Capabilities - Service Traits over Frozen Models
// Copyright (c) 2026 Xing_The_Creator | PROMPTOID
//
// Every pre-trained capability the pipeline consumes sits behind one of
// these traits. Production wiring lives in bridge.rs (sidecar HTTP) and
// embedder.rs (native candle); tests inject fakes.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::engine::error::EngineError;

/// One token of a dependency parse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepToken {
    pub text: String,
    pub lemma: String,
    pub upos: String,
    /// Universal dependency relation, e.g. "nsubj".
    pub deprel: String,
}

/// One token of a morpheme tagging pass (Okt-style tags: "Noun",
/// "Adjective", "Verb", "Josa", ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PosToken {
    pub text: String,
    pub tag: String,
}

/// One recognized named entity, model output order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedEntity {
    pub word: String,
    /// Aggregated entity group, e.g. "LOC".
    pub entity_group: String,
    pub score: f32,
}

/// One candidate label of a zero-shot pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredLabel {
    pub label: String,
    pub score: f32,
}

#[async_trait]
pub trait DependencyParser: Send + Sync {
    async fn parse(&self, text: &str) -> Result<Vec<DepToken>, EngineError>;
}

#[async_trait]
pub trait MorphemeTagger: Send + Sync {
    /// POS-tag the text. With `stem` set, tokens come back in dictionary form.
    async fn tag(&self, text: &str, stem: bool) -> Result<Vec<PosToken>, EngineError>;
}

#[async_trait]
pub trait EntityRecognizer: Send + Sync {
    async fn entities(&self, text: &str) -> Result<Vec<NamedEntity>, EngineError>;
}

#[async_trait]
pub trait SpanExtractor: Send + Sync {
    /// Extractive question answering: the answer span for `question`
    /// found inside `context`, verbatim.
    async fn answer(&self, question: &str, context: &str) -> Result<String, EngineError>;
}

#[async_trait]
pub trait ZeroShotClassifier: Send + Sync {
    /// Score `labels` against the text, best first. The hypothesis
    /// template carries a `{}` slot for the label.
    async fn classify(
        &self,
        text: &str,
        labels: &[&str],
        hypothesis_template: &str,
    ) -> Result<Vec<ScoredLabel>, EngineError>;
}

#[async_trait]
pub trait TextContinuer: Send + Sync {
    /// Continue `prompt` with at most `max_new_tokens` generated tokens.
    /// Returns the full text (prompt + continuation) as the backend
    /// produced it; callers parse out what they need.
    async fn continue_text(
        &self,
        prompt: &str,
        max_new_tokens: usize,
    ) -> Result<String, EngineError>;
}

#[async_trait]
pub trait SentenceEncoder: Send + Sync {
    /// Encode each text into one fixed-size vector.
    async fn encode(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EngineError>;
}

/// Process-wide bundle of model handles.
///
/// Capabilities are expensive to construct and live for the whole
/// process; clone the `Arc`s, never rebuild per request. Concurrent
/// callers share handles safely because no trait method takes `&mut`.
#[derive(Clone)]
pub struct ModelHub {
    pub parser: Arc<dyn DependencyParser>,
    pub tagger: Arc<dyn MorphemeTagger>,
    pub ner: Arc<dyn EntityRecognizer>,
    pub qa: Arc<dyn SpanExtractor>,
    pub classifier: Arc<dyn ZeroShotClassifier>,
    pub continuer: Arc<dyn TextContinuer>,
    pub encoder: Arc<dyn SentenceEncoder>,
}
