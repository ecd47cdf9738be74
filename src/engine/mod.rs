// PROMPTOID Engine Modules
// Copyright (c) 2026 Xing_The_Creator | PROMPTOID
//
// Prompt-construction pipeline: role extraction, action rewriting,
// composition, and recall of styles from similar past sessions.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use candle_core::Device;

pub mod bridge;
pub mod capabilities;
pub mod composer;
pub mod embedder;
pub mod error;
pub mod extractors;
pub mod josa;
pub mod pipeline;
pub mod recommender;
pub mod rewriter;
pub mod selector;
pub mod trace;

use bridge::{
    BridgeClassifier, BridgeContinuer, BridgeParser, BridgeRecognizer, BridgeSpanExtractor,
    BridgeTagger, ModelRoute,
};
use capabilities::ModelHub;
use embedder::MiniLmEncoder;
use error::EngineError;
use recommender::DEFAULT_THRESHOLD;

/// Engine-wide settings. Environment variables override the defaults in
/// `from_env`; models and endpoints stay fixed for the process lifetime.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Base URL of the local inference sidecar.
    pub nlp_api_url: String,
    /// Model routes served by the sidecar.
    pub parser_model: String,
    pub tagger_model: String,
    pub ner_model: String,
    pub qa_model: String,
    pub zero_shot_model: String,
    pub generation_model: String,
    /// Sentence encoder, run natively via candle.
    pub embed_model: String,
    /// Recall gate.
    pub similarity_threshold: f32,
    /// History log location.
    pub history_path: PathBuf,
    /// Deadline for bounded model calls.
    pub model_timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            nlp_api_url: "http://localhost:8090".to_string(),
            parser_model: "stanza/ko-depparse".to_string(),
            tagger_model: "okt/morpheme".to_string(),
            ner_model: "klue/bert-base".to_string(),
            qa_model: "deepset/xlm-roberta-base-squad2".to_string(),
            zero_shot_model: "joeddav/xlm-roberta-large-xnli".to_string(),
            generation_model: "skt/kogpt2-base-v2".to_string(),
            embed_model: embedder::DEFAULT_EMBED_MODEL.to_string(),
            similarity_threshold: DEFAULT_THRESHOLD,
            history_path: PathBuf::from("data/prompt_history_log.json"),
            model_timeout: Duration::from_secs(20),
        }
    }
}

impl EngineConfig {
    /// Defaults with environment overrides. The binary loads `.env`
    /// before calling this.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(url) = std::env::var("PROMPTOID_NLP_API") {
            cfg.nlp_api_url = url;
        }
        if let Ok(path) = std::env::var("PROMPTOID_HISTORY_PATH") {
            cfg.history_path = PathBuf::from(path);
        }
        if let Ok(raw) = std::env::var("PROMPTOID_THRESHOLD") {
            if let Ok(threshold) = raw.parse() {
                cfg.similarity_threshold = threshold;
            }
        }
        if let Ok(raw) = std::env::var("PROMPTOID_MODEL_TIMEOUT_SECS") {
            if let Ok(secs) = raw.parse() {
                cfg.model_timeout = Duration::from_secs(secs);
            }
        }
        cfg
    }
}

impl ModelHub {
    /// Construct every capability once for the process lifetime.
    ///
    /// Bridged capabilities are cheap handles over the sidecar; the
    /// encoder loads weights eagerly so the cold-start cost lands at
    /// startup instead of the first request.
    pub fn connect(config: &EngineConfig) -> Result<Self, EngineError> {
        let route = |model: &str, capability: &'static str| {
            ModelRoute::new(&config.nlp_api_url, model, capability, config.model_timeout)
        };
        Ok(Self {
            parser: Arc::new(BridgeParser::new(route(&config.parser_model, "dependency-parse"))),
            tagger: Arc::new(BridgeTagger::new(route(&config.tagger_model, "morpheme-tag"))),
            ner: Arc::new(BridgeRecognizer::new(route(
                &config.ner_model,
                "token-classification",
            ))),
            qa: Arc::new(BridgeSpanExtractor::new(route(
                &config.qa_model,
                "question-answering",
            ))),
            classifier: Arc::new(BridgeClassifier::new(route(
                &config.zero_shot_model,
                "zero-shot-classification",
            ))),
            continuer: Arc::new(BridgeContinuer::new(route(
                &config.generation_model,
                "text-generation",
            ))),
            encoder: Arc::new(MiniLmEncoder::load(&config.embed_model, Device::Cpu)?),
        })
    }
}
