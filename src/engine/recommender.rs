// PROMPTOID History Recall - Embedding Match over Past Requests
// Copyright (c) 2026 Xing_The_Creator | PROMPTOID

use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use crate::engine::capabilities::{SentenceEncoder, SpanExtractor};
use crate::engine::embedder::cosine_similarity;
use crate::engine::error::EngineError;
use crate::history::HistoryLog;

pub const DEFAULT_TOP_N: usize = 1;
pub const DEFAULT_THRESHOLD: f32 = 0.75;

/// Question put to the QA model to distill a style from a stored prompt.
const STYLE_QUESTION: &str = "이 문장의 분위기나 스타일을 한 문장으로 설명해줘.";

/// One past request judged similar enough to bias the current one.
#[derive(Debug, Clone, Serialize)]
pub struct SimilarityCandidate {
    pub score: f32,
    pub style: String,
}

pub struct HistoryRecommender {
    encoder: Arc<dyn SentenceEncoder>,
    qa: Arc<dyn SpanExtractor>,
    log: HistoryLog,
}

impl HistoryRecommender {
    pub fn new(
        encoder: Arc<dyn SentenceEncoder>,
        qa: Arc<dyn SpanExtractor>,
        log: HistoryLog,
    ) -> Self {
        Self { encoder, qa, log }
    }

    /// Style description of one stored prompt, answer span verbatim.
    pub async fn extract_style(&self, prompt_text: &str) -> Result<String, EngineError> {
        self.qa.answer(STYLE_QUESTION, prompt_text).await
    }

    /// Rank the stored inputs against the current one and keep the top
    /// `top_n` entries at or above `threshold`, highest first.
    ///
    /// History is read in full at request time. Missing or empty history
    /// is a normal outcome and yields an empty list, never an error.
    pub async fn recommend(
        &self,
        current_input: &str,
        top_n: usize,
        threshold: f32,
    ) -> Result<Vec<SimilarityCandidate>, EngineError> {
        let history = self.log.load();
        if history.is_empty() {
            return Ok(Vec::new());
        }

        let mut texts: Vec<String> = history.iter().map(|h| h.input.clone()).collect();
        texts.push(current_input.to_string());

        let embeddings = self.encoder.encode(&texts).await?;
        let Some((current_vec, past_vecs)) = embeddings.split_last() else {
            return Ok(Vec::new());
        };

        let mut ranked: Vec<(usize, f32)> = past_vecs
            .iter()
            .enumerate()
            .map(|(i, v)| (i, cosine_similarity(current_vec, v)))
            .collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        let mut results = Vec::new();
        for (idx, score) in ranked.into_iter().take(top_n) {
            if score < threshold {
                continue;
            }
            let style = self.extract_style(&history[idx].auto_korean_prompt).await?;
            info!("[RECALL] Match {:.3} -> style: {}", score, style);
            results.push(SimilarityCandidate { score, style });
        }
        Ok(results)
    }
}
