// PROMPTOID Sentence Encoder - Native MiniLM Embeddings via Candle
// Copyright (c) 2026 Xing_The_Creator | PROMPTOID
//
// The similarity matcher runs its encoder natively: BERT token
// embeddings, mean-pooled with the attention mask so padded positions do
// not dilute the vector. Weights load once at startup from the HF hub.

use async_trait::async_trait;
use candle_core::{Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config, DTYPE};
use hf_hub::api::sync::Api;
use hf_hub::{Repo, RepoType};
use tokenizers::{PaddingParams, Tokenizer};
use tracing::info;

use crate::engine::capabilities::SentenceEncoder;
use crate::engine::error::EngineError;

pub const DEFAULT_EMBED_MODEL: &str =
    "sentence-transformers/paraphrase-multilingual-MiniLM-L12-v2";

pub struct MiniLmEncoder {
    model: BertModel,
    tokenizer: Tokenizer,
    device: Device,
}

impl MiniLmEncoder {
    /// Download (or reuse the cached copy of) the model and build the
    /// encoder. Eager by design: cold-start cost lands at startup.
    pub fn load(model_id: &str, device: Device) -> Result<Self, EngineError> {
        let load_err = |reason: String| EngineError::ModelLoad {
            model_id: model_id.to_string(),
            reason,
        };

        info!("[EMBED] Loading sentence encoder: {}", model_id);
        let api = Api::new().map_err(|e| load_err(e.to_string()))?;
        let repo = api.repo(Repo::new(model_id.to_string(), RepoType::Model));

        let config_path = repo.get("config.json").map_err(|e| load_err(e.to_string()))?;
        let tokenizer_path = repo
            .get("tokenizer.json")
            .map_err(|e| load_err(e.to_string()))?;
        let weights_path = repo
            .get("model.safetensors")
            .map_err(|e| load_err(e.to_string()))?;

        let config_raw =
            std::fs::read_to_string(config_path).map_err(|e| load_err(e.to_string()))?;
        let config: Config =
            serde_json::from_str(&config_raw).map_err(|e| load_err(e.to_string()))?;

        let mut tokenizer =
            Tokenizer::from_file(tokenizer_path).map_err(|e| load_err(e.to_string()))?;
        // Batch-longest padding; the attention mask marks the real tokens.
        tokenizer.with_padding(Some(PaddingParams::default()));

        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[weights_path], DTYPE, &device)
                .map_err(|e| load_err(e.to_string()))?
        };
        let model = BertModel::load(vb, &config).map_err(|e| load_err(e.to_string()))?;

        info!("[EMBED] Encoder ready (device: {:?})", device);
        Ok(Self {
            model,
            tokenizer,
            device,
        })
    }

    /// Forward pass + masked mean pooling, one vector per input row.
    fn forward_pooled(&self, encodings: &[tokenizers::Encoding]) -> candle_core::Result<Vec<Vec<f32>>> {
        let mut ids = Vec::with_capacity(encodings.len());
        let mut masks = Vec::with_capacity(encodings.len());
        for enc in encodings {
            ids.push(Tensor::new(enc.get_ids(), &self.device)?);
            masks.push(Tensor::new(enc.get_attention_mask(), &self.device)?);
        }
        let input_ids = Tensor::stack(&ids, 0)?;
        let attention_mask = Tensor::stack(&masks, 0)?;
        let token_type_ids = input_ids.zeros_like()?;

        let hidden = self
            .model
            .forward(&input_ids, &token_type_ids, Some(&attention_mask))?;

        // pooled = sum(hidden * mask) / sum(mask)
        let mask = attention_mask.to_dtype(DTYPE)?.unsqueeze(2)?;
        let summed = hidden.broadcast_mul(&mask)?.sum(1)?;
        let counts = mask.sum(1)?;
        let pooled = summed.broadcast_div(&counts)?;
        pooled.to_vec2::<f32>()
    }
}

#[async_trait]
impl SentenceEncoder for MiniLmEncoder {
    async fn encode(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EngineError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let malformed = |detail: String| EngineError::MalformedResponse {
            capability: "sentence-embedding",
            detail,
        };
        let encodings = self
            .tokenizer
            .encode_batch(texts.to_vec(), true)
            .map_err(|e| malformed(e.to_string()))?;
        self.forward_pooled(&encodings)
            .map_err(|e| malformed(e.to_string()))
    }
}

/// Cosine similarity of two embedding vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cosine_of_identical_vectors_is_one() {
        let v = vec![0.3, -1.2, 4.0];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn cosine_of_orthogonal_vectors_is_zero() {
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 2.0]).abs() < 1e-6);
    }

    #[test]
    fn cosine_of_opposed_vectors_is_negative_one() {
        assert!((cosine_similarity(&[1.0, 1.0], &[-1.0, -1.0]) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn zero_vector_scores_zero() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
    }
}
