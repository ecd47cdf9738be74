// PROMPTOID Prompt Selector - Recall-or-Generate Decision
// Copyright (c) 2026 Xing_The_Creator | PROMPTOID

use serde::Serialize;
use tracing::info;

use crate::engine::error::EngineError;
use crate::engine::pipeline::{GeneratedPrompt, PromptEngine};
use crate::engine::recommender::{HistoryRecommender, DEFAULT_TOP_N};

/// Where the final prompt came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    Generated,
    Recommended,
}

impl Provenance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provenance::Generated => "generated",
            Provenance::Recommended => "recommended",
        }
    }
}

/// The single branching decision of the pipeline. Stateless across
/// requests; everything it remembers lives in the history log.
pub struct PromptSelector {
    engine: PromptEngine,
    recommender: HistoryRecommender,
    threshold: f32,
}

impl PromptSelector {
    pub fn new(engine: PromptEngine, recommender: HistoryRecommender, threshold: f32) -> Self {
        Self {
            engine,
            recommender,
            threshold,
        }
    }

    /// Recall a style from sufficiently similar history, or generate plain.
    pub async fn select(
        &self,
        current_input: &str,
    ) -> Result<(GeneratedPrompt, Provenance), EngineError> {
        let candidates = self
            .recommender
            .recommend(current_input, DEFAULT_TOP_N, self.threshold)
            .await?;

        let Some(top) = candidates.first() else {
            info!("[SELECT] No usable history, generating fresh");
            let prompt = self.engine.generate(current_input, "").await?;
            return Ok((prompt, Provenance::Generated));
        };

        if top.score >= self.threshold {
            info!("[SELECT] Strong match ({:.3}), reusing recalled style", top.score);
            let prompt = self.engine.generate(current_input, &top.style).await?;
            Ok((prompt, Provenance::Recommended))
        } else {
            info!("[SELECT] Weak match ({:.3}), generating fresh", top.score);
            let prompt = self.engine.generate(current_input, "").await?;
            Ok((prompt, Provenance::Generated))
        }
    }
}
