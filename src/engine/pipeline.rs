// PROMPTOID Prompt Engine - Extraction to Final Sentence
// Copyright (c) 2026 Xing_The_Creator | PROMPTOID

use serde::Serialize;
use std::sync::Arc;

use crate::engine::capabilities::ModelHub;
use crate::engine::composer::compose;
use crate::engine::error::EngineError;
use crate::engine::extractors::{RoleExtractor, SubjectRole};
use crate::engine::rewriter::ActionRewriter;
use crate::engine::trace::{PipelineTrace, TraceEvent};

/// Everything that went into a prompt, serialized for the caller.
#[derive(Debug, Clone, Serialize)]
pub struct PromptComponents {
    pub subjects: Vec<SubjectRole>,
    pub place: Option<String>,
    pub verbs: Vec<String>,
    pub mood: Option<String>,
    pub action_phrase: String,
    pub style_hint: String,
}

/// The pipeline's output contract. Immutable once returned.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedPrompt {
    pub auto_prompt: String,
    pub components: PromptComponents,
}

/// Extraction, rewriting and composition wired together over one hub.
pub struct PromptEngine {
    extractor: RoleExtractor,
    rewriter: ActionRewriter,
    trace: Arc<dyn PipelineTrace>,
}

impl PromptEngine {
    pub fn new(hub: ModelHub, trace: Arc<dyn PipelineTrace>) -> Self {
        Self {
            extractor: RoleExtractor::new(hub.clone(), trace.clone()),
            rewriter: ActionRewriter::new(hub.continuer.clone(), trace.clone()),
            trace,
        }
    }

    /// Build a structured generation prompt from free text, optionally
    /// biased by a recalled style hint.
    pub async fn generate(
        &self,
        user_input: &str,
        style_hint: &str,
    ) -> Result<GeneratedPrompt, EngineError> {
        let roles = self.extractor.extract(user_input).await?;
        let action_phrase = self.rewriter.rewrite(roles.main_verb()).await?;
        let auto_prompt = compose(&roles, &action_phrase, style_hint);

        self.trace.event(TraceEvent::FinalPrompt {
            prompt: auto_prompt.clone(),
        });

        Ok(GeneratedPrompt {
            auto_prompt,
            components: PromptComponents {
                subjects: roles.subjects,
                place: roles.place,
                verbs: roles.verbs,
                mood: roles.mood,
                action_phrase,
                style_hint: style_hint.to_string(),
            },
        })
    }
}
