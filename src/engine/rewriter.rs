// PROMPTOID Action Rewriter - Bare Verb to Descriptive Clause
// Copyright (c) 2026 Xing_The_Creator | PROMPTOID

use std::sync::Arc;

use crate::engine::capabilities::TextContinuer;
use crate::engine::error::EngineError;
use crate::engine::trace::{PipelineTrace, TraceEvent};

/// Separator between verb and clause in the few-shot block.
const MARKER: char = '→';

/// Accepted clause length, exclusive bounds. Anything shorter smells like
/// an empty echo, anything longer like a runaway continuation.
const MIN_CLAUSE_CHARS: usize = 3;
const MAX_CLAUSE_CHARS: usize = 50;

/// Generated-token budget for one rewrite.
const MAX_NEW_TOKENS: usize = 30;

pub struct ActionRewriter {
    continuer: Arc<dyn TextContinuer>,
    trace: Arc<dyn PipelineTrace>,
}

impl ActionRewriter {
    pub fn new(continuer: Arc<dyn TextContinuer>, trace: Arc<dyn PipelineTrace>) -> Self {
        Self { continuer, trace }
    }

    /// Turn a bare verb stem into a natural descriptive clause.
    ///
    /// The model path must prove itself: the continuation is accepted
    /// only when the verb's own marker line parses and the clause length
    /// is plausible. Everything else takes the deterministic suffix form,
    /// which is a designed default rather than an error.
    pub async fn rewrite(&self, verb: &str) -> Result<String, EngineError> {
        let prompt = few_shot_prompt(verb);
        let generated = self.continuer.continue_text(&prompt, MAX_NEW_TOKENS).await?;

        if let Some(clause) = parse_clause(verb, &generated) {
            return Ok(clause);
        }

        let clause = fallback_clause(verb);
        self.trace.event(TraceEvent::ActionFallback {
            verb: verb.to_string(),
            clause: clause.clone(),
        });
        Ok(clause)
    }
}

fn few_shot_prompt(verb: &str) -> String {
    format!(
        "동사를 자연스럽고 다양하게 묘사하는 예시:\n\
         걷다 → 걷는 장면이 담긴\n\
         웃다 → 웃고 있는 모습이 담긴\n\
         요리하다 → 요리하는 장면을 담은\n\
         연주하다 → 악기를 연주하는 장면을 포착한\n\
         {verb} →"
    )
}

/// Pull the clause off the line that repeats `{verb} →`, up to the next
/// line break, gated by the length bounds.
fn parse_clause(verb: &str, generated: &str) -> Option<String> {
    for line in generated.lines() {
        let line = line.trim();
        let Some(rest) = line.strip_prefix(verb) else {
            continue;
        };
        let Some(tail) = rest.trim_start().strip_prefix(MARKER) else {
            continue;
        };
        let candidate = tail.split(MARKER).next().unwrap_or("").trim();
        let chars = candidate.chars().count();
        if chars > MIN_CLAUSE_CHARS && chars < MAX_CLAUSE_CHARS {
            return Some(candidate.to_string());
        }
    }
    None
}

/// Deterministic clause when generation is unusable: swap a final 다 for
/// the descriptive ending, or wrap other stems with 하는.
pub fn fallback_clause(verb: &str) -> String {
    match verb.strip_suffix('다') {
        Some(stem) => format!("{stem}는 장면이 담긴"),
        None => format!("{verb}하는 장면이 담긴"),
    }
}
