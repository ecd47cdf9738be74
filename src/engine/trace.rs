// PROMPTOID Pipeline Trace - Structured Intermediate Events
// Copyright (c) 2026 Xing_The_Creator | PROMPTOID

use tracing::info;

/// Intermediate values the pipeline surfaces while building a prompt.
#[derive(Debug, Clone)]
pub enum TraceEvent {
    /// Raw nominal-subject tokens, before particle stripping.
    SubjectCandidates { raw: Vec<String> },
    /// Both place candidate sets; NER wins when non-empty.
    PlaceCandidates { ner: Vec<String>, qa: String },
    /// Adjectives attributed to each subject, token order.
    AdjectiveMap {
        per_subject: Vec<(String, Vec<String>)>,
    },
    /// Every stem-tagged verb, sentence order.
    Verbs { stems: Vec<String> },
    /// Top zero-shot label, head word only.
    Mood { label: Option<String> },
    /// The rewriter rejected the generated clause and used the suffix form.
    ActionFallback { verb: String, clause: String },
    /// The composed sentence handed back to the caller.
    FinalPrompt { prompt: String },
}

/// Receives pipeline events. Inject a custom sink to capture the
/// intermediates; the engine never assumes anything about the consumer.
pub trait PipelineTrace: Send + Sync {
    fn event(&self, event: TraceEvent);
}

/// Default sink: forwards every event to `tracing` at info level.
pub struct TracingSink;

impl PipelineTrace for TracingSink {
    fn event(&self, event: TraceEvent) {
        match event {
            TraceEvent::SubjectCandidates { raw } => {
                info!("[ENGINE] Subject candidates: {:?}", raw)
            }
            TraceEvent::PlaceCandidates { ner, qa } => {
                info!("[ENGINE] Place candidates (NER): {:?} / (QA): {}", ner, qa)
            }
            TraceEvent::AdjectiveMap { per_subject } => {
                info!("[ENGINE] Adjective map: {:?}", per_subject)
            }
            TraceEvent::Verbs { stems } => info!("[ENGINE] Verbs: {:?}", stems),
            TraceEvent::Mood { label } => info!("[ENGINE] Mood: {:?}", label),
            TraceEvent::ActionFallback { verb, clause } => {
                info!("[ENGINE] Generation unusable for '{}', fallback clause: {}", verb, clause)
            }
            TraceEvent::FinalPrompt { prompt } => info!("[ENGINE] Final prompt: {}", prompt),
        }
    }
}

/// Sink for callers that do not care about intermediates.
pub struct NullSink;

impl PipelineTrace for NullSink {
    fn event(&self, _event: TraceEvent) {}
}
