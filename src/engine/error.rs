// PROMPTOID Engine Errors
// Copyright (c) 2026 Xing_The_Creator | PROMPTOID

use std::time::Duration;
use thiserror::Error;

/// Failure taxonomy for the prompt engine.
///
/// Empty extraction is deliberately NOT represented here: missing
/// subjects, places, verbs and moods are expected outcomes with designed
/// defaults further down the pipeline. These variants cover the cases
/// where no local fallback is equivalent to a working model call.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The inference endpoint could not be reached or answered non-2xx.
    #[error("model capability '{capability}' unavailable: {reason}")]
    ModelUnavailable {
        capability: &'static str,
        reason: String,
    },

    /// A bounded model call exceeded its deadline.
    #[error("model capability '{capability}' timed out after {elapsed:?}")]
    ModelTimeout {
        capability: &'static str,
        elapsed: Duration,
    },

    /// The endpoint answered, but the payload did not match the task shape.
    #[error("model capability '{capability}' returned a malformed payload: {detail}")]
    MalformedResponse {
        capability: &'static str,
        detail: String,
    },

    /// Local model files could not be fetched or deserialized.
    #[error("failed to load model '{model_id}': {reason}")]
    ModelLoad { model_id: String, reason: String },
}
