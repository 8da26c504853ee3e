use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The canonical record recovered from a model reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFacts {
    pub name: String,
    pub description: String,
}

/// Everything that can go wrong between a raw model response and a
/// `ProductFacts`. The surrounding service maps these onto user-facing
/// errors; the engine never retries on its own.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    /// The response envelope held no extractable text at all.
    #[error("model response contained no extractable text")]
    EmptyResponse,

    /// Every recovery strategy came up empty.
    #[error("no JSON object or array found in model output")]
    NoJsonFound,

    /// A balanced span was found but did not parse. Collapses into
    /// `NoJsonFound` in the default pipeline; available via
    /// `Recovery::into_result` when the diagnostic matters.
    #[error("candidate JSON failed to parse: {0}")]
    MalformedJson(String),

    /// Parsed JSON lacked a resolvable name and/or description.
    #[error("model JSON is missing required field(s): {}", .missing.join(", "))]
    MissingRequiredField { missing: Vec<String> },
}
