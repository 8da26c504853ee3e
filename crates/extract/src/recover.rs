use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::schema::ExtractionError;

/// Outcome of a recovery attempt over one candidate text.
#[derive(Debug, Clone, PartialEq)]
pub enum Recovery {
    /// A strategy produced valid JSON.
    Value(Value),
    /// A balanced span existed but failed to parse (first parse error kept).
    Malformed(String),
    /// No strategy produced anything that even looked like JSON.
    NothingFound,
}

impl Recovery {
    /// Surface `Malformed` as its own error kind. The default pipeline
    /// collapses it into `NoJsonFound` instead.
    pub fn into_result(self) -> Result<Value, ExtractionError> {
        match self {
            Recovery::Value(value) => Ok(value),
            Recovery::Malformed(err) => Err(ExtractionError::MalformedJson(err)),
            Recovery::NothingFound => Err(ExtractionError::NoJsonFound),
        }
    }
}

/// One step of the fallback chain: a named way to carve a candidate
/// substring out of the text. Kept as data so the order is explicit.
struct Strategy {
    name: &'static str,
    /// Whether a candidate from this strategy failing to parse is worth
    /// reporting. The verbatim attempt failing just means the text was
    /// not bare JSON.
    reports_malformed: bool,
    candidate: for<'a> fn(&'a str) -> Option<&'a str>,
}

// Object scan strictly precedes array scan: the target record is an object.
const STRATEGIES: &[Strategy] = &[
    Strategy {
        name: "verbatim",
        reports_malformed: false,
        candidate: |text| Some(text),
    },
    Strategy {
        name: "balanced-object",
        reports_malformed: true,
        candidate: |text| find_balanced(text, '{', '}'),
    },
    Strategy {
        name: "balanced-array",
        reports_malformed: true,
        candidate: |text| find_balanced(text, '[', ']'),
    },
];

/// Recover a JSON object or array from free-form model output.
///
/// The text may be wrapped in explanatory prose or a fenced code block;
/// strategies are tried in order and the first one whose candidate parses
/// wins. Exhausting the chain is an expected outcome, not an error.
pub fn recover_json(text: &str) -> Recovery {
    let text = strip_code_fence(text);
    if text.is_empty() {
        return Recovery::NothingFound;
    }

    let mut malformed: Option<String> = None;

    for strategy in STRATEGIES {
        let Some(candidate) = (strategy.candidate)(&text) else {
            continue;
        };
        match serde_json::from_str::<Value>(candidate) {
            Ok(value) => {
                debug!(strategy = strategy.name, "recovered JSON from model output");
                return Recovery::Value(value);
            }
            Err(err) => {
                debug!(strategy = strategy.name, error = %err, "candidate did not parse");
                if strategy.reports_malformed && malformed.is_none() {
                    malformed = Some(err.to_string());
                }
            }
        }
    }

    match malformed {
        Some(err) => Recovery::Malformed(err),
        None => Recovery::NothingFound,
    }
}

/// Strip a surrounding triple-backtick fence and an optional language tag
/// on the opening line. Text without a fence comes back trimmed.
fn strip_code_fence(text: &str) -> String {
    let trimmed = text.trim();

    if trimmed.len() >= 6 && trimmed.starts_with("```") && trimmed.ends_with("```") {
        let body = &trimmed[..trimmed.len() - 3];
        let re = Regex::new(r"^```[A-Za-z0-9_+-]*[ \t]*\r?\n?").unwrap();
        return re.replace(body, "").trim().to_string();
    }

    trimmed.to_string()
}

/// Find the first balanced span: start at the first `open`, track nesting
/// depth, stop where depth returns to zero. Unterminated nesting yields
/// nothing.
fn find_balanced(text: &str, open: char, close: char) -> Option<&str> {
    let start = text.find(open)?;
    let mut depth = 0usize;

    for (offset, c) in text[start..].char_indices() {
        if c == open {
            depth += 1;
        } else if c == close {
            depth -= 1;
            if depth == 0 {
                return Some(&text[start..start + offset + close.len_utf8()]);
            }
        }
    }

    None
}
