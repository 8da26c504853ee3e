use serde_json::Value;

use crate::schema::{ExtractionError, ProductFacts};

/// Key synonyms the model is known to drift between, in priority order.
const NAME_KEYS: &[&str] = &["productName", "title", "name"];
const DESCRIPTION_KEYS: &[&str] = &["productDescription", "description"];

/// How to treat a present key holding a non-string scalar. The default
/// rejects it so upstream model misbehavior surfaces instead of being
/// silently stringified.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolvePolicy {
    pub coerce_scalars: bool,
}

/// Map a recovered JSON value onto the canonical two-field record.
pub fn resolve(value: &Value, policy: ResolvePolicy) -> Result<ProductFacts, ExtractionError> {
    let name = resolve_field(value, NAME_KEYS, policy);
    let description = resolve_field(value, DESCRIPTION_KEYS, policy);

    match (name, description) {
        (Some(name), Some(description)) => Ok(ProductFacts { name, description }),
        (name, description) => {
            let mut missing = Vec::new();
            if name.is_none() {
                missing.push("name".to_string());
            }
            if description.is_none() {
                missing.push("description".to_string());
            }
            Err(ExtractionError::MissingRequiredField { missing })
        }
    }
}

/// Walk the synonym list and return the first usable value. Nulls and
/// blank strings fall through to the next key; any other non-string type
/// stops the scan for this field.
fn resolve_field(value: &Value, keys: &[&str], policy: ResolvePolicy) -> Option<String> {
    for key in keys {
        match value.get(key) {
            None | Some(Value::Null) => continue,
            Some(Value::String(text)) => {
                let text = text.trim();
                if text.is_empty() {
                    continue;
                }
                return Some(text.to_string());
            }
            Some(other) => {
                if policy.coerce_scalars && (other.is_number() || other.is_boolean()) {
                    return Some(other.to_string());
                }
                return None;
            }
        }
    }
    None
}
