pub mod envelope;
pub mod recover;
pub mod resolve;
pub mod schema;

pub use envelope::normalize;
pub use recover::{Recovery, recover_json};
pub use resolve::{ResolvePolicy, resolve};
pub use schema::{ExtractionError, ProductFacts};

use serde_json::Value;
use tracing::debug;

/// Run the full pipeline over a raw model response: normalize the envelope
/// to candidate text, recover a JSON value from it, resolve the required
/// fields. Stateless and reentrant; safe to call from any number of tasks.
pub fn extract_product_facts(response: &Value) -> Result<ProductFacts, ExtractionError> {
    extract_product_facts_with(response, ResolvePolicy::default())
}

/// Same pipeline with an explicit field-resolution policy.
pub fn extract_product_facts_with(
    response: &Value,
    policy: ResolvePolicy,
) -> Result<ProductFacts, ExtractionError> {
    let text = normalize(response).ok_or(ExtractionError::EmptyResponse)?;

    let value = match recover_json(&text) {
        Recovery::Value(value) => value,
        Recovery::Malformed(err) => {
            debug!(error = %err, "balanced span found but unparseable");
            return Err(ExtractionError::NoJsonFound);
        }
        Recovery::NothingFound => return Err(ExtractionError::NoJsonFound),
    };

    resolve(&value, policy)
}
