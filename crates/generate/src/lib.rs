pub mod image;
pub mod llm;
pub mod prompt;

pub use image::to_data_uri;
pub use llm::OpenAiClient;

use anyhow::{Context, Result};
use extract::{ProductFacts, extract_product_facts};
use tracing::warn;

/// Product-catalog side of the model integration: identify a product from
/// an image, or render a product photo from known facts. Owns the client
/// handle it was constructed with; holds no other state.
pub struct ProductGenerator {
    client: OpenAiClient,
}

impl ProductGenerator {
    pub fn new(client: OpenAiClient) -> Self {
        Self { client }
    }

    /// Ask the model what product an image shows and extract the
    /// name/description record from its reply.
    ///
    /// The reply envelope goes through the extract pipeline untouched;
    /// whether to retry a misbehaving model is the caller's decision.
    pub async fn describe_product_image(&self, data_uri: &str) -> Result<ProductFacts> {
        let message = prompt::build_analysis_message(data_uri);

        let envelope = self
            .client
            .chat(vec![message])
            .await
            .context("Image analysis call failed")?;

        let facts = extract_product_facts(&envelope).map_err(|err| {
            warn!(error = %err, "could not extract product facts from model reply");
            err
        })?;

        Ok(facts)
    }

    /// Generate a studio-style product photo for the given facts.
    pub async fn generate_product_image(&self, facts: &ProductFacts) -> Result<Vec<u8>> {
        let prompt = prompt::build_image_prompt(&facts.name, &facts.description);

        self.client
            .generate_image(&prompt)
            .await
            .context("Image generation call failed")
    }
}
