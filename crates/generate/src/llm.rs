use anyhow::{Context, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;
use serde_json::Value;

/// Client for an OpenAI-compatible API. Constructed by the surrounding
/// service and passed in wherever a model call is needed; nothing here is
/// global.
#[derive(Clone)]
pub struct OpenAiClient {
    base_url: String,
    model: String,
    api_key: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Value>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ImageRequest {
    model: String,
    input: String,
    tools: Vec<Value>,
}

impl OpenAiClient {
    pub fn new(base_url: String, model: String, api_key: String) -> Self {
        Self {
            base_url,
            model,
            api_key,
            client: reqwest::Client::new(),
        }
    }

    /// Standard endpoint and model, API key from `OPENAI_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .context("OPENAI_API_KEY environment variable is not set")?;
        Ok(Self::new(
            "https://api.openai.com/v1".to_string(),
            "gpt-4o-mini".to_string(),
            api_key,
        ))
    }

    /// Send a chat completion request and return the raw response envelope.
    ///
    /// The envelope is deliberately not deserialized into typed structs:
    /// its shape drifts across providers and SDK versions, and absorbing
    /// that drift is the extract crate's job.
    pub async fn chat(&self, messages: Vec<Value>) -> Result<Value> {
        let url = format!("{}/chat/completions", self.base_url);

        let request = ChatRequest {
            model: self.model.clone(),
            messages,
            temperature: 0.2,
            max_tokens: 500,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .context("Failed to send chat completion request")?;

        if !response.status().is_success() {
            anyhow::bail!("Chat completion request failed: {}", response.status());
        }

        let envelope: Value = response
            .json()
            .await
            .context("Failed to read chat completion response")?;

        Ok(envelope)
    }

    /// Generate an image from a prompt and return the decoded bytes.
    pub async fn generate_image(&self, prompt: &str) -> Result<Vec<u8>> {
        let url = format!("{}/responses", self.base_url);

        let request = ImageRequest {
            model: self.model.clone(),
            input: prompt.to_string(),
            tools: vec![serde_json::json!({"type": "image_generation"})],
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .context("Failed to send image generation request")?;

        if !response.status().is_success() {
            anyhow::bail!("Image generation request failed: {}", response.status());
        }

        let envelope: Value = response
            .json()
            .await
            .context("Failed to read image generation response")?;

        decode_image_response(&envelope)
    }
}

/// Pull the base64 image payload out of a responses-API envelope: the
/// first `output` entry whose type is `image_generation_call` carries the
/// encoded image in `result`.
pub fn decode_image_response(envelope: &Value) -> Result<Vec<u8>> {
    let encoded = envelope
        .get("output")
        .and_then(Value::as_array)
        .and_then(|outputs| {
            outputs.iter().find(|output| {
                output.get("type").and_then(Value::as_str) == Some("image_generation_call")
            })
        })
        .and_then(|output| output.get("result"))
        .and_then(Value::as_str)
        .context("No image_generation_call output in model response")?;

    STANDARD
        .decode(encoded)
        .context("Failed to decode base64 image payload")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_image_response_picks_generation_call() {
        let envelope = json!({
            "output": [
                {"type": "message", "content": "here is your image"},
                {"type": "image_generation_call", "result": "aGVsbG8="}
            ]
        });
        let bytes = decode_image_response(&envelope).unwrap();
        assert_eq!(bytes, b"hello");
    }

    #[test]
    fn test_decode_image_response_without_image_fails() {
        let envelope = json!({"output": [{"type": "message"}]});
        assert!(decode_image_response(&envelope).is_err());
        assert!(decode_image_response(&json!({})).is_err());
    }

    #[test]
    fn test_decode_image_response_rejects_bad_base64() {
        let envelope = json!({
            "output": [{"type": "image_generation_call", "result": "not base64!!!"}]
        });
        assert!(decode_image_response(&envelope).is_err());
    }
}
