use serde_json::{Value, json};

const ANALYSIS_INSTRUCTIONS: &str = "You will receive an image. Identify the product shown in the image \
and return a JSON object with exactly two keys: \"productName\" \
(a short commercial title, at most ~6 words) and \"productDescription\" \
(a useful, concise description of the product, 1-2 sentences). \
Return ONLY the JSON object and nothing else.";

/// Build the user message for the image-analysis direction: an instruction
/// block plus the image as a data URI.
pub fn build_analysis_message(data_uri: &str) -> Value {
    json!({
        "role": "user",
        "content": [
            {"type": "text", "text": ANALYSIS_INSTRUCTIONS},
            {"type": "image_url", "image_url": {"url": data_uri}}
        ]
    })
}

/// Build the prompt for generating a product photo from known facts.
pub fn build_image_prompt(name: &str, description: &str) -> String {
    format!(
        "Product photo of {name}. {description}. \
High quality product photography, studio lighting, white background, realistic look"
    )
}
