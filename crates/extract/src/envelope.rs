use serde_json::Value;

/// Reduce a shape-unknown model response to a single candidate text string.
///
/// Different API versions and SDKs disagree on where the payload lives:
/// under `choices[0].message.content`, under `delta.content` for streamed
/// chunks, as a bare `text` field, or as a plain string. Every accessor
/// here is fail-soft (`Value::get` returns `Option`), so a mismatched
/// shape falls through to the next path instead of panicking.
///
/// Returns `None` only when every path yields nothing, or only whitespace.
pub fn normalize(response: &Value) -> Option<String> {
    // A bare string response is already the candidate text.
    if let Some(text) = response.as_str() {
        return non_blank(text);
    }

    // Take the first choice if a choices array exists; otherwise the
    // response itself plays the role of the choice.
    let choice = response
        .get("choices")
        .and_then(Value::as_array)
        .and_then(|choices| choices.first())
        .unwrap_or(response);

    let message = choice.get("message").or_else(|| choice.get("delta"));

    let content = message
        .and_then(|m| m.get("content"))
        .filter(|c| !c.is_null())
        // some SDKs put the text directly on the choice
        .or_else(|| choice.get("text").filter(|t| !t.is_null()))
        // or hand back `message` as a plain string
        .or_else(|| message.filter(|m| m.is_string()))
        .or_else(|| choice.is_string().then_some(choice))?;

    match content {
        Value::String(text) => non_blank(text),
        // Content blocks (e.g. a list of typed parts) keep their JSON form
        // so the recovery pass can still find the payload inside them.
        structured => serde_json::to_string(structured)
            .ok()
            .and_then(|text| non_blank(&text)),
    }
}

fn non_blank(text: &str) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_chat_completion_envelope() {
        let response = json!({
            "choices": [{"message": {"role": "assistant", "content": "hello"}}]
        });
        assert_eq!(normalize(&response), Some("hello".to_string()));
    }

    #[test]
    fn test_streaming_delta_envelope() {
        let response = json!({
            "choices": [{"delta": {"content": "partial"}}]
        });
        assert_eq!(normalize(&response), Some("partial".to_string()));
    }

    #[test]
    fn test_content_blocks_are_serialized_not_dropped() {
        let response = json!({
            "choices": [{"message": {"content": [
                {"type": "text", "text": "{\"a\":1}"}
            ]}}]
        });
        let candidate = normalize(&response).unwrap();
        assert!(candidate.contains("{\\\"a\\\":1}"));
    }

    #[test]
    fn test_bare_string_response() {
        let response = json!("just text");
        assert_eq!(normalize(&response), Some("just text".to_string()));
    }

    #[test]
    fn test_text_field_fallback() {
        let response = json!({"choices": [{"text": "legacy completion"}]});
        assert_eq!(normalize(&response), Some("legacy completion".to_string()));
    }

    #[test]
    fn test_message_as_plain_string_fallback() {
        let response = json!({"choices": [{"message": "raw message"}]});
        assert_eq!(normalize(&response), Some("raw message".to_string()));
    }

    #[test]
    fn test_string_choice() {
        let response = json!({"choices": ["direct choice text"]});
        assert_eq!(normalize(&response), Some("direct choice text".to_string()));
    }

    #[test]
    fn test_empty_envelope_yields_none() {
        assert_eq!(normalize(&json!({})), None);
        assert_eq!(normalize(&json!({"choices": [{}]})), None);
        assert_eq!(normalize(&json!({"choices": []})), None);
        assert_eq!(normalize(&json!(null)), None);
    }

    #[test]
    fn test_null_and_blank_content_are_absent() {
        let response = json!({"choices": [{"message": {"content": null}}]});
        assert_eq!(normalize(&response), None);

        let response = json!({"choices": [{"message": {"content": "   "}}]});
        assert_eq!(normalize(&response), None);
    }
}
