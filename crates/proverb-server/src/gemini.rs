use serde_json::{Value, json};
use tracing::debug;

use super::error::SourceError;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const MODEL: &str = "gemini-2.0-flash";

/// Request one quote from the generation API.
pub async fn generate_quote(
    http: &reqwest::Client,
    api_key: &str,
    prompt: &str,
) -> Result<String, SourceError> {
    let url = format!("{API_BASE}/models/{MODEL}:generateContent");

    let response = http
        .post(&url)
        .header("x-goog-api-key", api_key)
        .json(&build_request_body(prompt))
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(SourceError::Status(status.as_u16(), body));
    }

    let data: Value = response.json().await?;
    debug!("generation response received");

    extract_quote(&data)
}

/// One user turn, high-temperature sampling, short output. The four
/// safety categories are capped at medium.
fn build_request_body(prompt: &str) -> Value {
    json!({
        "contents": [{
            "parts": [{
                "text": prompt
            }]
        }],
        "generationConfig": {
            "temperature": 1.2,
            "topK": 100,
            "topP": 0.8,
            "maxOutputTokens": 50,
            "candidateCount": 1,
        },
        "safetySettings": [
            {
                "category": "HARM_CATEGORY_HARASSMENT",
                "threshold": "BLOCK_MEDIUM_AND_ABOVE"
            },
            {
                "category": "HARM_CATEGORY_HATE_SPEECH",
                "threshold": "BLOCK_MEDIUM_AND_ABOVE"
            },
            {
                "category": "HARM_CATEGORY_SEXUALLY_EXPLICIT",
                "threshold": "BLOCK_MEDIUM_AND_ABOVE"
            },
            {
                "category": "HARM_CATEGORY_DANGEROUS_CONTENT",
                "threshold": "BLOCK_MEDIUM_AND_ABOVE"
            }
        ]
    })
}

fn extract_quote(data: &Value) -> Result<String, SourceError> {
    data["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .map(|text| text.trim().to_string())
        .ok_or(SourceError::UnexpectedShape)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_shape() {
        let body = build_request_body("hello");

        assert_eq!(body["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(body["generationConfig"]["temperature"], 1.2);
        assert_eq!(body["generationConfig"]["topK"], 100);
        assert_eq!(body["generationConfig"]["topP"], 0.8);
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 50);
        assert_eq!(body["generationConfig"]["candidateCount"], 1);
        assert_eq!(body["safetySettings"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn extracts_trimmed_candidate_text() {
        let data = json!({
            "candidates": [{
                "content": {
                    "parts": [{ "text": "  Động lực là tạm thời.\n" }]
                }
            }]
        });

        assert_eq!(extract_quote(&data).unwrap(), "Động lực là tạm thời.");
    }

    #[test]
    fn missing_candidates_is_an_error() {
        let data = json!({ "promptFeedback": {} });

        assert!(matches!(
            extract_quote(&data),
            Err(SourceError::UnexpectedShape)
        ));
    }

    #[test]
    fn non_string_text_is_an_error() {
        let data = json!({
            "candidates": [{ "content": { "parts": [{ "text": 7 }] } }]
        });

        assert!(matches!(
            extract_quote(&data),
            Err(SourceError::UnexpectedShape)
        ));
    }
}
