// src/services/responses.rs
//! Client for the OpenAI Responses API, driven by a stored prompt template.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::OpenAiSettings;
use crate::error::UpstreamError;

/// Sent back to the user when the model produced no text.
pub const NO_OUTPUT_REPLY: &str = "Sorry, I don't have an answer for that right now.";

#[derive(Debug, Serialize)]
struct CreateResponseRequest<'a> {
    model: &'a str,
    prompt: PromptReference<'a>,
}

#[derive(Debug, Serialize)]
struct PromptReference<'a> {
    id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<&'a str>,
    variables: HashMap<&'a str, &'a str>,
}

/// The parts of a Responses API reply we care about.
#[derive(Debug, Default, Deserialize)]
pub struct ResponseBody {
    #[serde(default)]
    pub output: Option<Vec<OutputItem>>,
    #[serde(default)]
    pub output_text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutputItem {
    Message {
        #[serde(default)]
        content: Option<Vec<ContentPart>>,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    OutputText {
        #[serde(default)]
        text: Option<String>,
    },
    #[serde(other)]
    Other,
}

/// Where the reply text lives in a given response.
#[derive(Debug)]
pub enum ResponseText<'a> {
    Segments(&'a [OutputItem]),
    Flat(&'a str),
    Empty,
}

impl ResponseBody {
    pub fn text(&self) -> ResponseText<'_> {
        match (&self.output, &self.output_text) {
            (Some(items), _) => ResponseText::Segments(items),
            (None, Some(text)) => ResponseText::Flat(text),
            (None, None) => ResponseText::Empty,
        }
    }
}

/// Concatenate every `output_text` part, in order, and trim the result.
pub fn extract_text(body: &ResponseBody) -> String {
    match body.text() {
        ResponseText::Segments(items) => {
            let mut joined = String::new();
            for item in items {
                let OutputItem::Message { content } = item else {
                    continue;
                };
                for part in content.iter().flatten() {
                    if let ContentPart::OutputText { text: Some(text) } = part {
                        joined.push_str(text);
                    }
                }
            }
            joined.trim().to_string()
        }
        ResponseText::Flat(text) => text.trim().to_string(),
        ResponseText::Empty => String::new(),
    }
}

// Server-side log text for a non-2xx reply.
fn error_body(read: reqwest::Result<String>) -> String {
    read.unwrap_or_else(|e| format!("<unreadable body: {e}>"))
}

#[derive(Debug, Clone)]
pub struct ResponsesClient {
    http: reqwest::Client,
    settings: OpenAiSettings,
}

impl ResponsesClient {
    pub fn new(settings: OpenAiSettings) -> Result<Self, UpstreamError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(UpstreamError::Transport)?;
        Ok(Self { http, settings })
    }

    /// Run the configured prompt with `message` bound to the template variable.
    pub async fn create_response(&self, message: &str) -> Result<ResponseBody, UpstreamError> {
        let settings = &self.settings;
        let mut variables = HashMap::new();
        variables.insert(settings.variable.as_str(), message);

        let request = CreateResponseRequest {
            model: &settings.model,
            prompt: PromptReference {
                id: &settings.prompt_id,
                version: settings.prompt_version.as_deref(),
                variables,
            },
        };

        let response = self
            .http
            .post(format!("{}/responses", settings.base_url))
            .bearer_auth(&settings.api_key)
            .json(&request)
            .send()
            .await
            .map_err(UpstreamError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = error_body(response.text().await);
            return Err(UpstreamError::Status { status, body });
        }

        response.json().await.map_err(UpstreamError::Decode)
    }

    /// Ask the model and return user-facing text, substituting a placeholder when empty.
    pub async fn reply_for(&self, message: &str) -> Result<String, UpstreamError> {
        let body = self.create_response(message).await?;
        let text = extract_text(&body);
        if text.is_empty() {
            tracing::warn!("generation API returned no output text");
            return Ok(NO_OUTPUT_REPLY.to_string());
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> ResponseBody {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn joins_output_text_parts_across_messages() {
        let body = parse(
            r#"{
                "id": "resp_1",
                "output": [
                    {"type": "reasoning", "id": "rs_1", "summary": []},
                    {"type": "message", "role": "assistant", "content": [
                        {"type": "output_text", "text": "  Hi ", "annotations": []},
                        {"type": "refusal", "refusal": "nope"}
                    ]},
                    {"type": "message", "role": "assistant", "content": [
                        {"type": "output_text", "text": "there!\n"}
                    ]}
                ]
            }"#,
        );
        assert_eq!(extract_text(&body), "Hi there!");
    }

    #[test]
    fn falls_back_to_flat_text_without_output_list() {
        let body = parse(r#"{"output_text": "  flat reply \n"}"#);
        assert!(matches!(body.text(), ResponseText::Flat(_)));
        assert_eq!(extract_text(&body), "flat reply");
    }

    #[test]
    fn output_list_wins_over_flat_text() {
        let body = parse(
            r#"{"output": [{"type": "message", "content": [{"type": "output_text", "text": "from list"}]}],
                "output_text": "from flat"}"#,
        );
        assert_eq!(extract_text(&body), "from list");
    }

    #[test]
    fn missing_content_yields_empty_string() {
        assert_eq!(extract_text(&parse("{}")), "");
        assert_eq!(extract_text(&parse(r#"{"output": []}"#)), "");
        assert_eq!(
            extract_text(&parse(r#"{"output": [{"type": "message"}]}"#)),
            ""
        );
        assert_eq!(extract_text(&parse(r#"{"output": null, "output_text": null}"#)), "");
        assert_eq!(
            extract_text(&parse(r#"{"output": [{"type": "message", "content": null}]}"#)),
            ""
        );
        assert_eq!(
            extract_text(&parse(
                r#"{"output": [{"type": "message", "content": [{"type": "output_text"}]}]}"#
            )),
            ""
        );
        assert_eq!(
            extract_text(&parse(
                r#"{"output": [{"type": "message", "content": [{"type": "output_text", "text": null}]}]}"#
            )),
            ""
        );
    }

    #[test]
    fn textless_parts_do_not_hide_later_text() {
        let body = parse(
            r#"{"output": [
                {"type": "message", "content": null},
                {"type": "message", "content": [
                    {"type": "output_text", "text": null},
                    {"type": "output_text", "text": "still here"}
                ]}
            ]}"#,
        );
        assert_eq!(extract_text(&body), "still here");
    }

    #[test]
    fn error_body_keeps_read_failure() {
        assert_eq!(error_body(Ok("rate limited".to_string())), "rate limited");

        let read_err = reqwest::Client::new().get("not a url").build().unwrap_err();
        let described = error_body(Err(read_err));
        assert!(described.starts_with("<unreadable body: "), "{}", described);
        assert!(described.len() > "<unreadable body: >".len());
    }

    #[test]
    fn request_body_binds_message_to_variable() {
        let mut variables = HashMap::new();
        variables.insert("user_input", "hello");
        let request = CreateResponseRequest {
            model: "gpt-5-mini",
            prompt: PromptReference {
                id: "pmpt_1",
                version: None,
                variables,
            },
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "model": "gpt-5-mini",
                "prompt": {"id": "pmpt_1", "variables": {"user_input": "hello"}}
            })
        );
    }
}
