//! Gemini client for project generation.
//!
//! Talks to the Google Generative Language API (`generateContent`) with a
//! structured-output schema and decodes the JSON reply into an
//! [`ArduinoProject`].

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;

use crate::generator::{GenerationError, GenerationRequest, ModelInfo, ProjectGenerator};
use crate::project::ArduinoProject;
use crate::prompts;

const GEMINI_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const REQUEST_TIMEOUT_SECS: u64 = 120;
const TEMPERATURE: f32 = 0.4;

/// Client for the Gemini generation service.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    /// Create a client with the given API key and the default model.
    pub fn new(api_key: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();

        Self {
            client,
            api_key,
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Set the model to use.
    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    async fn send_request(&self, prompt: &str) -> Result<String, GenerationError> {
        if self.api_key.is_empty() {
            return Err(GenerationError::MissingApiKey);
        }

        let request_body = GeminiRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: project_response_schema(),
                temperature: TEMPERATURE,
            },
        };

        let url = format!("{}/{}:generateContent", GEMINI_API_BASE_URL, self.model);
        tracing::debug!("Sending generation request to Gemini: {}", self.model);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(GenerationError::RequestFailed)?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            return Err(GenerationError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let gemini_response: GeminiResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::ParseError(format!("Failed to parse JSON: {}", e)))?;

        candidate_text(&gemini_response)
    }
}

#[async_trait]
impl ProjectGenerator for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn is_available(&self) -> bool {
        !self.api_key.is_empty()
    }

    async fn generate_project(
        &self,
        request: &GenerationRequest,
    ) -> Result<ArduinoProject, GenerationError> {
        let prompt = prompts::build_generation_prompt(request);
        let response_text = self.send_request(&prompt).await?;
        parse_project_response(&response_text)
    }

    fn model_info(&self) -> ModelInfo {
        ModelInfo {
            provider: "gemini".to_string(),
            model_name: self.model.clone(),
        }
    }
}

/// Concatenated text of the first candidate's parts.
fn candidate_text(response: &GeminiResponse) -> Result<String, GenerationError> {
    let candidate = response.candidates.first().ok_or_else(|| {
        GenerationError::InvalidResponse("empty candidates array in response".to_string())
    })?;

    if let Some(reason) = candidate.finish_reason.as_deref() {
        if reason != "STOP" {
            tracing::warn!("Generation stopped early: {}", reason);
        }
    }

    let content = candidate.content.as_ref().ok_or_else(|| {
        GenerationError::InvalidResponse("candidate has no content".to_string())
    })?;

    let text: String = content
        .parts
        .iter()
        .filter_map(|p| p.text.as_deref())
        .collect();

    if text.is_empty() {
        return Err(GenerationError::InvalidResponse(
            "candidate contains no text parts".to_string(),
        ));
    }

    Ok(text)
}

fn parse_project_response(response_text: &str) -> Result<ArduinoProject, GenerationError> {
    let json_text = extract_json(response_text);

    serde_json::from_str(json_text)
        .map_err(|e| GenerationError::ParseError(format!("Failed to parse project JSON: {}", e)))
}

/// Pull the JSON object out of a model reply.
///
/// Structured output should already be bare JSON, but replies occasionally
/// arrive fenced in markdown or padded with prose; fall back to the widest
/// `{ .. }` span in that case.
fn extract_json(text: &str) -> &str {
    let text = text.trim();

    if let Some(start) = text.find("```json") {
        if let Some(end) = text.rfind("```") {
            if end > start + 7 {
                return text[start + 7..end].trim();
            }
        }
    }

    if let Some(start) = text.find("```") {
        if let Some(end) = text.rfind("```") {
            if end > start + 3 {
                let content = text[start + 3..end].trim();
                if content.starts_with('{') {
                    return content;
                }
            }
        }
    }

    if let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) {
        if end > start {
            return &text[start..=end];
        }
    }

    text
}

/// JSON schema handed to Gemini so the reply matches [`ArduinoProject`].
fn project_response_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "projectName": {
                "type": "STRING",
                "description": "Short project title"
            },
            "summary": {
                "type": "STRING",
                "description": "One or two sentences on what the project does"
            },
            "components": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING" },
                        "quantity": { "type": "INTEGER" },
                        "purpose": { "type": "STRING" }
                    },
                    "required": ["name", "quantity", "purpose"]
                }
            },
            "circuitDescription": {
                "type": "STRING",
                "description": "Step-by-step wiring description"
            },
            "libraries": {
                "type": "ARRAY",
                "items": { "type": "STRING" }
            },
            "code": {
                "type": "STRING",
                "description": "The complete Arduino sketch"
            }
        },
        "required": ["projectName", "summary", "components", "circuitDescription", "code"]
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<RequestContent>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: serde_json::Value,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}
