//! Generation provider boundary.
//!
//! Defines the common interface a project generator implements, plus the
//! request and error types that cross it. The rest of the library (and any
//! frontend) only ever talks to [`ProjectGenerator`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::project::ArduinoProject;

/// A validated generation request.
///
/// Wraps the free-form project description and guarantees it is non-empty
/// after trimming; the trimmed text is exactly what a provider receives.
/// A request is created on submission and dropped once the call resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    description: String,
}

impl GenerationRequest {
    /// Trim and validate a raw description.
    ///
    /// Returns [`GenerationError::EmptyDescription`] for empty or
    /// whitespace-only input.
    pub fn new(description: &str) -> Result<Self, GenerationError> {
        let trimmed = description.trim();
        if trimmed.is_empty() {
            return Err(GenerationError::EmptyDescription);
        }
        Ok(Self {
            description: trimmed.to_string(),
        })
    }

    /// The trimmed project description.
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Errors produced while turning a description into a project.
///
/// `EmptyDescription` is the validation failure; every other variant comes
/// out of the external generation call. The orchestrator treats the latter
/// group uniformly, so the distinction only matters to direct library users.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("project description is empty")]
    EmptyDescription,
    #[error("API request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },
    #[error("failed to parse response: {0}")]
    ParseError(String),
    #[error("invalid response format: {0}")]
    InvalidResponse(String),
    #[error("missing API key")]
    MissingApiKey,
}

/// Information about the model behind a generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    /// Provider name (e.g., "gemini").
    pub provider: String,

    /// Model name (e.g., "gemini-2.5-flash").
    pub model_name: String,
}

/// Common trait for all project generators.
#[async_trait]
pub trait ProjectGenerator: Send + Sync {
    /// Get the provider name.
    fn name(&self) -> &str;

    /// Check if the generator is configured and usable.
    async fn is_available(&self) -> bool;

    /// Generate a project from a validated request.
    async fn generate_project(
        &self,
        request: &GenerationRequest,
    ) -> Result<ArduinoProject, GenerationError>;

    /// Get model info.
    fn model_info(&self) -> ModelInfo;
}
