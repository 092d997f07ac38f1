//! SketchForge - AI-assisted Arduino project generation library
//!
//! Describe an electronics project in plain language and get back a complete
//! starter kit: a parts list, a wiring description, the libraries to install,
//! and a ready-to-upload Arduino sketch. Generation is delegated to a
//! [`ProjectGenerator`] implementation; [`GeminiClient`] talks to the Gemini
//! API out of the box.
//!
//! # Quick Start
//!
//! ```no_run
//! use sketchforge::{GeminiClient, GenerationOrchestrator, RequestState};
//! use std::sync::Arc;
//!
//! # async fn run() {
//! let client = GeminiClient::new("my-api-key".to_string());
//! let mut orchestrator = GenerationOrchestrator::new(Arc::new(client));
//!
//! match orchestrator.submit("a plant moisture monitor with an OLED display").await {
//!     RequestState::Succeeded(project) => println!("{}", project.code),
//!     RequestState::Failed(message) => eprintln!("{}", message),
//!     _ => {}
//! }
//! # }
//! ```
//!
//! # Features
//!
//! - **Request orchestration**: One explicit state machine per submission
//! - **Gemini client**: Structured JSON output with a response schema
//! - **Provider boundary**: Bring your own backend via [`ProjectGenerator`]
//! - **Prompt construction**: Deterministic, unit-testable prompt builder

pub mod generator;
pub mod gemini;
pub mod orchestrator;
pub mod project;
pub mod prompts;

// Re-export main types
pub use generator::{GenerationError, GenerationRequest, ModelInfo, ProjectGenerator};
pub use gemini::GeminiClient;
pub use orchestrator::{
    GenerationOrchestrator, RequestState, EMPTY_DESCRIPTION_MESSAGE, GENERATION_FAILED_MESSAGE,
};
pub use project::{ArduinoProject, ComponentEntry};

/// Generate a project in one call (convenience wrapper).
///
/// Builds a [`GeminiClient`] with the default model and runs a single
/// request, bypassing orchestrator state tracking. Callers get the typed
/// [`GenerationError`] instead of the collapsed user-facing message.
pub async fn generate_project(
    api_key: String,
    description: &str,
) -> Result<ArduinoProject, GenerationError> {
    let request = GenerationRequest::new(description)?;
    GeminiClient::new(api_key).generate_project(&request).await
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        ArduinoProject, ComponentEntry, GeminiClient, GenerationError, GenerationOrchestrator,
        GenerationRequest, ProjectGenerator, RequestState,
    };
}
