//! Request orchestrator: the submission lifecycle as a state machine.
//!
//! One description goes in, one generation request goes out, and the outcome
//! lands in a single [`RequestState`] value. Illegal combinations (a result
//! and an error at the same time, loading with a stale error showing) are
//! unrepresentable because the state is a tagged enum, not a set of flags.

use std::sync::Arc;

use crate::generator::{GenerationRequest, ProjectGenerator};
use crate::project::ArduinoProject;

/// Shown when the submitted description is empty after trimming.
pub const EMPTY_DESCRIPTION_MESSAGE: &str = "Please describe the project you want to build.";

/// Shown when the generation call fails for any reason.
pub const GENERATION_FAILED_MESSAGE: &str =
    "Something went wrong while generating the project. The service may be \
     unavailable or the response may have been malformed. Please try again.";

/// Lifecycle of the current (or most recent) generation request.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestState {
    /// No request has been made, or the last one was cleared.
    #[default]
    Idle,
    /// A request is in flight.
    Loading,
    /// The last request produced a project.
    Succeeded(ArduinoProject),
    /// The last request failed; holds the user-facing message.
    Failed(String),
}

impl RequestState {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading)
    }

    /// The generated project, if the last request succeeded.
    pub fn project(&self) -> Option<&ArduinoProject> {
        match self {
            RequestState::Succeeded(project) => Some(project),
            _ => None,
        }
    }

    /// The user-facing message, if the last request failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            RequestState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Drives submissions against a [`ProjectGenerator`] and tracks the outcome.
///
/// Holds exactly one [`RequestState`]; each submission replaces it, so a new
/// attempt clears any prior result or error by construction. Submissions on
/// one orchestrator are serialized through `&mut self` -- there is no
/// internal queueing or cancellation.
pub struct GenerationOrchestrator {
    generator: Arc<dyn ProjectGenerator>,
    state: RequestState,
}

impl GenerationOrchestrator {
    pub fn new(generator: Arc<dyn ProjectGenerator>) -> Self {
        Self {
            generator,
            state: RequestState::Idle,
        }
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    /// Submit a project description.
    ///
    /// A description that is empty after trimming fails immediately with
    /// [`EMPTY_DESCRIPTION_MESSAGE`] and the generator is not invoked.
    /// Otherwise the state moves to `Loading`, the generator is called
    /// exactly once with the trimmed text, and the state settles on
    /// `Succeeded` or `Failed`. Every failure cause (network, API status,
    /// malformed payload) collapses to [`GENERATION_FAILED_MESSAGE`]; the
    /// underlying error is logged, not surfaced.
    pub async fn submit(&mut self, description: &str) -> &RequestState {
        let request = match GenerationRequest::new(description) {
            Ok(request) => request,
            Err(_) => {
                self.state = RequestState::Failed(EMPTY_DESCRIPTION_MESSAGE.to_string());
                return &self.state;
            }
        };

        self.state = RequestState::Loading;
        tracing::debug!("Submitting generation request to {}", self.generator.name());

        match self.generator.generate_project(&request).await {
            Ok(project) => {
                tracing::info!("Generation succeeded: {}", project.project_name);
                self.state = RequestState::Succeeded(project);
            }
            Err(e) => {
                tracing::warn!("Generation failed: {}", e);
                self.state = RequestState::Failed(GENERATION_FAILED_MESSAGE.to_string());
            }
        }

        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{GenerationError, ModelInfo};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct ScriptedGenerator {
        outcome: Result<ArduinoProject, ()>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedGenerator {
        fn succeeding(project: ArduinoProject) -> Self {
            Self {
                outcome: Ok(project),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                outcome: Err(()),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ProjectGenerator for ScriptedGenerator {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn is_available(&self) -> bool {
            true
        }

        async fn generate_project(
            &self,
            request: &GenerationRequest,
        ) -> Result<ArduinoProject, GenerationError> {
            self.calls
                .lock()
                .unwrap()
                .push(request.description().to_string());

            match &self.outcome {
                Ok(project) => Ok(project.clone()),
                Err(()) => Err(GenerationError::InvalidResponse("scripted".to_string())),
            }
        }

        fn model_info(&self) -> ModelInfo {
            ModelInfo {
                provider: "scripted".to_string(),
                model_name: "none".to_string(),
            }
        }
    }

    fn sample_project() -> ArduinoProject {
        ArduinoProject {
            project_name: "Blink".to_string(),
            code: "void setup() {}".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_initial_state_is_idle() {
        let generator = Arc::new(ScriptedGenerator::succeeding(sample_project()));
        let orchestrator = GenerationOrchestrator::new(generator);
        assert_eq!(*orchestrator.state(), RequestState::Idle);
    }

    #[test]
    fn test_state_accessors() {
        assert!(RequestState::Loading.is_loading());
        assert!(!RequestState::Idle.is_loading());
        assert!(RequestState::Loading.project().is_none());
        assert!(RequestState::Loading.error().is_none());
    }

    #[tokio::test]
    async fn test_blank_submission_fails_without_calling_generator() {
        let generator = Arc::new(ScriptedGenerator::succeeding(sample_project()));
        let mut orchestrator = GenerationOrchestrator::new(generator.clone());

        let state = orchestrator.submit("   \t\n").await;

        assert_eq!(
            *state,
            RequestState::Failed(EMPTY_DESCRIPTION_MESSAGE.to_string())
        );
        assert!(generator.calls().is_empty());
    }

    #[tokio::test]
    async fn test_successful_submission_calls_generator_once_with_trimmed_text() {
        let generator = Arc::new(ScriptedGenerator::succeeding(sample_project()));
        let mut orchestrator = GenerationOrchestrator::new(generator.clone());

        let state = orchestrator.submit("  a blinking LED  ").await;

        assert_eq!(*state, RequestState::Succeeded(sample_project()));
        assert_eq!(generator.calls(), vec!["a blinking LED".to_string()]);
    }

    #[tokio::test]
    async fn test_generator_error_collapses_to_generic_message() {
        let generator = Arc::new(ScriptedGenerator::failing());
        let mut orchestrator = GenerationOrchestrator::new(generator.clone());

        let state = orchestrator.submit("a blinking LED").await;

        assert_eq!(
            *state,
            RequestState::Failed(GENERATION_FAILED_MESSAGE.to_string())
        );
        assert_eq!(state.error(), Some(GENERATION_FAILED_MESSAGE));
    }

    #[tokio::test]
    async fn test_success_after_failure_clears_the_error() {
        let generator = Arc::new(ScriptedGenerator::succeeding(sample_project()));
        let mut orchestrator = GenerationOrchestrator::new(generator.clone());

        orchestrator.submit("").await;
        assert!(orchestrator.state().error().is_some());

        orchestrator.submit("a blinking LED").await;
        assert!(orchestrator.state().error().is_none());
        assert_eq!(orchestrator.state().project(), Some(&sample_project()));
    }

    #[tokio::test]
    async fn test_failure_after_success_clears_the_project() {
        let failing = Arc::new(ScriptedGenerator::failing());
        let mut orchestrator = GenerationOrchestrator::new(failing.clone());

        // Seed a success by hand, then watch a failed attempt replace it.
        orchestrator.state = RequestState::Succeeded(sample_project());

        orchestrator.submit("a blinking LED").await;
        assert!(orchestrator.state().project().is_none());
        assert!(orchestrator.state().error().is_some());
    }

    #[tokio::test]
    async fn test_resubmission_is_idempotent_in_outcome() {
        let generator = Arc::new(ScriptedGenerator::succeeding(sample_project()));
        let mut orchestrator = GenerationOrchestrator::new(generator.clone());

        let first = orchestrator.submit("a blinking LED").await.clone();
        let second = orchestrator.submit("a blinking LED").await.clone();

        assert_eq!(first, second);
        assert_eq!(generator.calls().len(), 2);
    }
}
