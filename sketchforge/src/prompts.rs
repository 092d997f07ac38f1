use crate::generator::GenerationRequest;

/// Build the single-turn generation prompt for a project request.
///
/// The JSON shape spelled out here must stay in sync with
/// [`crate::project::ArduinoProject`]'s serde names.
pub fn build_generation_prompt(request: &GenerationRequest) -> String {
    format!(
        r#"You are an expert embedded-systems engineer who designs beginner-friendly Arduino projects.

PROJECT REQUEST:
{}

Design a complete Arduino project for this request. Pick concrete components
(with values where they matter, e.g. resistor ohms), describe the wiring
clearly enough to build the circuit without a drawn diagram, and write the
full sketch. The sketch must compile as-is: declare pin constants that match
the wiring description, implement setup() and loop(), and add short comments
a beginner can follow.

Respond ONLY with valid JSON in this exact format (no markdown, no code blocks, just pure JSON):
{{
  "projectName": "Short project title",
  "summary": "One or two sentences on what the project does",
  "components": [
    {{
      "name": "Arduino Uno",
      "quantity": 1,
      "purpose": "Runs the sketch and drives the circuit"
    }}
  ],
  "circuitDescription": "Step-by-step wiring description referencing the pin constants used in the sketch",
  "libraries": ["LiquidCrystal"],
  "code": "The complete Arduino sketch as a single string"
}}

Important: Return ONLY the JSON object, nothing else."#,
        request.description()
    )
}
