//! Generate a project from a command-line description and print the sketch.

use sketchforge::prelude::*;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let description = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    let description = if description.is_empty() {
        "a traffic light for pedestrians with a request button".to_string()
    } else {
        description
    };

    let api_key = match std::env::var("GEMINI_API_KEY") {
        Ok(key) => key,
        Err(_) => {
            eprintln!("Set GEMINI_API_KEY to run this example.");
            eprintln!("Usage: GEMINI_API_KEY=... cargo run --example generate_project [description]");
            std::process::exit(1);
        }
    };

    let client = GeminiClient::new(api_key);
    let mut orchestrator = GenerationOrchestrator::new(Arc::new(client));

    eprintln!("Generating project for: {}", description);

    match orchestrator.submit(&description).await {
        RequestState::Succeeded(project) => {
            println!("Project: {}", project.project_name);
            println!("{}", project.summary);
            println!();

            println!("Components:");
            for entry in &project.components {
                println!("  - {}x {} ({})", entry.quantity, entry.name, entry.purpose);
            }

            if !project.libraries.is_empty() {
                println!("\nLibraries: {}", project.libraries.join(", "));
            }

            println!("\n{}", project.circuit_description);
            println!("\n{}", project.code);
        }
        state => {
            if let Some(message) = state.error() {
                eprintln!("Error: {}", message);
            }
            std::process::exit(1);
        }
    }
}
