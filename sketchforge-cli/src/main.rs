//! SketchForge CLI - AI-assisted Arduino project generation from the command line.

use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use sketchforge::{
    ArduinoProject, GeminiClient, GenerationOrchestrator, ModelInfo, ProjectGenerator,
    RequestState,
};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

/// Seed description offered to first-time users ("use an example").
const EXAMPLE_DESCRIPTION: &str = "A pedestrian traffic light with a button. When the button is \
    pressed, the green car light turns yellow for 3 seconds, then red. Next, the green \
    pedestrian light turns on for 10 seconds, blinks for 3 seconds and goes out. Finally, the \
    green car light turns on again.";

#[derive(Parser)]
#[command(name = "sketchforge")]
#[command(about = "AI-assisted Arduino project generator", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an Arduino project from a plain-language description
    Generate {
        /// What to build, in your own words
        #[arg(value_name = "DESCRIPTION")]
        description: Option<String>,

        /// Read the description from a file instead
        #[arg(long, value_name = "FILE", conflicts_with = "description")]
        file: Option<PathBuf>,

        /// Use the built-in example description
        #[arg(long, conflicts_with_all = ["description", "file"])]
        example: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,

        /// Gemini model to use
        #[arg(long, value_name = "MODEL")]
        model: Option<String>,

        /// Gemini API key (falls back to GEMINI_API_KEY, then API_KEY)
        #[arg(long, value_name = "KEY")]
        api_key: Option<String>,

        /// Write the generated sketch to this file
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Print the built-in example description
    Example,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output for scripting
    Json,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::Generate {
            description,
            file,
            example,
            format,
            model,
            api_key,
            output,
        } => handle_generate(description, file, example, format, model, api_key, output).await,
        Commands::Example => {
            println!("{}", EXAMPLE_DESCRIPTION);
            0
        }
    };

    process::exit(exit_code);
}

async fn handle_generate(
    description: Option<String>,
    file: Option<PathBuf>,
    example: bool,
    format: OutputFormat,
    model: Option<String>,
    api_key: Option<String>,
    output: Option<PathBuf>,
) -> i32 {
    let description = if example {
        EXAMPLE_DESCRIPTION.to_string()
    } else if let Some(path) = file {
        match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) => {
                eprintln!("Error: cannot read {}: {}", path.display(), e);
                return 1;
            }
        }
    } else if let Some(text) = description {
        text
    } else {
        eprintln!(
            "Error: no description given. Pass one as an argument, use --file, or try --example."
        );
        return 1;
    };

    let api_key = api_key
        .or_else(|| std::env::var("GEMINI_API_KEY").ok())
        .or_else(|| std::env::var("API_KEY").ok())
        .unwrap_or_default();

    let mut client = GeminiClient::new(api_key);
    if let Some(model) = model {
        client = client.with_model(model);
    }

    if !client.is_available().await {
        eprintln!("Error: no API key configured. Pass --api-key or set GEMINI_API_KEY.");
        return 1;
    }

    let info = client.model_info();
    let mut orchestrator = GenerationOrchestrator::new(Arc::new(client));

    eprintln!(
        "Generating project with {} ({})...",
        info.provider, info.model_name
    );

    match orchestrator.submit(&description).await {
        RequestState::Succeeded(project) => {
            match format {
                OutputFormat::Human => output_human(project),
                OutputFormat::Json => output_json(project, &info),
            }

            if let Some(path) = output {
                if let Err(e) = std::fs::write(&path, &project.code) {
                    eprintln!("Error: cannot write {}: {}", path.display(), e);
                    return 1;
                }
                eprintln!("Sketch written to {}", path.display());
            }

            0
        }
        RequestState::Failed(message) => {
            eprintln!("Error: {}", message);
            1
        }
        _ => 1,
    }
}

fn output_human(project: &ArduinoProject) {
    println!("\n{}", project.project_name);
    println!("{}", "─".repeat(60));
    println!("{}", project.summary);

    if !project.components.is_empty() {
        println!("\nComponents:");
        for entry in &project.components {
            println!("  - {}x {}", entry.quantity, entry.name);
            if !entry.purpose.is_empty() {
                println!("      {}", entry.purpose);
            }
        }
    }

    if !project.libraries.is_empty() {
        println!("\nLibraries:");
        for library in &project.libraries {
            println!("  - {}", library);
        }
    }

    println!("\nCircuit:");
    println!("{}", project.circuit_description);

    println!("\nSketch:");
    println!("{}", project.code);
}

fn output_json(project: &ArduinoProject, info: &ModelInfo) {
    let output = serde_json::json!({
        "generatedAt": Utc::now().to_rfc3339(),
        "provider": info.provider,
        "model": info.model_name,
        "project": project,
    });
    println!("{}", serde_json::to_string_pretty(&output).unwrap());
}
