use anyhow::{Context, Result};
use baby_name_finder::{
    chat, web_server, AnthropicGenerator, Gender, Preferences, SuggestionRequest, SuggestionService,
};
use clap::Parser;
use std::sync::Arc;
use tracing::{error, info};

// Define the command-line interface structure using clap
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

// Define the available subcommands
#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Start the web server with the step-by-step name finder.
    Serve {
        #[arg(long, env = "PORT", default_value_t = 3000, help = "Port for the web server.")]
        port: u16,
    },
    /// Find names step by step in the terminal.
    Chat,
    /// Ask for one round of names straight from the command line.
    Suggest {
        #[arg(long, value_parser = parse_gender, default_value = "unspecified")]
        gender: Gender,
        #[arg(long, default_value = "")]
        starting_letter: String,
        #[arg(long, default_value = "")]
        mother_tongue: String,
        #[arg(long, default_value = "")]
        father_name: String,
        #[arg(long, default_value = "")]
        mother_name: String,
        #[arg(long, default_value = "")]
        desired_meaning: String,
        #[arg(long, default_value = "", help = "Extra guidance for the model.")]
        feedback: String,
    },
}

fn parse_gender(value: &str) -> Result<Gender, String> {
    Gender::from_input(value).ok_or_else(|| format!("unknown gender '{value}' (use male, female or unspecified)"))
}

// The main entry point of the application, using tokio's async runtime
#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (for ANTHROPIC_API_KEY and friends)
    dotenvy::dotenv().ok();

    // Reads log level from RUST_LOG environment variable (e.g., RUST_LOG=info,baby_name_finder=debug)
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    info!("Baby name finder starting with command: {:?}", cli.command);

    let generator = AnthropicGenerator::from_env();
    info!(model = generator.model(), "Using text generation model");
    let service = SuggestionService::new(Arc::new(generator));

    match cli.command {
        Commands::Serve { port } => {
            info!("Starting web server on port {}...", port);
            web_server::start_web_server(port, service)
                .await
                .context("Web server failed")?;
            info!("Shutdown complete.");
        }
        Commands::Chat => {
            chat::run_interactive_chat(&service)
                .await
                .context("Chat session failed")?;
        }
        Commands::Suggest {
            gender,
            starting_letter,
            mother_tongue,
            father_name,
            mother_name,
            desired_meaning,
            feedback,
        } => {
            let mut preferences = Preferences {
                gender,
                mother_tongue,
                father_name,
                mother_name,
                desired_meaning,
                ..Default::default()
            };
            preferences.set_starting_letter(&starting_letter);

            let request = SuggestionRequest {
                preferences,
                previous_names: Vec::new(),
                feedback,
            };

            match service.suggest(&request).await {
                Ok(names) if !names.is_empty() => {
                    for (i, suggestion) in names.iter().enumerate() {
                        println!("{}. {} - {}", i + 1, suggestion.name, suggestion.meaning);
                    }
                }
                Ok(_) => {
                    let e = baby_name_finder::SuggestionError::NoNamesGenerated;
                    error!("{}", e);
                    eprintln!("{}", e.notice());
                    std::process::exit(1);
                }
                Err(e) => {
                    eprintln!("{}", e.notice());
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}
