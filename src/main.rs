// ABOUTME: Main entry point for the script-deck program.
// ABOUTME: Provides CLI interface and executes commands from the library.

use clap::{Args, Parser, Subcommand};
use script_deck::config::DEFAULT_OUTPUT_FILE;
use script_deck::{
    Config, DeckError, DeckSession, FileQuotaStore, GeminiClient, GenerationRequest,
    QuotaTracker, Status, StatusReporter,
};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an illustrated deck from a script
    Generate(GenerateArgs),

    /// Show how many generations are left today
    Quota,
}

#[derive(Args)]
struct GenerateArgs {
    /// Path to the script text file
    #[arg(short, long, conflicts_with = "text")]
    input: Option<PathBuf>,

    /// Script text given inline
    #[arg(long)]
    text: Option<String>,

    /// Images to offer for reuse (paths or glob patterns), in index order
    #[arg(long, value_delimiter = ',')]
    images: Option<Vec<String>>,

    /// Path to output PPTX file
    #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
    output: PathBuf,

    /// Path to write the HTML preview to
    #[arg(long)]
    preview: Option<PathBuf>,

    /// Presentation title stored in the document properties
    #[arg(long)]
    title: Option<String>,
}

/// Prints progress for the user.
struct ConsoleReporter;

impl StatusReporter for ConsoleReporter {
    fn report(&self, status: &Status) {
        println!("{}", status);
    }
}

fn open_quota(config: &Config) -> QuotaTracker {
    QuotaTracker::new(
        Box::new(FileQuotaStore::new(config.quota_path())),
        config.daily_limit,
    )
}

fn read_script(args: &GenerateArgs) -> script_deck::Result<String> {
    match (&args.input, &args.text) {
        (Some(path), _) => {
            script_deck::utils::validate_file_exists(path)?;
            Ok(fs::read_to_string(path)?)
        }
        (None, Some(text)) => Ok(text.clone()),
        (None, None) => Err(DeckError::ValidationError(
            "Provide the script with --input <file> or --text <text>".to_string(),
        )),
    }
}

async fn run_generate(args: &GenerateArgs, config: &Config) -> script_deck::Result<()> {
    let script = read_script(args)?;
    let images = script_deck::utils::expand_image_inputs(args.images.as_deref().unwrap_or(&[]))?;

    let mut quota = open_quota(config);
    if quota.remaining()? == 0 {
        return Err(DeckError::QuotaExhausted {
            limit: quota.limit(),
        });
    }

    let client = Arc::new(GeminiClient::new(config.get_gemini_config()?)?);
    let mut session = DeckSession::new(
        quota,
        client.clone(),
        client,
        config.get_resolver_settings(),
    );

    let request = GenerationRequest {
        script,
        images,
        preview_path: args.preview.clone(),
        title: args.title.clone(),
    };
    let generated = session.generate(&request, &ConsoleReporter).await?;
    println!("Generated {} slides", generated.model.len());
    if let Some(path) = &args.preview {
        println!("Preview written to {:?}", path);
    }

    session.export(&args.output)?;
    println!("Presentation saved to {:?}", args.output);
    println!(
        "{} generations left today",
        session.remaining_quota()?
    );
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = Config::from_env();

    let result = match &cli.command {
        Some(Commands::Generate(args)) => {
            println!("Executing generate command...");
            run_generate(args, &config).await
        }
        Some(Commands::Quota) => open_quota(&config).remaining().map(|remaining| {
            println!(
                "{} of {} generations left today",
                remaining, config.daily_limit
            );
        }),
        None => {
            println!("No command specified. Use --help for usage information.");
            Ok(())
        }
    };

    match result {
        Ok(()) => Ok(()),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
