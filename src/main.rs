// ABOUTME: Main entry point for the slidewire program.
// ABOUTME: Provides CLI interface and executes commands from the library.

use clap::{Args, Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a markdown deck as a standalone highlighted HTML document
    Export(ExportArgs),

    /// Parse a deck and report slide and code-block counts
    Check(CheckArgs),
}

#[derive(Args)]
struct ExportArgs {
    /// Path or URL of the presentation markdown source
    #[arg(short, long)]
    input: String,

    /// Path to the output HTML file
    #[arg(short, long)]
    output: PathBuf,

    /// Syntax highlighting theme name (defaults to $HIGHLIGHT_THEME, then InspiredGitHub)
    #[arg(long)]
    theme: Option<String>,
}

#[derive(Args)]
struct CheckArgs {
    /// Path or URL of the presentation markdown source
    #[arg(short, long)]
    input: String,
}

/// Local sources are validated up front; remote URLs are left to the fetcher.
fn validate_input(input: &str) -> slidewire::Result<()> {
    if !slidewire::SourceFile::new(input).is_remote {
        slidewire::utils::validate_file_exists(Path::new(input))?;
    }
    Ok(())
}

fn run_export(args: &ExportArgs) -> slidewire::Result<()> {
    let config = slidewire::Config::from_env();

    validate_input(&args.input)?;
    let deck = slidewire::Deck::load(&args.input)?;

    let theme = args.theme.clone().unwrap_or(config.theme);
    let highlighter = slidewire::Highlighter::with_theme(&theme)?;
    let html_content = slidewire::export_html(&deck, &highlighter)?;

    slidewire::utils::ensure_parent_directory_exists(&args.output)?;
    fs::write(&args.output, html_content)
        .map_err(|e| anyhow::anyhow!("Failed to write output file: {}", e))?;

    println!("HTML exported successfully: {:?}", args.output);
    Ok(())
}

fn run_check(args: &CheckArgs) -> slidewire::Result<()> {
    validate_input(&args.input)?;
    let deck = slidewire::Deck::load(&args.input)?;
    println!(
        "Deck \"{}\": {} slides, {} code blocks",
        deck.title,
        deck.slides.len(),
        deck.code_block_count()
    );
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let result = match &cli.command {
        Some(Commands::Export(args)) => {
            println!("Executing export command...");
            run_export(args)
        }
        Some(Commands::Check(args)) => {
            println!("Executing check command...");
            run_check(args)
        }
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
