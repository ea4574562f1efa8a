//! Mercury CLI - Complaint triage from the terminal
//!
//! Thin client for a running Mercury server.

mod api;
mod config;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::{ColoredString, Colorize};
use dialoguer::Input;
use std::fs;
use std::io::{self, IsTerminal, Read};

use api::{MercuryClient, TriageResponse};
use config::Config;

#[derive(Parser)]
#[command(name = "mercury")]
#[command(about = "Mercury CLI - Customer complaint triage", long_about = None)]
#[command(version)]
struct Cli {
    /// Server URL (overrides the configured one)
    #[arg(long, global = true)]
    url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Triage a complaint
    Analyze {
        /// Complaint text (reads --file, stdin, or prompts if omitted)
        text: Option<String>,
        /// Read the complaint from a file
        #[arg(short, long)]
        file: Option<String>,
        /// Print the raw JSON record
        #[arg(long)]
        json: bool,
    },

    /// Check the server is reachable
    Health,

    /// Show or change CLI configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration
    Show,
    /// Set the server URL
    SetUrl {
        /// e.g. http://localhost:8000
        url: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze { text, file, json } => cmd_analyze(cli.url, text, file, json).await,
        Commands::Health => cmd_health(cli.url).await,
        Commands::Config { action } => cmd_config(action),
    }
}

// ============================================
// Command Implementations
// ============================================

fn client_for(url: Option<String>) -> Result<MercuryClient> {
    let base_url = match url {
        Some(u) => u,
        None => Config::load()?.base_url,
    };
    Ok(MercuryClient::new(&base_url))
}

async fn cmd_analyze(
    url: Option<String>,
    text: Option<String>,
    file: Option<String>,
    json: bool,
) -> Result<()> {
    let complaint = match (text, file) {
        (Some(t), None) => t,
        (None, Some(f)) => {
            fs::read_to_string(&f).with_context(|| format!("Failed to read file: {}", f))?
        }
        (Some(_), Some(_)) => {
            bail!("Cannot specify both complaint text and --file");
        }
        (None, None) if io::stdin().is_terminal() => Input::new()
            .with_prompt("Complaint")
            .interact_text()
            .context("Failed to read input")?,
        (None, None) => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read complaint from stdin")?;
            buf
        }
    };

    if complaint.trim().is_empty() {
        bail!("Complaint text is empty");
    }

    let client = client_for(url)?;
    let record = client.analyze(&complaint).await?;

    if json {
        // Clean stdout for piping
        println!(
            "{}",
            serde_json::to_string_pretty(&record).context("Failed to serialize record")?
        );
    } else {
        print_record(&record);
    }

    Ok(())
}

async fn cmd_health(url: Option<String>) -> Result<()> {
    let client = client_for(url)?;
    print!("Checking server... ");

    match client.health().await {
        Ok(health) => {
            println!("{}", health.status.green());
            println!("  Version: {}", health.version);
            println!("  Model:   {}", health.model.cyan());
            Ok(())
        }
        Err(e) => {
            println!("{}", "Failed".red());
            Err(e)
        }
    }
}

fn cmd_config(action: ConfigAction) -> Result<()> {
    let mut config = Config::load()?;

    match action {
        ConfigAction::Show => {
            println!("{}", "Configuration:".bold());
            println!("  Path: {:?}", Config::config_path()?);
            println!("  Base URL: {}", config.base_url.cyan());
        }
        ConfigAction::SetUrl { url } => {
            config.set_base_url(&url);
            config.save()?;
            println!("{} Base URL set to {}", "✓".green(), config.base_url);
        }
    }

    Ok(())
}

fn print_record(record: &TriageResponse) {
    println!("{}", "Triage:".bold());
    println!("  Category:  {}", record.category.cyan());
    println!("  Sentiment: {}", record.sentiment);
    println!("  Urgency:   {}", urgency_colored(&record.urgency));
    println!("  Action:    {}", record.suggested_action.bold());
    println!("\n{}", "Draft response:".dimmed());
    println!("  {}", record.draft_response);
}

fn urgency_colored(urgency: &str) -> ColoredString {
    match urgency {
        "Critical" => urgency.red().bold(),
        "High" => urgency.red(),
        "Medium" => urgency.yellow(),
        "Low" => urgency.green(),
        other => other.normal(),
    }
}
