//! HexaCraft CLI
//!
//! A command-line tool for browsing hosting plans, sizing a server,
//! and reaching support through the HexaCraft API.

mod client;
mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{calculator, health, plans, support};
use planner_lib::contact::ContactForm;
use planner_lib::{HardwareTier, WorkloadProfile};

/// HexaCraft CLI
#[derive(Parser)]
#[command(name = "hxc")]
#[command(author, version, about = "CLI for HexaCraft Minecraft server hosting", long_about = None)]
pub struct Cli {
    /// API endpoint URL (can also be set via HEXACRAFT_API_URL env var)
    #[arg(long, env = "HEXACRAFT_API_URL")]
    pub api_url: Option<String>,

    /// Output format
    #[arg(long, short)]
    pub format: Option<output::OutputFormat>,

    /// Enable verbose output
    #[arg(long, short)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List hosting plans
    Plans {
        /// Only show one tier (budget, performance)
        #[arg(long, short)]
        tier: Option<HardwareTier>,
    },

    /// Recommend a plan for a server
    Recommend {
        /// Expected concurrent players
        #[arg(long, short, allow_negative_numbers = true)]
        players: i64,

        /// Server type (vanilla, light_plugins, heavy_plugins, modded)
        #[arg(long, short = 's')]
        server_type: WorkloadProfile,

        /// Hardware tier (budget, performance)
        #[arg(long, short, default_value = "budget")]
        tier: HardwareTier,

        /// Compute locally against the built-in price list
        #[arg(long)]
        offline: bool,
    },

    /// Show frequently asked questions
    Faqs,

    /// Send a message to support
    Contact {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        subject: String,

        #[arg(long, short)]
        message: String,
    },

    /// Show service health
    Health,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        output::print_error(&format!("{:#}", err));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = config::Config::load()?;
    let api_url = config.resolve_api_url(cli.api_url);
    let format = config.resolve_format(cli.format);

    if cli.verbose {
        output::print_info(&format!("Using API at {}", api_url));
    }

    // Initialize client
    let client = client::ApiClient::new(&api_url)?;

    // Execute command
    match cli.command {
        Commands::Plans { tier } => {
            plans::list_plans(&client, tier, format).await?;
        }
        Commands::Recommend {
            players,
            server_type,
            tier,
            offline,
        } => {
            calculator::recommend(&client, players, server_type, tier, offline, format).await?;
        }
        Commands::Faqs => {
            support::list_faqs(&client, format).await?;
        }
        Commands::Contact {
            name,
            email,
            subject,
            message,
        } => {
            let form = ContactForm {
                name,
                email,
                subject,
                message,
            };
            support::send_contact(&client, form, format).await?;
        }
        Commands::Health => {
            health::show_health(&client, format).await?;
        }
    }

    Ok(())
}
