pub mod commands;
pub mod config;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::types::DbId;

#[derive(Parser)]
#[command(name = "trackr")]
#[command(about = "trackr CLI - command-line client for the routine activities API")]
#[command(version)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        env = "TRACKR_URL",
        default_value = "http://localhost:3000",
        help = "Base URL of the trackr API"
    )]
    pub url: String,

    #[arg(long, global = true, env = "TRACKR_TOKEN", help = "Bearer token for protected routes")]
    pub token: Option<String>,

    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Check server health status from the /health endpoint")]
    Health,

    #[command(about = "List every routine activity")]
    List,

    #[command(about = "Attach an activity to one of your routines")]
    Add {
        #[arg(help = "Routine ID")]
        routine_id: DbId,
        #[arg(help = "Activity ID")]
        activity_id: DbId,
        #[arg(long, help = "Target repetitions")]
        count: i32,
        #[arg(long, help = "Target duration in seconds")]
        duration: i32,
    },

    #[command(about = "Change count and/or duration of a routine activity")]
    Update {
        #[arg(help = "Routine activity ID")]
        id: DbId,
        #[arg(long, help = "New target repetitions")]
        count: Option<i32>,
        #[arg(long, help = "New target duration in seconds")]
        duration: Option<i32>,
    },

    #[command(about = "Remove a routine activity from its routine")]
    Delete {
        #[arg(help = "Routine activity ID")]
        id: DbId,
    },

    #[command(about = "Mint a development token signed with JWT_SECRET")]
    Token {
        #[arg(help = "User ID to embed as the token subject")]
        user_id: DbId,
        #[arg(help = "Username to embed in the token")]
        username: String,
        #[arg(long, help = "Override token lifetime in hours")]
        expiry_hours: Option<u64>,
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let client = config::ClientConfig::new(&cli.url, cli.token.clone())?;

    match cli.command {
        Commands::Health => commands::server::health(&client, output_format).await,
        Commands::List => commands::routine_activities::list(&client, output_format).await,
        Commands::Add {
            routine_id,
            activity_id,
            count,
            duration,
        } => {
            commands::routine_activities::add(
                &client,
                output_format,
                routine_id,
                activity_id,
                count,
                duration,
            )
            .await
        }
        Commands::Update {
            id,
            count,
            duration,
        } => commands::routine_activities::update(&client, output_format, id, count, duration).await,
        Commands::Delete { id } => {
            commands::routine_activities::delete(&client, output_format, id).await
        }
        Commands::Token {
            user_id,
            username,
            expiry_hours,
        } => commands::token::mint(output_format, user_id, username, expiry_hours),
    }
}
