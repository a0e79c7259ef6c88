//! CLI interface for the resume screener

use crate::config::OutputFormat;
use crate::screening::models::JobRole;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "resume-screener")]
#[command(about = "Upload a resume for analysis, get role-targeted suggestions and ask the resume assistant")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend base URL for this run (overrides config and environment)
    #[arg(long, global = true)]
    pub backend_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Upload a resume to the analysis backend
    Analyze {
        /// Path to resume file (PDF)
        #[arg(short, long)]
        resume: PathBuf,

        /// Target job role, e.g. "Data Scientist" or data-scientist
        #[arg(short = 'j', long)]
        role: Option<String>,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,

        /// Show the full analysis text
        #[arg(short, long)]
        detailed: bool,
    },

    /// Show the suggestions for a role without uploading anything
    Suggest {
        /// Target job role
        #[arg(short = 'j', long)]
        role: String,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Chat with the resume assistant
    Chat {
        /// Send a single message and exit
        #[arg(short, long)]
        message: Option<String>,
    },

    /// List the available job roles
    Roles,

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Print the configuration file location
    Path,

    /// Reset configuration to defaults
    Reset,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown", format)),
    }
}

/// Parse a job role, listing the valid ones on failure
pub fn parse_job_role(role: &str) -> Result<JobRole, String> {
    role.parse::<JobRole>().map_err(|_| {
        let valid: Vec<&str> = JobRole::ALL.iter().map(|r| r.display_name()).collect();
        format!("Unknown job role: {}. Choose one of: {}", role, valid.join(", "))
    })
}
