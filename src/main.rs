//! Resume screener: upload a resume, get role-targeted suggestions, ask the assistant

use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use resume_screener::backend::{Backend, HttpBackendClient};
use resume_screener::cli::{self, Cli, Commands, ConfigAction};
use resume_screener::config::{resolve_base_url, Config};
use resume_screener::error::{Result, ScreenerError};
use resume_screener::input::UploadFile;
use resume_screener::output::report::ReportMetadata;
use resume_screener::output::{ReportGenerator, ScreeningReport};
use resume_screener::screening::{JobRole, PlaceholderStrategy, ResumeData, SuggestionStrategy};
use resume_screener::session::{AppController, Notifier};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

/// Prints alerts to stderr.
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn alert(&self, message: &str) {
        eprintln!("{} {}", "⚠️ ".yellow(), message.red());
    }
}

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Load configuration
    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let mut config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Some(url) = cli.backend_url.clone() {
        config.backend.base_url = resolve_base_url(Some(url), &config.backend.base_url);
    }

    // Execute command
    if let Err(e) = run_command(cli.command, config, config_path).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: PathBuf) -> Result<()> {
    match command {
        Commands::Analyze {
            resume,
            role,
            output,
            detailed,
        } => {
            let format = match output {
                Some(output) => cli::parse_output_format(&output).map_err(ScreenerError::Validation)?,
                None => config.output.format,
            };
            let role = role
                .map(|r| cli::parse_job_role(&r))
                .transpose()
                .map_err(ScreenerError::Validation)?;

            let file = UploadFile::from_path(&resume).await?;
            let backend = Arc::new(HttpBackendClient::from_config(&config));
            let base_url = backend.base_url().to_string();
            let mut controller = AppController::from_config(&config, backend, Arc::new(ConsoleNotifier));

            if let Some(role) = role {
                controller.select_role(role);
            }

            info!("Starting resume analysis against {}", base_url);
            let spinner = ProgressBar::new_spinner();
            spinner.set_style(
                ProgressStyle::with_template("{spinner:.blue} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            spinner.set_message("Analyzing Resume... Extracting text and analyzing content");
            spinner.enable_steady_tick(Duration::from_millis(120));

            let outcome = controller.upload_file(file).await;
            spinner.finish_and_clear();
            outcome?;

            let report = ScreeningReport::from_controller(&controller, Some(&base_url));
            let generator = ReportGenerator::new(config.output.color_output, detailed || config.output.detailed);
            println!("{}", generator.generate(&report, format)?);
        }

        Commands::Suggest { role, output } => {
            let format = match output {
                Some(output) => cli::parse_output_format(&output).map_err(ScreenerError::Validation)?,
                None => config.output.format,
            };
            let role = cli::parse_job_role(&role).map_err(ScreenerError::Validation)?;

            let strategy = PlaceholderStrategy;
            let resume = ResumeData::default();
            let report = ScreeningReport {
                resume: None,
                job_role: Some(role.to_string()),
                suggestions: strategy.suggestions(&resume, role),
                match_score: None,
                metadata: ReportMetadata {
                    generated_at: chrono::Utc::now(),
                    strategy: strategy.name().to_string(),
                    backend_url: None,
                },
            };

            let generator = ReportGenerator::new(config.output.color_output, config.output.detailed);
            println!("{}", generator.generate(&report, format)?);
        }

        Commands::Chat { message } => {
            let backend = Arc::new(HttpBackendClient::from_config(&config));
            let mut controller = AppController::from_config(&config, backend, Arc::new(ConsoleNotifier));
            let generator = ReportGenerator::new(config.output.color_output, false);
            let console = generator.console();

            controller.open_chat();
            for message in &controller.state().transcript {
                println!("{}", console.format_message(message));
            }

            match message {
                Some(text) => {
                    if controller.send_chat(&text) {
                        controller.next_event().await;
                        if let Some(reply) = controller.state().last_message() {
                            println!("{}", console.format_message(reply));
                        }
                    }
                }
                None => {
                    println!("{}", "Type your question (/quit to exit)".dimmed());
                    let mut lines = BufReader::new(tokio::io::stdin()).lines();
                    let mut stdout = tokio::io::stdout();

                    loop {
                        stdout.write_all(b"> ").await?;
                        stdout.flush().await?;

                        let Some(line) = lines.next_line().await? else {
                            break;
                        };
                        if line.trim() == "/quit" {
                            break;
                        }

                        controller.set_draft(line);
                        if controller.send_draft() {
                            controller.next_event().await;
                            if let Some(reply) = controller.state().last_message() {
                                println!("{}", console.format_message(reply));
                            }
                        }
                    }
                }
            }

            controller.close_chat();
        }

        Commands::Roles => {
            println!("💼 Available job roles\n");
            for role in JobRole::ALL {
                println!("  • {} ({})", role.display_name(), role.slug().dimmed());
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration\n");
                println!("Backend URL: {}", config.backend.base_url);
                println!("Max upload size: {} MB (advisory)", config.upload.max_file_size_mb);
                println!("Accepted file type: {}", config.upload.allowed_mime_type);
                println!("Chat reply delay: {} ms", config.chat.reply_delay_ms);
                println!("Chat via backend: {}", config.chat.use_backend);
                println!("Output format: {:?}", config.output.format);
            }

            Some(ConfigAction::Path) => {
                println!("{}", config_path.display());
            }

            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                Config::default().save_to(&config_path)?;
                println!("✅ Configuration reset successfully!");
            }
        },
    }

    Ok(())
}
