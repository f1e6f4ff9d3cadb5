//! Resume matcher: resume and job description match scoring CLI

mod cli;
mod config;
mod engine;
mod error;
mod output;
mod processing;

use clap::Parser;
use cli::{Cli, Commands, ConfigAction};
use config::Config;
use engine::MatchEngine;
use error::{MatcherError, Result};
use log::{error, info};
use output::{OutputFormat, ReportFormatter};
use processing::skills::SkillExtractor;
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Match {
            resume,
            job,
            output,
            detailed,
        } => {
            cli::validate_file_extension(&resume, &["txt", "md"])
                .map_err(|e| MatcherError::InvalidInput(format!("Resume file: {}", e)))?;
            cli::validate_file_extension(&job, &["txt", "md"])
                .map_err(|e| MatcherError::InvalidInput(format!("Job description file: {}", e)))?;

            let output_format =
                OutputFormat::parse(&output).map_err(MatcherError::InvalidInput)?;

            info!("Scoring {} against {}", resume.display(), job.display());

            let resume_text = std::fs::read_to_string(&resume)?;
            let job_text = std::fs::read_to_string(&job)?;

            // Skill collections are extracted independently for each side so
            // the skill-match signal compares resume against job, not the job
            // against itself.
            let extractor = SkillExtractor::new();
            let resume_skills = extractor.extract(&resume_text);
            let job_skills = extractor.extract(&job_text);

            let engine = MatchEngine::new(config)?;
            info!("Embedding provider: {}", engine.provider_name());

            let result = engine
                .score(&resume_text, &job_text, &resume_skills, &job_skills)
                .await?;

            let formatter = ReportFormatter::new(detailed);
            println!("{}", formatter.render(&result, output_format)?);

            Ok(())
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let content = toml::to_string_pretty(&config).map_err(|e| {
                    MatcherError::Configuration(format!("Failed to serialize config: {}", e))
                })?;
                println!("{}", content);
                Ok(())
            }
        },
    }
}
