//! expert - Summon a purpose-built expert for any problem
//!
//! # Examples
//!
//! ```bash
//! expert -p "my code crashes on startup"
//! git diff | expert
//! expert -i
//! ```

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use expert::backend::GeminiClient;
use expert::cli::{Cli, Commands};
use expert::error::exit_code_for;
use expert::input::ConsoleInput;
use expert::instruction::{self, InstructionContext};
use expert::launcher::ProcessLauncher;
use expert::orchestrator::{consult, Orchestrator};
use expert::Config;

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // Pick up GEMINI_API_KEY and friends from .env
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let code = match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {:#}", "error:".red(), err);
            exit_code_for(&err)
        }
    };

    std::process::exit(code);
}

fn run(mut cli: Cli) -> Result<i32> {
    if let Some(command) = cli.command.take() {
        return run_command(command);
    }

    let options = cli.problem_options();
    let outcome = consult(&options, &mut ConsoleInput, || {
        let config = match &cli.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };
        let model = cli.model.clone().unwrap_or_else(|| config.model.clone());
        tracing::debug!(%model, chat = %config.chat.command, "configured");

        println!("{}", "Expert Persona Launcher".cyan().bold());
        println!();

        let generator = GeminiClient::from_config(&config)?;
        Ok(Orchestrator::new(generator, ProcessLauncher, model, config.chat))
    })?;

    Ok(outcome.exit_code)
}

fn run_command(command: Commands) -> Result<i32> {
    match command {
        Commands::Instruction {
            template,
            output,
            project_name,
            technologies,
            style_guide,
            testing_framework,
            rules,
        } => {
            let context = InstructionContext {
                project_name,
                technologies,
                style_guide,
                testing_framework,
                rules,
            };
            instruction::generate(&template, &output, &context)?;
            println!(
                "{} Generated instruction file at: {}",
                "✓".green(),
                output.display()
            );
            Ok(0)
        }
    }
}
