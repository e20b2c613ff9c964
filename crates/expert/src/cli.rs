//! CLI definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::input::ProblemOptions;

/// expert - Summon a purpose-built expert for your problem
#[derive(Parser, Debug)]
#[command(name = "expert")]
#[command(version)]
#[command(about = "Generate an expert persona for a problem and open a chat session with it")]
#[command(long_about = "Generate an expert persona for a problem and open a chat session with it.\n\n\
    The problem is sent to a generation model together with a persona-architect\n\
    instruction. The resulting persona, followed by your problem, becomes the first\n\
    message of an interactive chat CLI session on this terminal.")]
#[command(after_help = "EXAMPLES:\n\
    expert -p \"my code crashes on startup\"\n\
    cat error.log | expert\n\
    expert -i\n\
    expert instruction --template GEMINI.tmpl --output GEMINI.md --project-name api")]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// The problem description
    #[arg(short, long)]
    pub prompt: Option<String>,

    /// Force the interactive prompt (cannot be combined with piped stdin)
    #[arg(short, long)]
    pub interactive: bool,

    /// Model used to generate the persona
    #[arg(short, long)]
    pub model: Option<String>,

    /// Config file to use instead of the default
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render an instruction file from a {{KEY}} template
    Instruction {
        /// Path to the template file
        #[arg(long)]
        template: PathBuf,

        /// Path for the generated file
        #[arg(long)]
        output: PathBuf,

        /// Project name
        #[arg(long, default_value = "Unnamed Project")]
        project_name: String,

        /// Comma-separated list of technologies
        #[arg(long, default_value = "Not specified")]
        technologies: String,

        /// Coding style guide
        #[arg(long, default_value = "Not specified")]
        style_guide: String,

        /// Testing framework
        #[arg(long, default_value = "Not specified")]
        testing_framework: String,

        /// Core rules; use \n for new lines
        #[arg(long, default_value = "- Follow standard best practices.")]
        rules: String,
    },
}

impl Cli {
    pub fn problem_options(&self) -> ProblemOptions {
        ProblemOptions {
            prompt: self.prompt.clone(),
            interactive: self.interactive,
        }
    }
}
