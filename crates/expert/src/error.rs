//! Error taxonomy for expert
//!
//! Every fatal condition has its own variant and its own exit status so
//! scripts can tell them apart.

use std::io;
use thiserror::Error;

/// Errors that abort a run
#[derive(Error, Debug)]
pub enum ExpertError {
    #[error("The --interactive flag cannot be used when input is piped from stdin")]
    InputContradiction,

    #[error("No problem description provided")]
    EmptyProblem,

    #[error("Persona generation failed: {0}")]
    GenerationFailed(String),

    #[error(
        "Failed to start {command}: {source}\n\
         Is `{command}` installed and available on your PATH?"
    )]
    LaunchFailed {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("Interrupted")]
    Interrupted,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read input: {0}")]
    Input(#[from] io::Error),
}

impl ExpertError {
    /// Process exit status for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InputContradiction => 2,
            Self::EmptyProblem => 3,
            Self::GenerationFailed(_) => 4,
            Self::LaunchFailed { .. } => 5,
            Self::Config(_) => 6,
            Self::Interrupted => 130,
            Self::Input(_) => 1,
        }
    }
}

/// Exit status for any error surfaced at the top level
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<ExpertError>()
        .map(ExpertError::exit_code)
        .unwrap_or(1)
}
