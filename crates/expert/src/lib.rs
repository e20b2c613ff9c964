//! expert - Summon a purpose-built expert for any problem
//!
//! Takes a problem description, asks a generation model to write a system
//! prompt for the expert best suited to it, then opens an interactive chat
//! CLI session seeded with that persona and the problem.

pub mod backend;
pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod instruction;
pub mod launcher;
pub mod orchestrator;
pub mod prompt;

pub use config::Config;
pub use error::ExpertError;
pub use input::Problem;
pub use orchestrator::{Orchestrator, Persona, SessionOutcome};
