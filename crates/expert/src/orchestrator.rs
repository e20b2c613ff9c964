//! Persona orchestration
//!
//! Generates the expert persona for a problem, then hands persona and problem
//! to the chat program and reports how it exited.

use colored::Colorize;

use crate::backend::Generator;
use crate::config::ChatConfig;
use crate::error::ExpertError;
use crate::input::{self, InputSource, Problem, ProblemOptions};
use crate::launcher::Launcher;
use crate::prompt::{architect_request, handoff_message};

/// Generated persona text, used verbatim
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Persona(String);

impl Persona {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// How the chat session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOutcome {
    pub exit_code: i32,
}

/// Ties the generator and the launcher together
pub struct Orchestrator<G, L> {
    generator: G,
    launcher: L,
    model: String,
    chat: ChatConfig,
}

impl<G: Generator, L: Launcher> Orchestrator<G, L> {
    pub fn new(generator: G, launcher: L, model: impl Into<String>, chat: ChatConfig) -> Self {
        Self {
            generator,
            launcher,
            model: model.into(),
            chat,
        }
    }

    /// Ask the backend for a persona tailored to the problem
    pub fn generate_persona(&self, problem: &Problem) -> Result<Persona, ExpertError> {
        let request = architect_request(problem);

        let text = self
            .generator
            .generate(&self.model, &request)
            .map_err(|e| ExpertError::GenerationFailed(format!("{:#}", e)))?;

        println!("{}", format!("--- {} ---", text).green());

        Ok(Persona(text))
    }

    /// Start the chat program with persona and problem, wait for it to exit
    pub fn launch_expert_session(
        &self,
        persona: Persona,
        problem: &Problem,
    ) -> Result<SessionOutcome, ExpertError> {
        println!(
            "{}",
            format!("--- Composing first message for {} ---", self.chat.command).blue()
        );

        let message = handoff_message(persona.as_str(), problem);
        let args = vec![self.chat.flag.clone(), message];
        tracing::debug!(command = %self.chat.command, bytes = args[1].len(), "launching chat");

        let exit_code = self
            .launcher
            .launch(&self.chat.command, &args)
            .map_err(|source| ExpertError::LaunchFailed {
                command: self.chat.command.clone(),
                source,
            })?;

        tracing::debug!(exit_code, "chat exited");
        println!(
            "{}",
            format!("\n{} exited with code {}", self.chat.command, exit_code).magenta()
        );

        Ok(SessionOutcome { exit_code })
    }

    /// Generate the persona and run the session
    pub fn run(&self, problem: &Problem) -> Result<SessionOutcome, ExpertError> {
        println!("{}", "Generating expert persona...".yellow());
        let persona = self.generate_persona(problem)?;
        println!("{}", "Expert persona generated!".green());

        println!(
            "{}",
            format!("Launching {} with the expert persona...", self.chat.command).yellow()
        );
        self.launch_expert_session(persona, problem)
    }
}

/// Resolve the problem, then build the orchestrator and run the session.
///
/// Input errors surface before `build` is called, so nothing is configured,
/// generated or launched unless a non-empty problem was found.
pub fn consult<G, L, F>(
    options: &ProblemOptions,
    source: &mut impl InputSource,
    build: F,
) -> anyhow::Result<SessionOutcome>
where
    G: Generator,
    L: Launcher,
    F: FnOnce() -> anyhow::Result<Orchestrator<G, L>>,
{
    let problem = input::resolve(options, source)?;
    let orchestrator = build()?;
    Ok(orchestrator.run(&problem)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::resolve;
    use crate::prompt::ARCHITECT_PROMPT;
    use std::cell::RefCell;
    use std::io;

    /// Backend stub that records every request
    struct StubGenerator {
        reply: Result<String, String>,
        calls: RefCell<Vec<(String, String)>>,
    }

    impl StubGenerator {
        fn replying(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                calls: RefCell::new(Vec::new()),
            }
        }

        fn failing(msg: &str) -> Self {
            Self {
                reply: Err(msg.to_string()),
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl Generator for StubGenerator {
        fn generate(&self, model: &str, request: &str) -> anyhow::Result<String> {
            self.calls
                .borrow_mut()
                .push((model.to_string(), request.to_string()));
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(msg) => anyhow::bail!("{}", msg),
            }
        }
    }

    /// Launcher stub that records the argv it was given
    struct StubLauncher {
        outcome: Result<i32, io::ErrorKind>,
        calls: RefCell<Vec<(String, Vec<String>)>>,
    }

    impl StubLauncher {
        fn exiting(code: i32) -> Self {
            Self {
                outcome: Ok(code),
                calls: RefCell::new(Vec::new()),
            }
        }

        fn not_found() -> Self {
            Self {
                outcome: Err(io::ErrorKind::NotFound),
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl Launcher for StubLauncher {
        fn launch(&self, program: &str, args: &[String]) -> io::Result<i32> {
            self.calls
                .borrow_mut()
                .push((program.to_string(), args.to_vec()));
            self.outcome.map_err(io::Error::from)
        }
    }

    struct EmptyPipe;

    impl InputSource for EmptyPipe {
        fn is_terminal(&self) -> bool {
            false
        }

        fn read_all(&mut self) -> io::Result<Vec<u8>> {
            Ok(b"  \n".to_vec())
        }

        fn ask(&mut self, _question: &str) -> Result<Option<String>, ExpertError> {
            panic!("piped input never asks");
        }
    }

    struct NoStdin;

    impl InputSource for NoStdin {
        fn is_terminal(&self) -> bool {
            true
        }

        fn read_all(&mut self) -> io::Result<Vec<u8>> {
            panic!("stdin must not be read when --prompt is given");
        }

        fn ask(&mut self, _question: &str) -> Result<Option<String>, ExpertError> {
            panic!("no question expected when --prompt is given");
        }
    }

    fn orchestrator(
        generator: StubGenerator,
        launcher: StubLauncher,
    ) -> Orchestrator<StubGenerator, StubLauncher> {
        Orchestrator::new(generator, launcher, "test-model", ChatConfig::default())
    }

    fn problem(text: &str) -> Problem {
        Problem::new(text).unwrap()
    }

    #[test]
    fn test_generate_persona_single_request_verbatim() {
        let orch = orchestrator(
            StubGenerator::replying("  You are a Master Plumber.\n"),
            StubLauncher::exiting(0),
        );

        let persona = orch.generate_persona(&problem("sink smells")).unwrap();
        assert_eq!(persona.as_str(), "  You are a Master Plumber.\n");

        let calls = orch.generator.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "test-model");
        assert!(calls[0].1.contains("sink smells"));
    }

    #[test]
    fn test_generation_failure_is_not_retried() {
        let orch = orchestrator(
            StubGenerator::failing("quota exceeded"),
            StubLauncher::exiting(0),
        );

        let err = orch.run(&problem("anything")).unwrap_err();
        match err {
            ExpertError::GenerationFailed(msg) => assert!(msg.contains("quota exceeded")),
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(orch.generator.calls.borrow().len(), 1);
        assert!(orch.launcher.calls.borrow().is_empty());
    }

    #[test]
    fn test_launch_passes_flag_and_composed_message() {
        let orch = orchestrator(StubGenerator::replying("unused"), StubLauncher::exiting(0));

        orch.launch_expert_session(Persona("PERSONA".to_string()), &problem("fix my wifi"))
            .unwrap();

        let calls = orch.launcher.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "gemini");
        assert_eq!(
            calls[0].1,
            vec![
                "-i".to_string(),
                "PERSONA\n\nMy problem is: fix my wifi".to_string()
            ]
        );
    }

    #[test]
    fn test_command_not_found_is_launch_failed() {
        let orch = orchestrator(StubGenerator::replying("P"), StubLauncher::not_found());

        let err = orch
            .launch_expert_session(Persona("P".to_string()), &problem("x"))
            .unwrap_err();

        assert!(matches!(err, ExpertError::LaunchFailed { .. }));
        let msg = err.to_string();
        assert!(msg.contains("installed"));
        assert!(msg.contains("PATH"));
    }

    #[test]
    fn test_nonzero_child_exit_is_reported() {
        let orch = orchestrator(StubGenerator::replying("P"), StubLauncher::exiting(42));
        let outcome = orch.run(&problem("x")).unwrap();
        assert_eq!(outcome, SessionOutcome { exit_code: 42 });
    }

    type StubOrchestrator = Orchestrator<StubGenerator, StubLauncher>;

    #[test]
    fn test_empty_problem_skips_backend_and_launch() {
        let mut built = false;

        let err = consult(&ProblemOptions::default(), &mut EmptyPipe, || {
            built = true;
            Ok(orchestrator(StubGenerator::replying("P"), StubLauncher::exiting(0)))
        })
        .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ExpertError>(),
            Some(ExpertError::EmptyProblem)
        ));
        assert!(!built);
    }

    #[test]
    fn test_contradiction_reported_before_config() {
        let options = ProblemOptions {
            prompt: None,
            interactive: true,
        };

        let err = consult(&options, &mut EmptyPipe, || -> anyhow::Result<StubOrchestrator> {
            Err(ExpertError::Config("malformed config".to_string()).into())
        })
        .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ExpertError>(),
            Some(ExpertError::InputContradiction)
        ));
        assert_eq!(crate::error::exit_code_for(&err), 2);
    }

    #[test]
    fn test_config_error_after_valid_input() {
        let options = ProblemOptions {
            prompt: Some("fix my wifi".to_string()),
            interactive: false,
        };

        let err = consult(&options, &mut NoStdin, || -> anyhow::Result<StubOrchestrator> {
            Err(ExpertError::Config("malformed config".to_string()).into())
        })
        .unwrap_err();

        assert_eq!(crate::error::exit_code_for(&err), 6);
    }

    #[test]
    fn test_end_to_end_with_prompt_flag() {
        let options = ProblemOptions {
            prompt: Some("my code crashes on startup".to_string()),
            interactive: false,
        };
        let problem = resolve(&options, &mut NoStdin).unwrap();
        assert_eq!(problem.as_str(), "my code crashes on startup");

        let orch = orchestrator(
            StubGenerator::replying("PERSONA_TEXT"),
            StubLauncher::exiting(3),
        );
        let outcome = orch.run(&problem).unwrap();

        let generated = orch.generator.calls.borrow();
        assert_eq!(generated.len(), 1);
        assert!(generated[0].1.contains(ARCHITECT_PROMPT));
        assert!(generated[0].1.contains("my code crashes on startup"));

        let launched = orch.launcher.calls.borrow();
        assert_eq!(launched.len(), 1);
        assert_eq!(
            launched[0].1[1],
            "PERSONA_TEXT\n\nMy problem is: my code crashes on startup"
        );

        assert_eq!(outcome.exit_code, 3);
    }
}
