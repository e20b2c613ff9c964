//! Problem resolution
//!
//! The problem comes from exactly one place: `--prompt`, piped stdin, or an
//! interactive prompt. Forcing interactive mode while stdin is piped is a
//! contradiction and fails before anything else is looked at.

use std::fmt;
use std::io::{self, Read};

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::error::ExpertError;

/// Text shown when asking for the problem interactively
pub const PROBLEM_QUESTION: &str = "Describe the problem you need to solve: ";

/// A non-empty problem statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem(String);

impl Problem {
    /// Wrap resolved text; `None` if it is empty
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        if text.is_empty() {
            None
        } else {
            Some(Self(text))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where the problem text can come from
pub trait InputSource {
    /// Whether stdin is an interactive terminal
    fn is_terminal(&self) -> bool;

    /// Read all of stdin until end of stream
    fn read_all(&mut self) -> io::Result<Vec<u8>>;

    /// Ask a question and wait for one line; `None` on end of input
    fn ask(&mut self, question: &str) -> Result<Option<String>, ExpertError>;
}

/// Flags that steer resolution
#[derive(Debug, Clone, Default)]
pub struct ProblemOptions {
    pub prompt: Option<String>,
    pub interactive: bool,
}

/// Resolve the raw problem text from the first applicable source
pub fn resolve_text(
    options: &ProblemOptions,
    source: &mut impl InputSource,
) -> Result<String, ExpertError> {
    let piped = !source.is_terminal();

    if options.interactive && piped {
        return Err(ExpertError::InputContradiction);
    }

    // An empty --prompt counts as not given
    if let Some(prompt) = options.prompt.as_deref().filter(|p| !p.is_empty()) {
        tracing::debug!("problem taken from --prompt");
        return Ok(prompt.to_string());
    }

    if piped {
        let bytes = source.read_all()?;
        tracing::debug!("read {} bytes of piped input", bytes.len());
        return Ok(String::from_utf8_lossy(&bytes).trim().to_string());
    }

    Ok(source.ask(PROBLEM_QUESTION)?.unwrap_or_default())
}

/// Resolve the problem, rejecting empty text
pub fn resolve(
    options: &ProblemOptions,
    source: &mut impl InputSource,
) -> Result<Problem, ExpertError> {
    let text = resolve_text(options, source)?;
    Problem::new(text).ok_or(ExpertError::EmptyProblem)
}

/// The process's real stdin
pub struct ConsoleInput;

impl InputSource for ConsoleInput {
    fn is_terminal(&self) -> bool {
        use std::os::unix::io::AsRawFd;

        let stdin = io::stdin();
        unsafe { libc::isatty(stdin.as_raw_fd()) != 0 }
    }

    fn read_all(&mut self) -> io::Result<Vec<u8>> {
        let mut buf = Vec::new();
        io::stdin().lock().read_to_end(&mut buf)?;
        Ok(buf)
    }

    fn ask(&mut self, question: &str) -> Result<Option<String>, ExpertError> {
        let mut rl = DefaultEditor::new().map_err(|e| io::Error::other(e.to_string()))?;

        match rl.readline(question) {
            Ok(line) => Ok(Some(line)),
            Err(ReadlineError::Eof) => Ok(None),
            Err(ReadlineError::Interrupted) => Err(ExpertError::Interrupted),
            Err(err) => Err(io::Error::other(err.to_string()).into()),
        }
    }
}
