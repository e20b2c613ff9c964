//! Launching the external chat program

use std::io;
use std::process::{Command, ExitStatus, Stdio};

/// Starts a program and waits for it to exit
pub trait Launcher {
    /// Run `program` with `args` on the current terminal; returns its exit code
    fn launch(&self, program: &str, args: &[String]) -> io::Result<i32>;
}

/// Runs the real program with stdin, stdout and stderr inherited
pub struct ProcessLauncher;

impl Launcher for ProcessLauncher {
    fn launch(&self, program: &str, args: &[String]) -> io::Result<i32> {
        let status = Command::new(program)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()?;

        Ok(exit_code(status))
    }
}

/// Exit code of a finished child; signals map to 128 + signal number
fn exit_code(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;

    match (status.code(), status.signal()) {
        (Some(code), _) => code,
        (None, Some(signal)) => 128 + signal,
        (None, None) => 1,
    }
}
