//! External command invocation.
//!
//! Every external call (calibration tool, raw-data conversion, group and
//! permission fixups) is described by an [`Invocation`] and executed through a
//! [`ToolRunner`]. The working directory travels with the invocation; the
//! process working directory is never changed.

use std::fmt;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use serde::Serialize;

/// A fully specified external command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: PathBuf,
}

impl Invocation {
    pub fn new(program: impl Into<String>, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            working_dir: working_dir.into(),
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append `flag value`.
    #[must_use]
    pub fn flag(self, flag: &str, value: impl Into<String>) -> Self {
        self.arg(flag).arg(value)
    }

    /// The argument following `flag`, if present.
    #[must_use]
    pub fn flag_value(&self, flag: &str) -> Option<&str> {
        self.args
            .iter()
            .position(|a| a == flag)
            .and_then(|i| self.args.get(i + 1))
            .map(String::as_str)
    }
}

/// Shell-like rendering for status lines.
impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Executes invocations synchronously.
///
/// Returns the exit code (`None` when terminated by a signal). Callers do not
/// interpret the code beyond logging it.
pub trait ToolRunner {
    fn run(&mut self, invocation: &Invocation) -> std::io::Result<Option<i32>>;
}

/// Runs invocations as child processes, blocking until each exits.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl ToolRunner for ProcessRunner {
    fn run(&mut self, invocation: &Invocation) -> std::io::Result<Option<i32>> {
        let status = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(&invocation.working_dir)
            .stdin(Stdio::null())
            .status()?;
        Ok(status.code())
    }
}

/// Run and log; launch failures are logged, never propagated.
pub(crate) fn run_logged<R: ToolRunner + ?Sized>(
    runner: &mut R,
    invocation: &Invocation,
) -> (bool, Option<i32>) {
    tracing::info!(command = %invocation, cwd = %invocation.working_dir.display(), "running");
    match runner.run(invocation) {
        Ok(code) => {
            tracing::debug!(?code, program = %invocation.program, "command exited");
            (true, code)
        }
        Err(error) => {
            tracing::warn!(%error, program = %invocation.program, "failed to launch command");
            (false, None)
        }
    }
}
