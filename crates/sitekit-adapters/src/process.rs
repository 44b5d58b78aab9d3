//! Spawning the external tools.

use std::ffi::OsStr;
use std::io;
use std::process::Command;

use sitekit_core::application::ApplicationError;
use thiserror::Error;

#[derive(Debug, Error)]
enum SpawnError {
    #[error("no program configured")]
    Empty,
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// A program plus the arguments that always precede the task's own
/// (`["bundle", "exec", "jekyll"]`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    argv: Vec<String>,
}

impl ToolCommand {
    pub fn new<I, S>(argv: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            argv: argv.into_iter().map(Into::into).collect(),
        }
    }

    /// Display name used in errors.
    pub fn name(&self) -> String {
        self.argv.join(" ")
    }

    /// A `Command` ready for the task-specific arguments.
    pub(crate) fn command<A: AsRef<OsStr>>(&self, args: &[A]) -> Result<Command, ApplicationError> {
        let (program, leading) = self
            .argv
            .split_first()
            .ok_or_else(|| self.not_found(SpawnError::Empty))?;
        let mut command = Command::new(program);
        command.args(leading).args(args);
        Ok(command)
    }

    /// Map a spawn failure. A tool that ran and failed is the caller's concern.
    pub(crate) fn spawn_error(&self, e: io::Error) -> ApplicationError {
        self.not_found(SpawnError::from(e))
    }

    fn not_found(&self, e: SpawnError) -> ApplicationError {
        ApplicationError::ToolNotFound {
            tool: self.name(),
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_arguments_come_first() {
        let tool = ToolCommand::new(["bundle", "exec", "jekyll"]);
        let command = tool.command(&["build"]).unwrap();
        assert_eq!(command.get_program(), "bundle");
        let args: Vec<_> = command.get_args().collect();
        assert_eq!(args, ["exec", "jekyll", "build"]);
    }

    #[test]
    fn empty_program_is_reported() {
        let err = ToolCommand::new(Vec::<String>::new())
            .command(&["build"])
            .unwrap_err();
        assert!(matches!(err, ApplicationError::ToolNotFound { .. }));
    }
}
