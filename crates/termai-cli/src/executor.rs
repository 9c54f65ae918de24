//! Local command execution
//!
//! Runs the user's command through the shell, captures its output and exit
//! status, and bounds the whole thing with a wall-clock timeout so a stuck
//! command never wedges the assistant.

use crate::context::SystemContext;
use std::time::Duration;
use termai_core::error::TermaiResult;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::warn;

/// Execution budget for user commands
pub const COMMAND_TIMEOUT: Duration = Duration::from_secs(30);

/// Captured result of one local command execution
#[derive(Debug, Clone)]
pub struct CommandOutcome {
    /// The command as the user typed it
    pub command: String,
    /// Captured standard output
    pub stdout: String,
    /// Captured standard error
    pub stderr: String,
    /// Exit code, when the process ran to completion
    pub exit_code: Option<i32>,
    /// Whether the execution budget expired
    pub timed_out: bool,
}

impl CommandOutcome {
    /// Success is decided by the return code alone
    pub fn success(&self) -> bool {
        !self.timed_out && self.exit_code == Some(0)
    }

    /// Status label used in analysis prompts
    pub fn status_label(&self) -> &'static str {
        if self.timed_out {
            "TIMEOUT"
        } else if self.success() {
            "SUCCESS"
        } else {
            "FAILED"
        }
    }
}

/// Run a command through `sh -c` with the default execution budget
pub async fn run_shell(command: &str) -> TermaiResult<CommandOutcome> {
    run_shell_with_timeout(command, COMMAND_TIMEOUT).await
}

/// Run a command through `sh -c` with an explicit execution budget
pub async fn run_shell_with_timeout(
    command: &str,
    budget: Duration,
) -> TermaiResult<CommandOutcome> {
    let output_fut = Command::new("sh").arg("-c").arg(command).output();

    match timeout(budget, output_fut).await {
        Ok(Ok(output)) => Ok(CommandOutcome {
            command: command.to_string(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code(),
            timed_out: false,
        }),
        Ok(Err(error)) => Err(error.into()),
        Err(_elapsed) => {
            warn!(command, budget_secs = budget.as_secs(), "command timed out");
            Ok(CommandOutcome {
                command: command.to_string(),
                stdout: String::new(),
                stderr: String::new(),
                exit_code: None,
                timed_out: true,
            })
        }
    }
}

/// Shell-style prompt line echoed before the command output,
/// e.g. `(venv) dev@host project % git status`.
pub fn shell_prompt_line(ctx: &SystemContext, command: &str) -> String {
    let hostname = std::env::var("HOSTNAME").unwrap_or_else(|_| "localhost".to_string());
    let dir = std::path::Path::new(&ctx.cwd)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| ctx.cwd.clone());

    let venv = std::env::var("VIRTUAL_ENV")
        .ok()
        .and_then(|path| {
            std::path::Path::new(&path)
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
        })
        .filter(|name| !name.is_empty());

    match venv {
        Some(venv_name) => format!("({venv_name}) {}@{hostname} {dir} % {command}", ctx.user),
        None => format!("{}@{hostname} {dir} % {command}", ctx.user),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_shell_captures_stdout_and_code() {
        let outcome = run_shell("echo hello").await.unwrap();
        assert_eq!(outcome.stdout.trim(), "hello");
        assert_eq!(outcome.exit_code, Some(0));
        assert!(outcome.success());
        assert_eq!(outcome.status_label(), "SUCCESS");
    }

    #[tokio::test]
    async fn test_run_shell_nonzero_exit_is_failure() {
        let outcome = run_shell("exit 3").await.unwrap();
        assert_eq!(outcome.exit_code, Some(3));
        assert!(!outcome.success());
        assert_eq!(outcome.status_label(), "FAILED");
    }

    #[tokio::test]
    async fn test_run_shell_captures_stderr() {
        let outcome = run_shell("echo oops 1>&2").await.unwrap();
        assert_eq!(outcome.stderr.trim(), "oops");
        assert!(outcome.stdout.trim().is_empty());
    }

    #[tokio::test]
    async fn test_run_shell_times_out() {
        let outcome = run_shell_with_timeout("sleep 5", Duration::from_millis(50))
            .await
            .unwrap();
        assert!(outcome.timed_out);
        assert_eq!(outcome.exit_code, None);
        assert_eq!(outcome.status_label(), "TIMEOUT");
    }

    #[test]
    fn test_shell_prompt_line_uses_dir_basename() {
        let ctx = SystemContext {
            cwd: "/home/dev/project".to_string(),
            shell: "/bin/zsh".to_string(),
            os: "Linux".to_string(),
            user: "dev".to_string(),
        };
        let line = shell_prompt_line(&ctx, "ls -la");
        assert!(line.contains("dev@"));
        assert!(line.contains(" project % ls -la"));
    }
}
