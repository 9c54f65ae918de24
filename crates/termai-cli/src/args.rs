//! CLI argument definitions using clap
//!
//! One mode per invocation:
//! - termai ask <question>       # general terminal/development question
//! - termai debug <error…>       # analyze pasted error output
//! - termai help <command…>      # run the command, then analyze the result
//! - termai explain <command>    # explain a command without running it

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "termai")]
#[command(about = "AI assistant for terminal commands")]
#[command(
    long_about = r#"termai - AI assistant for terminal commands

USAGE:
  termai ask "how do I find large files?"
  termai debug "zsh: command not found: pyhton"
  termai help git status
  termai explain "tar -xzvf archive.tar.gz"

The primary backend (OpenAI) is tried first with retries; Gemini answers
as a fallback. Credentials come from OPENAI_API_KEY and GEMINI_API_KEY
(or GOOGLE_API_KEY)."#
)]
#[command(version, disable_help_subcommand = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, short)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ask a general terminal or development question
    Ask {
        /// The question to ask
        #[arg(required = true, trailing_var_arg = true)]
        question: Vec<String>,
    },

    /// Analyze error output and suggest fixes
    Debug {
        /// The error output to analyze
        #[arg(required = true, trailing_var_arg = true)]
        error: Vec<String>,
    },

    /// Execute a command locally, show its output, and analyze the result
    Help {
        /// The command to run
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },

    /// Explain a command without running it
    Explain {
        /// The command to explain
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,

        /// Error output from a failed run of the command, if any
        #[arg(long)]
        error: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ask() {
        let cli = Cli::try_parse_from(["termai", "ask", "how", "do", "pipes", "work"]).unwrap();
        match cli.command {
            Commands::Ask { question } => {
                assert_eq!(question.join(" "), "how do pipes work");
            }
            _ => panic!("expected ask mode"),
        }
    }

    #[test]
    fn test_parse_help_with_flags() {
        let cli = Cli::try_parse_from(["termai", "help", "ls", "-la"]).unwrap();
        match cli.command {
            Commands::Help { command } => {
                assert_eq!(command.join(" "), "ls -la");
            }
            _ => panic!("expected help mode"),
        }
    }

    #[test]
    fn test_parse_explain_with_error() {
        let cli =
            Cli::try_parse_from(["termai", "explain", "--error", "not a git repo", "git", "main"])
                .unwrap();
        match cli.command {
            Commands::Explain { command, error } => {
                assert_eq!(command.join(" "), "git main");
                assert_eq!(error.as_deref(), Some("not a git repo"));
            }
            _ => panic!("expected explain mode"),
        }
    }

    #[test]
    fn test_missing_input_is_an_error() {
        assert!(Cli::try_parse_from(["termai", "ask"]).is_err());
        assert!(Cli::try_parse_from(["termai"]).is_err());
    }
}
