//! CLI console utilities

use crate::executor::CommandOutcome;
use colored::*;
use console::Term;
use termai_core::llm::GenerationOutcome;

const VERDICT_SUCCESS: &str = "VERDICT: SUCCESS";
const VERDICT_FAILED: &str = "VERDICT: FAILED";

/// CLI console for formatted output
pub struct CliConsole {
    verbose: bool,
    frame_width: usize,
}

impl CliConsole {
    /// Create a new CLI console
    pub fn new(verbose: bool) -> Self {
        // Clamp the frame to the terminal so the box never wraps.
        let (_, cols) = Term::stdout().size();
        let frame_width = (cols as usize).clamp(40, 78);
        Self {
            verbose,
            frame_width,
        }
    }

    /// Print an info message (verbose mode only)
    pub fn info(&self, message: &str) {
        if self.verbose {
            println!("{} {}", "ℹ".blue().bold(), message);
        }
    }

    /// Print a warning message
    pub fn warn(&self, message: &str) {
        println!("{} {}", "⚠".yellow().bold(), message.yellow());
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red().bold(), message.red());
    }

    /// Print the notice that the fallback backend answered
    pub fn fallback_notice(&self, outcome: &GenerationOutcome) {
        let mut notice = format!("⏩ Falling back to {} (primary failed)", outcome.provider);
        if self.verbose {
            if let Some(detail) = &outcome.error_detail {
                notice.push_str(&format!(": {detail}"));
            }
        }
        println!("{}", notice.magenta().bold());
    }

    /// Print the model's response text
    pub fn render_response(&self, text: &str) {
        println!("{text}");
    }

    /// Print the captured output of a locally executed command inside a
    /// framed "terminal output" box, followed by the analysis divider.
    pub fn command_frame(&self, outcome: &CommandOutcome) {
        let inner = self.frame_width.saturating_sub(2);
        let title = " TERMINAL OUTPUT ";
        let pad = inner.saturating_sub(title.len()) / 2;

        println!("{}", format!("╔{}╗", "═".repeat(inner)).bright_blue().bold());
        println!(
            "{}{}{}",
            "║".bright_blue(),
            format!("{}{}{}", " ".repeat(pad), title, " ".repeat(inner - pad - title.len()))
                .bright_yellow()
                .bold(),
            "║".bright_blue()
        );
        println!("{}", format!("╠{}╣", "═".repeat(inner)).bright_blue().bold());

        for line in outcome.stdout.lines().filter(|l| !l.trim().is_empty()) {
            println!("{} {}", "║".bright_blue(), line.bright_white());
        }
        for line in outcome.stderr.lines().filter(|l| !l.trim().is_empty()) {
            println!("{} {}", "║".bright_blue(), line.bright_red().bold());
        }

        println!("{}", format!("╚{}╝", "═".repeat(inner)).bright_blue().bold());
        println!();
        println!("{}", format!("┌{}┐", "─".repeat(inner)).dimmed());
        println!("{} {:^width$} {}", "│".dimmed(), "AI ANALYSIS BELOW".dimmed(), "│".dimmed(), width = inner.saturating_sub(2));
        println!("{}", format!("└{}┘", "─".repeat(inner)).dimmed());
        println!();
    }

    /// Print the verdict banner parsed from an analysis response
    pub fn verdict(&self, success: bool) {
        if success {
            println!("{}", "✅ Command executed successfully!".green().bold());
        } else {
            println!("{}", "❌ Command failed!".red().bold());
        }
    }
}

/// Extract the verdict trailer from an analysis response.
///
/// Returns the response with the verdict line removed, plus the verdict
/// itself when one was present.
pub fn split_verdict(response: &str) -> (String, Option<bool>) {
    let verdict = if response.contains(VERDICT_SUCCESS) {
        Some(true)
    } else if response.contains(VERDICT_FAILED) {
        Some(false)
    } else {
        None
    };

    let cleaned = response
        .replace(VERDICT_SUCCESS, "")
        .replace(VERDICT_FAILED, "")
        .trim()
        .to_string();

    (cleaned, verdict)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_verdict_success() {
        let (cleaned, verdict) = split_verdict("All good.\n\nVERDICT: SUCCESS");
        assert_eq!(cleaned, "All good.");
        assert_eq!(verdict, Some(true));
    }

    #[test]
    fn test_split_verdict_failed() {
        let (cleaned, verdict) = split_verdict("Broken pipe.\nVERDICT: FAILED");
        assert_eq!(cleaned, "Broken pipe.");
        assert_eq!(verdict, Some(false));
    }

    #[test]
    fn test_split_verdict_absent() {
        let (cleaned, verdict) = split_verdict("Just prose.");
        assert_eq!(cleaned, "Just prose.");
        assert_eq!(verdict, None);
    }
}
