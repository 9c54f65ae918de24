//! Mode dispatch
//!
//! Each invocation handles exactly one request: build the prompt for the
//! selected mode, hand it to the fallback client, render the result. The
//! exit code is 0 when a response was rendered and 1 on terminal failure.

use crate::args::{Cli, Commands};
use crate::console::{CliConsole, split_verdict};
use crate::context::SystemContext;
use crate::executor;
use crate::prompts;
use termai_core::llm::FallbackClient;

/// Route a parsed CLI invocation to its mode handler
pub async fn route(cli: Cli) -> i32 {
    let console = CliConsole::new(cli.verbose);

    let client = match FallbackClient::from_env() {
        Ok(client) => client,
        Err(error) => {
            console.error(&error.to_string());
            return 1;
        }
    };

    let ctx = SystemContext::discover().await;
    console.info(&format!(
        "providers: primary={} fallback={}",
        client.has_primary(),
        client.has_secondary()
    ));

    match cli.command {
        Commands::Ask { question } => {
            let prompt = prompts::ask_prompt(&question.join(" "), &ctx);
            respond(&console, &client, &prompt).await
        }
        Commands::Debug { error } => {
            let prompt = prompts::debug_prompt(&error.join(" "), &ctx);
            respond(&console, &client, &prompt).await
        }
        Commands::Explain { command, error } => {
            let command = command.join(" ");
            let prompt = match error {
                Some(error_output) => {
                    prompts::failed_command_prompt(&command, &error_output, &ctx)
                }
                None => prompts::explain_prompt(&command, &ctx),
            };
            respond(&console, &client, &prompt).await
        }
        Commands::Help { command } => {
            execute_and_analyze(&console, &client, &ctx, &command.join(" ")).await
        }
    }
}

/// Generate a response for a prompt and render it
async fn respond(console: &CliConsole, client: &FallbackClient, prompt: &str) -> i32 {
    match client.generate_with_fallback(prompt).await {
        Ok(outcome) => {
            if outcome.fell_back() {
                console.fallback_notice(&outcome);
            }
            console.info(&format!(
                "answered by {} in {} ms",
                outcome.provider,
                outcome.duration_ms()
            ));
            console.render_response(&outcome.text);
            0
        }
        Err(error) => {
            console.error(&format!("Error generating response: {error}"));
            1
        }
    }
}

/// Run the user's command locally, show its output, then analyze it.
///
/// The command output is always shown first, before any model call, so the
/// user sees it even when no provider is reachable.
async fn execute_and_analyze(
    console: &CliConsole,
    client: &FallbackClient,
    ctx: &SystemContext,
    command: &str,
) -> i32 {
    println!("{}", executor::shell_prompt_line(ctx, command));

    let outcome = match executor::run_shell(command).await {
        Ok(outcome) => outcome,
        Err(error) => {
            console.error(&format!("Execution error: {error}"));
            console.render_response(&prompts::execution_error_verdict(
                command,
                &error.to_string(),
            ));
            return 1;
        }
    };

    if outcome.timed_out {
        console.warn(&format!(
            "Command timed out after {} seconds: {command}",
            executor::COMMAND_TIMEOUT.as_secs()
        ));
        console.render_response(&prompts::timeout_verdict(command));
        return 1;
    }

    console.command_frame(&outcome);

    let prompt = prompts::analysis_prompt(&outcome, ctx);
    match client.generate_with_fallback(&prompt).await {
        Ok(generation) => {
            if generation.fell_back() {
                console.fallback_notice(&generation);
            }
            let (analysis, verdict) = split_verdict(&generation.text);
            if let Some(success) = verdict {
                console.verdict(success);
            }
            console.render_response(&analysis);
            0
        }
        Err(error) => {
            console.error(&format!("Error generating AI analysis: {error}"));
            1
        }
    }
}
