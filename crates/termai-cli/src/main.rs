//! termai CLI application
//!
//! A single-shot AI assistant for terminal work. Each invocation handles
//! one request in one of four modes:
//!
//! - `termai ask "<question>"`: general terminal/development questions
//! - `termai debug "<error>"`: analyze pasted error output
//! - `termai help <command>`: run the command, then analyze the result
//! - `termai explain <command>`: explain a command without running it
//!
//! OpenAI is the primary backend, tried with retries and exponential
//! backoff; Gemini is the fallback, given one attempt under a hard
//! timeout. Set `OPENAI_API_KEY` and/or `GEMINI_API_KEY` to configure.

mod args;
mod console;
mod context;
mod executor;
mod prompts;
mod router;

use clap::Parser;

#[tokio::main]
async fn main() {
    // Initialize logging with environment-based filtering.
    // Set RUST_LOG=debug for verbose logging.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = args::Cli::parse();
    let exit_code = router::route(cli).await;
    std::process::exit(exit_code);
}
