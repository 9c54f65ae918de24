//! Prompt templates for each CLI mode
//!
//! The generation core treats prompts as opaque strings; everything
//! domain-specific lives here. Each template embeds the system context so
//! answers match the user's actual shell and OS.

use crate::context::SystemContext;
use crate::executor::CommandOutcome;

fn context_block(ctx: &SystemContext) -> String {
    format!(
        "Current system context:\n\
         - Working directory: {}\n\
         - Shell: {}\n\
         - OS: {}\n\
         - User: {}",
        ctx.cwd, ctx.shell, ctx.os, ctx.user
    )
}

/// Prompt for a general terminal/development question
pub fn ask_prompt(question: &str, ctx: &SystemContext) -> String {
    format!(
        r#"You are an expert terminal and development assistant. The user is asking: "{question}"

{context}

Please respond using clean Markdown with concise headings (##/###), bullet lists, and fenced bash code blocks for commands (```bash). Keep it skimmable and practical with executable steps."#,
        question = question,
        context = context_block(ctx),
    )
}

/// Prompt for analyzing pasted error output
pub fn debug_prompt(error_output: &str, ctx: &SystemContext) -> String {
    format!(
        r#"You are an expert system administrator and debugger. The user encountered this terminal error or issue:

ERROR/ISSUE:
{error_output}

{context}

Please analyze this error and provide:

1. DIAGNOSIS: What is causing this error
2. IMMEDIATE SOLUTION: The exact command(s) to fix this issue
3. EXPLANATION: Why this error occurred
4. PREVENTION: How to avoid this in the future
5. ALTERNATIVES: Other ways to accomplish what the user was trying to do

Use clean Markdown and fenced bash code blocks for commands."#,
        error_output = error_output,
        context = context_block(ctx),
    )
}

/// Prompt for explaining a command the user has not run
pub fn explain_prompt(command: &str, ctx: &SystemContext) -> String {
    format!(
        r#"You are an expert terminal command instructor. The user wants to learn about this command: {command}

{context}

Provide a concise Markdown guide including:

1. COMMAND PURPOSE
2. BASIC SYNTAX with real examples
3. COMMON OPTIONS
4. 5-7 PRACTICAL EXAMPLES
5. ADVANCED USAGE
6. SAFETY NOTES
7. RELATED COMMANDS
8. TROUBLESHOOTING

Use fenced bash blocks for commands."#,
        command = command,
        context = context_block(ctx),
    )
}

/// Prompt for debugging a specific command the user tried and that failed
pub fn failed_command_prompt(command: &str, error_output: &str, ctx: &SystemContext) -> String {
    format!(
        r#"You are an expert terminal command specialist. The user tried to run this command but it failed:

COMMAND ATTEMPTED: {command}
ERROR OUTPUT: {error_output}

{context}

Provide:

1. ERROR ANALYSIS: What went wrong with this specific command
2. CORRECTED COMMAND: The exact fixed version of the command
3. EXPLANATION: Why the original command failed
4. COMMAND BREAKDOWN: Explain each part of the corrected command
5. USAGE EXAMPLES: 3-5 practical examples of how to use this command correctly
6. COMMON MISTAKES: Other common errors with this command and how to avoid them
7. RELATED COMMANDS: Similar or complementary commands that might be useful

Respond in clean Markdown. Use fenced bash code blocks for commands (```bash)."#,
        command = command,
        error_output = error_output,
        context = context_block(ctx),
    )
}

/// Prompt for analyzing a command that was just executed locally.
///
/// The verdict contract is strict: the model must end with a
/// `VERDICT: SUCCESS` or `VERDICT: FAILED` line driven by the return code,
/// never by the output content.
pub fn analysis_prompt(outcome: &CommandOutcome, ctx: &SystemContext) -> String {
    let status = outcome.status_label();
    let return_code = outcome
        .exit_code
        .map(|c| c.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    let stdout = if outcome.stdout.is_empty() {
        "(no output)"
    } else {
        &outcome.stdout
    };
    let stderr = if outcome.stderr.is_empty() {
        "(no errors)"
    } else {
        &outcome.stderr
    };

    format!(
        r#"You are an expert system administrator and command analyst. A command was just executed and you need to analyze the results.

COMMAND EXECUTED: {command}
EXECUTION STATUS: {status}
RETURN CODE: {return_code}

STDOUT:
{stdout}

STDERR:
{stderr}

{context}

CRITICAL: The verdict must be based on the return code:
- Return code 0 = SUCCESS (command completed successfully)
- Return code non-zero = FAILED (command failed, regardless of output content)

Commands like 'git main' fail with return code 1 and show error messages in stdout, not stderr. This is still a FAILURE.

Please provide a comprehensive analysis in the following format:

## EXECUTION VERDICT
**Status:** {status}
**Command:** `{command}`
**Return Code:** {return_code}

## ANALYSIS
- **What happened:** Brief explanation of what the command did
- **Success/Failure reason:** Why it succeeded or failed (MUST consider return code)
- **Output interpretation:** What the output means

## RECOMMENDATIONS
- **What could be done differently:** Suggestions for improvement
- **Alternative approaches:** Other ways to achieve the same goal
- **Next steps:** What to do next

## COMMAND BREAKDOWN
- **Purpose:** What this command is designed to do
- **Key components:** Important parts of the command
- **Safety notes:** Any potential risks or considerations

CRITICAL: At the very end of your response, add a verdict line in this exact format:
- If return code is 0: VERDICT: SUCCESS
- If return code is non-zero: VERDICT: FAILED

The verdict MUST match the return code, not the content of the output.

Use clean Markdown formatting with fenced bash code blocks for commands."#,
        command = outcome.command,
        status = status,
        return_code = return_code,
        stdout = stdout,
        stderr = stderr,
        context = context_block(ctx),
    )
}

/// Canned analysis shown when the command exceeded the execution timeout;
/// no AI call is made for this case.
pub fn timeout_verdict(command: &str) -> String {
    format!(
        "## EXECUTION VERDICT\n\
         **Status:** TIMEOUT\n\
         **Command:** `{command}`\n\n\
         ## ANALYSIS\n\
         - **What happened:** The command exceeded the 30-second timeout limit\n\
         - **Recommendation:** Consider breaking down the command or using a different approach for long-running operations"
    )
}

/// Canned analysis shown when the command could not be executed at all
pub fn execution_error_verdict(command: &str, error: &str) -> String {
    format!(
        "## EXECUTION VERDICT\n\
         **Status:** ERROR\n\
         **Command:** `{command}`\n\n\
         ## ANALYSIS\n\
         - **What happened:** An error occurred while trying to execute the command\n\
         - **Error details:** {error}\n\
         - **Recommendation:** Check command syntax and system permissions"
    )
}
