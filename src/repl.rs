//! Interactive terminal loop for the CLI variant.

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::chat::{ChatEngine, CompletionBackend};

/// Conversation identity for the sole CLI session.
const CLI_SESSION: &str = "cli";

/// A recognized REPL command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReplCommand {
    /// Terminate the loop (`quit` / `exit`).
    Quit,
    /// Reset the conversation history (`clear`).
    Clear,
}

/// Parse a line as a command, case-insensitively.
///
/// Returns `None` for anything that should be treated as a chat message.
#[must_use]
pub fn parse_command(line: &str) -> Option<ReplCommand> {
    match line.trim().to_lowercase().as_str() {
        "quit" | "exit" => Some(ReplCommand::Quit),
        "clear" => Some(ReplCommand::Clear),
        _ => None,
    }
}

/// Run the interactive chat loop until the user quits.
///
/// Empty lines are skipped; unrecognized non-empty lines are sent as chat
/// messages. Ctrl-C and Ctrl-D terminate gracefully. Remote failures are
/// printed and never end the loop.
///
/// # Errors
/// Returns an error if the line editor cannot be created or reading from the
/// terminal fails for a reason other than interrupt or end-of-file.
pub async fn run<B: CompletionBackend>(engine: &ChatEngine<B>) -> Result<(), ReadlineError> {
    let mut editor = DefaultEditor::new()?;
    print_banner(engine.model());

    loop {
        match editor.readline("You: ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(line);

                match parse_command(line) {
                    Some(ReplCommand::Quit) => {
                        println!("\nGoodbye!");
                        break;
                    }
                    Some(ReplCommand::Clear) => {
                        engine.clear(CLI_SESSION);
                        println!("Conversation history cleared.");
                        continue;
                    }
                    None => {}
                }

                match engine.send(CLI_SESSION, line).await {
                    Ok(reply) => println!("\nAI: {reply}\n"),
                    // Throttled already carries the "try again" wording;
                    // neither classification ends the loop.
                    Err(err) if err.is_throttled() => println!("\n{err}\n"),
                    Err(err) => println!("\nError: {err}\n"),
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => {
                println!("\nGoodbye!");
                break;
            }
            Err(err) => return Err(err),
        }
    }

    Ok(())
}

/// Print the startup banner with the active model and command help.
fn print_banner(model: &str) {
    println!("{}", "=".repeat(60));
    println!("hearth-chat");
    println!("{}", "=".repeat(60));
    println!("Model: {model}");
    println!("Commands:");
    println!("  - Type your message to chat");
    println!("  - Type 'clear' to clear conversation history");
    println!("  - Type 'quit' or 'exit' to end the conversation");
    println!("{}", "=".repeat(60));
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command_case_insensitive() {
        assert_eq!(parse_command("quit"), Some(ReplCommand::Quit));
        assert_eq!(parse_command("EXIT"), Some(ReplCommand::Quit));
        assert_eq!(parse_command("Clear"), Some(ReplCommand::Clear));
        assert_eq!(parse_command("  clear  "), Some(ReplCommand::Clear));
    }

    #[test]
    fn test_ordinary_lines_are_chat_messages() {
        assert_eq!(parse_command("hello there"), None);
        assert_eq!(parse_command("clear my schedule"), None);
        assert_eq!(parse_command("quitting my job"), None);
    }
}
