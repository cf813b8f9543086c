//! Binary entrypoint for the interactive hearth chatbot.

use std::process::ExitCode;

use hearth_chat::startup;

/// Start the interactive chat loop against the hosted inference API.
fn main() -> ExitCode {
    startup::run_chat()
}
