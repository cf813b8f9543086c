//! hearth-chat web server binary.
//! Run with: cargo run --bin hearth-server

use std::process::ExitCode;

use hearth_chat::startup;

fn main() -> ExitCode {
    startup::run_server()
}
