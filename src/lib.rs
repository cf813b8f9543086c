//! Minimal chat client over a hosted language-model inference API.
//!
//! One behavioral core (conversation history + remote chat invocation) shared
//! by two deployment shapes: a small web server with session-scoped history
//! and an interactive command-line loop.

// Strict lint policy: nothing undocumented, nothing unused, no panicking paths.
#![deny(warnings)] // All warnings are treated as errors
#![deny(unsafe_code)] // Unsafe code is forbidden
#![deny(missing_docs)] // Every public item must be documented
#![deny(dead_code)] // Unused code is forbidden
#![deny(unused_imports)]
#![deny(unused_variables)]
#![deny(unused_must_use)] // Result and Option must be handled explicitly
#![deny(nonstandard_style)]
#![forbid(unsafe_op_in_unsafe_fn)]
// Clippy discipline
#![deny(clippy::all)]
#![deny(clippy::unwrap_used)] // unwrap() is forbidden outside tests
#![deny(clippy::expect_used)] // expect() is forbidden outside tests
#![deny(clippy::panic)]
#![deny(clippy::print_stdout)] // println!() is forbidden outside the terminal loop
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
#![deny(clippy::redundant_clone)]

/// Conversation store, completion invoker, and error classification.
pub mod chat;
/// Interactive terminal loop (CLI variant).
#[allow(clippy::print_stdout)]
pub mod repl;
/// HTTP server and API routes (web variant).
#[allow(clippy::unused_async)]
pub mod server;
/// Configuration loading and binary entrypoint helpers.
pub mod startup;
