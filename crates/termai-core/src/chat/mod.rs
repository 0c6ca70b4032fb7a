//! Interactive chat orchestration.
//!
//! `console` defines the terminal-facing ports, `engine` runs a single turn
//! against a provider, and `session_loop` drives the read-stream-render cycle.

pub mod console;
pub mod engine;
pub mod session_loop;

#[cfg(test)]
pub(crate) mod testing;
