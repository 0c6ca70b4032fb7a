//! Interactive chat for Terminal AI.
//!
//! Streams answers as they arrive under a response header. On a terminal a
//! thinking indicator shows until the first fragment; piped stdin skips the
//! line editor. Entry point: `loop_runner::run_chat`.

pub mod banner;
pub mod input;
pub mod loop_runner;
pub mod piped;
pub mod renderer;
