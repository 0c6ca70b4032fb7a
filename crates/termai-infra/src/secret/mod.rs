//! Credential lookup.

pub mod env;
