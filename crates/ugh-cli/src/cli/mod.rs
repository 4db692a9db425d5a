//! # CLI Behavior
//!
//! This is one client of the `ugh` library. It is the only place that knows
//! about terminal I/O, logging setup and exit codes.
//!
//! ## Context
//!
//! Configuration comes from `ugh.toml` in the working directory (or
//! `--config-dir`), the global config directory and `UGH_*` variables.
//! `--ruleset` overrides the configured ruleset.
//!
//! ## Output
//!
//! Listings and dumps go to stdout. Warnings and errors go to stderr so the
//! output of `ugh scaffold` can be redirected into a file as is.
//!
//! ## Module Structure
//!
//! - `setup`: argument parsing via clap
//! - `commands`: logging, context and dispatch
//! - `render`: tables and messages
//! - `styles`: terminal styles

mod commands;
mod render;
pub mod setup;
mod styles;

pub use commands::run;
