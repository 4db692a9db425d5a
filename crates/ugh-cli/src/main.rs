//! # ugh CLI
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, this file
//! only invokes `cli::run()` and turns an error into exit code 1.
//!
//! ## Layering
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/ugh-cli/src/cli/)                 │
//! │  - clap argument parsing (setup.rs)                  │
//! │  - logging, config and dispatch (commands.rs)        │
//! │  - terminal rendering (render.rs, styles.rs)         │
//! └──────────────────────────────────────────────────────┘
//!                          │
//!                          ▼
//! ┌──────────────────────────────────────────────────────┐
//! │  API Layer (crates/ugh/src/api.rs)                   │
//! │  - resolves ruleset and folders from configuration   │
//! │  - returns structured `CmdResult` values             │
//! └──────────────────────────────────────────────────────┘
//!                          │
//!                          ▼
//! ┌──────────────────────────────────────────────────────┐
//! │  Command Layer (crates/ugh/src/commands/*)           │
//! │  - registry, model, validation and backup logic      │
//! │  - no knowledge of stdout/stderr or process exits    │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! Validation failures and failed backups are reported line by line and then
//! surface as an error, so scripts can rely on the exit code.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
