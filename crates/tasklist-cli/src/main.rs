//! # Tasks CLI
//!
//! The binary is intentionally thin: everything lives in `src/cli/`, and this
//! file only invokes `cli::run()` and handles process termination.
//!
//! The CLI is the presentation layer for the `tasklist` library. It calls
//! `fetch()` once at startup, subscribes to collection events to know what to
//! print, and sends every user action through the `Collection`. It never
//! touches the store or the sync adapter directly.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
