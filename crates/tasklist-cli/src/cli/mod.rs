//! # CLI Behavior
//!
//! This is **one possible UI client** for tasklist, not the application itself.
//! The CLI is the only place that knows about terminal I/O, exit codes, and
//! output formatting.
//!
//! ### Naked Execution (`tasks`)
//!
//! Running `tasks` with no arguments defaults to `tasks list`.
//!
//! ### Positions
//!
//! Tasks are addressed by their 1-based position in the listing, which is the
//! collection order. Positions are resolved to ids before anything is changed,
//! so `tasks rm 1 2` removes the first two tasks as listed.
//!
//! ## Module Structure
//!
//! - `commands`: Context setup and per-command handlers
//! - `render`: Output formatting (lists, event feed, stats)
//! - `setup`: Argument parsing via clap

mod commands;
mod render;
pub mod setup;

pub use commands::run;
