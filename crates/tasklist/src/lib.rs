//! # Tasklist Architecture
//!
//! Tasklist is a **UI-agnostic task list library** whose data lives entirely on
//! the local device. The CLI in `crates/tasklist-cli` is one client; nothing in
//! here knows about terminals.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Presentation (tasklist-cli, or any other client)           │
//! │  - calls fetch() once, subscribes to events                 │
//! │  - funnels every user action through the Collection         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Collection (collection.rs) + EventBus (events.rs)          │
//! │  - ordered in-memory working set, derived views             │
//! │  - announces added / changed / removed / reset / any        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  SyncAdapter (sync.rs)                                      │
//! │  - verb + record -> store call, NotFound on a miss          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage (store/)                                           │
//! │  - ObjectStore: one namespace, whole-mapping flush          │
//! │  - StorageBackend: FsBackend (production), MemBackend (test)│
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use tasklist::collection::Collection;
//! use tasklist::model::NewRecord;
//! use tasklist::store::mem_backend::MemBackend;
//!
//! let mut todos = Collection::new(MemBackend::new(), "todos");
//! todos.fetch().unwrap();
//! let milk = todos.add(NewRecord::titled("Buy milk")).unwrap();
//! assert_eq!(milk.order, 1);
//! assert_eq!(todos.remaining().len(), 1);
//! ```
//!
//! ## Module Overview
//!
//! - [`collection`]: The ordered collection, entry point for all operations
//! - [`events`]: Change notification bus
//! - [`sync`]: Verb-to-store translation
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Core data types (`Record`, `NewRecord`, `Stats`)
//! - [`id`]: Identifier generation
//! - [`config`]: Configuration management
//! - [`logging`]: Logger bootstrap for binaries
//! - [`error`]: Error types

pub mod collection;
pub mod config;
pub mod error;
pub mod events;
pub mod id;
pub mod logging;
pub mod model;
pub mod store;
pub mod sync;
