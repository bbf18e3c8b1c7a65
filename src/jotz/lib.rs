//! # Jotz Architecture
//!
//! Jotz is a **UI-agnostic journaling library**. The CLI in `main.rs` is
//! one client of it; the library never assumes a terminal.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (main.rs + args.rs)                              │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Session Layer (session.rs)                                 │
//! │  - Per-user in-memory mirror of the entry collection        │
//! │  - Idle → Loading → Ready; mutations adjust the mirror      │
//! │    only after the write is confirmed                        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Journal Facade (api.rs)                                    │
//! │  - Owns the one store handle for the process                │
//! │  - Canonical Entry shape in, canonical Entry shape out      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract EntryStore trait                                │
//! │  - FileStore (local), RemoteStore (remote document store),  │
//! │    InMemoryStore (testing)                                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Partition Model
//!
//! Every operation is scoped by an opaque user id. One user's entries
//! form a partition, the unit of isolation: nothing ever reads or writes
//! across partitions. The id comes from `identity`, which provisions a
//! local anonymous identity; the rest of the crate only passes it along.
//!
//! ## Key Principle: One Contract, Two Backends
//!
//! `FileStore` and `RemoteStore` must be indistinguishable through the
//! [`store::EntryStore`] trait: same ordering, same timestamp semantics,
//! same error behavior. The backend is picked in `init` from
//! configuration; no call site ever branches on it. Future backends must
//! hold the same line.
//!
//! ## Module Overview
//!
//! - [`api`]: The journal facade owning the store handle
//! - [`session`]: Per-user in-memory mirror with load states
//! - [`store`]: Storage contract and its implementations
//! - [`model`]: Core data types (`Entry`, `EntryDraft`, ids, palette)
//! - [`identity`]: Local anonymous identity provisioning
//! - [`config`]: Configuration management (backend selection)
//! - [`init`]: Process wiring (data dir, config, store handle)
//! - [`error`]: Error types

pub mod api;
pub mod config;
pub mod error;
pub mod identity;
pub mod init;
pub mod model;
pub mod session;
pub mod store;
