// SPDX-License-Identifier: MIT

//! emitter: in-process pub/sub with wildcard event patterns
//!
//! This crate provides:
//! - `Emitter` - Listener registry with synchronous and task-per-listener dispatch
//! - `EventPattern` - Character-level wildcard matching for event names
//! - `Callback` / `Listener` - Identity-preserving callback handles
//!
//! Registration and removal mutate the registry under one exclusive lock;
//! dispatch snapshots the matching listeners under that lock and invokes them
//! after releasing it, so listeners can safely call back into the emitter.

pub mod emitter;
pub mod listener;
pub mod pattern;

// Re-exports
pub use emitter::{Emitter, NEW_LISTENER, REMOVE_LISTENER};
pub use listener::{Arg, Callback, Listener};
pub use pattern::EventPattern;
