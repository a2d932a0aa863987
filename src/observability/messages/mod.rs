// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Each message type implements `Display` for human-readable output and
//! [`StructuredLog`] to emit itself as a `tracing` event with typed fields.
//!
//! # Organization
//!
//! * `engine` - run lifecycle events
//! * `node` - per-node execution and dispatch events
//! * `validation` - workflow validation warnings and errors
//!
//! # Usage Pattern
//!
//! ```rust
//! use openflow::observability::messages::engine::RunStarted;
//! use openflow::observability::messages::StructuredLog;
//!
//! let msg = RunStarted {
//!     run_id: "3f2a",
//!     strategy: "breadth_first",
//!     node_count: 3,
//!     start_nodes: &["n1".to_string()],
//! };
//!
//! msg.log();
//! ```

use tracing::Span;

pub mod engine;
pub mod node;
pub mod validation;

/// A message that knows its own level and fields.
pub trait StructuredLog {
    /// Emit the message as a `tracing` event.
    fn log(&self);

    /// Open a span carrying the message's fields.
    fn span(&self, name: &str) -> Span;
}
