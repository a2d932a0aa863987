// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability: structured log messages, subscriber setup and run observers.
//!
//! Message types follow a struct-based pattern with a `Display` implementation
//! so that log text lives in one place rather than as magic strings scattered
//! through the engine.
//!
//! # Architecture
//!
//! * `messages::engine` - run lifecycle events
//! * `messages::node` - per-node execution and dispatch events
//! * `messages::validation` - workflow validation warnings and errors
//! * `observers` - [`RunObserver`](crate::traits::RunObserver) implementations
//!   (tracing, channel, recording, no-op)
//! * `logging` - `tracing-subscriber` initialisation for the binary
//!
//! # Usage
//!
//! ```rust
//! use openflow::observability::messages::node::EdgeDispatched;
//!
//! let msg = EdgeDispatched { source: "n1", target: "n2", edge_id: "e1", index: 1, total: 1 };
//! tracing::debug!("{}", msg);
//! ```

pub mod logging;
pub mod messages;
pub mod observers;

pub use observers::{ChannelObserver, NoopObserver, RecordingObserver, RunEvent, TracingObserver};
