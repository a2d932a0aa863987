// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Node behaviour backends.
//!
//! # Available Backends
//!
//! ## Local Backend
//! In-process behaviours backing the designer palette:
//! - **Pass-through**: `passthrough`, `webhook`, `code`
//! - **Timer**: `wait`, a cancellable fixed delay
//! - **Memory**: `db`, `memory`, reads and writes against the run's shared memory
//! - **Templates**: `template`, plus the canned `ai`, `gmail` and `discord` stand-ins
//!
//! ## Stub Backend (Test-Only)
//! Behaviours for exercising the scheduler (only available in test builds):
//! - **EchoBehavior**: returns its input
//! - **FailingBehavior**: always fails
//! - **SleepingBehavior**: suspends on the context, for timeout and cancellation tests
//! - **RecordingBehavior**: records every input it receives
//!
//! # Architecture
//!
//! ```text
//! Node type tag → LocalBehaviorFactory → Arc<dyn Behavior> → BehaviorRegistry → Scheduler
//! ```
//!
//! # Examples
//!
//! ```rust
//! use openflow::backends::local::LocalBehaviorFactory;
//!
//! let behavior = LocalBehaviorFactory::create_behavior("webhook")?;
//! assert_eq!(behavior.name(), "passthrough");
//! # Ok::<(), String>(())
//! ```

pub mod local;
#[cfg(test)]
pub mod stub;
