// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod behavior;
pub mod executor;
pub mod observer;

pub use behavior::Behavior;
pub use executor::WorkflowExecutor;
pub use observer::RunObserver;
