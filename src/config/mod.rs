// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod loader;
mod registry;
mod runtime;
mod validation;

pub mod consts;

pub use loader::{load_and_validate_config, load_config, ExecutorOptions, WorkflowConfig};
pub use registry::BehaviorRegistry;
pub use runtime::RuntimeBuilder;
pub use validation::{validate_workflow, ValidationWarning};
