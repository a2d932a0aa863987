// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod memory_store;
pub mod passthrough;
pub mod template;
pub mod wait;

pub use memory_store::*;
pub use passthrough::*;
pub use template::*;
pub use wait::*;
