// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod behaviors;
pub mod factory;

pub use behaviors::*;
pub use factory::LocalBehaviorFactory;
