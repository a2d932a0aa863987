// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod json;

pub use json::{lookup_path, parse_config, render_inline};
