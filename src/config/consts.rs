// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

/// Default delay of a `wait` node when no `ms` option is given
pub const DEFAULT_WAIT_MS: u64 = 1_000;
/// Nominal latency of a memory read/write
pub const MEMORY_STORE_LATENCY_MS: u64 = 50;
/// Nominal latency of the simulated AI agent
pub const AI_LATENCY_MS: u64 = 800;
/// Nominal latency of the simulated mail integration
pub const GMAIL_LATENCY_MS: u64 = 400;
/// Nominal latency of the simulated chat integration
pub const DISCORD_LATENCY_MS: u64 = 300;
/// File extensions accepted by the workflow loader
pub const YAML_EXTENSIONS: [&str; 2] = ["yaml", "yml"];
pub const TOML_EXTENSIONS: [&str; 1] = ["toml"];
