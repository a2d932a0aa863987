// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod backends;   // behaviour implementations
pub mod config;     // workflow files + registry
pub mod context;    // run-scoped state
pub mod engine;     // scheduler and run results
pub mod errors;     // error handling
pub mod graph;      // nodes, edges, graph store
pub mod observability;
pub mod traits;     // unified abstractions
pub mod utils;
