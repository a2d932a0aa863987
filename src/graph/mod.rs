// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Graph Store: the node and edge sets a workflow run traverses.
//!
//! The store is pure data. The editor layer owns mutations (`add_node`,
//! `remove_node`, `add_edge`, `remove_edge`); the scheduler only reads through
//! [`Graph::sources`] and [`Graph::outgoing_edges`].
//!
//! Two tolerances are part of the contract:
//!
//! * an edge whose source or target is missing is inert, never an error, since
//!   the editor may transiently hold dangling edges;
//! * cycles are allowed, the scheduler's processed set keeps runs finite.

mod edge;
mod node;
mod store;

pub use edge::Edge;
pub use node::{Node, NodeConfig};
pub use store::{Graph, WorkflowDefinition};
