// Copyright (c) 2025 Graphcore Ltd. All rights reserved.

#![doc(test(attr(warn(unused))))]

//! Construction of unidirectional k-ary n-cube torus networks.
//!
//! A k-ary n-cube has `k^n` nodes, each identified by `n` coordinates in
//! `[0, k)`. Along every dimension the nodes form a ring of `k` routers and
//! each router drives a single channel to the next router in that ring. For
//! example, dimension 0 of a 4-ary 2-cube looks like:
//!
//! ```text
//!   +-> router_0_0 -> router_0_1 -> router_0_2 -> router_0_3 -+
//!   |                                                          |
//!   +----------------------------------------------------------+
//! ```
//!
//! The crate is split into:
//!  - [shape](crate::shape): the mapping between node indices and
//!    coordinates, and the neighbours of a node in each ring.
//!  - [channel](crate::channel): the numbering of channels and the channel
//!    capability.
//!  - [router](crate::router): the router capability and a port-recording
//!    router.
//!  - [factory](crate::factory): how routers and channels are created.
//!  - [config](crate::config): the size and latency policy of a torus.
//!  - [torus](crate::torus): the builder that connects everything together.
//!
//! # Simple Application
//!
//! ```rust
//! use torus_topology::config::TorusConfig;
//! use torus_topology::factory::SimComponents;
//! use torus_topology::torus::UniTorus;
//! use torus_track::entity::{GetEntity, toplevel};
//! use torus_track::tracker::dev_null_tracker;
//!
//! let top = toplevel(&dev_null_tracker(), "top");
//! let torus = UniTorus::new(&top, "torus", &TorusConfig::new(8, 3), &SimComponents);
//! assert_eq!(torus.num_nodes(), 512);
//! assert_eq!(torus.routers()[511].entity().name, "router_7_7_7");
//! ```

pub mod channel;
pub mod config;
pub mod factory;
pub mod router;
pub mod shape;
pub mod test_helpers;
pub mod torus;
pub mod types;
