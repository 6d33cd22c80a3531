// Copyright (c) 2025 Graphcore Ltd. All rights reserved.

//! Channel numbering and the channel capability used by routers.
//!
//! Each node owns exactly one outgoing ring channel per dimension, numbered
//! `n * node + dim`. A node never allocates an identifier for its incoming
//! ring channels: the input of `node` in `dim` is the output of
//! [`prev_node(node, dim)`](crate::shape::TorusShape::prev_node) in the same
//! dimension. Injection and ejection channels are indexed by node in their
//! own identifier spaces.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use torus_track::entity::{Entity, GetEntity};
use torus_track::trace;

use crate::shape::TorusShape;
use crate::types::Ticks;

/// Identifies any channel in the network.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChannelId {
    /// A router-to-router channel, numbered `n * source_node + dim`.
    Ring(usize),

    /// The channel through which traffic enters the network at a node.
    Injection(usize),

    /// The channel through which traffic leaves the network at a node.
    Ejection(usize),
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ChannelId::Ring(id) => write!(f, "chan{id}"),
            ChannelId::Injection(node) => write!(f, "inject{node}"),
            ChannelId::Ejection(node) => write!(f, "eject{node}"),
        }
    }
}

/// The ring channel leaving `node` in `dim`, heading to
/// [`next_node(node, dim)`](TorusShape::next_node).
#[must_use]
pub fn output_channel(shape: &TorusShape, node: usize, dim: usize) -> usize {
    debug_assert!(node < shape.num_nodes() && dim < shape.n());
    shape.n() * node + dim
}

/// The ring channel arriving at `node` in `dim`.
#[must_use]
pub fn input_channel(shape: &TorusShape, node: usize, dim: usize) -> usize {
    output_channel(shape, shape.prev_node(node, dim), dim)
}

/// The `(node, dim)` that owns ring channel `id` as an output.
#[must_use]
pub fn channel_source(shape: &TorusShape, id: usize) -> (usize, usize) {
    debug_assert!(id < shape.num_channels());
    (id / shape.n(), id % shape.n())
}

/// The node that receives ring channel `id` as an input.
#[must_use]
pub fn channel_destination(shape: &TorusShape, id: usize) -> usize {
    let (node, dim) = channel_source(shape, id);
    shape.next_node(node, dim)
}

/// The capabilities the topology needs of a channel.
///
/// Channels are shared between the router that drives them and the router
/// that receives from them, so latency uses interior mutability.
pub trait Channel: GetEntity {
    fn set_latency(&self, ticks: Ticks);

    fn latency(&self) -> Ticks;
}

/// A channel that only records its configuration.
///
/// The timing of items moving through a channel is handled by the simulation
/// engine; this is used when the topology is built stand-alone and in tests.
pub struct SimChannel {
    entity: Rc<Entity>,
    latency: Cell<Ticks>,
}

impl SimChannel {
    #[must_use]
    pub fn new(parent: &Rc<Entity>, name: &str) -> Self {
        Self {
            entity: Rc::new(Entity::new(parent, name)),
            latency: Cell::new(0),
        }
    }
}

impl GetEntity for SimChannel {
    fn entity(&self) -> &Rc<Entity> {
        &self.entity
    }
}

impl Channel for SimChannel {
    fn set_latency(&self, ticks: Ticks) {
        trace!(self.entity ; "latency {ticks}");
        self.latency.set(ticks);
    }

    fn latency(&self) -> Ticks {
        self.latency.get()
    }
}

impl fmt::Display for SimChannel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbering() {
        let shape = TorusShape::new(4, 2);
        assert_eq!(output_channel(&shape, 0, 0), 0);
        assert_eq!(output_channel(&shape, 0, 1), 1);
        assert_eq!(output_channel(&shape, 5, 1), 11);

        // Node 0 is fed by node 3 in dim 0 and node 12 in dim 1
        assert_eq!(input_channel(&shape, 0, 0), 6);
        assert_eq!(input_channel(&shape, 0, 1), 25);
    }

    #[test]
    fn source_and_destination() {
        let shape = TorusShape::new(4, 2);
        assert_eq!(channel_source(&shape, 25), (12, 1));
        assert_eq!(channel_destination(&shape, 25), 0);
        assert_eq!(channel_destination(&shape, 6), 0);
        assert_eq!(channel_destination(&shape, 0), 1);
    }

    #[test]
    fn names() {
        assert_eq!(ChannelId::Ring(12).to_string(), "chan12");
        assert_eq!(ChannelId::Injection(3).to_string(), "inject3");
        assert_eq!(ChannelId::Ejection(0).to_string(), "eject0");
    }
}
