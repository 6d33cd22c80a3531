// Copyright (c) 2025 Graphcore Ltd. All rights reserved.

//! The router capability used by the topology.
//!
//! The switching, arbitration and flow control inside a router belong to the
//! simulation models. The topology only needs to hand each router its input
//! and output channels, each paired with the credit channel that flows in the
//! opposite direction.
//!
//! # Ports
//!
//! Every router in an `n` dimensional torus has:
//!  - `n + 1` inputs: `rx[0, n-1]` from the ring of each dimension, and
//!    `rx[n]` the injection channel.
//!  - `n + 1` outputs: `tx[0, n-1]` to the ring of each dimension, and
//!    `tx[n]` the ejection channel.

use std::fmt;
use std::rc::Rc;

use torus_track::entity::{Entity, GetEntity};
use torus_track::{connect, debug};

use crate::channel::Channel;

/// A data channel paired with its credit return channel.
pub type ChannelPair<C, R> = (Rc<C>, Rc<R>);

/// The capabilities the topology needs of a router.
///
/// Channels are added in port order, so the first `n` inputs/outputs are the
/// ring ports for dimensions `0..n` and the last is injection/ejection.
pub trait Router<C, R>: GetEntity
where
    C: Channel,
    R: Channel,
{
    /// Connect the next input port to `channel`, returning credits on
    /// `credit`.
    fn add_input_channel(&mut self, channel: Rc<C>, credit: Rc<R>);

    /// Connect the next output port to `channel`, receiving credits on
    /// `credit`.
    fn add_output_channel(&mut self, channel: Rc<C>, credit: Rc<R>);
}

/// A router that records the channels connected to each of its ports.
pub struct PortRouter<C, R>
where
    C: Channel,
    R: Channel,
{
    entity: Rc<Entity>,
    node: usize,
    num_inputs: usize,
    num_outputs: usize,
    inputs: Vec<ChannelPair<C, R>>,
    outputs: Vec<ChannelPair<C, R>>,
}

impl<C, R> PortRouter<C, R>
where
    C: Channel,
    R: Channel,
{
    #[must_use]
    pub fn new(
        parent: &Rc<Entity>,
        name: &str,
        node: usize,
        num_inputs: usize,
        num_outputs: usize,
    ) -> Self {
        Self {
            entity: Rc::new(Entity::new(parent, name)),
            node,
            num_inputs,
            num_outputs,
            inputs: Vec::with_capacity(num_inputs),
            outputs: Vec::with_capacity(num_outputs),
        }
    }

    #[must_use]
    pub fn node(&self) -> usize {
        self.node
    }

    #[must_use]
    pub fn num_inputs(&self) -> usize {
        self.num_inputs
    }

    #[must_use]
    pub fn num_outputs(&self) -> usize {
        self.num_outputs
    }

    /// The channels connected to the input ports so far, in port order.
    #[must_use]
    pub fn inputs(&self) -> &[ChannelPair<C, R>] {
        &self.inputs
    }

    /// The channels connected to the output ports so far, in port order.
    #[must_use]
    pub fn outputs(&self) -> &[ChannelPair<C, R>] {
        &self.outputs
    }

    #[must_use]
    pub fn input(&self, port: usize) -> &Rc<C> {
        &self.inputs[port].0
    }

    #[must_use]
    pub fn output(&self, port: usize) -> &Rc<C> {
        &self.outputs[port].0
    }
}

impl<C, R> GetEntity for PortRouter<C, R>
where
    C: Channel,
    R: Channel,
{
    fn entity(&self) -> &Rc<Entity> {
        &self.entity
    }
}

impl<C, R> Router<C, R> for PortRouter<C, R>
where
    C: Channel,
    R: Channel,
{
    fn add_input_channel(&mut self, channel: Rc<C>, credit: Rc<R>) {
        assert!(
            self.inputs.len() < self.num_inputs,
            "{} has all {} input ports connected",
            self.entity,
            self.num_inputs
        );
        debug!(self.entity ; "rx[{}] <- {}", self.inputs.len(), channel.entity().name);
        connect!(channel.entity() ; self.entity);
        connect!(self.entity ; credit.entity());
        self.inputs.push((channel, credit));
    }

    fn add_output_channel(&mut self, channel: Rc<C>, credit: Rc<R>) {
        assert!(
            self.outputs.len() < self.num_outputs,
            "{} has all {} output ports connected",
            self.entity,
            self.num_outputs
        );
        debug!(self.entity ; "tx[{}] -> {}", self.outputs.len(), channel.entity().name);
        connect!(self.entity ; channel.entity());
        connect!(credit.entity() ; self.entity);
        self.outputs.push((channel, credit));
    }
}

impl<C, R> fmt::Display for PortRouter<C, R>
where
    C: Channel,
    R: Channel,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.entity)
    }
}
