// Copyright (c) 2025 Graphcore Ltd. All rights reserved.

//! Creation of the routers and channels that make up a torus.
//!
//! The topology decides how many routers and channels there are and how they
//! are connected, while a [`ComponentFactory`] decides what they are. A
//! simulation supplies a factory that builds its own router models; the
//! [`SimComponents`] factory builds the recording components from this crate.

use std::rc::Rc;

use torus_track::entity::Entity;

use crate::channel::{Channel, ChannelId, SimChannel};
use crate::router::{PortRouter, Router};

/// Builds the components of a torus.
pub trait ComponentFactory {
    /// Channel carrying data between routers.
    type Channel: Channel;

    /// Channel returning credits against a data channel.
    type Credit: Channel;

    type Router: Router<Self::Channel, Self::Credit>;

    /// Create the router for `node` with the given number of ports.
    fn new_router(
        &self,
        parent: &Rc<Entity>,
        name: &str,
        node: usize,
        num_inputs: usize,
        num_outputs: usize,
    ) -> Self::Router;

    /// Create the data channel identified by `id`.
    fn new_channel(&self, parent: &Rc<Entity>, id: ChannelId) -> Rc<Self::Channel>;

    /// Create the credit channel paired with data channel `id`.
    fn new_credit_channel(&self, parent: &Rc<Entity>, id: ChannelId) -> Rc<Self::Credit>;
}

/// Factory for the [`PortRouter`] and [`SimChannel`] components.
#[derive(Clone, Copy, Debug, Default)]
pub struct SimComponents;

impl ComponentFactory for SimComponents {
    type Channel = SimChannel;
    type Credit = SimChannel;
    type Router = PortRouter<SimChannel, SimChannel>;

    fn new_router(
        &self,
        parent: &Rc<Entity>,
        name: &str,
        node: usize,
        num_inputs: usize,
        num_outputs: usize,
    ) -> Self::Router {
        PortRouter::new(parent, name, node, num_inputs, num_outputs)
    }

    fn new_channel(&self, parent: &Rc<Entity>, id: ChannelId) -> Rc<Self::Channel> {
        Rc::new(SimChannel::new(parent, id.to_string().as_str()))
    }

    fn new_credit_channel(&self, parent: &Rc<Entity>, id: ChannelId) -> Rc<Self::Credit> {
        Rc::new(SimChannel::new(parent, format!("{id}_cred").as_str()))
    }
}
