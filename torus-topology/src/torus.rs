// Copyright (c) 2025 Graphcore Ltd. All rights reserved.

//! A unidirectional k-ary n-cube torus.
//!
//! Building a [`UniTorus`] creates one router per node and one data/credit
//! channel pair per node and dimension, plus an injection and an ejection
//! channel pair per node. Every router is then wired to:
//!  - its own output channel in each dimension, leading to the next node
//!    clockwise around that ring.
//!  - the output channel of the previous node in each dimension as its input.
//!  - its injection and ejection channels on the last port.
//!
//! ```rust
//! use torus_topology::channel::ChannelId;
//! use torus_topology::config::TorusConfig;
//! use torus_topology::factory::SimComponents;
//! use torus_topology::torus::UniTorus;
//! use torus_track::entity::toplevel;
//! use torus_track::tracker::dev_null_tracker;
//!
//! let top = toplevel(&dev_null_tracker(), "top");
//! let config = TorusConfig::new(4, 2).with_noc_latency(true);
//! let torus = UniTorus::new(&top, "torus", &config, &SimComponents);
//!
//! assert_eq!(torus.num_nodes(), 16);
//! assert_eq!(torus.num_channels(), 32);
//! assert_eq!(torus.capacity(), 0.5);
//! assert_eq!(torus.router(0).inputs().len(), 3);
//! assert!(std::rc::Rc::ptr_eq(
//!     torus.router(1).input(0),
//!     torus.channel(ChannelId::Ring(0)),
//! ));
//! ```

use std::fmt;
use std::rc::Rc;

use torus_track::entity::{Entity, GetEntity};
use torus_track::{debug, info};

use crate::channel::{
    Channel, ChannelId, channel_destination, channel_source, input_channel, output_channel,
};
use crate::config::{TERMINAL_LATENCY_TICKS, TorusConfig};
use crate::factory::ComponentFactory;
use crate::router::Router;
use crate::shape::TorusShape;
use crate::types::Ticks;

/// Data and credit channels, indexed by ring channel ID or by node.
struct Channels<C, R> {
    data: Vec<Rc<C>>,
    credit: Vec<Rc<R>>,
}

impl<C, R> Channels<C, R>
where
    C: Channel,
    R: Channel,
{
    fn new<F>(
        factory: &F,
        parent: &Rc<Entity>,
        count: usize,
        to_id: impl Fn(usize) -> ChannelId,
    ) -> Self
    where
        F: ComponentFactory<Channel = C, Credit = R>,
    {
        Self {
            data: (0..count)
                .map(|i| factory.new_channel(parent, to_id(i)))
                .collect(),
            credit: (0..count)
                .map(|i| factory.new_credit_channel(parent, to_id(i)))
                .collect(),
        }
    }

    fn set_latency(&self, index: usize, ticks: Ticks) {
        self.data[index].set_latency(ticks);
        self.credit[index].set_latency(ticks);
    }

    fn pair(&self, index: usize) -> (Rc<C>, Rc<R>) {
        (self.data[index].clone(), self.credit[index].clone())
    }
}

/// A fully connected unidirectional torus.
pub struct UniTorus<F>
where
    F: ComponentFactory,
{
    entity: Rc<Entity>,
    shape: TorusShape,
    config: TorusConfig,
    routers: Vec<F::Router>,
    ring: Channels<F::Channel, F::Credit>,
    injection: Channels<F::Channel, F::Credit>,
    ejection: Channels<F::Channel, F::Credit>,
}

impl<F> UniTorus<F>
where
    F: ComponentFactory,
{
    /// Build and connect all routers and channels described by `config`.
    ///
    /// # Panics
    ///
    /// Panics if `k` or `n` is zero or too large, or if the ring latency is
    /// zero, see [`TorusConfig::validate`].
    pub fn new(parent: &Rc<Entity>, name: &str, config: &TorusConfig, factory: &F) -> Self {
        let shape = TorusShape::new(config.k, config.n);
        let entity = Rc::new(Entity::new(parent, name));
        let ring_latency = config.ring_latency_ticks();
        assert!(ring_latency >= 1, "Ring channel latency must be at least 1 tick");
        let num_nodes = shape.num_nodes();
        let n = shape.n();

        info!(entity ;
            "Building {shape}: {num_nodes} routers, {} channels, ring latency {ring_latency}",
            shape.num_channels()
        );

        let ring = Channels::new(factory, &entity, shape.num_channels(), ChannelId::Ring);
        let injection = Channels::new(factory, &entity, num_nodes, ChannelId::Injection);
        let ejection = Channels::new(factory, &entity, num_nodes, ChannelId::Ejection);

        // Count how often each ring channel is claimed by a router.
        let mut claimed_as_input = vec![0_usize; shape.num_channels()];
        let mut claimed_as_output = vec![0_usize; shape.num_channels()];

        let mut routers = Vec::with_capacity(num_nodes);
        for node in 0..num_nodes {
            // One port per dimension plus the injection/ejection port
            let mut router =
                factory.new_router(&entity, &shape.router_name(node), node, n + 1, n + 1);

            for dim in 0..n {
                let output = output_channel(&shape, node, dim);
                let input = input_channel(&shape, node, dim);

                let (channel, credit) = ring.pair(input);
                router.add_input_channel(channel, credit);
                claimed_as_input[input] += 1;

                let (channel, credit) = ring.pair(output);
                router.add_output_channel(channel, credit);
                claimed_as_output[output] += 1;

                ring.set_latency(output, ring_latency);

                debug!(entity ;
                    "node {node} dim {dim}: chan{input} in from {}, chan{output} out to {}",
                    shape.prev_node(node, dim),
                    shape.next_node(node, dim)
                );
            }

            let (channel, credit) = injection.pair(node);
            router.add_input_channel(channel, credit);
            injection.set_latency(node, TERMINAL_LATENCY_TICKS);

            let (channel, credit) = ejection.pair(node);
            router.add_output_channel(channel, credit);
            ejection.set_latency(node, TERMINAL_LATENCY_TICKS);

            routers.push(router);
        }

        for id in 0..shape.num_channels() {
            assert_eq!(
                claimed_as_output[id], 1,
                "chan{id} claimed as an output {} times",
                claimed_as_output[id]
            );
            assert_eq!(
                claimed_as_input[id], 1,
                "chan{id} claimed as an input {} times",
                claimed_as_input[id]
            );
        }

        Self {
            entity,
            shape,
            config: config.clone(),
            routers,
            ring,
            injection,
            ejection,
        }
    }

    #[must_use]
    pub fn shape(&self) -> &TorusShape {
        &self.shape
    }

    #[must_use]
    pub fn config(&self) -> &TorusConfig {
        &self.config
    }

    /// Number of nodes in each ring.
    #[must_use]
    pub fn k(&self) -> usize {
        self.shape.k()
    }

    /// Number of dimensions.
    #[must_use]
    pub fn n(&self) -> usize {
        self.shape.n()
    }

    #[must_use]
    pub fn num_nodes(&self) -> usize {
        self.shape.num_nodes()
    }

    /// Number of router-to-router channels.
    #[must_use]
    pub fn num_channels(&self) -> usize {
        self.shape.num_channels()
    }

    /// Relative throughput of the network used to scale offered traffic.
    ///
    /// This is half that of a bidirectional torus of the same radix as each
    /// dimension only carries traffic in one direction.
    #[must_use]
    pub fn capacity(&self) -> f64 {
        self.shape.k() as f64 / 8.0
    }

    #[must_use]
    pub fn router(&self, node: usize) -> &F::Router {
        &self.routers[node]
    }

    #[must_use]
    pub fn routers(&self) -> &[F::Router] {
        &self.routers
    }

    fn channels(&self, id: ChannelId) -> (&Channels<F::Channel, F::Credit>, usize) {
        match id {
            ChannelId::Ring(index) => (&self.ring, index),
            ChannelId::Injection(node) => (&self.injection, node),
            ChannelId::Ejection(node) => (&self.ejection, node),
        }
    }

    /// The data channel identified by `id`.
    #[must_use]
    pub fn channel(&self, id: ChannelId) -> &Rc<F::Channel> {
        let (channels, index) = self.channels(id);
        &channels.data[index]
    }

    /// The credit channel paired with data channel `id`.
    #[must_use]
    pub fn credit_channel(&self, id: ChannelId) -> &Rc<F::Credit> {
        let (channels, index) = self.channels(id);
        &channels.credit[index]
    }

    /// The ring channel leaving `node` in dimension `dim`.
    #[must_use]
    pub fn output_channel(&self, node: usize, dim: usize) -> &Rc<F::Channel> {
        self.channel(ChannelId::Ring(output_channel(&self.shape, node, dim)))
    }

    /// The ring channel arriving at `node` in dimension `dim`.
    #[must_use]
    pub fn input_channel(&self, node: usize, dim: usize) -> &Rc<F::Channel> {
        self.channel(ChannelId::Ring(input_channel(&self.shape, node, dim)))
    }

    #[must_use]
    pub fn injection(&self, node: usize) -> &Rc<F::Channel> {
        self.channel(ChannelId::Injection(node))
    }

    #[must_use]
    pub fn ejection(&self, node: usize) -> &Rc<F::Channel> {
        self.channel(ChannelId::Ejection(node))
    }

    /// Iterate over every ring channel as `(id, source, destination, dim)`.
    pub fn ring_links(&self) -> impl Iterator<Item = (usize, usize, usize, usize)> + '_ {
        (0..self.num_channels()).map(|id| {
            let (src, dim) = channel_source(&self.shape, id);
            (id, src, channel_destination(&self.shape, id), dim)
        })
    }
}

impl<F> GetEntity for UniTorus<F>
where
    F: ComponentFactory,
{
    fn entity(&self) -> &Rc<Entity> {
        &self.entity
    }
}

impl<F> fmt::Display for UniTorus<F>
where
    F: ComponentFactory,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({})", self.entity, self.shape)
    }
}
