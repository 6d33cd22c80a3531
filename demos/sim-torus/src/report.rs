// Copyright (c) 2025 Graphcore Ltd. All rights reserved.

//! Text reports describing a built torus.

use torus_topology::channel::{Channel, ChannelId};
use torus_topology::factory::ComponentFactory;
use torus_topology::torus::UniTorus;

/// One line summary of the size of the network.
#[must_use]
pub fn summary<F: ComponentFactory>(torus: &UniTorus<F>) -> String {
    format!(
        "{}: {} nodes, {} channels, capacity {}",
        torus.shape(),
        torus.num_nodes(),
        torus.num_channels(),
        torus.capacity()
    )
}

/// One line per ring channel: `id: src -> dst (dim d, latency l)`.
pub fn channel_table<F>(torus: &UniTorus<F>) -> impl Iterator<Item = String> + '_
where
    F: ComponentFactory,
{
    torus.ring_links().map(|(id, src, dst, dim)| {
        let latency = torus.channel(ChannelId::Ring(id)).latency();
        format!("{id}: {src} -> {dst} (dim {dim}, latency {latency})")
    })
}
