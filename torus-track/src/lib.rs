// Copyright (c) 2025 Graphcore Ltd. All rights reserved.

//! Logging and structural tracing for torus models.
//!
//! Every router and channel of a torus owns an [`Entity`](entity::Entity).
//! Entities form a tree (`top::torus::router_1_2`) and all output is
//! attributed to the [`Id`] of the entity that produced it:
//!
//!   - log messages through [`trace!`], [`debug!`], [`info!`], [`warn!`] and
//!     [`error!`], filtered per entity by [`log::Level`].
//!   - creation and destruction of entities, recorded automatically.
//!   - connections between entities, recorded with [`connect!`].
//!
//! Where the output goes is decided by the [`Tracker`] the top-level entity
//! was built with.
//!
//! ```rust
//! use torus_track::entity::{Entity, toplevel};
//! use torus_track::tracker::dev_null_tracker;
//! use torus_track::{connect, info};
//!
//! let top = toplevel(&dev_null_tracker(), "top");
//! let chan = Entity::new(&top, "chan0");
//! let router = Entity::new(&top, "router_1");
//! connect!(chan ; router);
//! info!(router ; "{} connected", chan.name);
//! ```

#![warn(missing_docs)]

use std::fmt;

pub use log;

pub mod builder;
pub mod entity;
pub mod test_helpers;
pub mod tracker;

pub use tracker::{Track, Tracker};

/// Destination of text tracking output.
pub type Writer = Box<dyn std::io::Write>;

/// Identifier of an entity, unique within one tracker.
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct Id(pub u64);

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Reported as the creator of a top-level entity.
pub const NO_ID: Id = Id(0);

/// Reserved for the tracker itself; entities are numbered after it.
pub const ROOT: Id = Id(1);

/// Record that entity `$from` sends to entity `$to`.
#[macro_export]
macro_rules! connect {
    ($from:expr ; $to:expr) => {{
        let from = &$from;
        if from
            .tracker
            .is_entity_enabled(from.id, $crate::log::Level::Trace)
        {
            from.tracker.connect(from.id, $to.id);
        }
    }};
}

/// Emit a message from an entity at the given level.
///
/// The message is only formatted if the tracker has `$level` enabled for the
/// entity.
#[macro_export]
macro_rules! track {
    ($entity:expr, $level:expr ; $($arg:tt)+) => {{
        let entity = &$entity;
        if entity.tracker.is_entity_enabled(entity.id, $level) {
            entity.tracker.log(entity.id, $level, format_args!($($arg)+));
        }
    }};
}

/// Emit a message at [`log::Level::Trace`].
#[macro_export]
macro_rules! trace {
    ($entity:expr ; $($arg:tt)+) => {
        $crate::track!($entity, $crate::log::Level::Trace ; $($arg)+)
    };
}

/// Emit a message at [`log::Level::Debug`].
#[macro_export]
macro_rules! debug {
    ($entity:expr ; $($arg:tt)+) => {
        $crate::track!($entity, $crate::log::Level::Debug ; $($arg)+)
    };
}

/// Emit a message at [`log::Level::Info`].
#[macro_export]
macro_rules! info {
    ($entity:expr ; $($arg:tt)+) => {
        $crate::track!($entity, $crate::log::Level::Info ; $($arg)+)
    };
}

/// Emit a message at [`log::Level::Warn`].
#[macro_export]
macro_rules! warn {
    ($entity:expr ; $($arg:tt)+) => {
        $crate::track!($entity, $crate::log::Level::Warn ; $($arg)+)
    };
}

/// Emit a message at [`log::Level::Error`].
#[macro_export]
macro_rules! error {
    ($entity:expr ; $($arg:tt)+) => {
        $crate::track!($entity, $crate::log::Level::Error ; $($arg)+)
    };
}
