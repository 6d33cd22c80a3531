// Copyright (c) 2025 Graphcore Ltd. All rights reserved.

//! The [`Track`] interface and the trackers that implement it.

mod dev_null;
mod levels;
mod text;

use std::fmt;
use std::rc::Rc;

pub use dev_null::DevNullTracker;
pub use levels::EntityLevels;
pub use text::TextTracker;

use crate::Id;

/// Invalid tracker settings, such as a filter that is not a valid regular
/// expression.
#[derive(Debug)]
pub struct TrackConfigError(pub String);

impl fmt::Display for TrackConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "tracker configuration: {}", self.0)
    }
}

impl std::error::Error for TrackConfigError {}

/// Receives all log and trace events from a model.
pub trait Track {
    /// Allocate the ID for a new entity.
    fn unique_id(&self) -> Id;

    /// Whether events at `level` from entity `id` should be emitted.
    fn is_entity_enabled(&self, id: Id, level: log::Level) -> bool;

    /// Register the full name of a new entity so filters can be applied.
    fn add_entity(&self, id: Id, full_name: &str);

    /// Entity `id` named `full_name` was created by `created_by`.
    fn create(&self, created_by: Id, id: Id, full_name: &str);

    /// Entity `id` was destroyed; `destroyed_by` is its parent.
    fn destroy(&self, destroyed_by: Id, id: Id);

    /// Entity `from` was connected to send to entity `to`.
    fn connect(&self, from: Id, to: Id);

    /// A log message from entity `id`.
    fn log(&self, id: Id, level: log::Level, msg: fmt::Arguments);

    /// Flush any buffered output.
    fn shutdown(&self);
}

/// A [`Track`] shared by every entity of a model.
pub type Tracker = Rc<dyn Track>;

/// A [`Tracker`] that discards everything.
#[must_use]
pub fn dev_null_tracker() -> Tracker {
    Rc::new(DevNullTracker)
}
