// Copyright (c) 2025 Graphcore Ltd. All rights reserved.

//! Named parts of a model.
//!
//! Entities form a tree rooted at the entity returned by [`toplevel`]. The
//! full name of an entity joins the names on the path from the root with
//! `::`, for example `top::torus::chan12`, and is what tracker filters are
//! matched against.

use std::fmt;
use std::rc::Rc;

use crate::{Id, NO_ID, Tracker};

const SEPARATOR: &str = "::";

/// A named node in the model hierarchy.
///
/// Creating an entity allocates its [`Id`] from the tracker and records a
/// creation event; dropping it records a destruction event.
pub struct Entity {
    /// Local name within the parent.
    pub name: String,

    /// `None` only for the top-level entity.
    pub parent: Option<Rc<Entity>>,

    /// Identifier attached to all output from this entity.
    pub id: Id,

    /// Where output from this entity goes.
    pub tracker: Tracker,

    full_name: String,
}

impl Entity {
    /// Create a child of `parent`.
    #[must_use]
    pub fn new(parent: &Rc<Entity>, name: &str) -> Self {
        let full_name = format!("{}{SEPARATOR}{name}", parent.full_name);
        Self::register(Some(parent.clone()), name, full_name, parent.tracker.clone())
    }

    fn register(
        parent: Option<Rc<Entity>>,
        name: &str,
        full_name: String,
        tracker: Tracker,
    ) -> Self {
        let id = tracker.unique_id();
        tracker.add_entity(id, &full_name);

        let entity = Self {
            name: name.to_string(),
            parent,
            id,
            tracker,
            full_name,
        };
        if entity.trace_enabled() {
            entity
                .tracker
                .create(entity.parent_id(), entity.id, &entity.full_name);
        }
        entity
    }

    /// The name of this entity prefixed by the names of all its ancestors.
    #[must_use]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    fn parent_id(&self) -> Id {
        self.parent.as_ref().map_or(NO_ID, |parent| parent.id)
    }

    fn trace_enabled(&self) -> bool {
        self.tracker
            .is_entity_enabled(self.id, log::Level::Trace)
    }
}

impl Drop for Entity {
    fn drop(&mut self) {
        if self.trace_enabled() {
            self.tracker.destroy(self.parent_id(), self.id);
        }
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("full_name", &self.full_name)
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_name)
    }
}

/// Implemented by every model part that owns an [`Entity`].
pub trait GetEntity {
    /// The entity of this model part.
    fn entity(&self) -> &Rc<Entity>;
}

/// Create the root of an entity tree.
pub fn toplevel(tracker: &Tracker, name: &str) -> Rc<Entity> {
    Rc::new(Entity::register(
        None,
        name,
        name.to_string(),
        tracker.clone(),
    ))
}
