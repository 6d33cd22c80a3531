// Copyright (c) 2025 Graphcore Ltd. All rights reserved.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use log::Level;
use regex::Regex;

use crate::tracker::TrackConfigError;
use crate::{Id, ROOT};

/// Decides the level each entity is tracked at and hands out entity IDs.
///
/// Entities whose full name matches a filter are tracked at the level of the
/// first matching filter, all others at the default level.
///
/// ```rust
/// use log::Level;
/// use torus_track::tracker::EntityLevels;
///
/// let levels = EntityLevels::new(Level::Error)
///     .with_filter("router_0_.*", Level::Debug)
///     .unwrap();
/// ```
pub struct EntityLevels {
    default_level: Level,
    filters: Vec<(Regex, Level)>,

    /// Only entities that differ from `default_level`.
    overrides: RefCell<HashMap<Id, Level>>,

    next_id: Cell<u64>,
}

impl EntityLevels {
    /// Track every entity at `default_level` until filters are added.
    #[must_use]
    pub fn new(default_level: Level) -> Self {
        Self {
            default_level,
            filters: Vec::new(),
            overrides: RefCell::new(HashMap::new()),
            next_id: Cell::new(ROOT.0 + 1),
        }
    }

    /// Track entities whose full name matches `pattern` at `level`.
    ///
    /// Filters added earlier take priority.
    pub fn with_filter(mut self, pattern: &str, level: Level) -> Result<Self, TrackConfigError> {
        let regex = Regex::new(pattern)
            .map_err(|e| TrackConfigError(format!("invalid filter '{pattern}': {e}")))?;
        self.filters.push((regex, level));
        Ok(self)
    }

    pub(crate) fn next_id(&self) -> Id {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        Id(id)
    }

    pub(crate) fn register(&self, id: Id, full_name: &str) {
        let level = self.level_for(full_name);
        if level == self.default_level {
            return;
        }
        let previous = self.overrides.borrow_mut().insert(id, level);
        assert!(previous.is_none(), "{full_name}: entity {id} registered twice");
    }

    pub(crate) fn is_enabled(&self, id: Id, level: Level) -> bool {
        let entity_level = self
            .overrides
            .borrow()
            .get(&id)
            .copied()
            .unwrap_or(self.default_level);
        level <= entity_level
    }

    fn level_for(&self, full_name: &str) -> Level {
        self.filters
            .iter()
            .find(|(regex, _)| regex.is_match(full_name))
            .map_or(self.default_level, |(_, level)| *level)
    }
}
