// Copyright (c) 2025 Graphcore Ltd. All rights reserved.

//! Build the [`Tracker`] requested on the command line.

use std::io;
use std::rc::Rc;

use crate::tracker::{EntityLevels, TextTracker, TrackConfigError, dev_null_tracker};
use crate::{Tracker, Writer};

/// Settings for a text tracker.
pub struct TrackerConfig<'a> {
    /// Write events at all, otherwise everything is discarded.
    pub enable: bool,

    /// The most verbose level to emit.
    pub level: log::Level,

    /// When not empty, only entities whose full name matches are tracked at
    /// `level`; all others only report errors.
    pub filter_regex: &'a str,
}

impl Default for TrackerConfig<'_> {
    fn default() -> Self {
        Self {
            enable: true,
            level: log::Level::Warn,
            filter_regex: "",
        }
    }
}

fn entity_levels(config: &TrackerConfig) -> Result<EntityLevels, TrackConfigError> {
    if config.filter_regex.is_empty() {
        Ok(EntityLevels::new(config.level))
    } else {
        EntityLevels::new(log::Level::Error).with_filter(config.filter_regex, config.level)
    }
}

/// A text tracker writing to `writer`.
pub fn build_text_tracker(
    config: &TrackerConfig,
    writer: Writer,
) -> Result<Tracker, TrackConfigError> {
    let levels = entity_levels(config)?;
    Ok(Rc::new(TextTracker::new(levels, writer)))
}

/// A text tracker writing to `stdout`, or one that discards everything if
/// `config` is not enabled.
pub fn setup_trackers(config: &TrackerConfig) -> Result<Tracker, TrackConfigError> {
    if !config.enable {
        return Ok(dev_null_tracker());
    }
    build_text_tracker(config, Box::new(io::BufWriter::new(io::stdout())))
}
