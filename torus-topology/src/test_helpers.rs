// Copyright (c) 2025 Graphcore Ltd. All rights reserved.

use std::rc::Rc;

use torus_track::entity::{Entity, toplevel};
use torus_track::test_helpers::create_tracker;

/// Create the top-level entity for a test, tracking everything to a log file
/// named after the test file.
#[must_use]
pub fn start_test(full_filepath: &str) -> Rc<Entity> {
    toplevel(&create_tracker(full_filepath), "top")
}
