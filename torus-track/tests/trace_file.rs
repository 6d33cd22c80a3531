// Copyright (c) 2025 Graphcore Ltd. All rights reserved.

use std::fs;
use std::rc::Rc;

use serial_test::serial;
use torus_track::entity::{Entity, toplevel};
use torus_track::info;
use torus_track::test_helpers::create_tracker;

const TRACE_FILE: &str = "traces/trace_file.log";

// Both tests rewrite the same file.

#[test]
#[serial(trace_file)]
fn writes_hierarchy() {
    let tracker = create_tracker(file!());
    {
        let top = toplevel(&tracker, "top");
        let _torus = Entity::new(&top, "torus");
    }
    tracker.shutdown();

    let contents = fs::read_to_string(TRACE_FILE).unwrap();
    let lines: Vec<_> = contents.lines().collect();
    assert_eq!(
        lines,
        [
            "0: created 2, top",
            "2: created 3, top::torus",
            "2: destroyed 3",
            "0: destroyed 2",
        ]
    );
}

#[test]
#[serial(trace_file)]
fn writes_log_messages() {
    let tracker = create_tracker(file!());
    let top = toplevel(&tracker, "top");
    let router = Rc::new(Entity::new(&top, "router_0_1"));
    info!(router ; "4 ports");
    tracker.shutdown();

    let contents = fs::read_to_string(TRACE_FILE).unwrap();
    assert!(contents.contains("3:INFO: 4 ports\n"));
}
