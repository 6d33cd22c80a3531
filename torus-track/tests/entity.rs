// Copyright (c) 2025 Graphcore Ltd. All rights reserved.

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

use torus_track::builder::{TrackerConfig, build_text_tracker};
use torus_track::entity::{Entity, toplevel};
use torus_track::test_helpers::check_and_clear;
use torus_track::{connect, debug, info, log, test_init, trace};

#[test]
fn hierarchy_names() {
    let (_test_tracker, tracker) = test_init!(10);
    let top = toplevel(&tracker, "top");
    let torus = Rc::new(Entity::new(&top, "torus"));
    let router = Entity::new(&torus, "router_1_0");

    assert_eq!(router.full_name(), "top::torus::router_1_0");
    assert_eq!(format!("{router}"), "top::torus::router_1_0");
    assert_eq!(torus.full_name(), "top::torus");
}

#[test]
fn create_connect_destroy() {
    let (test_tracker, tracker) = test_init!(10);
    let top = toplevel(&tracker, "top");
    {
        let chan = Entity::new(&top, "chan0");
        let router = Entity::new(&top, "router_1");
        connect!(chan ; router);
    }
    check_and_clear(
        &test_tracker,
        &[
            "0: created 10, top",
            "10: created 11, top::chan0",
            "10: created 12, top::router_1",
            "11: connect to 12",
            "10: destroyed 12",
            "10: destroyed 11",
        ],
    );
}

#[test]
fn levels_respected() {
    let (test_tracker, tracker) = test_init!(1, log::Level::Info);
    let top = toplevel(&tracker, "top");
    info!(top ; "size {}", 16);
    debug!(top ; "hidden");
    trace!(top ; "hidden");
    check_and_clear(&test_tracker, &["1:INFO: size 16"]);
}

/// A writer that can be inspected after the tracker has taken ownership.
#[derive(Clone, Default)]
struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn text_tracker_filter() {
    let buffer = SharedBuffer::default();
    let config = TrackerConfig {
        enable: true,
        level: log::Level::Debug,
        filter_regex: ".*router_1.*",
    };
    let tracker = build_text_tracker(&config, Box::new(buffer.clone())).unwrap();
    let top = toplevel(&tracker, "top");
    let router0 = Entity::new(&top, "router_0");
    let router1 = Entity::new(&top, "router_1");

    debug!(router0 ; "not shown");
    debug!(router1 ; "shown");
    tracker.shutdown();

    let text = String::from_utf8(buffer.0.borrow().clone()).unwrap();
    assert_eq!(text, format!("{}:DEBUG: shown\n", router1.id));
}

#[test]
fn text_tracker_bad_filter() {
    let config = TrackerConfig {
        enable: true,
        level: log::Level::Debug,
        filter_regex: "router_(",
    };
    let result = build_text_tracker(&config, Box::new(SharedBuffer::default()));
    assert!(result.is_err());
}
