// Copyright (c) 2025 Graphcore Ltd. All rights reserved.

//! Helpers for checking what a model tracks in tests.

use std::cell::{Cell, RefCell};
use std::fs;
use std::io::BufWriter;
use std::path::Path;
use std::rc::Rc;

use regex::Regex;

use crate::tracker::{EntityLevels, TextTracker};
use crate::{Id, Track, Tracker};

/// Folder that [`create_tracker`] writes its files to.
pub const TRACE_FOLDER: &str = "traces";

/// A tracker that records events in memory.
///
/// Events are formatted the same way as the text tracker, without the
/// trailing newline.
pub struct TestTracker {
    events: RefCell<Vec<String>>,
    next_id: Cell<u64>,
    level: log::Level,
}

impl TestTracker {
    /// Number entities from `first_id` and keep events at or above `level`.
    #[must_use]
    pub fn new(first_id: u64, level: log::Level) -> Self {
        Self {
            events: RefCell::new(Vec::new()),
            next_id: Cell::new(first_id),
            level,
        }
    }

    /// The events recorded since the last [`check_and_clear`].
    #[must_use]
    pub fn events(&self) -> Vec<String> {
        self.events.borrow().clone()
    }

    fn record(&self, event: String) {
        println!("{event}");
        self.events.borrow_mut().push(event);
    }
}

impl Track for TestTracker {
    fn unique_id(&self) -> Id {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        Id(id)
    }

    fn is_entity_enabled(&self, _id: Id, level: log::Level) -> bool {
        level <= self.level
    }

    fn add_entity(&self, _id: Id, _full_name: &str) {}

    fn create(&self, created_by: Id, id: Id, full_name: &str) {
        self.record(format!("{created_by}: created {id}, {full_name}"));
    }

    fn destroy(&self, destroyed_by: Id, id: Id) {
        self.record(format!("{destroyed_by}: destroyed {id}"));
    }

    fn connect(&self, from: Id, to: Id) {
        self.record(format!("{from}: connect to {to}"));
    }

    fn log(&self, id: Id, level: log::Level, msg: std::fmt::Arguments) {
        self.record(format!("{id}:{level}: {msg}"));
    }

    fn shutdown(&self) {}
}

/// Create a [`TestTracker`] that numbers entities from `$first_id`.
///
/// Evaluates to the concrete tracker, for checking events, and the same
/// tracker as a [`Tracker`](crate::Tracker), for building entities. The level
/// defaults to `Trace`.
///
/// ```
/// use torus_track::entity::toplevel;
/// use torus_track::test_helpers::check_and_clear;
///
/// let (test_tracker, tracker) = torus_track::test_init!(10);
/// let _top = toplevel(&tracker, "top");
/// check_and_clear(&test_tracker, &["0: created 10, top"]);
/// ```
#[macro_export]
macro_rules! test_init {
    ($first_id:expr) => {
        $crate::test_init!($first_id, $crate::log::Level::Trace)
    };
    ($first_id:expr, $level:expr) => {{
        let test_tracker =
            std::rc::Rc::new($crate::test_helpers::TestTracker::new($first_id, $level));
        let tracker: $crate::Tracker = test_tracker.clone();
        (test_tracker, tracker)
    }};
}

/// Assert the events recorded so far match `expected`, one regular
/// expression per event, then forget them.
pub fn check_and_clear(tracker: &TestTracker, expected: &[&str]) {
    let events = std::mem::take(&mut *tracker.events.borrow_mut());
    assert_eq!(
        events.len(),
        expected.len(),
        "expected {expected:#?}\nbut got {events:#?}"
    );
    for (pattern, event) in expected.iter().zip(&events) {
        let regex = Regex::new(pattern).unwrap();
        assert!(regex.is_match(event), "'{event}' does not match '{pattern}'");
    }
}

/// A [`Tracker`] that writes every event to `traces/<test file name>.log`.
///
/// Call with `file!()` so each test file gets its own log.
#[must_use]
pub fn create_tracker(full_filepath: &str) -> Tracker {
    let stem = Path::new(full_filepath)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap();

    fs::create_dir_all(TRACE_FOLDER).unwrap();
    let file = fs::File::create(Path::new(TRACE_FOLDER).join(format!("{stem}.log"))).unwrap();

    Rc::new(TextTracker::new(
        EntityLevels::new(log::Level::Trace),
        Box::new(BufWriter::new(file)),
    ))
}
