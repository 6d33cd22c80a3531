// Copyright (c) 2025 Graphcore Ltd. All rights reserved.

use std::cell::RefCell;
use std::fmt;
use std::io::Write;

use crate::tracker::{EntityLevels, Track};
use crate::{Id, Writer};

/// Writes one line of text per event.
///
/// ```text
/// 1: created 2, top::torus
/// 2: connect to 7
/// 7:DEBUG: rx[0] <- chan6
/// 1: destroyed 2
/// ```
pub struct TextTracker {
    levels: EntityLevels,
    writer: RefCell<Writer>,
}

impl TextTracker {
    /// Write events enabled by `levels` to `writer`.
    #[must_use]
    pub fn new(levels: EntityLevels, writer: Writer) -> Self {
        Self {
            levels,
            writer: RefCell::new(writer),
        }
    }

    fn write_line(&self, line: fmt::Arguments) {
        // Log output is best effort.
        let _ = writeln!(self.writer.borrow_mut(), "{line}");
    }
}

impl Track for TextTracker {
    fn unique_id(&self) -> Id {
        self.levels.next_id()
    }

    fn is_entity_enabled(&self, id: Id, level: log::Level) -> bool {
        self.levels.is_enabled(id, level)
    }

    fn add_entity(&self, id: Id, full_name: &str) {
        self.levels.register(id, full_name);
    }

    fn create(&self, created_by: Id, id: Id, full_name: &str) {
        self.write_line(format_args!("{created_by}: created {id}, {full_name}"));
    }

    fn destroy(&self, destroyed_by: Id, id: Id) {
        self.write_line(format_args!("{destroyed_by}: destroyed {id}"));
    }

    fn connect(&self, from: Id, to: Id) {
        self.write_line(format_args!("{from}: connect to {to}"));
    }

    fn log(&self, id: Id, level: log::Level, msg: fmt::Arguments) {
        self.write_line(format_args!("{id}:{level}: {msg}"));
    }

    fn shutdown(&self) {
        let _ = self.writer.borrow_mut().flush();
    }
}
