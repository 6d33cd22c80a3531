// Copyright (c) 2025 Graphcore Ltd. All rights reserved.

//! Error and time types shared by the topology and its users.

use std::fmt;

/// Return `Err(SimError)` built from anything that implements `to_string`.
#[macro_export]
macro_rules! sim_error {
    ($msg:expr) => {
        Err($crate::types::SimError($msg.to_string()))
    };
}

/// A configuration or construction problem reported to the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimError(pub String);

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for SimError {}

pub type SimResult = Result<(), SimError>;

/// Number of clock ticks a channel takes to deliver an item.
pub type Ticks = u64;
