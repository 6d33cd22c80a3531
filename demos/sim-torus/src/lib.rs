// Copyright (c) 2025 Graphcore Ltd. All rights reserved.

//! Build a unidirectional k-ary n-cube torus.
//!
//! The application builds every router and channel of the torus with the
//! default simulation components and reports the size and capacity of the
//! network. Optionally it lists every router-to-router channel along with its
//! latency.
//!
//! # Examples
//!
//! Build an 8-ary 2-cube with wrap-around latency and show the wiring:
//! ```txt
//! cargo run --bin sim-torus -- --k 8 --n 2 --use-noc-latency 1 --dump-channels
//! ```
//!
//! Show the port wiring of a single router:
//! ```txt
//! cargo run --bin sim-torus -- --stdout --stdout-level Debug --stdout-filter-regex "router_1_2$"
//! ```
//!
//! The same keys can be set from a TOML file or the environment:
//! ```txt
//! TORUS_USE_NOC_LATENCY=1 cargo run --bin sim-torus -- --conf-file torus.toml
//! ```

pub mod config;
pub mod report;
