// Copyright (c) 2025 Graphcore Ltd. All rights reserved.

//! Build a unidirectional torus network.
//!
//! See `lib.rs` for details.

use clap::Parser;
use sim_torus::config::{Cli, load_config};
use sim_torus::report::{channel_table, summary};
use torus_topology::factory::SimComponents;
use torus_topology::torus::UniTorus;
use torus_topology::types::SimError;
use torus_track::builder::{TrackerConfig, setup_trackers};
use torus_track::entity::toplevel;
use torus_track::{Tracker, error, info};

fn setup_tracker(args: &Cli) -> Result<Tracker, SimError> {
    let config = TrackerConfig {
        enable: args.stdout,
        level: args.stdout_level,
        filter_regex: &args.stdout_filter_regex,
    };
    setup_trackers(&config).map_err(|e| SimError(e.0))
}

fn main() -> Result<(), SimError> {
    let args = Cli::parse();

    let tracker = setup_tracker(&args)?;
    let top = toplevel(&tracker, "top");

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            error!(top ; "{e}");
            tracker.shutdown();
            return Err(e);
        }
    };

    let torus = UniTorus::new(&top, "torus", &config, &SimComponents);
    info!(top ; "Torus built and connected");

    println!("{}", summary(&torus));
    if args.dump_channels {
        for line in channel_table(&torus) {
            println!("{line}");
        }
    }

    drop(torus);
    tracker.shutdown();
    Ok(())
}
