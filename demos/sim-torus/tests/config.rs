// Copyright (c) 2025 Graphcore Ltd. All rights reserved.

use clap::Parser;
use figment::Jail;
use sim_torus::config::{Cli, load_config};
use torus_topology::config::TorusConfig;
use torus_topology::types::SimError;

fn parse(args: &[&str]) -> Cli {
    Cli::parse_from(std::iter::once("sim-torus").chain(args.iter().copied()))
}

#[test]
fn defaults() {
    Jail::expect_with(|_jail| {
        let config = load_config(&parse(&[])).map_err(|e| e.to_string())?;
        assert_eq!(config, TorusConfig::default());
        Ok(())
    });
}

#[test]
fn conf_file() {
    Jail::expect_with(|jail| {
        jail.create_file("torus.toml", "k = 8\nn = 3\nuse_noc_latency = 1")?;
        let config =
            load_config(&parse(&["--conf-file", "torus.toml"])).map_err(|e| e.to_string())?;
        assert_eq!(config, TorusConfig::new(8, 3).with_noc_latency(true));
        Ok(())
    });
}

#[test]
fn env_overrides_conf_file() {
    Jail::expect_with(|jail| {
        jail.create_file("torus.toml", "k = 8\nn = 3")?;
        jail.set_env("TORUS_K", 6);
        jail.set_env("TORUS_USE_NOC_LATENCY", 1);
        let config =
            load_config(&parse(&["--conf-file", "torus.toml"])).map_err(|e| e.to_string())?;
        assert_eq!(config, TorusConfig::new(6, 3).with_noc_latency(true));
        Ok(())
    });
}

#[test]
fn cli_overrides_env() {
    Jail::expect_with(|jail| {
        jail.set_env("TORUS_K", 6);
        jail.set_env("TORUS_WRAP_LATENCY_TICKS", 3);
        let config = load_config(&parse(&["--k", "5", "--use-noc-latency", "1"]))
            .map_err(|e| e.to_string())?;
        assert_eq!(config.k, 5);
        assert_eq!(config.ring_latency_ticks(), 3);
        Ok(())
    });
}

#[test]
fn missing_conf_file() {
    Jail::expect_with(|_jail| {
        let result = load_config(&parse(&["--conf-file", "missing.toml"]));
        assert_eq!(result, Err(SimError("missing.toml not found".to_string())));
        Ok(())
    });
}

#[test]
fn invalid_values() {
    Jail::expect_with(|jail| {
        jail.set_env("TORUS_USE_NOC_LATENCY", 2);
        assert!(load_config(&parse(&[])).is_err());
        Ok(())
    });

    Jail::expect_with(|_jail| {
        let result = load_config(&parse(&["--k", "0"]));
        assert_eq!(
            result,
            Err(SimError("k must be at least 1 (got 0)".to_string()))
        );
        Ok(())
    });
}
