// Copyright (c) 2025 Graphcore Ltd. All rights reserved.

//! Command-line arguments and the layered torus configuration.
//!
//! The [`TorusConfig`] is built from the following sources, each overriding
//! the ones before it:
//!  1. the defaults.
//!  2. the TOML file given with `--conf-file`.
//!  3. environment variables prefixed with [`ENV_PREFIX`], e.g. `TORUS_K=8`.
//!  4. the command-line arguments.

use std::path::{Path, PathBuf};

use clap::Parser;
use clap::builder::BoolishValueParser;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use torus_topology::config::TorusConfig;
use torus_topology::sim_error;
use torus_topology::types::{SimError, Ticks};

/// Prefix of environment variables that set configuration keys.
pub const ENV_PREFIX: &str = "TORUS_";

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(about = "Build a unidirectional k-ary n-cube torus network")]
pub struct Cli {
    /// Enable logging to the console.
    #[arg(long, default_value = "false")]
    pub stdout: bool,

    /// Level of log message to display.
    #[arg(long, default_value = "Info")]
    pub stdout_level: log::Level,

    /// Set a regular expression for which entities should have the logging level set
    /// to `--stdout-level`. Others will have level set to `Error`.
    #[arg(long, default_value = "")]
    pub stdout_filter_regex: String,

    /// Print every router-to-router channel once the torus is built.
    #[arg(long, default_value = "false")]
    pub dump_channels: bool,

    /// Path to a TOML file that sets configuration keys.
    #[arg(long)]
    pub conf_file: Option<PathBuf>,

    /// The number of nodes in each ring.
    #[arg(long)]
    pub k: Option<usize>,

    /// The number of dimensions.
    #[arg(long)]
    pub n: Option<usize>,

    /// Use wrap-around aware latency on ring channels (true/false or 1/0).
    #[arg(long, value_parser = BoolishValueParser::new())]
    pub use_noc_latency: Option<bool>,

    /// Ring channel latency when `--use-noc-latency` is set.
    #[arg(long)]
    pub wrap_latency_ticks: Option<Ticks>,
}

fn figment_with_defaults() -> Figment {
    Figment::new().merge(Serialized::defaults(TorusConfig::default()))
}

fn figment_conf_file_merge(config: Figment, conf_file: &Path) -> Result<Figment, SimError> {
    if conf_file.is_dir() {
        return sim_error!(format!("{} is not a file path", conf_file.display()));
    }
    if !conf_file.exists() {
        return sim_error!(format!("{} not found", conf_file.display()));
    }
    Ok(config.merge(Toml::file(conf_file)))
}

fn figment_env_var_merge(config: Figment) -> Figment {
    config.merge(Env::prefixed(ENV_PREFIX))
}

fn clap_merge(mut config: TorusConfig, cli: &Cli) -> TorusConfig {
    if let Some(k) = cli.k {
        config.k = k;
    }
    if let Some(n) = cli.n {
        config.n = n;
    }
    if let Some(use_noc_latency) = cli.use_noc_latency {
        config.use_noc_latency = use_noc_latency;
    }
    if let Some(ticks) = cli.wrap_latency_ticks {
        config.wrap_latency_ticks = ticks;
    }
    config
}

/// Combine all configuration sources and check the result.
pub fn load_config(cli: &Cli) -> Result<TorusConfig, SimError> {
    let mut figment = figment_with_defaults();
    if let Some(conf_file) = &cli.conf_file {
        figment = figment_conf_file_merge(figment, conf_file)?;
    }
    figment = figment_env_var_merge(figment);

    let config: TorusConfig = figment
        .extract()
        .map_err(|e| SimError(format!("invalid configuration: {e}")))?;
    let config = clap_merge(config, cli);
    config.validate()?;
    Ok(config)
}
