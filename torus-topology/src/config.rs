// Copyright (c) 2025 Graphcore Ltd. All rights reserved.

//! Configuration of a unidirectional torus.
//!
//! The configuration can be deserialized from any [serde] source. The
//! `use_noc_latency` key accepts either a boolean or the integers `0`/`1`.
//!
//! ```toml
//! k = 8
//! n = 2
//! use_noc_latency = 1
//! ```

use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};

use crate::sim_error;
use crate::types::{SimResult, Ticks};

/// Latency of a ring channel when wrap-around aware timing is selected.
pub const WRAP_LATENCY_TICKS: Ticks = 2;

/// Latency of a ring channel with uniform hop timing.
pub const HOP_LATENCY_TICKS: Ticks = 1;

/// Latency of every injection and ejection channel.
pub const TERMINAL_LATENCY_TICKS: Ticks = 1;

/// How the latency of ring channels is chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LatencyMode {
    /// Every ring hop takes [`HOP_LATENCY_TICKS`].
    Uniform,

    /// Ring channels are longer because of the wrap-around wiring and take
    /// the configured wrap latency.
    Noc,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TorusConfig {
    /// Number of nodes in each ring.
    pub k: usize,

    /// Number of dimensions.
    pub n: usize,

    /// Select wrap-around aware ring channel latency.
    #[serde(deserialize_with = "bool_or_int")]
    pub use_noc_latency: bool,

    /// Ring channel latency used when `use_noc_latency` is set.
    pub wrap_latency_ticks: Ticks,
}

impl Default for TorusConfig {
    fn default() -> Self {
        Self {
            k: 4,
            n: 2,
            use_noc_latency: false,
            wrap_latency_ticks: WRAP_LATENCY_TICKS,
        }
    }
}

impl TorusConfig {
    #[must_use]
    pub fn new(k: usize, n: usize) -> Self {
        Self {
            k,
            n,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_noc_latency(mut self, use_noc_latency: bool) -> Self {
        self.use_noc_latency = use_noc_latency;
        self
    }

    #[must_use]
    pub fn with_wrap_latency_ticks(mut self, ticks: Ticks) -> Self {
        self.wrap_latency_ticks = ticks;
        self
    }

    #[must_use]
    pub fn latency_mode(&self) -> LatencyMode {
        if self.use_noc_latency {
            LatencyMode::Noc
        } else {
            LatencyMode::Uniform
        }
    }

    /// Latency applied to every ring channel and its credit channel.
    #[must_use]
    pub fn ring_latency_ticks(&self) -> Ticks {
        match self.latency_mode() {
            LatencyMode::Noc => self.wrap_latency_ticks,
            LatencyMode::Uniform => HOP_LATENCY_TICKS,
        }
    }

    /// Check the configuration describes a torus that can be built.
    ///
    /// Building a topology panics on a bad `k` or `n`, or on a zero
    /// `wrap_latency_ticks` when `use_noc_latency` is set, so applications
    /// should call this on user input first.
    pub fn validate(&self) -> SimResult {
        if self.k < 1 {
            return sim_error!(format!("k must be at least 1 (got {})", self.k));
        }
        if self.n < 1 {
            return sim_error!(format!("n must be at least 1 (got {})", self.n));
        }
        let size = u32::try_from(self.n)
            .ok()
            .and_then(|n| self.k.checked_pow(n))
            .and_then(|size| size.checked_mul(self.n));
        if size.is_none() {
            return sim_error!(format!("a {}-ary {}-cube is too large", self.k, self.n));
        }
        if self.wrap_latency_ticks < 1 {
            return sim_error!("wrap_latency_ticks must be at least 1");
        }
        Ok(())
    }
}

fn bool_or_int<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    struct BoolOrInt;

    impl Visitor<'_> for BoolOrInt {
        type Value = bool;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a boolean or 0/1")
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<bool, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<bool, E> {
            match v {
                0 => Ok(false),
                1 => Ok(true),
                _ => Err(E::invalid_value(de::Unexpected::Signed(v), &self)),
            }
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<bool, E> {
            match v {
                0 => Ok(false),
                1 => Ok(true),
                _ => Err(E::invalid_value(de::Unexpected::Unsigned(v), &self)),
            }
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<bool, E> {
            match v {
                "0" | "false" => Ok(false),
                "1" | "true" => Ok(true),
                _ => Err(E::invalid_value(de::Unexpected::Str(v), &self)),
            }
        }
    }

    deserializer.deserialize_any(BoolOrInt)
}

#[cfg(test)]
mod tests {
    use figment::Figment;
    use figment::providers::{Format, Serialized, Toml};

    use super::*;
    use crate::types::SimError;

    fn from_toml(toml: &str) -> Result<TorusConfig, figment::Error> {
        Figment::new()
            .merge(Serialized::defaults(TorusConfig::default()))
            .merge(Toml::string(toml))
            .extract()
    }

    #[test]
    fn defaults() {
        let config = TorusConfig::default();
        assert_eq!(config.k, 4);
        assert_eq!(config.n, 2);
        assert_eq!(config.latency_mode(), LatencyMode::Uniform);
        assert_eq!(config.ring_latency_ticks(), HOP_LATENCY_TICKS);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn noc_latency() {
        let config = TorusConfig::new(8, 2).with_noc_latency(true);
        assert_eq!(config.ring_latency_ticks(), WRAP_LATENCY_TICKS);

        let config = config.with_wrap_latency_ticks(5);
        assert_eq!(config.ring_latency_ticks(), 5);
    }

    #[test]
    fn flag_as_integer() {
        let config = from_toml("k = 8\nn = 3\nuse_noc_latency = 1").unwrap();
        assert_eq!(config, TorusConfig::new(8, 3).with_noc_latency(true));

        let config = from_toml("use_noc_latency = 0").unwrap();
        assert!(!config.use_noc_latency);
    }

    #[test]
    fn flag_as_bool() {
        let config = from_toml("use_noc_latency = true").unwrap();
        assert!(config.use_noc_latency);
    }

    #[test]
    fn flag_out_of_range() {
        assert!(from_toml("use_noc_latency = 2").is_err());
    }

    #[test]
    fn invalid() {
        assert_eq!(
            TorusConfig::new(0, 2).validate(),
            Err(SimError("k must be at least 1 (got 0)".to_string()))
        );
        assert_eq!(
            TorusConfig::new(4, 0).validate(),
            Err(SimError("n must be at least 1 (got 0)".to_string()))
        );
        assert!(TorusConfig::new(1 << 20, 8).validate().is_err());
        assert!(
            TorusConfig::new(4, 2)
                .with_wrap_latency_ticks(0)
                .validate()
                .is_err()
        );
    }
}
