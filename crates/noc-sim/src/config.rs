//! Simulation configuration.
//!
//! Configuration comes from defaults, environment variables, or a JSON file.
//! Every source is validated before a session is built from it.

use std::path::Path;
use std::str::FromStr;

use noc_balance::LbfMetric;
use noc_routing::{RoutingAlgorithm, TrafficConfig};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default mesh side length.
pub const DEFAULT_MESH_SIZE: usize = 8;

/// Configuration for a simulation session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Seed for deterministic simulation
    pub seed: u64,
    /// Injection, routing and congestion-update parameters
    pub traffic: TrafficConfig,
    /// Metric recorded in the LBF history
    pub metric: LbfMetric,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            traffic: TrafficConfig::default(),
            metric: LbfMetric::default(),
        }
    }
}

impl SimulationConfig {
    /// Create config from environment variables with sensible defaults.
    ///
    /// Recognised variables: `NOC_SEED`, `NOC_INJECTION_PROBABILITY`,
    /// `NOC_HOP_LOAD`, `NOC_MAX_NODE_LOAD`, `NOC_DECAY_FACTOR`,
    /// `NOC_ROUTING`, `NOC_LBF_METRIC`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`SimulationConfig::from_env`], reading values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let parse = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut config = Self::default();
        if let Some(seed) = parse_var::<u64>(&parse, "NOC_SEED")? {
            config.seed = seed;
        }
        if let Some(p) = parse_var::<f64>(&parse, "NOC_INJECTION_PROBABILITY")? {
            config.traffic.injection_probability = p;
        }
        if let Some(load) = parse_var::<f64>(&parse, "NOC_HOP_LOAD")? {
            config.traffic.hop_load = load;
        }
        if let Some(cap) = parse_var::<f64>(&parse, "NOC_MAX_NODE_LOAD")? {
            config.traffic.max_node_load = cap;
        }
        if let Some(decay) = parse_var::<f64>(&parse, "NOC_DECAY_FACTOR")? {
            config.traffic.decay_factor = decay;
        }
        if let Some(routing) = parse_var::<RoutingAlgorithm>(&parse, "NOC_ROUTING")? {
            config.traffic.routing = routing;
        }
        if let Some(metric) = parse_var::<LbfMetric>(&parse, "NOC_LBF_METRIC")? {
            config.metric = metric;
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON document. Missing fields take their default.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Check every parameter.
    pub fn validate(&self) -> Result<()> {
        self.traffic.validate()?;
        Ok(())
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| Error::InvalidArgument(format!("{key}={raw}: {e}")))
        })
        .transpose()
}
