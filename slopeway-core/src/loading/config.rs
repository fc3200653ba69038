use serde::{Deserialize, Serialize};

use crate::Error;

/// Street network variant. Variants differ only by their slope range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkKind {
    /// Vehicle drive network
    #[default]
    Drive,
    /// Bike network
    Bike,
}

impl NetworkKind {
    /// Largest integer threshold precomputed for this network
    pub fn max_threshold(self) -> u32 {
        match self {
            NetworkKind::Drive => 40,
            NetworkKind::Bike => 43,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            NetworkKind::Drive => "Vehicle Drive Network",
            NetworkKind::Bike => "Bike Network",
        }
    }
}

fn default_min_threshold() -> u32 {
    1
}

fn default_tight_epsilon() -> f64 {
    0.5
}

fn default_parallel() -> bool {
    true
}

/// Settings for building a slope model and answering queries on it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlopeModelConfig {
    pub network: NetworkKind,
    #[serde(default = "default_min_threshold")]
    pub min_threshold: u32,
    /// Overrides the network's own maximum
    pub max_threshold: Option<u32>,
    /// Distance below the threshold, in percentage points, at which a
    /// traversed segment flags the route as tight
    #[serde(default = "default_tight_epsilon")]
    pub tight_epsilon: f64,
    /// Appended to free-text locations that do not mention it
    pub locality_suffix: Option<String>,
    /// Compute threshold subgraphs with rayon
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

impl Default for SlopeModelConfig {
    fn default() -> Self {
        Self {
            network: NetworkKind::default(),
            min_threshold: default_min_threshold(),
            max_threshold: None,
            tight_epsilon: default_tight_epsilon(),
            locality_suffix: None,
            parallel: default_parallel(),
        }
    }
}

impl SlopeModelConfig {
    pub fn for_network(network: NetworkKind) -> Self {
        Self {
            network,
            ..Self::default()
        }
    }

    /// Parses and validates a TOML document
    ///
    /// # Errors
    ///
    /// `Error::ConfigError` on malformed TOML or invalid values
    pub fn from_toml_str(text: &str) -> Result<Self, Error> {
        let config: Self = toml::from_str(text).map_err(|e| Error::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn max_threshold(&self) -> u32 {
        self.max_threshold
            .unwrap_or_else(|| self.network.max_threshold())
    }

    /// # Errors
    ///
    /// `Error::ConfigError` if the threshold range is empty or starts at
    /// zero, or the epsilon is negative or not finite
    pub fn validate(&self) -> Result<(), Error> {
        if self.min_threshold == 0 {
            return Err(Error::ConfigError(
                "min_threshold must be at least 1".to_string(),
            ));
        }
        if self.min_threshold > self.max_threshold() {
            return Err(Error::ConfigError(format!(
                "min_threshold {} exceeds max_threshold {}",
                self.min_threshold,
                self.max_threshold()
            )));
        }
        if !self.tight_epsilon.is_finite() || self.tight_epsilon < 0.0 {
            return Err(Error::ConfigError(format!(
                "tight_epsilon must be a non-negative number, got {}",
                self.tight_epsilon
            )));
        }
        Ok(())
    }
}
