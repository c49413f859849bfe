//! Shop sizing parameters.
//!
//! A [`ShopConfig`] bounds every fixed-size structure in the shop: the
//! intake queue and ready rack are sized by `customers`, the exit barrier
//! by `staff`, and the station lock set by `tints`. Setup and all
//! operations read the same config, so the bounds are consistent by
//! construction.
//!
//! Values can be set directly or loaded from `PAINTSHOP_*` environment
//! variables via [`ShopConfig::from_env`].

use thiserror::Error;

use crate::station::RESERVED_STATIONS;

/// Errors produced while building or validating a [`ShopConfig`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The shop cannot run without at least one staff member.
    #[error("staff count must be at least 1")]
    NoStaff,

    /// The shop needs at least one tint in its palette.
    #[error("tint count must be at least 1")]
    NoTints,

    /// Orders must be able to carry at least one tint.
    #[error("paint complexity must be at least 1")]
    NoComplexity,

    /// An environment override could not be parsed as a number.
    #[error("invalid value for {key}: {value:?}")]
    InvalidEnv {
        /// The environment variable that failed to parse.
        key: &'static str,
        /// The rejected value.
        value: String,
    },
}

/// Sizing parameters for one shop instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShopConfig {
    /// Number of customer threads the shop is provisioned for. May be 0,
    /// in which case staff observe an empty shop and leave immediately.
    pub customers: usize,
    /// Number of staff threads; the exit barrier trips at this count.
    pub staff: usize,
    /// Number of distinct tints in the palette. Valid tint ids are
    /// `1..=tints`.
    pub tints: usize,
    /// Maximum number of tint entries a single order carries.
    pub paint_complexity: usize,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            customers: 10,
            staff: 3,
            tints: 10,
            paint_complexity: 3,
        }
    }
}

impl ShopConfig {
    /// Checks the invariants every structure in the shop relies on.
    ///
    /// # Errors
    /// Returns the first violated constraint. A zero customer count is
    /// valid: the shop opens and staff immediately reach exit consensus.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.staff == 0 {
            return Err(ConfigError::NoStaff);
        }
        if self.tints == 0 {
            return Err(ConfigError::NoTints);
        }
        if self.paint_complexity == 0 {
            return Err(ConfigError::NoComplexity);
        }
        Ok(())
    }

    /// Loads a config from the environment, starting from the defaults.
    ///
    /// Recognized variables: `PAINTSHOP_CUSTOMERS`, `PAINTSHOP_STAFF`,
    /// `PAINTSHOP_TINTS`, `PAINTSHOP_COMPLEXITY`. Unset variables keep
    /// their default.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidEnv`] if a set variable is not a
    /// non-negative integer, or a validation error if the resulting
    /// config is unusable.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.customers = env_usize("PAINTSHOP_CUSTOMERS", config.customers)?;
        config.staff = env_usize("PAINTSHOP_STAFF", config.staff)?;
        config.tints = env_usize("PAINTSHOP_TINTS", config.tints)?;
        config.paint_complexity = env_usize("PAINTSHOP_COMPLEXITY", config.paint_complexity)?;
        config.validate()?;
        Ok(config)
    }

    /// Total number of station locks, palette plus reserved indices.
    #[must_use]
    pub const fn station_count(&self) -> usize {
        self.tints + RESERVED_STATIONS
    }
}

fn env_usize(key: &'static str, default: usize) -> Result<usize, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidEnv { key, value: raw }),
        Err(_) => Ok(default),
    }
}
