// crates/lob-console/src/config.rs

//! Demo book configuration.
//!
//! Defaults reproduce the classic demo book: ten bid prices drawn from
//! `90.00..=100.00`, ten ask prices from `100.00..=110.00`, two orders per
//! price with quantities in `1..=100`. Any field can be overridden from a
//! TOML file; missing fields keep their default.

use std::fs;
use std::path::Path;

use lob_core::MAX_PRICE;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Random prices drawn per side (collisions share a level).
    pub levels_per_side: usize,
    pub orders_per_level: usize,

    /// Lowest possible bid, in cents.
    pub bid_base_cents: i64,
    /// Lowest possible ask, in cents.
    pub ask_base_cents: i64,
    /// Prices are `base + U[0, span]` cents.
    pub price_span_cents: i64,

    pub min_quantity: u32,
    pub max_quantity: u32,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            levels_per_side: 10,
            orders_per_level: 2,
            bid_base_cents: 9_000,
            ask_base_cents: 10_000,
            price_span_cents: 1_000,
            min_quantity: 1,
            max_quantity: 100,
        }
    }
}

impl DemoConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: DemoConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_quantity == 0 {
            return Err(ConfigError::Invalid("min_quantity must be at least 1"));
        }
        if self.min_quantity > self.max_quantity {
            return Err(ConfigError::Invalid("min_quantity exceeds max_quantity"));
        }
        if self.bid_base_cents <= 0 || self.ask_base_cents <= 0 {
            return Err(ConfigError::Invalid("base prices must be positive"));
        }
        if self.price_span_cents < 0 {
            return Err(ConfigError::Invalid("price_span_cents must not be negative"));
        }
        for base in [self.bid_base_cents, self.ask_base_cents] {
            let top = base
                .checked_add(self.price_span_cents)
                .ok_or(ConfigError::Invalid("price range overflows"))?;
            if Decimal::new(top, 2) > MAX_PRICE {
                return Err(ConfigError::Invalid("price range exceeds the maximum price"));
            }
        }
        Ok(())
    }
}
