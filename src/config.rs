//! Runtime settings, read once at startup and threaded into the core.

use crate::models::TankState;
use serde::Serialize;
use std::env;
use tracing::warn;

pub const DEFAULT_FUEL_PRICE: f64 = 1.58;
pub const DEFAULT_LOW_RANGE_THRESHOLD_KM: f64 = 50.0;
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FuelConfig {
    pub fuel_price_per_liter: f64,
    pub tank: TankState,
    pub low_range_threshold_km: f64,
}

impl Default for FuelConfig {
    fn default() -> Self {
        Self {
            fuel_price_per_liter: DEFAULT_FUEL_PRICE,
            tank: TankState::default(),
            low_range_threshold_km: DEFAULT_LOW_RANGE_THRESHOLD_KM,
        }
    }
}

impl FuelConfig {
    /// `FUEL_PRICE`, `TANK_CAPACITY_L`, `TANK_RESERVE_L` and
    /// `LOW_RANGE_THRESHOLD_KM`; unset or unusable values keep the default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let read = |key: &str, default: f64| match lookup(key) {
            None => default,
            Some(raw) => match raw.trim().parse::<f64>() {
                Ok(value) if value.is_finite() && value >= 0.0 => value,
                _ => {
                    warn!("ignoring {key}={raw:?}, using {default}");
                    default
                }
            },
        };

        let mut tank = TankState {
            total_capacity_l: read("TANK_CAPACITY_L", defaults.tank.total_capacity_l),
            reserve_capacity_l: read("TANK_RESERVE_L", defaults.tank.reserve_capacity_l),
        };
        if tank.reserve_capacity_l > tank.total_capacity_l {
            warn!(
                capacity = tank.total_capacity_l,
                reserve = tank.reserve_capacity_l,
                "reserve exceeds tank capacity, using default tank"
            );
            tank = defaults.tank;
        }

        Self {
            fuel_price_per_liter: read("FUEL_PRICE", defaults.fuel_price_per_liter),
            tank,
            low_range_threshold_km: read("LOW_RANGE_THRESHOLD_KM", defaults.low_range_threshold_km),
        }
    }
}

pub fn resolve_port() -> u16 {
    env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT)
}
