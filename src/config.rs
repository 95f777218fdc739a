/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Deserialize, Clone, Debug)]
pub struct Config {
    pub dispatch: DispatchConfig,
}

/**
 * Fleet size and car timing.
 *
 * # Fields
 * - `n_cars`:          Number of cars in the fleet, numbered from 0.
 * - `travel_delay`:    Milliseconds a car needs to travel one floor.
 * - `dwell_delay`:     Milliseconds a car stays at a stop for boarding/alighting.
 * - `cars`:            Optional per-car overrides of the two delays.
 */
#[derive(Deserialize, Clone, Debug)]
pub struct DispatchConfig {
    pub n_cars: usize,
    #[serde(default = "default_travel_delay")]
    pub travel_delay: u64,
    #[serde(default = "default_dwell_delay")]
    pub dwell_delay: u64,
    #[serde(default)]
    pub cars: Vec<CarConfig>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct CarConfig {
    pub id: usize,
    pub travel_delay: Option<u64>,
    pub dwell_delay: Option<u64>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse configuration file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

fn default_travel_delay() -> u64 {
    1000
}

fn default_dwell_delay() -> u64 {
    5000
}

/***************************************/
/*             Public API              */
/***************************************/
pub fn load_config(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let config_str = fs::read_to_string(path)?;
    config_str.parse()
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let config: Config = toml::from_str(s)?;
        config.dispatch.validate()?;
        Ok(config)
    }
}

impl DispatchConfig {
    pub fn new(n_cars: usize, travel_delay: u64, dwell_delay: u64) -> DispatchConfig {
        DispatchConfig {
            n_cars,
            travel_delay,
            dwell_delay,
            cars: Vec::new(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_cars == 0 {
            return Err(ConfigError::Invalid("n_cars must be at least 1".into()));
        }
        if self.travel_delay == 0 {
            return Err(ConfigError::Invalid("travel_delay must be positive".into()));
        }
        for car in &self.cars {
            if car.id >= self.n_cars {
                return Err(ConfigError::Invalid(format!(
                    "override for car {} but the fleet has {} cars",
                    car.id, self.n_cars
                )));
            }
            if car.travel_delay == Some(0) {
                return Err(ConfigError::Invalid(format!(
                    "travel_delay for car {} must be positive",
                    car.id
                )));
            }
        }
        Ok(())
    }

    /// Travel and dwell delay for one car, overrides applied.
    pub fn car_timing(&self, car_id: usize) -> (Duration, Duration) {
        let car = self.cars.iter().find(|c| c.id == car_id);
        let travel = car
            .and_then(|c| c.travel_delay)
            .unwrap_or(self.travel_delay);
        let dwell = car.and_then(|c| c.dwell_delay).unwrap_or(self.dwell_delay);
        (Duration::from_millis(travel), Duration::from_millis(dwell))
    }
}

/***************************************/
/*             Unit tests              */
/***************************************/
