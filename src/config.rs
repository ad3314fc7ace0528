use std::path::Path;

use serde::Deserialize;

use crate::{
    core::{
        allocation::Granularity,
        battery::BatteryParameters,
        error::InvalidParameterError,
        params::{GridMarket, PlantParameters, StackType, StorageMode, TransportMode},
    },
    prelude::*,
    quantity::{energy::WattHours, power::{Megawatts, Watts}, time::Hours},
};

/// A TOML batch of scenarios, computed in file order.
#[derive(Deserialize)]
pub struct ScenarioFile {
    #[serde(rename = "scenario")]
    pub scenarios: Vec<ScenarioConfig>,
}

impl ScenarioFile {
    pub fn load(path: &Path) -> Result<Self> {
        let body = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read the scenario file `{}`", path.display()))?;
        let file: Self = toml::from_str(&body)
            .with_context(|| format!("cannot parse the scenario file `{}`", path.display()))?;
        ensure!(!file.scenarios.is_empty(), "the scenario file defines no scenarios");
        Ok(file)
    }
}

#[derive(Deserialize)]
pub struct ScenarioConfig {
    pub stack_type: StackType,
    pub capacity_mw: f64,
    pub stack_lifetime_hours: f64,
    pub bop_lifetime_years: f64,
    pub efficiency: f64,
    pub capacity_factor: f64,
    #[serde(default)]
    pub transport: TransportMode,
    pub grid_market: GridMarket,
    #[serde(default)]
    pub storage: StorageMode,
    #[serde(default = "default_granularity")]
    pub granularity: Granularity,
    pub pv: Option<PvConfig>,
}

const fn default_granularity() -> Granularity {
    Granularity::Daily
}

impl ScenarioConfig {
    pub fn plant_parameters(&self) -> Result<PlantParameters, InvalidParameterError> {
        PlantParameters::builder()
            .stack_type(self.stack_type)
            .capacity(Megawatts(self.capacity_mw))
            .stack_lifetime(Hours(self.stack_lifetime_hours))
            .balance_of_plant_lifetime_years(self.bop_lifetime_years)
            .efficiency(self.efficiency)
            .capacity_factor(self.capacity_factor)
            .transport(self.transport)
            .grid_market(self.grid_market)
            .storage(self.storage)
            .build()
    }
}

/// PV coupling: a farm location plus its peak capacity, optionally buffered
/// through a battery.
#[derive(Deserialize)]
pub struct PvConfig {
    pub location: LocationConfig,
    pub capacity_mw: f64,
    pub battery: Option<BatteryConfig>,
}

impl PvConfig {
    pub fn peak(&self) -> Megawatts {
        Megawatts(self.capacity_mw)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
pub enum LocationConfig {
    City { city: String },
    Coordinates { lat: f64, lon: f64 },
}

#[derive(Deserialize)]
pub struct BatteryConfig {
    pub power_mw: f64,
    pub capacity_mwh: f64,
}

impl BatteryConfig {
    pub fn battery_parameters(&self) -> Result<BatteryParameters, InvalidParameterError> {
        BatteryParameters::builder()
            .power_limit(Watts(self.power_mw * 1_000_000.0))
            .capacity(WattHours(self.capacity_mwh * 1_000_000.0))
            .build()
    }
}
