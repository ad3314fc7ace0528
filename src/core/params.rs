use bon::bon;
use serde::{Deserialize, Serialize};

use crate::{
    core::error::InvalidParameterError,
    quantity::{power::Megawatts, time::Hours},
};

/// Electrolyzer stack technology.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StackType {
    Pem,
    Aec,
}

impl StackType {
    /// Industrial land use per kW of installed capacity.
    pub const fn land_factor(self) -> f64 {
        match self {
            Self::Pem => 0.09,
            Self::Aec => 0.12,
        }
    }

    pub const fn stack_activity(self) -> &'static str {
        match self {
            Self::Pem => "electrolyzer production, 1MWe, PEM, Stack",
            Self::Aec => "electrolyzer production, 1MWe, AEC, Stack",
        }
    }

    pub const fn balance_of_plant_activity(self) -> &'static str {
        match self {
            Self::Pem => "electrolyzer production, 1MWe, PEM, Balance of Plant",
            Self::Aec => "electrolyzer production, 1MWe, AEC, Balance of Plant",
        }
    }

    pub const fn stack_treatment_activity(self) -> &'static str {
        match self {
            Self::Pem => "treatment of fuel cell stack, 1MWe, PEM",
            Self::Aec => "treatment of fuel cell stack, 1MWe, AEC",
        }
    }

    pub const fn balance_of_plant_treatment_activity(self) -> &'static str {
        match self {
            Self::Pem => "treatment of fuel cell balance of plant, 1MWe, PEM",
            Self::Aec => "treatment of fuel cell balance of plant, 1MWe, AEC",
        }
    }
}

/// How the produced hydrogen leaves the plant.
///
/// Carried on the scenario for reporting; no exchange is attached to it.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    #[default]
    Pipeline,
    Truck,
}

/// Grid electricity market feeding the electrolyzer.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GridMarket {
    #[serde(rename = "FR2023")]
    Fr2023,
    #[serde(rename = "DE2023")]
    De2023,
    #[serde(rename = "ES2023")]
    Es2023,
}

impl GridMarket {
    pub const fn activity(self) -> &'static str {
        match self {
            Self::Fr2023 => "market for electricity, low voltage, FR",
            Self::De2023 => "market for electricity, low voltage, DE",
            Self::Es2023 => "market for electricity, low voltage, ES",
        }
    }
}

/// Hydrogen storage at the plant.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum StorageMode {
    #[default]
    None,
    Tank {
        tanks: u32,
    },
}

/// Immutable per-scenario plant description. Validated on construction.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlantParameters {
    pub stack_type: StackType,
    pub capacity: Megawatts,
    pub stack_lifetime: Hours,
    pub balance_of_plant_lifetime_years: f64,
    pub efficiency: f64,
    pub capacity_factor: f64,
    pub transport: TransportMode,
    pub grid_market: GridMarket,
    pub storage: StorageMode,
}

#[bon]
impl PlantParameters {
    #[builder]
    pub fn new(
        stack_type: StackType,
        capacity: Megawatts,
        stack_lifetime: Hours,
        balance_of_plant_lifetime_years: f64,
        efficiency: f64,
        capacity_factor: f64,
        #[builder(default)] transport: TransportMode,
        grid_market: GridMarket,
        #[builder(default)] storage: StorageMode,
    ) -> Result<Self, InvalidParameterError> {
        if !capacity.0.is_finite() || capacity <= Megawatts::ZERO {
            return Err(InvalidParameterError::new(format!(
                "electrolyzer capacity must be positive, got {capacity}"
            )));
        }
        if !stack_lifetime.0.is_finite() || stack_lifetime <= Hours::ZERO {
            return Err(InvalidParameterError::new(format!(
                "stack lifetime must be positive, got {stack_lifetime}"
            )));
        }
        if !balance_of_plant_lifetime_years.is_finite() || balance_of_plant_lifetime_years <= 0.0 {
            return Err(InvalidParameterError::new(format!(
                "balance-of-plant lifetime must be positive, got {balance_of_plant_lifetime_years} years"
            )));
        }
        if !efficiency.is_finite() || efficiency <= 0.0 || efficiency > 1.0 {
            return Err(InvalidParameterError::new(format!(
                "stack efficiency must be within (0, 1], got {efficiency}"
            )));
        }
        if !capacity_factor.is_finite() || capacity_factor <= 0.0 || capacity_factor > 1.0 {
            return Err(InvalidParameterError::new(format!(
                "capacity factor must be within (0, 1], got {capacity_factor}"
            )));
        }
        if let StorageMode::Tank { tanks } = storage {
            if tanks == 0 {
                return Err(InvalidParameterError::new("tank storage requires at least one tank"));
            }
        }
        Ok(Self {
            stack_type,
            capacity,
            stack_lifetime,
            balance_of_plant_lifetime_years,
            efficiency,
            capacity_factor,
            transport,
            grid_market,
            storage,
        })
    }
}
