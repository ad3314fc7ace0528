use crate::{core::allocation::ElectricitySplit, quantity::rate::KilowattHoursPerKilogram};

/// Per-kg electricity exchange quantities handed to the impact engine.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ExchangeCoefficients {
    pub grid: KilowattHoursPerKilogram,
    pub pv: KilowattHoursPerKilogram,
}

/// Split the per-kg electricity demand between the grid and PV sources.
pub fn exchange_coefficients(
    split: ElectricitySplit,
    electricity_per_kg: KilowattHoursPerKilogram,
) -> ExchangeCoefficients {
    ExchangeCoefficients {
        grid: electricity_per_kg * split.grid(),
        pv: electricity_per_kg * split.renewable(),
    }
}
