use crate::{
    core::params::PlantParameters,
    quantity::{
        energy::{KilowattHours, WattHours},
        mass::Kilograms,
        power::{Kilowatts, Watts},
        rate::{KilogramsPerHour, KilowattHoursPerKilogram},
        time::Hours,
    },
};

/// Higher heating value of hydrogen.
pub const HIGHER_HEATING_VALUE: KilowattHoursPerKilogram = KilowattHoursPerKilogram(39.4);

pub const HOURS_PER_YEAR: Hours = Hours(8760.0);

/// Figures derived once from [`PlantParameters`]; a pure function of them.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DerivedQuantities {
    pub capacity: Watts,
    pub capacity_kw: Kilowatts,

    /// Balance-of-plant lifetime expressed in hours.
    pub operating_hours: Hours,

    /// Electricity consumed by the electrolyzer over its lifetime.
    pub electricity_consumed: KilowattHours,

    pub hydrogen_lifetime: Kilograms,
    pub hydrogen_per_year: Kilograms,
    pub hydrogen_per_hour: KilogramsPerHour,

    /// Electricity needed per kg of hydrogen; algebraically `HHV / efficiency`.
    pub electricity_per_kg: KilowattHoursPerKilogram,

    /// How many stacks the plant wears out over the balance-of-plant lifetime.
    pub stack_replacements: f64,

    /// Electrolyzer demand over one year, the denominator of the allocation shares.
    pub required_annual: WattHours,
}

/// Derive the demand figures. Pure and total over validated parameters.
pub fn compute_demand(params: &PlantParameters) -> DerivedQuantities {
    let capacity = Watts::from(params.capacity);
    let capacity_kw = Kilowatts::from(params.capacity);
    let operating_hours = Hours(params.balance_of_plant_lifetime_years * 365.0 * 24.0);

    let electricity_consumed = capacity_kw * operating_hours * params.capacity_factor;
    let hydrogen_lifetime = electricity_consumed * params.efficiency / HIGHER_HEATING_VALUE;
    let hydrogen_per_year =
        capacity_kw * HOURS_PER_YEAR * params.capacity_factor * params.efficiency
            / HIGHER_HEATING_VALUE;
    let hydrogen_per_hour = hydrogen_lifetime / (operating_hours * params.capacity_factor);
    let electricity_per_kg = electricity_consumed / hydrogen_lifetime;
    let stack_replacements = operating_hours / params.stack_lifetime;
    let required_annual = capacity * HOURS_PER_YEAR * params.capacity_factor;

    DerivedQuantities {
        capacity,
        capacity_kw,
        operating_hours,
        electricity_consumed,
        hydrogen_lifetime,
        hydrogen_per_year,
        hydrogen_per_hour,
        electricity_per_kg,
        stack_replacements,
        required_annual,
    }
}
