use crate::core::{
    demand::DerivedQuantities,
    params::{PlantParameters, StorageMode},
    weighting::ExchangeCoefficients,
};

/// Background activities shared by every scenario.
pub mod activities {
    pub const PV_ELECTRICITY: &str = "electricity production, photovoltaic";
    pub const WATER: &str = "Water, unspecified natural origin";
    pub const OXYGEN: &str = "Oxygen";
    pub const LAND_OCCUPATION: &str = "Occupation, industrial area";
    pub const LAND_TRANSFORMATION_FROM: &str = "Transformation, from industrial area";
    pub const LAND_TRANSFORMATION_TO: &str = "Transformation, to industrial area";
    pub const STORAGE_TANK: &str = "high pressure storage tank production and maintenance, \
                                    per 10kgH2 at 500bar, from grid electricity";
}

/// Water consumed per kg of hydrogen.
const WATER_PER_KG: f64 = 0.0014;

/// Oxygen released per kg of hydrogen, accounted as a negative exchange.
const OXYGEN_PER_KG: f64 = -8.0;

/// One exchange on the hydrogen-production system: an activity and its
/// per-functional-unit quantity.
#[derive(Clone, Debug, PartialEq)]
pub struct Exchange {
    pub activity: String,
    pub amount: f64,
}

impl Exchange {
    fn new(activity: impl Into<String>, amount: f64) -> Self {
        Self { activity: activity.into(), amount }
    }
}

/// The scenario handed to the impact engine: a named system of exchanges,
/// normalized to the functional unit of 1 kg of hydrogen.
#[derive(Clone, Debug)]
pub struct ScenarioDefinition {
    pub name: String,
    pub functional_unit: &'static str,
    pub exchanges: Vec<Exchange>,
}

impl ScenarioDefinition {
    /// Assemble the production, infrastructure and storage exchanges for one
    /// scenario.
    pub fn assemble(
        name: String,
        params: &PlantParameters,
        derived: &DerivedQuantities,
        electricity: ExchangeCoefficients,
    ) -> Self {
        let hydrogen = derived.hydrogen_lifetime.0;
        let land_factor = params.stack_type.land_factor();

        let mut exchanges = vec![
            // Production phase.
            Exchange::new(params.grid_market.activity(), electricity.grid.0),
            Exchange::new(activities::PV_ELECTRICITY, electricity.pv.0),
            Exchange::new(activities::WATER, WATER_PER_KG),
            Exchange::new(activities::OXYGEN, OXYGEN_PER_KG),
            // Infrastructure, amortized over the lifetime production.
            Exchange::new(params.stack_type.stack_activity(), derived.stack_replacements / hydrogen),
            Exchange::new(params.stack_type.balance_of_plant_activity(), 1.0 / hydrogen),
            Exchange::new(
                activities::LAND_OCCUPATION,
                land_factor
                    / derived.capacity_kw.0
                    / hydrogen
                    / params.balance_of_plant_lifetime_years,
            ),
            Exchange::new(activities::LAND_TRANSFORMATION_FROM, land_factor / hydrogen),
            Exchange::new(activities::LAND_TRANSFORMATION_TO, land_factor / hydrogen),
            // End of life, credited with a negative sign.
            Exchange::new(params.stack_type.stack_treatment_activity(), -1.0 / hydrogen),
            Exchange::new(params.stack_type.balance_of_plant_treatment_activity(), -1.0 / hydrogen),
        ];
        if let StorageMode::Tank { tanks } = params.storage {
            exchanges.push(Exchange::new(activities::STORAGE_TANK, f64::from(tanks) / hydrogen));
        }

        Self { name, functional_unit: "kg", exchanges }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        allocation::ElectricitySplit,
        demand::compute_demand,
        params::tests::valid,
        weighting::exchange_coefficients,
    };

    fn definition(storage: StorageMode) -> ScenarioDefinition {
        let params = PlantParameters { storage, ..valid() };
        let derived = compute_demand(&params);
        let electricity = exchange_coefficients(
            ElectricitySplit::from_grid_share(0.6),
            derived.electricity_per_kg,
        );
        ScenarioDefinition::assemble("result 1".to_string(), &params, &derived, electricity)
    }

    #[test]
    fn production_exchanges_split_the_electricity() {
        let definition = definition(StorageMode::None);
        let grid = &definition.exchanges[0];
        let pv = &definition.exchanges[1];
        assert_eq!(grid.activity, "market for electricity, low voltage, FR");
        assert_eq!(pv.activity, activities::PV_ELECTRICITY);
        let electricity_per_kg = 39.4 / 0.72;
        assert!((grid.amount + pv.amount - electricity_per_kg).abs() < 1e-9);
    }

    #[test]
    fn treatment_exchanges_are_negative() {
        let definition = definition(StorageMode::None);
        let negative: Vec<_> =
            definition.exchanges.iter().filter(|exchange| exchange.amount < 0.0).collect();
        // Oxygen plus the two end-of-life treatments.
        assert_eq!(negative.len(), 3);
    }

    #[test]
    fn tank_storage_adds_one_exchange() {
        let without = definition(StorageMode::None);
        let with = definition(StorageMode::Tank { tanks: 10 });
        assert_eq!(with.exchanges.len(), without.exchanges.len() + 1);
        let tank = with.exchanges.last().unwrap();
        assert_eq!(tank.activity, activities::STORAGE_TANK);
        assert!(tank.amount > 0.0);
    }
}
