use std::{collections::HashMap, fs, path::Path};

use crate::{core::{error::EngineError, scenario::ScenarioDefinition}, prelude::*};

/// One impact-characterization method: a stable identifier used in factor
/// tables and a short human-readable column header.
#[derive(Copy, Clone, Debug)]
pub struct ImpactMethod {
    pub id: &'static str,
    pub label: &'static str,
}

/// The EF v3.0 no-LT method selection, in display order.
pub const EF_METHODS: [ImpactMethod; 10] = [
    ImpactMethod { id: "climate-change", label: "climate change [kg CO2-Eq]" },
    ImpactMethod { id: "material-resources", label: "material resources [kg Sb-Eq]" },
    ImpactMethod { id: "land-use", label: "land use [dimensionless]" },
    ImpactMethod { id: "water-use", label: "water use [m3 world eq. deprived]" },
    ImpactMethod { id: "acidification", label: "acidification [mol H+-Eq]" },
    ImpactMethod { id: "eutrophication-marine", label: "eutrophication: marine [kg N-Eq]" },
    ImpactMethod { id: "eutrophication-freshwater", label: "eutrophication: freshwater [kg P-Eq]" },
    ImpactMethod { id: "eutrophication-terrestrial", label: "eutrophication: terrestrial [mol N-Eq]" },
    ImpactMethod { id: "ionising-radiation", label: "ionising radiation [kBq U235-Eq]" },
    ImpactMethod {
        id: "energy-resources",
        label: "energy resources: non-renewable [MJ, net calorific value]",
    },
];

/// The external impact-characterization engine.
///
/// Takes a scenario system and a method selection, returns one impact value
/// per method.
pub trait ImpactEngine {
    fn compute_impacts(
        &self,
        system: &ScenarioDefinition,
        methods: &[ImpactMethod],
    ) -> Result<Vec<f64>, EngineError>;
}

/// File-backed engine: a JSON table of per-unit characterization factors,
/// keyed by activity name and then by method id. Impacts are the linear
/// combination of exchange amounts with their factors.
pub struct CharacterizationTable {
    factors: HashMap<String, HashMap<String, f64>>,
}

impl CharacterizationTable {
    pub fn from_path(path: &Path) -> Result<Self, EngineError> {
        let body = fs::read_to_string(path).map_err(|error| {
            EngineError::new(format!("cannot read factor table `{}`: {error}", path.display()))
        })?;
        Self::from_json(&body)
    }

    pub fn from_json(body: &str) -> Result<Self, EngineError> {
        let factors = serde_json::from_str(body)
            .map_err(|error| EngineError::new(format!("malformed factor table: {error}")))?;
        Ok(Self { factors })
    }
}

impl ImpactEngine for CharacterizationTable {
    #[instrument(skip_all, fields(system = %system.name))]
    fn compute_impacts(
        &self,
        system: &ScenarioDefinition,
        methods: &[ImpactMethod],
    ) -> Result<Vec<f64>, EngineError> {
        let mut impacts = vec![0.0; methods.len()];
        for exchange in &system.exchanges {
            let factors = self.factors.get(&exchange.activity).ok_or_else(|| {
                EngineError::new(format!("no factors for activity `{}`", exchange.activity))
            })?;
            for (impact, method) in impacts.iter_mut().zip(methods) {
                *impact += exchange.amount * factors.get(method.id).copied().unwrap_or(0.0);
            }
        }
        Ok(impacts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scenario::Exchange;

    fn system(exchanges: Vec<Exchange>) -> ScenarioDefinition {
        ScenarioDefinition { name: "result 1".to_string(), functional_unit: "kg", exchanges }
    }

    const METHODS: [ImpactMethod; 2] = [
        ImpactMethod { id: "climate-change", label: "climate change [kg CO2-Eq]" },
        ImpactMethod { id: "water-use", label: "water use [m3 world eq. deprived]" },
    ];

    #[test]
    fn impacts_are_linear_in_the_exchanges() {
        let table = CharacterizationTable::from_json(
            r#"{
                "grid": {"climate-change": 0.5, "water-use": 0.1},
                "pv": {"climate-change": 0.05}
            }"#,
        )
        .unwrap();
        let impacts = table
            .compute_impacts(
                &system(vec![
                    Exchange { activity: "grid".to_string(), amount: 10.0 },
                    Exchange { activity: "pv".to_string(), amount: 40.0 },
                ]),
                &METHODS,
            )
            .unwrap();
        assert_eq!(impacts, vec![10.0 * 0.5 + 40.0 * 0.05, 10.0 * 0.1]);
    }

    #[test]
    fn unknown_activity_is_an_engine_error() {
        let table = CharacterizationTable::from_json("{}").unwrap();
        let result = table.compute_impacts(
            &system(vec![Exchange { activity: "grid".to_string(), amount: 1.0 }]),
            &METHODS,
        );
        assert!(result.is_err());
    }

    #[test]
    fn malformed_table_is_an_engine_error() {
        assert!(CharacterizationTable::from_json("[1, 2, 3]").is_err());
    }
}
