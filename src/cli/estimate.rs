use std::path::PathBuf;

use clap::Parser;
use derive_more::{Display, Error, From};

use crate::{
    api::{
        engine::{CharacterizationTable, ImpactEngine, EF_METHODS},
        geocoding, pvgis,
    },
    config::{LocationConfig, PvConfig, ScenarioConfig, ScenarioFile},
    core::{
        accumulator::ResultTable,
        allocation::{allocate, Allocations, ElectricitySplit},
        battery::{simulate, BatteryParameters},
        demand::{compute_demand, DerivedQuantities},
        error::{DataFetchError, DegenerateInputError},
        params::PlantParameters,
        scenario::ScenarioDefinition,
        weighting::exchange_coefficients,
    },
    prelude::*,
    quantity::{
        energy::{GigawattHours, MegawattHours},
        mass::Tonnes,
        power::Kilowatts,
    },
    tables::{build_allocation_table, build_comparison_table},
};

#[derive(Parser)]
pub struct EstimateArgs {
    /// Path to the TOML scenario batch.
    #[clap(long, env = "HYSPI_SCENARIOS")]
    pub scenarios: PathBuf,

    /// Path to the JSON characterization-factor table of the impact engine.
    #[clap(long, env = "HYSPI_FACTORS")]
    pub factors: PathBuf,

    #[clap(flatten)]
    pub geocoding: GeocodingArgs,
}

#[derive(Parser)]
pub struct GeocodingArgs {
    /// OpenCage API key; only needed when a scenario locates its PV farm by city name.
    #[clap(long = "opencage-api-key", env = "OPENCAGE_API_KEY")]
    pub opencage_api_key: Option<String>,
}

/// Why a PV-coupled scenario could not produce an allocation.
#[derive(Debug, Display, Error, From)]
enum AllocationFailure {
    Fetch(DataFetchError),
    Degenerate(DegenerateInputError),
}

#[instrument(skip_all)]
pub async fn estimate(args: &EstimateArgs) -> Result {
    let file = ScenarioFile::load(&args.scenarios)?;
    let engine = CharacterizationTable::from_path(&args.factors)?;

    // Validate every scenario before computing anything: a bad parameter halts
    // the whole batch.
    let mut scenarios: Vec<(&ScenarioConfig, PlantParameters, Option<BatteryParameters>)> =
        Vec::new();
    for (index, config) in file.scenarios.iter().enumerate() {
        let params = config
            .plant_parameters()
            .with_context(|| format!("scenario #{}", index + 1))?;
        let battery = config
            .pv
            .as_ref()
            .and_then(|pv| pv.battery.as_ref())
            .map(|battery| battery.battery_parameters())
            .transpose()
            .with_context(|| format!("scenario #{}", index + 1))?;
        scenarios.push((config, params, battery));
    }

    let pvgis = pvgis::Client::new()?;
    let geocoder = new_geocoder(args, &file)?;

    let mut results = ResultTable::new();
    let mut failed = 0_usize;

    for (config, params, battery) in scenarios {
        let derived = compute_demand(&params);
        info!(
            electricity_consumed = %GigawattHours::from(derived.electricity_consumed),
            hydrogen_lifetime = %Tonnes::from(derived.hydrogen_lifetime),
            hydrogen_per_hour = %derived.hydrogen_per_hour,
            electricity_per_kg = %derived.electricity_per_kg,
            "derived quantities",
        );

        let split = match &config.pv {
            None => ElectricitySplit::GRID_ONLY,
            Some(pv) => {
                match renewable_allocations(&pvgis, geocoder.as_ref(), pv, battery.as_ref(), &derived)
                    .await
                {
                    Ok(allocations) => {
                        println!("{}", build_allocation_table(&allocations, config.granularity));
                        allocations.select(config.granularity)
                    }
                    Err(AllocationFailure::Fetch(error)) => {
                        warn!(error = %error, "falling back to a grid-only allocation");
                        ElectricitySplit::GRID_ONLY
                    }
                    Err(AllocationFailure::Degenerate(error)) => {
                        error!(error = %error, "skipping the scenario");
                        failed += 1;
                        continue;
                    }
                }
            }
        };

        let coefficients = exchange_coefficients(split, derived.electricity_per_kg);
        let definition =
            ScenarioDefinition::assemble(results.next_name(), &params, &derived, coefficients);
        match engine.compute_impacts(&definition, &EF_METHODS) {
            Ok(impacts) => {
                let row = results.push(impacts);
                info!(name = %row.name, "appended the result");
            }
            Err(error) => {
                error!(error = %error, "impact engine failed, result not appended");
                failed += 1;
            }
        }
    }

    if !results.is_empty() {
        println!("{}", build_comparison_table(&results, &EF_METHODS));
    }
    ensure!(failed == 0, "{failed} scenario(s) failed");
    Ok(())
}

fn new_geocoder(args: &EstimateArgs, file: &ScenarioFile) -> Result<Option<geocoding::Client>> {
    let needed = file.scenarios.iter().any(|config| {
        matches!(&config.pv, Some(pv) if matches!(pv.location, LocationConfig::City { .. }))
    });
    match (&args.geocoding.opencage_api_key, needed) {
        (Some(key), _) => Ok(Some(geocoding::Client::new(key.clone())?)),
        (None, true) => bail!("an OpenCage API key is required for city-name locations"),
        (None, false) => Ok(None),
    }
}

/// Fetch the PV profile, run the optional battery pass and compute the
/// allocations for one scenario.
async fn renewable_allocations(
    pvgis: &pvgis::Client,
    geocoder: Option<&geocoding::Client>,
    pv: &PvConfig,
    battery: Option<&BatteryParameters>,
    derived: &DerivedQuantities,
) -> Result<Allocations, AllocationFailure> {
    let (lat, lon) = match &pv.location {
        LocationConfig::Coordinates { lat, lon } => (*lat, *lon),
        LocationConfig::City { city } => {
            let geocoder = geocoder
                .ok_or_else(|| DataFetchError::new("no geocoding client is configured"))?;
            geocoder.get_coordinates(city).await?
        }
    };
    let series =
        pvgis.get_generation_series(lat, lon, Kilowatts::from(pv.peak())).await?;
    let outcome = battery.map(|params| simulate(&series, derived.capacity, params));
    if let Some(outcome) = &outcome {
        info!(
            sent = %MegawattHours::from(outcome.sent_to_battery),
            consumed = %MegawattHours::from(outcome.consumed_from_battery),
            curtailed = %MegawattHours::from(outcome.curtailed),
            losses = %MegawattHours::from(outcome.efficiency_losses()),
            "battery summary",
        );
    }
    let allocations =
        allocate(&series, outcome.as_ref(), derived.capacity, derived.required_annual)?;
    Ok(allocations)
}
