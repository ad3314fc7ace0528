use clap::Parser;

use crate::{
    api::{geocoding, pvgis},
    cli::GeocodingArgs,
    core::{
        allocation::{allocate, Granularity},
        battery::{simulate, BatteryParameters},
        demand::HOURS_PER_YEAR,
    },
    prelude::*,
    quantity::{
        energy::{MegawattHours, WattHours},
        power::{Kilowatts, Megawatts, Watts},
    },
    tables::build_allocation_table,
};

#[derive(Parser)]
pub struct PvArgs {
    /// City name to geocode, alternative to `--lat`/`--lon`.
    #[clap(long, conflicts_with_all = ["lat", "lon"], required_unless_present = "lat")]
    pub city: Option<String>,

    /// Latitude of the PV farm in decimal degrees.
    #[clap(long, requires = "lon")]
    pub lat: Option<f64>,

    /// Longitude of the PV farm in decimal degrees.
    #[clap(long, requires = "lat")]
    pub lon: Option<f64>,

    /// Peak capacity of the PV farm.
    #[clap(long = "pv-capacity-mw", default_value = "100.0")]
    pub pv_capacity_mw: f64,

    /// Electrolyzer capacity, the hourly allocation ceiling.
    #[clap(long = "electrolyzer-capacity-mw", default_value = "20.0")]
    pub electrolyzer_capacity_mw: f64,

    /// Share of the year the electrolyzer actually runs.
    #[clap(long = "capacity-factor", default_value = "0.95")]
    pub capacity_factor: f64,

    /// Granularity to highlight in the allocation table.
    #[clap(long, value_enum, default_value = "daily")]
    pub granularity: Granularity,

    /// Battery charge/discharge power limit, enables the battery pass.
    #[clap(long = "battery-power-mw", requires = "battery_capacity_mwh")]
    pub battery_power_mw: Option<f64>,

    /// Battery storage capacity.
    #[clap(long = "battery-capacity-mwh", requires = "battery_power_mw")]
    pub battery_capacity_mwh: Option<f64>,

    #[clap(flatten)]
    pub geocoding: GeocodingArgs,
}

#[instrument(skip_all)]
pub async fn pv(args: &PvArgs) -> Result {
    ensure!(args.pv_capacity_mw > 0.0, "the PV capacity must be positive");
    ensure!(args.electrolyzer_capacity_mw > 0.0, "the electrolyzer capacity must be positive");
    ensure!(
        args.capacity_factor > 0.0 && args.capacity_factor <= 1.0,
        "the capacity factor must be within (0, 1]",
    );

    let (lat, lon) = match (&args.city, args.lat, args.lon) {
        (_, Some(lat), Some(lon)) => (lat, lon),
        (Some(city), _, _) => {
            let api_key = args
                .geocoding
                .opencage_api_key
                .as_ref()
                .context("an OpenCage API key is required to geocode a city name")?;
            geocoding::Client::new(api_key.clone())?.get_coordinates(city).await?
        }
        _ => bail!("either a city or a pair of coordinates is required"),
    };

    let series = pvgis::Client::new()?
        .get_generation_series(lat, lon, Kilowatts::from(Megawatts(args.pv_capacity_mw)))
        .await?;
    info!(total = %MegawattHours::from(series.total()), "fetched the PV profile");

    let capacity = Watts::from(Megawatts(args.electrolyzer_capacity_mw));
    let required_annual = capacity * HOURS_PER_YEAR * args.capacity_factor;

    let outcome = match (args.battery_power_mw, args.battery_capacity_mwh) {
        (Some(power_mw), Some(capacity_mwh)) => {
            let params = BatteryParameters::builder()
                .power_limit(Watts::from(Megawatts(power_mw)))
                .capacity(WattHours(capacity_mwh * 1_000_000.0))
                .build()?;
            let outcome = simulate(&series, capacity, &params);
            info!(
                sent = %MegawattHours::from(outcome.sent_to_battery),
                consumed = %MegawattHours::from(outcome.consumed_from_battery),
                curtailed = %MegawattHours::from(outcome.curtailed),
                losses = %MegawattHours::from(outcome.efficiency_losses()),
                "battery summary",
            );
            Some(outcome)
        }
        _ => None,
    };

    let allocations = allocate(&series, outcome.as_ref(), capacity, required_annual)?;
    println!("{}", build_allocation_table(&allocations, args.granularity));
    Ok(())
}
