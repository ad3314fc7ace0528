use chrono::{Datelike, NaiveDate, NaiveDateTime};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{
    core::{battery::BatteryOutcome, error::DegenerateInputError, series::GenerationSeries},
    quantity::{energy::WattHours, power::Watts, time::Hours},
};

/// Temporal window within which renewable generation is capped at the
/// electrolyzer's consumption ceiling.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Hourly,
    Daily,
    Monthly,
    Annual,
}

impl Granularity {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Hourly => "Hour",
            Self::Daily => "Day",
            Self::Monthly => "Month",
            Self::Annual => "Year",
        }
    }
}

/// Grid/renewable split of the electrolyzer's demand.
///
/// Both shares are clamped to `[0, 1]` (saturation is a modeling choice, not an
/// error condition), and they always sum to exactly 1.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ElectricitySplit {
    grid: f64,
    renewable: f64,
}

impl ElectricitySplit {
    pub const GRID_ONLY: Self = Self { grid: 1.0, renewable: 0.0 };

    pub fn from_grid_share(grid: f64) -> Self {
        let grid = grid.clamp(0.0, 1.0);
        Self { grid, renewable: 1.0 - grid }
    }

    pub const fn grid(self) -> f64 {
        self.grid
    }

    pub const fn renewable(self) -> f64 {
        self.renewable
    }
}

/// The split at each of the four granularities. The caller picks exactly one as
/// operative; the others are informational.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Allocations {
    pub hourly: ElectricitySplit,
    pub daily: ElectricitySplit,
    pub monthly: ElectricitySplit,
    pub annual: ElectricitySplit,
}

impl Allocations {
    pub const fn select(&self, granularity: Granularity) -> ElectricitySplit {
        match granularity {
            Granularity::Hourly => self.hourly,
            Granularity::Daily => self.daily,
            Granularity::Monthly => self.monthly,
            Granularity::Annual => self.annual,
        }
    }
}

/// Compute the grid/renewable splits for all four granularities.
///
/// With a battery, the hourly/daily/monthly windows run over the
/// battery-adjusted supply series (generation net of charging, plus
/// discharge), and the annual (uncapped) credit drops the battery round-trip
/// losses. An uncapped window total thus never exceeds the annual credit, and
/// a zero-capacity battery reproduces the uncoupled results exactly.
pub fn allocate(
    series: &GenerationSeries,
    battery: Option<&BatteryOutcome>,
    capacity: Watts,
    required_annual: WattHours,
) -> Result<Allocations, DegenerateInputError> {
    if required_annual <= WattHours::ZERO {
        return Err(DegenerateInputError);
    }

    let supply = battery.map_or_else(|| series.values(), |outcome| outcome.supply.as_slice());
    let hourly_ceiling = capacity * Hours(1.0);
    let daily_ceiling = capacity * Hours(24.0);

    let hourly_credit: WattHours = supply.iter().map(|value| (*value).min(hourly_ceiling)).sum();
    let daily_credit = windowed_credit(series.timestamps(), supply, |timestamp| timestamp.date())
        .into_iter()
        .map(|(_, total)| total.min(daily_ceiling))
        .sum();
    let monthly_credit = windowed_credit(series.timestamps(), supply, |timestamp| {
        (timestamp.year(), timestamp.month())
    })
    .into_iter()
    .map(|((year, month), total)| total.min(capacity * Hours(24.0 * days_in_month(year, month))))
    .sum();
    let annual_credit = match battery {
        Some(outcome) => series.total() - outcome.efficiency_losses(),
        None => series.total(),
    };

    let split = |credit: WattHours| {
        ElectricitySplit::from_grid_share((required_annual - credit) / required_annual)
    };
    Ok(Allocations {
        hourly: split(hourly_credit),
        daily: split(daily_credit),
        monthly: split(monthly_credit),
        annual: split(annual_credit),
    })
}

/// Sum the supply over consecutive calendar windows.
fn windowed_credit<K: PartialEq>(
    timestamps: &[NaiveDateTime],
    supply: &[WattHours],
    key: impl Fn(&NaiveDateTime) -> K,
) -> Vec<(K, WattHours)> {
    timestamps
        .iter()
        .zip(supply)
        .chunk_by(|(timestamp, _)| key(timestamp))
        .into_iter()
        .map(|(window, hours)| (window, hours.map(|(_, value)| *value).sum()))
        .collect_vec()
}

fn days_in_month(year: i32, month: u32) -> f64 {
    let first = NaiveDate::from_ymd_opt(year, month, 1);
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    match (first, next) {
        (Some(first), Some(next)) => (next - first).num_days() as f64,
        _ => 30.0,
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use chrono::{Datelike, Timelike};

    use super::*;
    use crate::core::{
        battery::{simulate, BatteryParameters},
        series::tests::series_from,
    };

    const CAPACITY: Watts = Watts(1000.0);

    fn required(capacity_factor: f64) -> WattHours {
        CAPACITY * Hours(8760.0) * capacity_factor
    }

    /// Every split sums to exactly 1, at every granularity.
    #[test]
    fn shares_sum_to_one() {
        let series = series_from(|timestamp| WattHours(f64::from(timestamp.hour()) * 300.0));
        let allocations = allocate(&series, None, CAPACITY, required(0.95)).unwrap();
        for split in
            [allocations.hourly, allocations.daily, allocations.monthly, allocations.annual]
        {
            assert_eq!(split.grid() + split.renewable(), 1.0);
            assert!((0.0..=1.0).contains(&split.grid()));
        }
    }

    /// Tightening the window monotonically tightens the cap.
    #[test]
    fn renewable_share_tightens_with_granularity() {
        let series = series_from(|timestamp| {
            if (8..16).contains(&timestamp.hour()) { WattHours(3000.0) } else { WattHours::ZERO }
        });
        let allocations = allocate(&series, None, CAPACITY, required(0.95)).unwrap();
        assert!(allocations.annual.renewable() >= allocations.monthly.renewable());
        assert!(allocations.monthly.renewable() >= allocations.daily.renewable());
        assert!(allocations.daily.renewable() > allocations.hourly.renewable());
    }

    /// A flat profile equal to the capacity never hits any cap, so all four
    /// granularities agree.
    #[test]
    fn flat_profile_is_granularity_invariant() {
        let series = series_from(|_| WattHours(1000.0));
        let allocations = allocate(&series, None, CAPACITY, required(0.95)).unwrap();
        assert_eq!(allocations.hourly, allocations.daily);
        assert_eq!(allocations.daily, allocations.monthly);
        assert_eq!(allocations.monthly, allocations.annual);
        // Generation covers 1/0.95 of the demand, clamped to a full renewable share.
        assert_relative_eq!(allocations.hourly.renewable(), 1.0);
    }

    /// One day spiking far above capacity is credited in full annually but
    /// capped in every bounded window.
    #[test]
    fn spike_day_is_capped() {
        let series = series_from(|timestamp| {
            if timestamp.ordinal() == 100 { WattHours(20_000.0) } else { WattHours(500.0) }
        });
        let allocations = allocate(&series, None, CAPACITY, required(0.95)).unwrap();
        assert!(allocations.daily.renewable() < allocations.monthly.renewable());
        assert!(allocations.monthly.renewable() < allocations.annual.renewable());
    }

    /// Monotonicity survives battery coupling: cycled energy is credited once,
    /// on discharge, so an unbound daily or monthly window never collects more
    /// than the annual credit.
    #[test]
    fn battery_coupled_shares_tighten_with_granularity() {
        let series = series_from(|timestamp| {
            if (8..16).contains(&timestamp.hour()) { WattHours(2000.0) } else { WattHours::ZERO }
        });
        // Oversized storage so no window cap binds on the delivered energy.
        let params = BatteryParameters::builder()
            .power_limit(Watts(500.0))
            .capacity(WattHours(10_000_000.0))
            .build()
            .unwrap();
        let outcome = simulate(&series, CAPACITY, &params);
        let allocations = allocate(&series, Some(&outcome), CAPACITY, required(0.95)).unwrap();
        assert!(allocations.annual.renewable() >= allocations.monthly.renewable());
        assert!(allocations.monthly.renewable() >= allocations.daily.renewable());
        assert!(allocations.daily.renewable() >= allocations.hourly.renewable());
        assert!(allocations.hourly.renewable() > 0.0);
    }

    /// Zero demand must surface as an error, never as a silent 0 or 1.
    #[test]
    fn zero_demand_is_degenerate() {
        let series = series_from(|_| WattHours(1000.0));
        assert!(allocate(&series, None, CAPACITY, WattHours::ZERO).is_err());
    }

    /// A zero-capacity battery is numerically identical to the no-battery path.
    #[test]
    fn zero_capacity_battery_matches_uncoupled() {
        let series = series_from(|timestamp| {
            if (8..16).contains(&timestamp.hour()) { WattHours(2500.0) } else { WattHours::ZERO }
        });
        let params = BatteryParameters::builder()
            .power_limit(Watts(500.0))
            .capacity(WattHours::ZERO)
            .build()
            .unwrap();
        let outcome = simulate(&series, CAPACITY, &params);
        let coupled = allocate(&series, Some(&outcome), CAPACITY, required(0.95)).unwrap();
        let uncoupled = allocate(&series, None, CAPACITY, required(0.95)).unwrap();
        assert_eq!(coupled, uncoupled);
    }

    /// The battery lifts the hourly share by exactly the consumed energy.
    #[test]
    fn battery_raises_hourly_share() {
        let series = series_from(|timestamp| {
            if (8..16).contains(&timestamp.hour()) { WattHours(2500.0) } else { WattHours::ZERO }
        });
        let params = BatteryParameters::builder()
            .power_limit(Watts(1000.0))
            .capacity(WattHours(8000.0))
            .build()
            .unwrap();
        let outcome = simulate(&series, CAPACITY, &params);
        let coupled = allocate(&series, Some(&outcome), CAPACITY, required(0.95)).unwrap();
        let uncoupled = allocate(&series, None, CAPACITY, required(0.95)).unwrap();
        assert!(coupled.hourly.renewable() > uncoupled.hourly.renewable());
        let uplift = outcome.consumed_from_battery / required(0.95);
        assert_relative_eq!(
            coupled.hourly.renewable(),
            uncoupled.hourly.renewable() + uplift,
            max_relative = 1e-9,
        );
    }
}
