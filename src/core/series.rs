use chrono::{Datelike, NaiveDateTime};

use crate::{core::error::DataFetchError, quantity::energy::WattHours};

/// Hourly entries in one non-leap calendar year.
pub const SAMPLES_PER_YEAR: usize = 8760;

/// Hourly PV generation for exactly one calendar year.
///
/// Feb-29 rows are dropped on construction (not reindexed), so a leap-year
/// profile collapses to the same 8760-hour shape as a regular year. Immutable
/// once built.
pub struct GenerationSeries {
    timestamps: Vec<NaiveDateTime>,
    values: Vec<WattHours>,
}

impl GenerationSeries {
    pub fn try_new(
        entries: impl IntoIterator<Item = (NaiveDateTime, WattHours)>,
    ) -> Result<Self, DataFetchError> {
        let (timestamps, values): (Vec<_>, Vec<_>) = entries
            .into_iter()
            .filter(|(timestamp, _)| !(timestamp.month() == 2 && timestamp.day() == 29))
            .unzip();
        if timestamps.len() != SAMPLES_PER_YEAR {
            return Err(DataFetchError::new(format!(
                "expected {SAMPLES_PER_YEAR} hourly values for one year, got {}",
                timestamps.len(),
            )));
        }
        if timestamps.windows(2).any(|window| window[0] >= window[1]) {
            return Err(DataFetchError::new("generation series is not in chronological order"));
        }
        Ok(Self { timestamps, values })
    }

    pub fn timestamps(&self) -> &[NaiveDateTime] {
        &self.timestamps
    }

    pub fn values(&self) -> &[WattHours] {
        &self.values
    }

    /// Total generation over the year, before any capping.
    pub fn total(&self) -> WattHours {
        self.values.iter().copied().sum()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use chrono::NaiveDate;

    use super::*;

    /// An 8760-hour series over the non-leap year 2021 built from an hourly value function.
    pub(crate) fn series_from(value: impl Fn(&NaiveDateTime) -> WattHours) -> GenerationSeries {
        let start = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        let entries = (0..SAMPLES_PER_YEAR as i64)
            .map(|hour| start + chrono::TimeDelta::hours(hour))
            .map(|timestamp| {
                let value = value(&timestamp);
                (timestamp, value)
            });
        GenerationSeries::try_new(entries).unwrap()
    }

    #[test]
    fn leap_day_is_dropped() {
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        let entries = (0..8784_i64)
            .map(|hour| (start + chrono::TimeDelta::hours(hour), WattHours(1.0)));
        let series = GenerationSeries::try_new(entries).unwrap();
        assert_eq!(series.values().len(), SAMPLES_PER_YEAR);
        assert!(series
            .timestamps()
            .iter()
            .all(|timestamp| !(timestamp.month() == 2 && timestamp.day() == 29)));
    }

    #[test]
    fn short_series_rejected() {
        let start = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        let entries =
            (0..100_i64).map(|hour| (start + chrono::TimeDelta::hours(hour), WattHours(1.0)));
        assert!(GenerationSeries::try_new(entries).is_err());
    }

    #[test]
    fn unordered_series_rejected() {
        let start = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        let mut entries: Vec<_> = (0..SAMPLES_PER_YEAR as i64)
            .map(|hour| (start + chrono::TimeDelta::hours(hour), WattHours(1.0)))
            .collect();
        entries.swap(10, 11);
        assert!(GenerationSeries::try_new(entries).is_err());
    }

    #[test]
    fn total_sums_all_hours() {
        let series = series_from(|_| WattHours(2.0));
        assert_eq!(series.total(), WattHours(2.0 * 8760.0));
    }
}
