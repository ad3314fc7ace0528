use std::time::Duration;

use chrono::NaiveDateTime;
use reqwest::Url;

use crate::{
    core::{error::DataFetchError, series::GenerationSeries},
    prelude::*,
    quantity::{energy::WattHours, power::Kilowatts},
};

const BASE_URL: &str = "https://re.jrc.ec.europa.eu/api/v5_2/seriescalc";

/// PVGIS serves hourly data for this (leap) year; the Feb-29 rows are dropped
/// by the series loader.
const DATA_YEAR: &str = "2020";

const TIMESTAMP_FORMAT: &str = "%Y%m%d:%H%M";

/// Client for the PVGIS hourly series API.
pub struct Client {
    inner: reqwest::Client,
}

impl Client {
    pub fn new() -> Result<Self, DataFetchError> {
        let inner = reqwest::Client::builder().timeout(Duration::from_secs(10)).build()?;
        Ok(Self { inner })
    }

    /// Fetch one year of hourly PV generation for the location and peak capacity.
    #[instrument(skip_all, fields(lat = lat, lon = lon, peak = %peak))]
    pub async fn get_generation_series(
        &self,
        lat: f64,
        lon: f64,
        peak: Kilowatts,
    ) -> Result<GenerationSeries, DataFetchError> {
        let url = Url::parse_with_params(
            BASE_URL,
            &[
                ("lat", format!("{lat:.3}")),
                ("lon", format!("{lon:.3}")),
                ("raddatabase", "PVGIS-SARAH2".to_string()),
                ("outputformat", "csv".to_string()),
                ("usehorizon", "1".to_string()),
                ("startyear", DATA_YEAR.to_string()),
                ("endyear", DATA_YEAR.to_string()),
                ("mountingplace", "free".to_string()),
                ("optimalangles", "1".to_string()),
                ("trackingtype", "0".to_string()),
                ("pvcalculation", "1".to_string()),
                ("pvtechchoice", "crystSi".to_string()),
                ("peakpower", format!("{}", peak.0)),
                ("loss", "14".to_string()),
                ("components", "1".to_string()),
            ],
        )
        .map_err(|error| DataFetchError::new(format!("invalid PVGIS URL: {error}")))?;

        let body = self
            .inner
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        let entries = parse_series_csv(&body)?;
        let series = GenerationSeries::try_new(entries)?;
        info!(total = %series.total(), "fetched the generation series");
        Ok(series)
    }
}

/// Parse the PVGIS CSV payload: a free-form metadata preamble, a header line
/// starting with `time`, hourly rows, and a blank line before the footer.
fn parse_series_csv(body: &str) -> Result<Vec<(NaiveDateTime, WattHours)>, DataFetchError> {
    let mut entries = Vec::new();
    let mut in_data = false;
    for line in body.lines() {
        let line = line.trim();
        if !in_data {
            in_data = line.starts_with("time,");
            continue;
        }
        if line.is_empty() {
            break;
        }
        let mut columns = line.split(',');
        let (Some(timestamp), Some(power)) = (columns.next(), columns.next()) else {
            return Err(DataFetchError::new(format!("malformed PVGIS row: `{line}`")));
        };
        let timestamp = NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT)
            .map_err(|error| DataFetchError::new(format!("bad timestamp `{timestamp}`: {error}")))?;
        let power: f64 = power
            .parse()
            .map_err(|error| DataFetchError::new(format!("bad power value `{power}`: {error}")))?;
        // Hourly resolution: the power reading doubles as the energy for that hour.
        entries.push((timestamp, WattHours(power)));
    }
    if entries.is_empty() {
        return Err(DataFetchError::new("no data rows in the PVGIS response"));
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike};

    use super::*;

    #[test]
    fn parses_rows_after_the_header() {
        let body = "Latitude (decimal degrees):\t43.438\n\
                    Longitude (decimal degrees):\t4.945\n\
                    Slope: 35 deg. (optimum)\n\
                    time,P,G(b),G(d),G(r),H_sun,T2m,WS10m,Int\n\
                    20200101:0010,0.0,0.0,0.0,0.0,0.0,8.07,3.1,0.0\n\
                    20200101:0110,1250.5,0.0,0.0,0.0,0.0,7.86,3.17,0.0\n\
                    \n\
                    P: PV system power (W)\n";
        let entries = parse_series_csv(body).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].0.month(), 1);
        assert_eq!(entries[1].0.hour(), 1);
        assert_eq!(entries[1].1, WattHours(1250.5));
    }

    #[test]
    fn empty_payload_is_an_error() {
        assert!(parse_series_csv("no header here\n").is_err());
    }

    #[test]
    fn garbage_power_value_is_an_error() {
        let body = "time,P\n20200101:0010,not-a-number\n\n";
        assert!(parse_series_csv(body).is_err());
    }
}
