use derive_more::{Display, Error};

/// A plant parameter is outside its valid domain. Fatal: nothing is computed.
#[derive(Debug, Display, Error)]
#[display("invalid parameter: {message}")]
pub struct InvalidParameterError {
    pub message: String,
}

impl InvalidParameterError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// The required annual electricity is zero, so the allocation shares are undefined.
///
/// This is fatal to the scenario but leaves the result table untouched. It is never
/// silently coerced to an all-grid or all-renewable split.
#[derive(Debug, Display, Error)]
#[display("required annual electricity is zero, the allocation is undefined")]
pub struct DegenerateInputError;

/// An external data source (PVGIS, geocoder) is unavailable or returned garbage.
///
/// Recoverable: the caller degrades to a grid-only allocation.
#[derive(Debug, Display, Error)]
#[display("failed to fetch external data: {message}")]
pub struct DataFetchError {
    pub message: String,
}

impl DataFetchError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

impl From<reqwest::Error> for DataFetchError {
    fn from(error: reqwest::Error) -> Self {
        Self::new(error.to_string())
    }
}

/// The impact engine failed; the scenario result is not appended.
#[derive(Debug, Display, Error)]
#[display("impact engine failure: {message}")]
pub struct EngineError {
    pub message: String,
}

impl EngineError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}
