pub mod accumulator;
pub mod allocation;
pub mod battery;
pub mod demand;
pub mod error;
pub mod params;
pub mod scenario;
pub mod series;
pub mod weighting;
