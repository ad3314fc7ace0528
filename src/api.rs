pub mod engine;
pub mod geocoding;
pub mod pvgis;
