//! Data models for the forecast report engine

mod location;
mod run;
mod series;

pub use location::{Coordinates, ForecastLocation, GridPoint};
pub use run::ModelRun;
pub use series::{HourlySeries, PrecipType};
