#[cfg(test)]
extern crate quickcheck;
#[cfg(test)]
#[macro_use(quickcheck)]
extern crate quickcheck_macros;

mod error;
pub mod parser;
mod series;
mod statistics;

pub use self::error::{LoadError, Result, SeriesError};
pub use self::series::{TemperatureSeries, CLOSEST_EPSILON, MIN_TEMPERATURE};
pub use self::statistics::StatisticsSnapshot;
