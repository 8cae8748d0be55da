use log::{debug, warn};

use crate::{
    error::{Result, SeriesError},
    statistics::{Accumulator, StatisticsSnapshot},
};

/// Absolute zero; no reading may be colder.
pub const MIN_TEMPERATURE: f64 = -273.0;

/// Two distances closer than this are treated as equal when picking the closest reading.
pub const CLOSEST_EPSILON: f64 = 1e-9;

/// An append-only series of temperature readings.
///
/// Every query recomputes from the stored readings and fails with
/// [`SeriesError::EmptySeries`] while the series holds nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemperatureSeries {
    readings: Vec<f64>,
}

impl TemperatureSeries {
    pub fn new() -> Self {
        Self {
            readings: Vec::new(),
        }
    }

    /// Builds a series from an initial batch, with the same validation as [`append`](Self::append).
    pub fn from_readings(temperatures: &[f64]) -> Result<Self> {
        let mut series = Self::new();
        series.append(temperatures)?;
        Ok(series)
    }

    /// Appends the whole batch and returns the new length.
    ///
    /// If any value is below [`MIN_TEMPERATURE`] (or is NaN) nothing is appended.
    pub fn append(&mut self, temperatures: &[f64]) -> Result<usize> {
        if let Some(&invalid) = temperatures.iter().find(|t| !(**t >= MIN_TEMPERATURE)) {
            warn!(
                "rejecting batch of {} readings: {} is below absolute zero",
                temperatures.len(),
                invalid
            );
            return Err(SeriesError::DomainViolation(invalid));
        }

        self.grow(temperatures.len());
        self.readings.extend_from_slice(temperatures);
        Ok(self.readings.len())
    }

    // From empty storage, allocate exactly the batch; otherwise double until it fits.
    fn grow(&mut self, additional: usize) {
        let length = self.readings.len();
        let needed = length + additional;
        let capacity = self.readings.capacity();
        if needed <= capacity {
            return;
        }

        let mut target = if capacity == 0 { additional } else { capacity };
        while target < needed {
            target = target.saturating_mul(2);
        }
        debug!("growing series capacity from {} to {}", capacity, target);
        self.readings.reserve_exact(target - length);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.readings.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.readings.capacity()
    }

    /// Readings in insertion order.
    #[inline]
    pub fn readings(&self) -> &[f64] {
        &self.readings
    }

    pub fn average(&self) -> Result<f64> {
        Ok(self.summary_statistics()?.average())
    }

    /// Population standard deviation.
    pub fn deviation(&self) -> Result<f64> {
        Ok(self.summary_statistics()?.deviation())
    }

    pub fn min(&self) -> Result<f64> {
        Ok(self.summary_statistics()?.min())
    }

    pub fn max(&self) -> Result<f64> {
        Ok(self.summary_statistics()?.max())
    }

    /// Average, deviation, min and max in one pass over the readings.
    pub fn summary_statistics(&self) -> Result<StatisticsSnapshot> {
        let (&first, rest) = self
            .readings
            .split_first()
            .ok_or(SeriesError::EmptySeries)?;
        let mut accumulator = Accumulator::new(first);
        for &temperature in rest {
            accumulator.update_single(temperature);
        }
        Ok(accumulator.snapshot())
    }

    pub fn find_temp_closest_to_zero(&self) -> Result<f64> {
        self.find_temp_closest_to_value(0.0)
    }

    /// The reading nearest to `target`. Between equally close readings, the one above
    /// `target` wins.
    pub fn find_temp_closest_to_value(&self, target: f64) -> Result<f64> {
        if self.readings.is_empty() {
            return Err(SeriesError::EmptySeries);
        }

        let distance = |temperature: f64| (temperature - target).abs();
        let min_diff = self
            .readings
            .iter()
            .map(|&temperature| distance(temperature))
            .fold(f64::INFINITY, f64::min);

        // Every reading within epsilon of the best distance is a candidate; pick among them
        // above target first, then nearest, then by value.
        self.readings
            .iter()
            .copied()
            .filter(|&temperature| !(distance(temperature) - min_diff > CLOSEST_EPSILON))
            .min_by(|a, b| {
                (*a <= target)
                    .cmp(&(*b <= target))
                    .then_with(|| distance(*a).total_cmp(&distance(*b)))
                    .then_with(|| a.total_cmp(b))
            })
            .ok_or(SeriesError::EmptySeries)
    }

    /// Readings strictly below `bound`.
    pub fn find_temps_less_than(&self, bound: f64) -> Result<Vec<f64>> {
        self.find_temps_where(|temperature| temperature < bound)
    }

    /// Readings strictly above `bound`.
    pub fn find_temps_greater_than(&self, bound: f64) -> Result<Vec<f64>> {
        self.find_temps_where(|temperature| temperature > bound)
    }

    pub fn find_temps_where<P>(&self, predicate: P) -> Result<Vec<f64>>
    where
        P: Fn(f64) -> bool,
    {
        if self.readings.is_empty() {
            return Err(SeriesError::EmptySeries);
        }
        Ok(self
            .readings
            .iter()
            .copied()
            .filter(|&temperature| predicate(temperature))
            .collect())
    }
}

impl TryFrom<&[f64]> for TemperatureSeries {
    type Error = SeriesError;

    fn try_from(temperatures: &[f64]) -> Result<Self> {
        Self::from_readings(temperatures)
    }
}

impl TryFrom<Vec<f64>> for TemperatureSeries {
    type Error = SeriesError;

    fn try_from(temperatures: Vec<f64>) -> Result<Self> {
        if let Some(&invalid) = temperatures.iter().find(|t| !(**t >= MIN_TEMPERATURE)) {
            return Err(SeriesError::DomainViolation(invalid));
        }
        Ok(Self {
            readings: temperatures,
        })
    }
}
