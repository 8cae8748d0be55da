use std::fmt;

/// Average, population standard deviation and extrema of a series, captured at query time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatisticsSnapshot {
    average: f64,
    deviation: f64,
    min: f64,
    max: f64,
}

impl StatisticsSnapshot {
    pub fn new(average: f64, deviation: f64, min: f64, max: f64) -> Self {
        Self {
            average,
            deviation,
            min,
            max,
        }
    }

    #[inline]
    pub fn average(&self) -> f64 {
        self.average
    }

    #[inline]
    pub fn deviation(&self) -> f64 {
        self.deviation
    }

    #[inline]
    pub fn variance(&self) -> f64 {
        self.deviation * self.deviation
    }

    #[inline]
    pub fn min(&self) -> f64 {
        self.min
    }

    #[inline]
    pub fn max(&self) -> f64 {
        self.max
    }
}

impl fmt::Display for StatisticsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}/{:.1}/{:.1}", self.min, self.average, self.max)
    }
}

/// Running min/max plus Welford mean and second moment.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Accumulator {
    min: f64,
    max: f64,
    mean: f64,
    m2: f64,
    count: u64,
}

impl Accumulator {
    #[inline]
    pub fn new(temperature: f64) -> Self {
        Self {
            min: temperature,
            max: temperature,
            mean: temperature,
            m2: 0.0,
            count: 1,
        }
    }

    #[inline]
    pub fn update_single(&mut self, temperature: f64) {
        self.min = f64::min(self.min, temperature);
        self.max = f64::max(self.max, temperature);
        self.count += 1;
        let delta = temperature - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (temperature - self.mean);
    }

    pub fn snapshot(&self) -> StatisticsSnapshot {
        // m2 can drift a hair below zero on near-constant input
        let variance = f64::max(self.m2 / self.count as f64, 0.0);
        StatisticsSnapshot::new(self.mean, variance.sqrt(), self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_reading_has_zero_deviation() {
        let stats = Accumulator::new(-12.5).snapshot();
        assert_eq!(stats.deviation(), 0.0);
        assert_eq!(stats.average(), -12.5);
        assert_eq!(stats.min(), -12.5);
        assert_eq!(stats.max(), -12.5);
    }

    #[test]
    fn population_deviation() {
        let mut acc = Accumulator::new(2.0);
        for t in [4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
            acc.update_single(t);
        }
        let stats = acc.snapshot();
        assert!((stats.average() - 5.0).abs() < 1e-12);
        assert!((stats.deviation() - 2.0).abs() < 1e-12);
        assert!((stats.variance() - 4.0).abs() < 1e-12);
        assert_eq!(stats.min(), 2.0);
        assert_eq!(stats.max(), 9.0);
    }

    #[test]
    fn display_matches_min_mean_max() {
        let stats = StatisticsSnapshot::new(5.24, 1.0, -3.0, 12.0);
        assert_eq!(stats.to_string(), "-3.0/5.2/12.0");
    }
}
