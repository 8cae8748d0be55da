use thiserror::Error;

pub type Result<T, E = SeriesError> = std::result::Result<T, E>;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SeriesError {
    #[error("temperature series is empty")]
    EmptySeries,
    #[error("series can't contain temperature {0} below absolute zero (-273)")]
    DomainViolation(f64),
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unable to read measurements: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: not a temperature reading")]
    Parse { line: usize },
    #[error(transparent)]
    Series(#[from] SeriesError),
}
