use std::str::from_utf8;

use rayon::prelude::*;

use crate::{error::LoadError, series::TemperatureSeries};

// Either `value` or `station;value`; the station name is not kept.
fn parse_line(line: &[u8]) -> Option<f64> {
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    let value = match memchr::memrchr(b';', line) {
        Some(split) => &line[split + 1..],
        None => line,
    };
    from_utf8(value).ok()?.trim().parse().ok()
}

fn is_blank(line: &[u8]) -> bool {
    line.iter().all(u8::is_ascii_whitespace)
}

/// Parses newline separated readings. Blank lines are skipped; line numbers in errors
/// start at 1.
pub fn parse_readings(chunk: &[u8]) -> Result<Vec<f64>, LoadError> {
    let mut readings = Vec::new();
    let mut start = 0;
    let ends = memchr::memchr_iter(b'\n', chunk).chain(std::iter::once(chunk.len()));
    for (index, end) in ends.enumerate() {
        let line = &chunk[start..end];
        start = end + 1;
        if is_blank(line) {
            continue;
        }
        let reading = parse_line(line).ok_or(LoadError::Parse { line: index + 1 })?;
        readings.push(reading);
    }
    Ok(readings)
}

/// Splits `input` into up to `chunk_count` newline aligned chunks.
pub fn split_chunks(input: &[u8], chunk_count: usize) -> Vec<&[u8]> {
    let chunk_length = (input.len() / chunk_count.max(1)).max(1);
    let mut chunks = Vec::with_capacity(chunk_count);
    let mut start = 0;
    while start < input.len() {
        let mut end = usize::min(start + chunk_length, input.len());
        if end < input.len() {
            end = match memchr::memchr(b'\n', &input[end..]) {
                Some(extra) => end + extra + 1,
                None => input.len(),
            };
        }
        chunks.push(&input[start..end]);
        start = end;
    }
    chunks
}

/// Like [`parse_readings`], but parses newline aligned chunks on the rayon pool.
/// Readings keep their order in `input`.
pub fn parse_readings_parallel(input: &[u8], chunk_count: usize) -> Result<Vec<f64>, LoadError> {
    let chunks = split_chunks(input, chunk_count);
    let parsed: Vec<Result<Vec<f64>, LoadError>> =
        chunks.par_iter().map(|chunk| parse_readings(chunk)).collect();

    let mut readings = Vec::with_capacity(parsed.iter().flatten().map(Vec::len).sum());
    let mut lines_before = 0;
    for (chunk, result) in chunks.iter().zip(parsed) {
        match result {
            Ok(chunk_readings) => readings.extend(chunk_readings),
            Err(LoadError::Parse { line }) => {
                return Err(LoadError::Parse {
                    line: lines_before + line,
                })
            }
            Err(error) => return Err(error),
        }
        lines_before += memchr::memchr_iter(b'\n', chunk).count();
    }
    Ok(readings)
}

/// Parses `input` in parallel and appends every reading to a new series as one batch, so a
/// single reading below absolute zero rejects the whole input.
pub fn load_series(input: &[u8], chunk_count: usize) -> Result<TemperatureSeries, LoadError> {
    let readings = parse_readings_parallel(input, chunk_count)?;
    Ok(TemperatureSeries::from_readings(&readings)?)
}
