use std::{error::Error, fs, thread, time::Instant};

use log::LevelFilter;
use mimalloc::MiMalloc;
use simplelog::{Config, SimpleLogger};
use tempseries::parser::load_series;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn log_level() -> LevelFilter {
    std::env::var("TEMPSERIES_LOG")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(LevelFilter::Info)
}

fn threads() -> Result<usize, Box<dyn Error>> {
    match std::env::var("THREADS") {
        Ok(value) => Ok(value.parse()?),
        Err(_) => Ok(thread::available_parallelism().map_or(1, |n| n.get())),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let _ = SimpleLogger::init(log_level(), Config::default());

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "measurements.txt".to_string());
    let threads = threads()?;
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()?;
    log::info!("Loading {} using {} threads", path, threads);

    let started = Instant::now();
    let input = fs::read(&path)?;
    let series = load_series(&input, threads)?;
    log::info!("Loaded {} readings in {:?}", series.len(), started.elapsed());

    let stats = series.summary_statistics()?;
    println!("{}", stats);
    println!("deviation={:.3}", stats.deviation());
    println!("closest to zero={:.1}", series.find_temp_closest_to_zero()?);
    Ok(())
}
