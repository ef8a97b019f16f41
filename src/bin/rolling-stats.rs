//! Rolling statistics over a numeric column read from stdin
//!
//! Run with: `printf '1\n2\n3\n' | cargo run --bin rolling-stats`
//!
//! Configure with the ROLLING_WINDOW, ROLLING_MIN_PERIODS, ROLLING_EPS,
//! ROLLING_PADDING and ROLLING_PARALLEL_THRESHOLD environment variables.
//! Set RUST_LOG (e.g. `RUST_LOG=rolling_analytics=trace`) to see engine logs.

use rolling_analytics::{RollingConfig, RollingSeries};
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let config = RollingConfig::from_env()?;
    tracing::info!(?config, "starting rolling-stats");

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(io::stdin());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "index\tvalue\tmean\tmax\tmin\tstd\tewm")?;

    let mut series = RollingSeries::new(config)?;
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        let Some(field) = record.get(0) else {
            continue;
        };
        let value: f64 = field
            .parse()
            .map_err(|err| format!("line {}: invalid number {:?}: {}", index + 1, field, err))?;

        match series.push(value) {
            Ok(s) => writeln!(
                out,
                "{}\t{}\t{}\t{}\t{}\t{}\t{}",
                index, value, s.mean, s.max, s.min, s.std, s.ewm
            )?,
            Err(err) => {
                tracing::debug!(index, error = %err, "statistics undefined");
                writeln!(out, "{}\t{}\tNaN\tNaN\tNaN\tNaN\tNaN", index, value)?
            }
        }
    }

    Ok(())
}
