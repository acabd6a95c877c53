//! Min/mean/max per station over `<station>;<temperature>` lines.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::time::Instant;

use anyhow::{Context, Result};
use log::info;

pub mod config;
pub mod dictionary;
pub mod error;
pub mod ingest;
pub mod measurement;
pub mod reader;
pub mod record;
pub mod summary;
pub mod temperature;

pub use config::{Config, InputMode, TrailingLine};
pub use dictionary::StationTrie;
pub use error::{Error, RecordError};
pub use measurement::Measurement;

/// Aggregates `config.input` and writes the summary to `config.output`, or
/// to standard output followed by a newline.
pub fn run(config: &Config) -> Result<()> {
    config.validate()?;

    let file = File::open(&config.input)
        .with_context(|| format!("cannot open {}", config.input.display()))?;
    info!("reading {} ({:?})", config.input.display(), config.input_mode);

    let timer = Instant::now();
    let stations = ingest::ingest_file(&file, config)
        .with_context(|| format!("failed to aggregate {}", config.input.display()))?;
    drop(file);
    info!(
        "aggregated {} stations ({} nodes) in {:?}",
        stations.len(),
        stations.node_count(),
        timer.elapsed()
    );

    let timer = Instant::now();
    match &config.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create {}", path.display()))?;
            let mut out = BufWriter::new(file);
            summary::write_summary_pipelined(&stations, &mut out, config.channel_capacity)
                .and_then(|()| out.flush())
                .with_context(|| format!("cannot write {}", path.display()))?;
        }
        None => {
            let stdout = io::stdout();
            let mut lock = BufWriter::new(stdout.lock());
            summary::write_summary_pipelined(&stations, &mut lock, config.channel_capacity)
                .and_then(|()| writeln!(lock))
                .and_then(|()| lock.flush())
                .context("cannot write to standard output")?;
        }
    }
    info!("wrote summary in {:?}", timer.elapsed());

    Ok(())
}
