use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result as Result;
use brc_trie::config::{DEFAULT_BLOCK_SIZE, DEFAULT_CHANNEL_CAPACITY};
use brc_trie::{Config, InputMode, TrailingLine};
use clap::Parser;
use log::info;

#[derive(Parser, Debug)]
#[command(version, about = "Min/mean/max temperature per weather station")]
struct Args {
    /// Measurements file, one `<station>;<temperature>` per line
    #[arg(long, default_value = "measurements.txt")]
    measurements: PathBuf,

    /// Write the summary here instead of standard output
    #[arg(long)]
    output: Option<PathBuf>,

    /// Read block size in bytes
    #[arg(long, default_value_t = DEFAULT_BLOCK_SIZE)]
    block_size: usize,

    /// Memory-map the input instead of reading it in blocks
    #[arg(long)]
    mmap: bool,

    /// Fail if the last line is not terminated by a newline
    #[arg(long)]
    require_trailing_newline: bool,

    /// Entries buffered between the tree walk and the writer
    #[arg(long, default_value_t = DEFAULT_CHANNEL_CAPACITY)]
    channel_capacity: usize,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Config {
            input: args.measurements,
            output: args.output,
            block_size: args.block_size,
            trailing_line: match args.require_trailing_newline {
                true => TrailingLine::Reject,
                false => TrailingLine::Implicit,
            },
            input_mode: match args.mmap {
                true => InputMode::Mapped,
                false => InputMode::Buffered,
            },
            channel_capacity: args.channel_capacity,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let config = Config::from(Args::parse());

    let timer = Instant::now();
    brc_trie::run(&config)?;
    info!("finished in {:?}", timer.elapsed());
    Ok(())
}
