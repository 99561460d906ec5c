//! Index and inspect an oxDNA trajectory, quickly.
use std::io::{BufWriter, Write};
use std::num::{NonZeroU64, ParseIntError};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Instant;

use clap::Parser;
use oxtraj::{
    index_path, ConfSelection, IndexOptions, Range, ScanPolicy, SourceKind, TrajectoryReader,
    DEFAULT_WINDOW_SIZE,
};
use tracing::{info, Level};

fn conf_selection_parser(selection: &str) -> Result<ConfSelection, ParseIntError> {
    let mut components = selection.split(':');
    let start = components
        .next()
        .filter(|s| !s.is_empty())
        .map(|s| s.parse())
        .transpose()?;
    let end = components
        .next()
        .filter(|s| !s.is_empty())
        .map(|s| s.parse())
        .transpose()?;
    let step = components
        .next()
        .filter(|s| !s.is_empty())
        .map(NonZeroU64::from_str)
        .transpose()?;
    Ok(ConfSelection::Range(Range::new(start, end, step)))
}

/// Print the configuration index of an oxDNA trajectory, or summaries of its configurations.
#[derive(Parser)]
struct Args {
    /// Input path (oxDNA trajectory).
    input: PathBuf,

    /// Number of bytes scanned at a time while indexing.
    #[arg(short, long, default_value_t = DEFAULT_WINDOW_SIZE)]
    window_size: usize,

    /// Skip ahead after each configuration start while indexing.
    ///
    /// Only safe when all configurations are of similar size.
    #[arg(long)]
    greedy: bool,

    /// Memory-map the trajectory while indexing instead of reading it in windows.
    #[arg(long)]
    mmap: bool,

    /// Number of particles per configuration, from the topology.
    ///
    /// When given, the selected configurations are parsed and their time, box and energy are
    /// printed. Otherwise, the `offset`, `size` and `id` of each selected configuration are
    /// printed.
    #[arg(short, long)]
    particles: Option<usize>,

    /// Configuration selection in the format `start:stop:step`. Each of these values is optional.
    ///
    /// - `:100` will select the first 100 configurations.
    ///
    /// - `3:14` will select the 4th up to and including the 14th configuration, 11 in total.
    ///
    /// - `:100:2` will select every second configuration from the first 100, 50 in total.
    #[arg(short, long, value_parser = conf_selection_parser)]
    selection: Option<ConfSelection>,

    /// Log more (-v for info, -vv for debug, -vvv for trace). Logs are written to stderr.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> oxtraj::Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let options = IndexOptions::default()
        .with_window_size(args.window_size)
        .with_scan(if args.greedy {
            ScanPolicy::Greedy
        } else {
            ScanPolicy::Exhaustive
        });
    let source = if args.mmap {
        SourceKind::Mapped
    } else {
        SourceKind::Buffered
    };

    let start = Instant::now();
    let confs = index_path(&args.input, source, &options)?;
    info!(
        nconfs = confs.len(),
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        path = %args.input.display(),
        "indexed"
    );

    let selection = args.selection.unwrap_or_default();
    let selected = confs
        .iter()
        .map_while(|info| selection.is_included(info.id).map(|included| (info, included)))
        .filter_map(|(info, included)| included.then_some(info));

    let mut stdout = BufWriter::new(std::io::stdout().lock());
    match args.particles {
        None => {
            for info in selected {
                writeln!(stdout, "{}\t{}\t{}", info.offset, info.size, info.id)?;
            }
        }
        Some(natoms) => {
            let mut reader = TrajectoryReader::open(&args.input, natoms)?;
            for info in selected {
                let conf = reader.read_conf(info)?;
                let [bx, by, bz] = conf.boxvec().to_array();
                let [e0, e1, e2] = conf.energy().to_array();
                writeln!(
                    stdout,
                    "{}\t{}\t{bx} {by} {bz}\t{e0} {e1} {e2}",
                    info.id,
                    conf.time(),
                )?;
            }
        }
    }
    stdout.flush()?;

    Ok(())
}
