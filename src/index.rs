use std::fs::File;
use std::io::{self, Seek};
use std::path::Path;
use std::time::Instant;

use tracing::{debug, trace, warn};

use crate::chunk::{ChunkSource, MappedBlocks, ReadBlocks, DEFAULT_WINDOW_SIZE};
use crate::scan::{ScanPolicy, Scanner};

/// The byte that opens every configuration (the `t` of its `t = ...` header line).
pub const SENTINEL: u8 = b't';

/// The location of a single configuration within a trajectory file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConfInfo {
    /// Absolute byte offset of the first byte of the configuration.
    pub offset: u64,
    /// Length of the configuration in bytes.
    pub size: u64,
    /// Zero-based position of this configuration in the trajectory.
    pub id: usize,
}

impl ConfInfo {
    /// Returns the offset one past the last byte of this configuration.
    pub const fn end(&self) -> u64 {
        self.offset + self.size
    }
}

/// How to read the file while indexing.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Sequential reads into a reused window buffer.
    #[default]
    Buffered,
    /// Windows taken straight from a memory map of the file.
    Mapped,
}

/// Tuning knobs for an indexing pass.
///
/// None of these options change the resulting index for well-formed trajectories. They only
/// trade memory for speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexOptions {
    /// Number of bytes scanned per window.
    pub window_size: usize,
    pub scan: ScanPolicy,
}

impl IndexOptions {
    pub fn with_window_size(self, window_size: usize) -> Self {
        Self {
            window_size,
            ..self
        }
    }

    pub fn with_scan(self, scan: ScanPolicy) -> Self {
        Self { scan, ..self }
    }
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            scan: ScanPolicy::default(),
        }
    }
}

/// Walk through all windows of `source` and return the location of every configuration.
///
/// The configurations are ordered by offset, and they tile the file: each one ends where the
/// next one begins, and the last one ends at the end of the file. A source without any
/// [`SENTINEL`] produces an empty index, which is a valid (if rather boring) trajectory.
///
/// # Errors
///
/// This function will pass through any reader errors. No partial index is returned.
pub fn index<C: ChunkSource, S: Scanner>(mut source: C, scanner: &S) -> io::Result<Box<[ConfInfo]>> {
    let start = Instant::now();
    let file_size = source.file_size();

    let mut starts: Vec<u64> = Vec::new();
    let mut hits = Vec::new();
    let mut nwindows = 0;
    while let Some(chunk) = source.next_chunk()? {
        hits.clear();
        scanner.scan(chunk.bytes, SENTINEL, &mut hits);
        trace!(
            offset = chunk.offset,
            len = chunk.bytes.len(),
            hits = hits.len(),
            is_last = chunk.is_last,
            "scanned window"
        );
        starts.extend(hits.iter().map(|&hit| chunk.offset + hit as u64));
        nwindows += 1;
    }

    let confs = conf_infos(&starts, file_size);
    if confs.is_empty() {
        warn!(file_size, "found no configurations");
    }
    debug!(
        nconfs = confs.len(),
        nwindows,
        file_size,
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "indexed trajectory"
    );
    Ok(confs)
}

/// Turn ascending configuration start offsets into [`ConfInfo`]s.
///
/// Each configuration runs up to the start of the next one. The last one runs up to `file_size`.
pub fn conf_infos(starts: &[u64], file_size: u64) -> Box<[ConfInfo]> {
    let ends = starts.iter().skip(1).copied().chain(Some(file_size));
    starts
        .iter()
        .zip(ends)
        .enumerate()
        .map(|(id, (&offset, end))| ConfInfo {
            offset,
            size: end.saturating_sub(offset),
            id,
        })
        .collect()
}

/// Index an open trajectory file from its start, using the given [`SourceKind`].
///
/// Buffered indexing rewinds `file` and leaves its cursor at the end of the file.
pub fn index_file(
    file: &File,
    source: SourceKind,
    options: &IndexOptions,
) -> io::Result<Box<[ConfInfo]>> {
    match source {
        SourceKind::Buffered => {
            let file_size = file.metadata()?.len();
            let mut reader = file;
            reader.rewind()?;
            index(
                ReadBlocks::new(reader, file_size, options.window_size),
                &options.scan,
            )
        }
        SourceKind::Mapped => index(MappedBlocks::new(file, options.window_size)?, &options.scan),
    }
}

/// Open the trajectory at `path` and index it.
pub fn index_path<P: AsRef<Path>>(
    path: P,
    source: SourceKind,
    options: &IndexOptions,
) -> io::Result<Box<[ConfInfo]>> {
    let file = File::open(path)?;
    index_file(&file, source, options)
}
