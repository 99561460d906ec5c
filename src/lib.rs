//! Index and read oxDNA trajectories.
//!
//! An oxDNA trajectory is a plain concatenation of configurations, each opening with a
//! `t = <time>` line. There is no table of contents, so the first step in reading one is to
//! [`index`] it: a single streaming pass that finds where every configuration starts. The
//! resulting [`ConfInfo`]s can then be used to read and [`parse_conf`] any configuration, in any
//! order.
//!
//! ```no_run
//! # fn main() -> oxtraj::Result<()> {
//! let mut reader = oxtraj::TrajectoryReader::open("trajectory.dat", 1200)?;
//! let confs = reader.index(&oxtraj::IndexOptions::default())?;
//! let last = reader.read_conf(&confs[confs.len() - 1])?;
//! println!("t = {}", last.time());
//! # Ok(())
//! # }
//! ```
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use tracing::debug;

use crate::chunk::ReadBlocks;

pub use crate::chunk::{Chunk, ChunkSource, MappedBlocks, DEFAULT_WINDOW_SIZE};
pub use crate::error::{Error, Result};
pub use crate::index::{
    conf_infos, index, index_file, index_path, ConfInfo, IndexOptions, SourceKind, SENTINEL,
};
pub use crate::parse::{parse_conf, Configuration};
pub use crate::scan::{Exhaustive, Greedy, ScanPolicy, Scanner};
pub use crate::selection::{ConfSelection, Range};

pub mod chunk;
mod error;
pub mod index;
mod layout;
mod parse;
pub mod scan;
pub mod selection;

/// Reads configurations from an oxDNA trajectory.
///
/// The number of particles per configuration is not stored in the trajectory itself. It comes
/// from the topology, and must be provided up front.
#[derive(Debug)]
pub struct TrajectoryReader<R> {
    pub file: R,
    natoms: usize,
    /// The raw bytes of the configuration that was read last.
    scratch: Vec<u8>,
}

impl TrajectoryReader<File> {
    pub fn open<P: AsRef<Path>>(path: P, natoms: usize) -> std::io::Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(file, natoms))
    }
}

impl<R: Read + Seek> TrajectoryReader<R> {
    pub fn new(reader: R, natoms: usize) -> Self {
        Self {
            file: reader,
            natoms,
            scratch: Vec::new(),
        }
    }

    /// The number of particles each configuration is expected to hold.
    pub fn natoms(&self) -> usize {
        self.natoms
    }

    /// Returns the location of every configuration in this trajectory.
    ///
    /// The whole trajectory is scanned from its start, regardless of the current position, and
    /// that position is restored afterwards.
    ///
    /// # Errors
    ///
    /// This function will pass through any reader errors.
    pub fn index(&mut self, options: &IndexOptions) -> std::io::Result<Box<[ConfInfo]>> {
        let file = &mut self.file;
        // Remember where we start so we can return to it later.
        let start_pos = file.stream_position()?;
        let file_size = file.seek(SeekFrom::End(0))?;
        file.seek(SeekFrom::Start(0))?;

        let confs = index(
            ReadBlocks::new(&mut *file, file_size, options.window_size),
            &options.scan,
        );

        // Return back to where we started.
        file.seek(SeekFrom::Start(start_pos))?;
        confs
    }

    /// Seeks to the configuration described by `info`, then reads and parses it.
    ///
    /// # Errors
    ///
    /// Besides reader errors, this fails if the configuration is not text or if it cannot be
    /// parsed for [`Self::natoms`] particles. Such a failure only concerns this configuration;
    /// the others can still be read.
    pub fn read_conf(&mut self, info: &ConfInfo) -> Result<Configuration> {
        self.file.seek(SeekFrom::Start(info.offset))?;
        self.scratch.resize(conf_len(info)?, 0);
        self.file.read_exact(&mut self.scratch)?;

        let text = std::str::from_utf8(&self.scratch).map_err(|source| Error::Utf8 {
            offset: info.offset,
            source,
        })?;
        parse_conf(text, self.natoms)
    }

    /// Indexes the trajectory and reads its first configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyTrajectory`] if there is no configuration to read.
    pub fn read_first(&mut self, options: &IndexOptions) -> Result<Configuration> {
        let confs = self.index(options)?;
        let first = confs.first().ok_or(Error::EmptyTrajectory)?;
        self.read_conf(first)
    }

    /// Append the [`Configuration`]s in `confs` that match `selection` to `out`.
    ///
    /// If successful, it will return the number of configurations that were read.
    pub fn read_confs(
        &mut self,
        confs: &[ConfInfo],
        selection: &ConfSelection,
        out: &mut impl Extend<Configuration>,
    ) -> Result<usize> {
        let mut n = 0;
        for info in confs {
            match selection.is_included(info.id) {
                Some(true) => {}
                Some(false) => continue,
                None => break,
            }
            let conf = self.read_conf(info)?;
            out.extend(Some(conf));
            n += 1;
        }
        debug!(n, natoms = self.natoms, "read configurations");

        Ok(n)
    }
}

/// The size of the configuration described by `info`, as an in-memory length.
fn conf_len(info: &ConfInfo) -> std::io::Result<usize> {
    usize::try_from(info.size).map_err(|_| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!(
                "configuration {} is {} bytes, which does not fit in memory",
                info.id, info.size
            ),
        )
    })
}
