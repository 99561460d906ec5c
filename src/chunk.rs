use std::fs::File;
use std::io::{self, Read};

use memmap2::Mmap;

/// The window size used when none is specified, in bytes.
pub const DEFAULT_WINDOW_SIZE: usize = 10_000_000;

/// A bounded window of bytes taken from a trajectory.
#[derive(Debug, Clone, Copy)]
pub struct Chunk<'b> {
    pub bytes: &'b [u8],
    /// Absolute byte offset of `bytes[0]` within the file.
    pub offset: u64,
    /// Whether this window reaches the end of the file.
    pub is_last: bool,
    pub file_size: u64,
}

/// A sequential producer of non-overlapping [`Chunk`]s.
///
/// Each call to [`ChunkSource::next_chunk`] hands out the window following the previous one.
/// Only one window is alive at a time, which bounds the memory spent on reading to the window
/// size, regardless of how large the file is.
pub trait ChunkSource {
    /// Total size of the underlying file in bytes.
    fn file_size(&self) -> u64;

    /// Returns the next window, or [`None`] once the source is exhausted.
    ///
    /// # Errors
    ///
    /// This function will pass through any reader errors. Nothing is retried.
    fn next_chunk(&mut self) -> io::Result<Option<Chunk<'_>>>;
}

/// Reads fixed-size windows from any [`Read`]er into a single reused buffer.
pub struct ReadBlocks<R> {
    reader: R,
    window: Vec<u8>,
    /// Absolute offset of the next window.
    offset: u64,
    file_size: u64,
}

impl<R: Read> ReadBlocks<R> {
    /// Create a new [`ReadBlocks`] that starts reading at the current position of `reader`.
    ///
    /// A `window_size` of zero is treated as one byte. The window allocation never exceeds the
    /// size of the file, so small files do not pay for a large default window.
    pub fn new(reader: R, file_size: u64, window_size: usize) -> Self {
        let cap = usize::try_from(file_size).unwrap_or(usize::MAX).max(1);
        let window_size = window_size.clamp(1, cap);
        Self {
            reader,
            window: vec![0; window_size],
            offset: 0,
            file_size,
        }
    }

    /// Fill the window as far as the reader allows.
    ///
    /// Returns fewer bytes than the window size only at the end of the stream.
    fn fill(&mut self) -> io::Result<usize> {
        let mut filled = 0;
        while filled < self.window.len() {
            match self.reader.read(&mut self.window[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            }
        }
        Ok(filled)
    }
}

impl<R: Read> ChunkSource for ReadBlocks<R> {
    fn file_size(&self) -> u64 {
        self.file_size
    }

    fn next_chunk(&mut self) -> io::Result<Option<Chunk<'_>>> {
        let n = self.fill()?;
        if n == 0 {
            return Ok(None);
        }

        let offset = self.offset;
        self.offset += n as u64;
        Ok(Some(Chunk {
            bytes: &self.window[..n],
            offset,
            is_last: self.offset >= self.file_size,
            file_size: self.file_size,
        }))
    }
}

/// Hands out windows directly from a memory map of the file.
///
/// No bytes are copied. The windows are laid out exactly as they are for [`ReadBlocks`] with the
/// same window size.
pub struct MappedBlocks {
    map: Mmap,
    window_size: usize,
    offset: usize,
}

impl MappedBlocks {
    pub fn new(file: &File, window_size: usize) -> io::Result<Self> {
        // SAFETY: The trajectory is only ever read. Truncating the file from another process
        // while it is mapped is not supported.
        let map = unsafe { Mmap::map(file)? };
        Ok(Self {
            map,
            window_size: window_size.max(1),
            offset: 0,
        })
    }
}

impl ChunkSource for MappedBlocks {
    fn file_size(&self) -> u64 {
        self.map.len() as u64
    }

    fn next_chunk(&mut self) -> io::Result<Option<Chunk<'_>>> {
        let start = self.offset;
        if start >= self.map.len() {
            return Ok(None);
        }

        let end = usize::min(start + self.window_size, self.map.len());
        self.offset = end;
        Ok(Some(Chunk {
            bytes: &self.map[start..end],
            offset: start as u64,
            is_last: end >= self.map.len(),
            file_size: self.map.len() as u64,
        }))
    }
}
