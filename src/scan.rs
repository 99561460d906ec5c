use memchr::{memchr, memchr_iter};

/// Finds the positions of a sentinel byte within a window.
pub trait Scanner {
    /// Push the offset of every sentinel found in `window` onto `hits`, in ascending order.
    ///
    /// Offsets are relative to the start of `window`.
    fn scan(&self, window: &[u8], sentinel: u8, hits: &mut Vec<usize>);
}

/// Reports every occurrence of the sentinel.
///
/// Each search resumes on the byte right after the previous match.
#[derive(Debug, Default, Clone, Copy)]
pub struct Exhaustive;

impl Scanner for Exhaustive {
    fn scan(&self, window: &[u8], sentinel: u8, hits: &mut Vec<usize>) {
        hits.extend(memchr_iter(sentinel, window));
    }
}

/// Skips ahead after each match, assuming records of roughly uniform size.
///
/// Once two matches are known, the next search starts half of the most recent gap past the last
/// match instead of on the very next byte. The search from that point is still exact.
///
/// # Note
///
/// A record that is shorter than half of the record before it can be jumped over, and its start
/// is then not reported. This is only a valid replacement for [`Exhaustive`] when the records in
/// a trajectory have similar sizes, as they do when the particle count is constant.
#[derive(Debug, Default, Clone, Copy)]
pub struct Greedy;

impl Scanner for Greedy {
    fn scan(&self, window: &[u8], sentinel: u8, hits: &mut Vec<usize>) {
        let first = hits.len();
        let mut start = 0;
        while start < window.len() {
            let Some(pos) = memchr(sentinel, &window[start..]) else {
                break;
            };
            let hit = start + pos;
            hits.push(hit);

            let jump = match hits[first..] {
                [.., previous, last] => ((last - previous) / 2).max(1),
                _ => 1,
            };
            start = hit + jump;
        }
    }
}

/// The scanning policies that ship with this crate.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ScanPolicy {
    /// See [`Exhaustive`].
    #[default]
    Exhaustive,
    /// See [`Greedy`]. Only use this when all records have similar sizes: a record shorter than
    /// half of the one before it may be skipped.
    Greedy,
}

impl Scanner for ScanPolicy {
    fn scan(&self, window: &[u8], sentinel: u8, hits: &mut Vec<usize>) {
        match self {
            ScanPolicy::Exhaustive => Exhaustive.scan(window, sentinel, hits),
            ScanPolicy::Greedy => Greedy.scan(window, sentinel, hits),
        }
    }
}
