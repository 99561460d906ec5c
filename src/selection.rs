use std::num::NonZeroU64;

/// A selection of [`Configuration`](crate::Configuration)s, by their position in a trajectory.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum ConfSelection {
    /// Include every configuration.
    #[default]
    All,
    /// Include configurations that lie within a [`Range`].
    Range(Range),
    /// Include the configurations with these ids.
    ///
    /// Invariant: the ids are sorted and unique. Use [`ConfSelection::from_ids`] to build one
    /// from an arbitrary list.
    List(Vec<usize>),
}

impl ConfSelection {
    pub fn from_ids(mut ids: Vec<usize>) -> Self {
        ids.sort_unstable();
        ids.dedup();
        Self::List(ids)
    }

    /// Determine whether the configuration with id `idx` is included in this selection.
    ///
    /// Will return [`None`] once `idx` lies beyond the scope of this selection, such that a reader
    /// can stop early.
    pub fn is_included(&self, idx: usize) -> Option<bool> {
        match self {
            ConfSelection::All => Some(true),
            ConfSelection::Range(range) => range.is_included(idx as u64),
            ConfSelection::List(ids) => {
                if *ids.last()? < idx {
                    None
                } else {
                    Some(ids.binary_search(&idx).is_ok())
                }
            }
        }
    }
}

/// A strided range of configuration ids.
///
/// The `start` is inclusive and zero by default. The `end` is exclusive, and when it is [`None`]
/// the range runs to the end of the trajectory. Of every `step` configurations starting from
/// `start`, the first is included and the other `step - 1` are skipped.
///
/// # Note
///
/// A range where `start` > `end` is valid, but it selects nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    pub start: u64,
    pub end: Option<u64>,
    pub step: NonZeroU64,
}

impl Range {
    pub fn new(start: Option<u64>, end: Option<u64>, step: Option<NonZeroU64>) -> Self {
        let default = Self::default();
        Self {
            start: start.unwrap_or(default.start),
            end,
            step: step.unwrap_or(default.step),
        }
    }

    fn is_included(&self, idx: u64) -> Option<bool> {
        if self.end.is_some_and(|end| end <= idx) {
            return None;
        }
        let Some(from_start) = idx.checked_sub(self.start) else {
            return Some(false);
        };
        Some(from_start % self.step.get() == 0)
    }
}

impl Default for Range {
    fn default() -> Self {
        Self {
            start: 0,
            end: None,
            step: NonZeroU64::MIN,
        }
    }
}
