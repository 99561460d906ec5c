//! The text layout of a single configuration.
//!
//! ```text
//! t = 0
//! b = 50 50 50
//! E = -1.5 -1.6 0.1
//! px py pz a1x a1y a1z a3x a3y a3z [vx vy vz Lx Ly Lz]
//! ...
//! ```
//!
//! The three header lines are followed by one line per particle. Changing the format should only
//! require changing the tables in this module.
use glam::DVec3;

use crate::Configuration;

/// Number of header lines that precede the particle lines.
pub(crate) const HEADER_LINES: usize = 3;

/// A header value, found after the `=` on its line.
pub(crate) struct HeaderField {
    pub name: &'static str,
    pub line: usize,
    /// Number of values read.
    pub arity: usize,
    /// Whether the line must end after `arity` values. Otherwise further values are ignored.
    pub exact: bool,
    /// Stores exactly `arity` parsed values.
    pub store: fn(&mut Configuration, &[f64]),
}

pub(crate) const HEADER: [HeaderField; HEADER_LINES] = [
    HeaderField {
        name: "time",
        line: 0,
        arity: 1,
        exact: true,
        store: |conf, values| conf.time = values[0],
    },
    HeaderField {
        name: "box",
        line: 1,
        arity: 3,
        exact: false,
        store: |conf, values| conf.boxvec = DVec3::from_slice(values),
    },
    HeaderField {
        name: "energy",
        line: 2,
        arity: 3,
        exact: false,
        store: |conf, values| conf.energy = DVec3::from_slice(values),
    },
];

/// A vector made up of three consecutive columns of a particle line.
///
/// The columns are read in the order of [`COLUMNS`]. Anything after the last of them, such as the
/// velocities and angular momenta that oxDNA may write, is ignored.
pub(crate) struct Column {
    pub name: &'static str,
    pub store: fn(&mut Configuration, DVec3),
}

pub(crate) const COLUMNS: [Column; 3] = [
    Column {
        name: "position",
        store: |conf, v| conf.positions.push(v),
    },
    Column {
        name: "a1",
        store: |conf, v| conf.a1s.push(v),
    },
    Column {
        name: "a3",
        store: |conf, v| conf.a3s.push(v),
    },
];
