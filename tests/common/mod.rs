#![allow(dead_code)]

use std::fmt::Write as _;
use std::io::Write;

use glam::DVec3;
use tempfile::NamedTempFile;

/// The values that make up a synthetic configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub time: f64,
    pub boxvec: DVec3,
    pub energy: DVec3,
    pub positions: Vec<DVec3>,
    pub a1s: Vec<DVec3>,
    pub a3s: Vec<DVec3>,
}

impl Snapshot {
    /// A deterministic snapshot of `natoms` particles, varied by `seed`.
    pub fn synthetic(seed: usize, natoms: usize) -> Self {
        let value = |i: usize, k: usize| {
            let v = ((seed * 7919 + i * 104729 + k * 1299709) % 20000) as f64;
            v / 100.0 - 100.0
        };
        let vec = |i: usize, k: usize| DVec3::new(value(i, k), value(i, k + 1), value(i, k + 2));
        Self {
            time: (seed * 1000) as f64,
            boxvec: DVec3::splat(50.0),
            energy: DVec3::new(-1.5, -1.25 - seed as f64 / 8.0, 0.25),
            positions: (0..natoms).map(|i| vec(i, 0)).collect(),
            a1s: (0..natoms).map(|i| vec(i, 3)).collect(),
            a3s: (0..natoms).map(|i| vec(i, 6)).collect(),
        }
    }

    /// Format this snapshot as an oxDNA configuration.
    ///
    /// Vectors are written with a fixed precision, so configurations with the same number of
    /// particles have similar sizes.
    pub fn to_text(&self) -> String {
        let mut text = String::new();
        let v = |v: DVec3| format!("{:.4} {:.4} {:.4}", v.x, v.y, v.z);
        writeln!(text, "t = {}", self.time).unwrap();
        writeln!(text, "b = {}", v(self.boxvec)).unwrap();
        writeln!(text, "E = {}", v(self.energy)).unwrap();
        for ((&p, &a1), &a3) in self.positions.iter().zip(&self.a1s).zip(&self.a3s) {
            writeln!(text, "{} {} {}", v(p), v(a1), v(a3)).unwrap();
        }
        text
    }

    pub fn assert_matches(&self, conf: &oxtraj::Configuration) {
        const TOLERANCE: f64 = 1e-9;
        let close = |a: DVec3, b: DVec3| a.abs_diff_eq(b, TOLERANCE);
        assert!((self.time - conf.time()).abs() < TOLERANCE);
        assert!(close(self.boxvec, conf.boxvec()));
        assert!(close(self.energy, conf.energy()));
        assert_eq!(self.positions.len(), conf.natoms());
        for (expected, found) in [
            (&self.positions, conf.positions()),
            (&self.a1s, conf.a1s()),
            (&self.a3s, conf.a3s()),
        ] {
            assert_eq!(expected.len(), found.len());
            for (&a, &b) in expected.iter().zip(found) {
                assert!(close(a, b), "{a} != {b}");
            }
        }
    }
}

/// A trajectory of `nconfs` synthetic configurations, returned with its snapshots.
pub fn trajectory(nconfs: usize, natoms: usize) -> (Vec<Snapshot>, Vec<u8>) {
    let snapshots: Vec<_> = (0..nconfs).map(|seed| Snapshot::synthetic(seed, natoms)).collect();
    let bytes = snapshots
        .iter()
        .flat_map(|snapshot| snapshot.to_text().into_bytes())
        .collect();
    (snapshots, bytes)
}

/// Write `bytes` to a temporary file that lives as long as the returned handle.
pub fn write_temp(bytes: &[u8]) -> std::io::Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(bytes)?;
    file.flush()?;
    Ok(file)
}
