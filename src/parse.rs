use glam::DVec3;

use crate::error::{Error, Result};
use crate::layout::{COLUMNS, HEADER, HEADER_LINES};

/// A single snapshot of an oxDNA trajectory.
///
/// All per-particle arrays have the same length: the particle count the configuration was
/// parsed with.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Configuration {
    pub(crate) time: f64,
    pub(crate) boxvec: DVec3,
    pub(crate) energy: DVec3,
    pub(crate) positions: Vec<DVec3>,
    pub(crate) a1s: Vec<DVec3>,
    pub(crate) a3s: Vec<DVec3>,
}

impl Configuration {
    fn with_capacity(natoms: usize) -> Self {
        Self {
            positions: Vec::with_capacity(natoms),
            a1s: Vec::with_capacity(natoms),
            a3s: Vec::with_capacity(natoms),
            ..Self::default()
        }
    }

    /// Simulation time of this snapshot, in simulation units.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Box dimensions.
    pub fn boxvec(&self) -> DVec3 {
        self.boxvec
    }

    /// The three energy terms from the `E = ...` header line.
    pub fn energy(&self) -> DVec3 {
        self.energy
    }

    pub fn natoms(&self) -> usize {
        self.positions.len()
    }

    pub fn positions(&self) -> &[DVec3] {
        &self.positions
    }

    /// The first orientation vector of each particle (the backbone-base axis).
    pub fn a1s(&self) -> &[DVec3] {
        &self.a1s
    }

    /// The third orientation vector of each particle (the stacking axis).
    pub fn a3s(&self) -> &[DVec3] {
        &self.a3s
    }

    /// The second orientation vector of each particle, which completes the frame as `a3 × a1`.
    pub fn a2s(&self) -> impl Iterator<Item = DVec3> + '_ {
        self.a3s.iter().zip(&self.a1s).map(|(a3, &a1)| a3.cross(a1))
    }
}

/// Parse the text of a single configuration containing `natoms` particles.
///
/// One trailing newline is allowed. The time line must hold a single value. Values beyond those
/// described in the layout are ignored on the other lines, and no check is done on whether the
/// values make any physical sense.
///
/// # Errors
///
/// Fails with [`Error::ParticleCount`] if the number of particle lines is not `natoms`, and with
/// one of the other [`Error`] variants if a line cannot be decoded.
pub fn parse_conf(text: &str, natoms: usize) -> Result<Configuration> {
    let mut lines: Vec<&str> = text.split('\n').collect();
    if lines.last() == Some(&"") {
        lines.pop();
    }
    if lines.len().checked_sub(HEADER_LINES) != Some(natoms) {
        return Err(Error::ParticleCount {
            expected: natoms,
            found: lines.len().saturating_sub(HEADER_LINES),
        });
    }

    let mut conf = Configuration::with_capacity(natoms);

    let mut values = [0.0; 3];
    for field in &HEADER {
        let (_, rest) = lines[field.line]
            .split_once('=')
            .ok_or(Error::MissingDelimiter {
                line: field.line,
                field: field.name,
            })?;
        let values = &mut values[..field.arity];
        let mut tokens = rest.split_whitespace();
        parse_values(&mut tokens, field.line, field.name, values)?;
        if let Some(token) = tokens.next().filter(|_| field.exact) {
            return Err(Error::TrailingValue {
                line: field.line,
                field: field.name,
                token: token.to_string(),
            });
        }
        (field.store)(&mut conf, values);
    }

    for (line, text) in lines.iter().enumerate().skip(HEADER_LINES) {
        let mut tokens = text.split_whitespace();
        for column in &COLUMNS {
            parse_values(&mut tokens, line, column.name, &mut values)?;
            (column.store)(&mut conf, DVec3::from_array(values));
        }
    }

    Ok(conf)
}

/// Fill `values` from the next tokens.
fn parse_values<'t>(
    tokens: &mut impl Iterator<Item = &'t str>,
    line: usize,
    field: &'static str,
    values: &mut [f64],
) -> Result<()> {
    let expected = values.len();
    for (found, value) in values.iter_mut().enumerate() {
        let token = tokens.next().ok_or(Error::MissingValues {
            line,
            field,
            expected,
            found,
        })?;
        *value = token.parse().map_err(|source| Error::Float {
            line,
            token: token.to_string(),
            source,
        })?;
    }
    Ok(())
}
