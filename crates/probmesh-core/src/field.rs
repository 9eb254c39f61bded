//! The per-triangle [`ProbabilityField`].

use crate::error::FieldError;

/// Probability that represents maximal uncertainty about a cell.
pub const UNCERTAIN: f32 = 0.5;

/// One occupancy belief per mesh triangle, parallel-indexed with the
/// mesh's triangle list.
///
/// Values are independent local beliefs in `[0, 1]`; the field is not a
/// distribution and does not sum to one. Every write clamps, so the
/// `[0, 1]` invariant holds after any sequence of mutations.
///
/// # Examples
///
/// ```
/// use probmesh_core::ProbabilityField;
///
/// let mut field = ProbabilityField::new(3);
/// field.set(1, 1.7).unwrap();
/// assert_eq!(field.get(1).unwrap(), 1.0);
/// assert_eq!(field.argmax(), Some(1));
/// assert!(field.get(3).is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ProbabilityField {
    values: Vec<f32>,
}

/// Clamp `value` into `[0, 1]`, rejecting NaN.
fn clamp_probability(value: f32) -> Result<f32, FieldError> {
    if value.is_nan() {
        return Err(FieldError::NotFinite { value });
    }
    Ok(value.clamp(0.0, 1.0))
}

impl ProbabilityField {
    /// Create a field of `len` triangles, all at probability zero.
    pub fn new(len: usize) -> Self {
        Self {
            values: vec![0.0; len],
        }
    }

    /// Create a field from caller-supplied values, clamping each one.
    pub fn from_values(values: Vec<f32>) -> Result<Self, FieldError> {
        let values = values
            .into_iter()
            .map(clamp_probability)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { values })
    }

    /// Number of triangles covered by the field.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the field covers no triangles.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn check(&self, index: usize) -> Result<(), FieldError> {
        if index >= self.values.len() {
            return Err(FieldError::IndexOutOfRange {
                index,
                len: self.values.len(),
            });
        }
        Ok(())
    }

    /// Probability of triangle `index`.
    pub fn get(&self, index: usize) -> Result<f32, FieldError> {
        self.check(index)?;
        Ok(self.values[index])
    }

    /// Set the probability of triangle `index`, clamped to `[0, 1]`.
    pub fn set(&mut self, index: usize, value: f32) -> Result<(), FieldError> {
        self.check(index)?;
        self.values[index] = clamp_probability(value)?;
        Ok(())
    }

    /// Broadcast `value` (clamped) to every triangle.
    pub fn set_all(&mut self, value: f32) -> Result<(), FieldError> {
        let value = clamp_probability(value)?;
        self.values.fill(value);
        Ok(())
    }

    /// Reset every triangle to [`UNCERTAIN`].
    pub fn reset(&mut self) {
        self.values.fill(UNCERTAIN);
    }

    /// Index of the highest probability.
    ///
    /// Ties resolve to the earliest index. Returns `None` only for an
    /// empty field.
    pub fn argmax(&self) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for (i, &p) in self.values.iter().enumerate() {
            match best {
                Some((_, top)) if p <= top => {}
                _ => best = Some((i, p)),
            }
        }
        best.map(|(i, _)| i)
    }

    /// Sum of all values. Not conserved by diffusion; useful for reporting.
    pub fn total_mass(&self) -> f64 {
        self.values.iter().map(|&p| p as f64).sum()
    }

    /// Apply `value[i] = clamp01(value[i] + deltas[i])` for every triangle.
    ///
    /// This is the single commit point of a diffusion step. The field is
    /// left untouched if any delta is NaN or the lengths disagree.
    pub fn apply_deltas(&mut self, deltas: &[f32]) -> Result<(), FieldError> {
        if deltas.len() != self.values.len() {
            return Err(FieldError::LengthMismatch {
                expected: self.values.len(),
                got: deltas.len(),
            });
        }
        if let Some(&value) = deltas.iter().find(|d| d.is_nan()) {
            return Err(FieldError::NotFinite { value });
        }
        for (p, &d) in self.values.iter_mut().zip(deltas) {
            *p = (*p + d).clamp(0.0, 1.0);
        }
        Ok(())
    }

    /// Read-only view of all values in triangle order.
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }
}
