//! SDO_ORDINATES values.

/// Flat coordinate values of a geometry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ordinates {
    values: Vec<f64>,
}

impl Ordinates {
    /// Create from flat values.
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Values in order.
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }
}

impl From<Vec<f64>> for Ordinates {
    fn from(values: Vec<f64>) -> Self {
        Self::new(values)
    }
}

impl From<&[f64]> for Ordinates {
    fn from(values: &[f64]) -> Self {
        Self::new(values.to_vec())
    }
}
