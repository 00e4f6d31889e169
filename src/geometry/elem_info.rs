//! SDO_ELEM_INFO triplets.

use crate::error::{Error, Result};

/// One `(offset, etype, interpretation)` entry of an element info array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElemInfoTriplet {
    /// 1-based position of the element's first ordinate.
    pub offset: i32,
    /// Element type.
    pub etype: i32,
    /// How the element's ordinates are interpreted.
    pub interpretation: i32,
}

impl ElemInfoTriplet {
    pub fn new(offset: i32, etype: i32, interpretation: i32) -> Self {
        Self {
            offset,
            etype,
            interpretation,
        }
    }
}

/// Ordered element info of a geometry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElemInfo {
    triplets: Vec<ElemInfoTriplet>,
}

impl ElemInfo {
    /// Create from triplets.
    pub fn new(triplets: Vec<ElemInfoTriplet>) -> Self {
        Self { triplets }
    }

    /// Create from a flat `[offset, etype, interpretation, ...]` slice.
    ///
    /// Fails unless the length is a multiple of 3.
    pub fn from_flat(values: &[i32]) -> Result<Self> {
        if values.len() % 3 != 0 {
            return Err(Error::invalid_geometry(format!(
                "element info length {} is not a multiple of 3",
                values.len()
            )));
        }
        let triplets = values
            .chunks_exact(3)
            .map(|t| ElemInfoTriplet::new(t[0], t[1], t[2]))
            .collect();
        Ok(Self { triplets })
    }

    /// Number of elements described.
    pub fn len(&self) -> usize {
        self.triplets.len()
    }

    /// Check if no element is described.
    pub fn is_empty(&self) -> bool {
        self.triplets.is_empty()
    }

    /// Iterate over the triplets.
    pub fn triplets(&self) -> impl Iterator<Item = &ElemInfoTriplet> {
        self.triplets.iter()
    }

    /// Flattened values in triplet order.
    pub fn flat_values(&self) -> impl Iterator<Item = i32> + '_ {
        self.triplets
            .iter()
            .flat_map(|t| [t.offset, t.etype, t.interpretation])
    }

    /// Flattened values collected into a vector.
    pub fn to_flat(&self) -> Vec<i32> {
        self.flat_values().collect()
    }
}

impl From<Vec<ElemInfoTriplet>> for ElemInfo {
    fn from(triplets: Vec<ElemInfoTriplet>) -> Self {
        Self::new(triplets)
    }
}
