//! SDO_GTYPE codes.
//!
//! An SDO_GTYPE is a four-digit `DLTT` number:
//! - `D` is the number of dimensions (2, 3 or 4)
//! - `L` is the dimension holding the LRS measure (0 when there is none)
//! - `TT` is the geometry type

use crate::error::{Error, Result};
use std::fmt;

/// Geometry type part (`TT`) of an SDO_GTYPE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeGeometry {
    Unknown,
    Point,
    Line,
    Polygon,
    Collection,
    MultiPoint,
    MultiLine,
    MultiPolygon,
    Solid,
    MultiSolid,
}

impl TypeGeometry {
    /// Create from the two-digit `TT` value.
    pub fn from_code(code: i32) -> Option<Self> {
        let tg = match code {
            0 => TypeGeometry::Unknown,
            1 => TypeGeometry::Point,
            2 => TypeGeometry::Line,
            3 => TypeGeometry::Polygon,
            4 => TypeGeometry::Collection,
            5 => TypeGeometry::MultiPoint,
            6 => TypeGeometry::MultiLine,
            7 => TypeGeometry::MultiPolygon,
            8 => TypeGeometry::Solid,
            9 => TypeGeometry::MultiSolid,
            _ => return None,
        };
        Some(tg)
    }

    /// Get the two-digit `TT` value.
    pub fn code(&self) -> i32 {
        match self {
            TypeGeometry::Unknown => 0,
            TypeGeometry::Point => 1,
            TypeGeometry::Line => 2,
            TypeGeometry::Polygon => 3,
            TypeGeometry::Collection => 4,
            TypeGeometry::MultiPoint => 5,
            TypeGeometry::MultiLine => 6,
            TypeGeometry::MultiPolygon => 7,
            TypeGeometry::Solid => 8,
            TypeGeometry::MultiSolid => 9,
        }
    }
}

/// A decoded SDO_GTYPE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SdoGType {
    dimension: u8,
    lrs_dimension: u8,
    type_geometry: TypeGeometry,
}

impl SdoGType {
    /// Create a gtype from its parts.
    ///
    /// `dimension` must be 2, 3 or 4 and `lrs_dimension` either 0 or a
    /// dimension index no greater than `dimension`.
    pub fn new(dimension: u8, lrs_dimension: u8, type_geometry: TypeGeometry) -> Result<Self> {
        let gtype = Self {
            dimension,
            lrs_dimension,
            type_geometry,
        };
        if !(2..=4).contains(&dimension) || lrs_dimension > dimension {
            return Err(Error::InvalidGType { code: gtype.code() });
        }
        Ok(gtype)
    }

    /// Decode a `DLTT` integer.
    pub fn from_code(code: i32) -> Result<Self> {
        if !(1000..=9999).contains(&code) {
            return Err(Error::InvalidGType { code });
        }
        let dimension = (code / 1000) as u8;
        let lrs_dimension = ((code / 100) % 10) as u8;
        let type_geometry =
            TypeGeometry::from_code(code % 100).ok_or(Error::InvalidGType { code })?;
        Self::new(dimension, lrs_dimension, type_geometry)
    }

    /// Encode back to the `DLTT` integer.
    pub fn code(&self) -> i32 {
        self.dimension as i32 * 1000 + self.lrs_dimension as i32 * 100 + self.type_geometry.code()
    }

    /// Number of dimensions, including any measure.
    pub fn dimension(&self) -> u8 {
        self.dimension
    }

    /// Dimension holding the LRS measure, 0 when not measured.
    pub fn lrs_dimension(&self) -> u8 {
        self.lrs_dimension
    }

    /// Whether the geometry carries an LRS measure.
    pub fn is_lrs(&self) -> bool {
        self.lrs_dimension > 0
    }

    /// Geometry type part.
    pub fn type_geometry(&self) -> TypeGeometry {
        self.type_geometry
    }
}

impl fmt::Display for SdoGType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code_point() {
        let gtype = SdoGType::from_code(2001).unwrap();
        assert_eq!(gtype.dimension(), 2);
        assert_eq!(gtype.lrs_dimension(), 0);
        assert!(!gtype.is_lrs());
        assert_eq!(gtype.type_geometry(), TypeGeometry::Point);
        assert_eq!(gtype.code(), 2001);
    }

    #[test]
    fn test_from_code_measured_line() {
        let gtype = SdoGType::from_code(3302).unwrap();
        assert_eq!(gtype.dimension(), 3);
        assert_eq!(gtype.lrs_dimension(), 3);
        assert_eq!(gtype.type_geometry(), TypeGeometry::Line);
        assert_eq!(format!("{}", gtype), "3302");
    }

    #[test]
    fn test_from_code_invalid() {
        for code in [0, 1001, 2010, 2501, 5001, 10001, -2001] {
            match SdoGType::from_code(code) {
                Err(Error::InvalidGType { code: c }) => assert_eq!(c, code),
                other => panic!("Expected InvalidGType for {}, got {:?}", code, other),
            }
        }
    }

    #[test]
    fn test_new_matches_code() {
        let gtype = SdoGType::new(2, 0, TypeGeometry::MultiPolygon).unwrap();
        assert_eq!(gtype.code(), 2007);
        assert!(SdoGType::new(2, 3, TypeGeometry::Line).is_err());
    }
}
