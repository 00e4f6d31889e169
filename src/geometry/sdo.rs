//! The SDO_GEOMETRY value.

use super::{ElemInfo, Ordinates, SdoGType, TypeGeometry};
use crate::error::{Error, Result};

/// A 2D point stored in the geometry's point slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SdoPoint {
    pub x: f64,
    pub y: f64,
}

impl SdoPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Shape data of a geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum SdoPayload {
    /// Single point stored in SDO_POINT.
    Point(SdoPoint),
    /// Elements described by SDO_ELEM_INFO over SDO_ORDINATES.
    Elements {
        elem_info: ElemInfo,
        ordinates: Ordinates,
    },
}

impl SdoPayload {
    /// Short payload kind name.
    pub fn kind(&self) -> &'static str {
        match self {
            SdoPayload::Point(_) => "point",
            SdoPayload::Elements { .. } => "elements",
        }
    }
}

/// An SDO geometry value ready for encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct SdoGeometry {
    gtype: SdoGType,
    srid: i32,
    payload: SdoPayload,
}

impl SdoGeometry {
    /// Create a point geometry.
    ///
    /// Only 2D, unmeasured point gtypes can use the point slot. Other point
    /// geometries must be stored as elements.
    pub fn point(gtype: SdoGType, srid: i32, point: SdoPoint) -> Result<Self> {
        if gtype.type_geometry() != TypeGeometry::Point {
            return Err(Error::invalid_geometry(format!(
                "gtype {} is not a point type",
                gtype
            )));
        }
        if gtype.dimension() != 2 || gtype.is_lrs() {
            return Err(Error::invalid_geometry(format!(
                "point slot only holds 2D points, gtype is {}",
                gtype
            )));
        }
        Ok(Self {
            gtype,
            srid,
            payload: SdoPayload::Point(point),
        })
    }

    /// Create a geometry described by element info and ordinates.
    ///
    /// Offsets must be 1-based, non-decreasing and within the ordinates.
    pub fn elements(
        gtype: SdoGType,
        srid: i32,
        elem_info: ElemInfo,
        ordinates: Ordinates,
    ) -> Result<Self> {
        let mut previous = 1;
        for (i, triplet) in elem_info.triplets().enumerate() {
            let offset = triplet.offset;
            if offset < previous || offset as usize > ordinates.len() {
                return Err(Error::invalid_geometry(format!(
                    "element {} has offset {} outside 1..={} or before offset {}",
                    i,
                    offset,
                    ordinates.len(),
                    previous
                )));
            }
            previous = offset;
        }
        Ok(Self {
            gtype,
            srid,
            payload: SdoPayload::Elements {
                elem_info,
                ordinates,
            },
        })
    }

    pub fn gtype(&self) -> SdoGType {
        self.gtype
    }

    /// Spatial reference id, `None` when unset (`srid <= 0`).
    pub fn srid(&self) -> Option<i32> {
        (self.srid > 0).then_some(self.srid)
    }

    pub fn payload(&self) -> &SdoPayload {
        &self.payload
    }
}
