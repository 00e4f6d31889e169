//! In-memory SDO geometry model.

mod elem_info;
mod gtype;
mod ordinates;
mod sdo;

pub use elem_info::{ElemInfo, ElemInfoTriplet};
pub use gtype::{SdoGType, TypeGeometry};
pub use ordinates::Ordinates;
pub use sdo::{SdoGeometry, SdoPayload, SdoPoint};
