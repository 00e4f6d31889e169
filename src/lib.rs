//! Oracle SDO_GEOMETRY encoding for Rust
//!
//! Encodes in-memory SDO geometries into native `MDSYS.SDO_GEOMETRY` STRUCT
//! values ready to be bound as statement parameters, without a compile-time
//! dependency on a particular driver. Driver primitives are looked up once
//! by fully-qualified name and used through [`NativeTypeFactory`].
//!
//! # Example
//!
//! ```
//! use oracle_sdo_rs::{
//!     Result, SdoGType, SdoGeometry, SdoPoint, SdoTypeFactory, ThinConnection, ThinDriver,
//! };
//!
//! fn main() -> Result<()> {
//!     // Bind the driver primitives once
//!     let factory = SdoTypeFactory::initialize(&ThinDriver::new())?;
//!
//!     // Encode a point per statement
//!     let conn = ThinConnection::default();
//!     let geom = SdoGeometry::point(SdoGType::from_code(2001)?, 4326, SdoPoint::new(10.0, 20.0))?;
//!     let value = factory.create_struct(&geom, &conn)?;
//!
//!     assert_eq!(value.type_name(), "MDSYS.SDO_GEOMETRY");
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod connection;
pub mod driver;
pub mod encoder;
pub mod error;
pub mod geometry;
pub mod native;

// Re-export main types
pub use config::{DriverClassNames, SdoTypeNames};
pub use connection::{ConnectionUnwrapper, DbConnection, DelegateChainUnwrapper, NativeConnection};
pub use driver::{
    DriverModule, Export, ForeignTypeBinder, ParamType, ThinConnection, ThinDriver, TypeBindingSet,
    TypeCatalog,
};
pub use encoder::{GeometryEncoder, SdoTypeFactory};
pub use error::{DriverError, DriverResult, Error, Result};
pub use geometry::{
    ElemInfo, ElemInfoTriplet, Ordinates, SdoGType, SdoGeometry, SdoPayload, SdoPoint, TypeGeometry,
};
pub use native::{
    Datum, Descriptor, NativeArray, NativeNumber, NativeStruct, NativeTypeFactory, NumberKind,
};
