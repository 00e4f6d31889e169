//! Native value model and the factory interface drivers implement.
//!
//! | SQL type   | Rust type      |
//! |------------|----------------|
//! | NUMBER     | `NativeNumber` |
//! | VARRAY     | `NativeArray`  |
//! | Object     | `NativeStruct` |

mod datum;
mod descriptor;
mod factory;
pub mod number;

pub use datum::{Datum, NativeArray, NativeNumber, NativeStruct, NumberKind};
pub use descriptor::{AttributeDescriptor, AttributeType, Descriptor, TypeShape};
pub use factory::NativeTypeFactory;
