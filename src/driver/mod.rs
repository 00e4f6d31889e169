//! Foreign driver discovery.
//!
//! A [`DriverModule`] exports classes, constructors and static methods by
//! fully-qualified name, the way a loaded driver library exports symbols.
//! [`ForeignTypeBinder`] resolves the handful of primitives the encoder needs
//! into a [`TypeBindingSet`] once, at setup.

mod binder;
mod catalog;
mod thin;

pub use binder::{ForeignTypeBinder, TypeBindingSet};
pub use catalog::{TypeCatalog, SDO_VARRAY_LIMIT};
pub use thin::{ThinConnection, ThinDriver, THIN_DRIVER_NAME};

use crate::connection::NativeConnection;
use crate::error::DriverResult;
use crate::native::{Datum, Descriptor, NativeArray, NativeNumber, NativeStruct};
use std::fmt;
use std::sync::Arc;

/// `NUMBER(int)` constructor.
pub type NumberFromIntFn = Arc<dyn Fn(i32) -> DriverResult<NativeNumber> + Send + Sync>;

/// `NUMBER(double)` constructor.
pub type NumberFromDoubleFn = Arc<dyn Fn(f64) -> DriverResult<NativeNumber> + Send + Sync>;

/// `ARRAY(descriptor, connection, data)` constructor.
pub type ArrayConstructorFn = Arc<
    dyn Fn(&Descriptor, &dyn NativeConnection, Vec<Datum>) -> DriverResult<NativeArray>
        + Send
        + Sync,
>;

/// `STRUCT(descriptor, connection, attributes)` constructor.
pub type StructConstructorFn = Arc<
    dyn Fn(&Descriptor, &dyn NativeConnection, Vec<Option<Datum>>) -> DriverResult<NativeStruct>
        + Send
        + Sync,
>;

/// Static `createDescriptor(name, connection)` method.
pub type DescriptorFactoryFn =
    Arc<dyn Fn(&str, &dyn NativeConnection) -> DriverResult<Descriptor> + Send + Sync>;

/// A callable exported by a driver module.
#[derive(Clone)]
pub enum Export {
    NumberFromInt(NumberFromIntFn),
    NumberFromDouble(NumberFromDoubleFn),
    ArrayConstructor(ArrayConstructorFn),
    StructConstructor(StructConstructorFn),
    DescriptorFactory(DescriptorFactoryFn),
}

impl fmt::Debug for Export {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Export::NumberFromInt(_) => "NumberFromInt",
            Export::NumberFromDouble(_) => "NumberFromDouble",
            Export::ArrayConstructor(_) => "ArrayConstructor",
            Export::StructConstructor(_) => "StructConstructor",
            Export::DescriptorFactory(_) => "DescriptorFactory",
        };
        write!(f, "Export::{}", name)
    }
}

/// Parameter type in a constructor or method signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamType {
    Int,
    Double,
    String,
    Connection,
    Object,
    ObjectArray,
    /// Instance of a foreign class, by fully-qualified name.
    Class(String),
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamType::Int => write!(f, "int"),
            ParamType::Double => write!(f, "double"),
            ParamType::String => write!(f, "String"),
            ParamType::Connection => write!(f, "Connection"),
            ParamType::Object => write!(f, "Object"),
            ParamType::ObjectArray => write!(f, "Object[]"),
            ParamType::Class(name) => write!(f, "{}", name.rsplit('.').next().unwrap_or(name)),
        }
    }
}

/// Render `name(p1, p2)` for error messages.
pub(crate) fn signature(name: &str, params: &[ParamType]) -> String {
    let params: Vec<String> = params.iter().map(ToString::to_string).collect();
    format!("{}({})", name, params.join(", "))
}

/// A driver library exporting symbols by fully-qualified name.
pub trait DriverModule: Send + Sync {
    /// Module name, for diagnostics.
    fn name(&self) -> &str;

    /// Whether the class `class` is exported.
    fn has_class(&self, class: &str) -> bool;

    /// Constructor overload of `class` taking exactly `params`.
    fn constructor(&self, class: &str, params: &[ParamType]) -> Option<Export>;

    /// Static method `method` of `class` taking exactly `params`.
    fn static_method(&self, class: &str, method: &str, params: &[ParamType]) -> Option<Export>;
}
