//! Capability interface for building native values.

use super::{Datum, Descriptor, NativeArray, NativeNumber, NativeStruct};
use crate::connection::NativeConnection;
use crate::error::Result;
use std::sync::Arc;

/// Builds native NUMBER, ARRAY and STRUCT values and their descriptors.
///
/// Every driver-side rejection is reported as [`crate::Error::Encoding`]
/// with the driver's error as its source.
pub trait NativeTypeFactory {
    /// NUMBER through the integer path.
    fn make_int_number(&self, value: i32) -> Result<NativeNumber>;

    /// NUMBER through the double path.
    fn make_double_number(&self, value: f64) -> Result<NativeNumber>;

    /// Descriptor of the object type `name`, resolved over `conn`.
    fn create_struct_descriptor(&self, name: &str, conn: &dyn NativeConnection)
        -> Result<Descriptor>;

    /// Descriptor of the collection type `name`, resolved over `conn`.
    fn create_array_descriptor(&self, name: &str, conn: &dyn NativeConnection)
        -> Result<Descriptor>;

    /// Collection instance of `descriptor`.
    fn make_array(
        &self,
        descriptor: &Descriptor,
        conn: &dyn NativeConnection,
        data: Vec<Datum>,
    ) -> Result<NativeArray>;

    /// Object instance of `descriptor`; `None` attributes are NULL.
    fn make_struct(
        &self,
        descriptor: &Descriptor,
        conn: &dyn NativeConnection,
        attributes: Vec<Option<Datum>>,
    ) -> Result<NativeStruct>;
}

impl<F: NativeTypeFactory + ?Sized> NativeTypeFactory for &F {
    fn make_int_number(&self, value: i32) -> Result<NativeNumber> {
        (**self).make_int_number(value)
    }

    fn make_double_number(&self, value: f64) -> Result<NativeNumber> {
        (**self).make_double_number(value)
    }

    fn create_struct_descriptor(
        &self,
        name: &str,
        conn: &dyn NativeConnection,
    ) -> Result<Descriptor> {
        (**self).create_struct_descriptor(name, conn)
    }

    fn create_array_descriptor(
        &self,
        name: &str,
        conn: &dyn NativeConnection,
    ) -> Result<Descriptor> {
        (**self).create_array_descriptor(name, conn)
    }

    fn make_array(
        &self,
        descriptor: &Descriptor,
        conn: &dyn NativeConnection,
        data: Vec<Datum>,
    ) -> Result<NativeArray> {
        (**self).make_array(descriptor, conn, data)
    }

    fn make_struct(
        &self,
        descriptor: &Descriptor,
        conn: &dyn NativeConnection,
        attributes: Vec<Option<Datum>>,
    ) -> Result<NativeStruct> {
        (**self).make_struct(descriptor, conn, attributes)
    }
}

impl<F: NativeTypeFactory + ?Sized> NativeTypeFactory for Arc<F> {
    fn make_int_number(&self, value: i32) -> Result<NativeNumber> {
        (**self).make_int_number(value)
    }

    fn make_double_number(&self, value: f64) -> Result<NativeNumber> {
        (**self).make_double_number(value)
    }

    fn create_struct_descriptor(
        &self,
        name: &str,
        conn: &dyn NativeConnection,
    ) -> Result<Descriptor> {
        (**self).create_struct_descriptor(name, conn)
    }

    fn create_array_descriptor(
        &self,
        name: &str,
        conn: &dyn NativeConnection,
    ) -> Result<Descriptor> {
        (**self).create_array_descriptor(name, conn)
    }

    fn make_array(
        &self,
        descriptor: &Descriptor,
        conn: &dyn NativeConnection,
        data: Vec<Datum>,
    ) -> Result<NativeArray> {
        (**self).make_array(descriptor, conn, data)
    }

    fn make_struct(
        &self,
        descriptor: &Descriptor,
        conn: &dyn NativeConnection,
        attributes: Vec<Option<Datum>>,
    ) -> Result<NativeStruct> {
        (**self).make_struct(descriptor, conn, attributes)
    }
}
