//! Built-in driver module backed by this crate's native value model.

use super::catalog::TypeCatalog;
use super::{DriverModule, Export, ParamType};
use crate::config::{DriverClassNames, SdoTypeNames};
use crate::connection::{DbConnection, NativeConnection};
use crate::error::{DriverError, DriverResult};
use crate::native::{Datum, Descriptor, NativeArray, NativeNumber, NativeStruct, TypeShape};
use std::any::Any;
use std::sync::Arc;
use tracing::{debug, trace};

/// Driver name reported by [`ThinDriver`] and [`ThinConnection`].
pub const THIN_DRIVER_NAME: &str = "oracle-thin";

const CREATE_DESCRIPTOR: &str = "createDescriptor";

/// Native connection of the thin driver.
///
/// Descriptor lookups resolve against the connection's [`TypeCatalog`].
#[derive(Debug, Clone)]
pub struct ThinConnection {
    catalog: Arc<TypeCatalog>,
}

impl ThinConnection {
    /// Create a connection seeing the types in `catalog`.
    pub fn new(catalog: Arc<TypeCatalog>) -> Self {
        Self { catalog }
    }

    /// Types visible to this connection.
    pub fn catalog(&self) -> &TypeCatalog {
        &self.catalog
    }

    /// Describe the SQL type `name`.
    pub fn describe(&self, name: &str) -> DriverResult<Descriptor> {
        let descriptor = self
            .catalog
            .lookup(name)
            .cloned()
            .ok_or_else(|| DriverError::UnknownType {
                name: name.to_string(),
            })?;
        debug!(name, resolved = descriptor.type_name(), "described SQL type");
        Ok(descriptor)
    }
}

impl Default for ThinConnection {
    /// Connection seeing the spatial types in the `MDSYS` schema.
    fn default() -> Self {
        Self::new(Arc::new(TypeCatalog::with_sdo_types(&SdoTypeNames::default())))
    }
}

impl NativeConnection for ThinConnection {
    fn driver_name(&self) -> &str {
        THIN_DRIVER_NAME
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl DbConnection for ThinConnection {
    fn as_native(&self) -> Option<&dyn NativeConnection> {
        Some(self)
    }
}

/// Driver module exporting the NUMBER, ARRAY and STRUCT primitives.
#[derive(Debug, Clone, Default)]
pub struct ThinDriver {
    classes: DriverClassNames,
}

impl ThinDriver {
    /// Driver exporting the default `oracle.sql` classes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Driver exporting `classes`.
    pub fn with_classes(classes: DriverClassNames) -> Self {
        Self { classes }
    }

    fn array_params(&self) -> [ParamType; 3] {
        [
            ParamType::Class(self.classes.array_descriptor.clone()),
            ParamType::Connection,
            ParamType::Object,
        ]
    }

    fn struct_params(&self) -> [ParamType; 3] {
        [
            ParamType::Class(self.classes.struct_descriptor.clone()),
            ParamType::Connection,
            ParamType::ObjectArray,
        ]
    }
}

impl DriverModule for ThinDriver {
    fn name(&self) -> &str {
        THIN_DRIVER_NAME
    }

    fn has_class(&self, class: &str) -> bool {
        let c = &self.classes;
        [
            &c.datum,
            &c.number,
            &c.array,
            &c.structure,
            &c.struct_descriptor,
            &c.array_descriptor,
        ]
        .iter()
        .any(|name| name.as_str() == class)
    }

    fn constructor(&self, class: &str, params: &[ParamType]) -> Option<Export> {
        if class == self.classes.number {
            match params {
                [ParamType::Int] => Some(Export::NumberFromInt(Arc::new(NativeNumber::from_int))),
                [ParamType::Double] => {
                    Some(Export::NumberFromDouble(Arc::new(NativeNumber::from_double)))
                }
                _ => None,
            }
        } else if class == self.classes.array && params == self.array_params() {
            Some(Export::ArrayConstructor(Arc::new(build_array)))
        } else if class == self.classes.structure && params == self.struct_params() {
            Some(Export::StructConstructor(Arc::new(build_struct)))
        } else {
            None
        }
    }

    fn static_method(&self, class: &str, method: &str, params: &[ParamType]) -> Option<Export> {
        if method != CREATE_DESCRIPTOR || params != [ParamType::String, ParamType::Connection] {
            return None;
        }
        if class == self.classes.struct_descriptor {
            Some(Export::DescriptorFactory(Arc::new(create_struct_descriptor)))
        } else if class == self.classes.array_descriptor {
            Some(Export::DescriptorFactory(Arc::new(create_array_descriptor)))
        } else {
            None
        }
    }
}

fn thin_connection(conn: &dyn NativeConnection) -> DriverResult<&ThinConnection> {
    conn.as_any()
        .downcast_ref::<ThinConnection>()
        .ok_or_else(|| DriverError::ForeignConnection {
            driver: THIN_DRIVER_NAME.to_string(),
        })
}

fn create_struct_descriptor(name: &str, conn: &dyn NativeConnection) -> DriverResult<Descriptor> {
    let descriptor = thin_connection(conn)?.describe(name)?;
    if !descriptor.is_object() {
        return Err(DriverError::DescriptorKind {
            type_name: descriptor.type_name().to_string(),
            expected: "an object type",
        });
    }
    Ok(descriptor)
}

fn create_array_descriptor(name: &str, conn: &dyn NativeConnection) -> DriverResult<Descriptor> {
    let descriptor = thin_connection(conn)?.describe(name)?;
    if !descriptor.is_collection() {
        return Err(DriverError::DescriptorKind {
            type_name: descriptor.type_name().to_string(),
            expected: "a collection type",
        });
    }
    Ok(descriptor)
}

fn build_array(
    descriptor: &Descriptor,
    conn: &dyn NativeConnection,
    data: Vec<Datum>,
) -> DriverResult<NativeArray> {
    thin_connection(conn)?;
    let TypeShape::Collection {
        element,
        max_elements,
    } = descriptor.shape()
    else {
        return Err(DriverError::DescriptorKind {
            type_name: descriptor.type_name().to_string(),
            expected: "a collection type",
        });
    };
    if let Some(limit) = *max_elements {
        if data.len() > limit as usize {
            return Err(DriverError::CollectionLimit {
                type_name: descriptor.type_name().to_string(),
                limit,
                len: data.len(),
            });
        }
    }
    if let Some((index, value)) = data.iter().enumerate().find(|(_, d)| !element.accepts(d)) {
        return Err(DriverError::ElementType {
            type_name: descriptor.type_name().to_string(),
            index,
            expected: element.to_string(),
            actual: value.type_label(),
        });
    }
    trace!(type_name = descriptor.type_name(), len = data.len(), "built ARRAY");
    Ok(NativeArray::new(descriptor.type_name(), data))
}

fn build_struct(
    descriptor: &Descriptor,
    conn: &dyn NativeConnection,
    attributes: Vec<Option<Datum>>,
) -> DriverResult<NativeStruct> {
    thin_connection(conn)?;
    if !descriptor.is_object() {
        return Err(DriverError::DescriptorKind {
            type_name: descriptor.type_name().to_string(),
            expected: "an object type",
        });
    }
    let declared = descriptor.attributes();
    if declared.len() != attributes.len() {
        return Err(DriverError::AttributeCount {
            type_name: descriptor.type_name().to_string(),
            expected: declared.len(),
            actual: attributes.len(),
        });
    }
    for (attr, value) in declared.iter().zip(&attributes) {
        if let Some(value) = value {
            if !attr.attr_type.accepts(value) {
                return Err(DriverError::AttributeType {
                    type_name: descriptor.type_name().to_string(),
                    attribute: attr.name.clone(),
                    expected: attr.attr_type.to_string(),
                    actual: value.type_label(),
                });
            }
        }
    }
    trace!(type_name = descriptor.type_name(), "built STRUCT");
    Ok(NativeStruct::new(descriptor.type_name(), attributes))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct OtherConnection;

    impl NativeConnection for OtherConnection {
        fn driver_name(&self) -> &str {
            "other"
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    fn number(value: i32) -> Datum {
        NativeNumber::from_int(value).unwrap().into()
    }

    #[test]
    fn test_exports() {
        let driver = ThinDriver::new();
        assert!(driver.has_class("oracle.sql.STRUCT"));
        assert!(!driver.has_class("oracle.sql.BLOB"));
        assert!(driver
            .constructor("oracle.sql.NUMBER", &[ParamType::Int])
            .is_some());
        assert!(driver
            .constructor("oracle.sql.NUMBER", &[ParamType::String])
            .is_none());
        assert!(driver
            .static_method(
                "oracle.sql.ArrayDescriptor",
                "createDescriptor",
                &[ParamType::String, ParamType::Connection]
            )
            .is_some());
        assert!(driver
            .static_method("oracle.sql.ArrayDescriptor", "createDescriptor", &[ParamType::String])
            .is_none());
    }

    #[test]
    fn test_descriptor_requires_thin_connection() {
        let result = create_struct_descriptor("MDSYS.SDO_GEOMETRY", &OtherConnection);
        assert_eq!(
            result,
            Err(DriverError::ForeignConnection {
                driver: THIN_DRIVER_NAME.to_string()
            })
        );
    }

    #[test]
    fn test_descriptor_kind_checked() {
        let conn = ThinConnection::default();
        assert!(matches!(
            create_array_descriptor("MDSYS.SDO_GEOMETRY", &conn),
            Err(DriverError::DescriptorKind { .. })
        ));
        assert!(matches!(
            create_struct_descriptor("MDSYS.SDO_ORDINATE_ARRAY", &conn),
            Err(DriverError::DescriptorKind { .. })
        ));
        assert!(matches!(
            create_struct_descriptor("MDSYS.NOPE", &conn),
            Err(DriverError::UnknownType { .. })
        ));
    }

    #[test]
    fn test_build_struct_checks_arity_and_types() {
        let conn = ThinConnection::default();
        let point = create_struct_descriptor("MDSYS.SDO_POINT_TYPE", &conn).unwrap();

        let short = build_struct(&point, &conn, vec![Some(number(1)), None]);
        assert!(matches!(
            short,
            Err(DriverError::AttributeCount {
                expected: 3,
                actual: 2,
                ..
            })
        ));

        let nested = Datum::Array(NativeArray::new("MDSYS.SDO_ORDINATE_ARRAY", vec![]));
        let wrong = build_struct(&point, &conn, vec![Some(nested), None, None]);
        match wrong {
            Err(DriverError::AttributeType { attribute, .. }) => assert_eq!(attribute, "X"),
            other => panic!("Expected AttributeType, got {:?}", other),
        }

        let ok = build_struct(&point, &conn, vec![Some(number(1)), Some(number(2)), None]);
        assert_eq!(ok.unwrap().type_name(), "MDSYS.SDO_POINT_TYPE");
    }

    #[test]
    fn test_build_array_checks_elements_and_limit() {
        let conn = ThinConnection::default();
        let ords = create_array_descriptor("SDO_ORDINATE_ARRAY", &conn).unwrap();
        let point = Datum::Struct(NativeStruct::new("MDSYS.SDO_POINT_TYPE", vec![None, None, None]));
        match build_array(&ords, &conn, vec![number(1), point]) {
            Err(DriverError::ElementType { index, .. }) => assert_eq!(index, 1),
            other => panic!("Expected ElementType, got {:?}", other),
        }

        let small = Descriptor::collection("T.SMALL", crate::native::AttributeType::Number, Some(2));
        assert!(matches!(
            build_array(&small, &conn, vec![number(1), number(2), number(3)]),
            Err(DriverError::CollectionLimit { limit: 2, len: 3, .. })
        ));
    }
}
