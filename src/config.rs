//! Configuration: target schema type names and foreign class names.

use crate::error::{Error, Result};

/// Default schema owning the spatial object types.
pub const DEFAULT_SDO_SCHEMA: &str = "MDSYS";

/// Default package of the foreign driver classes.
pub const DEFAULT_DRIVER_PACKAGE: &str = "oracle.sql";

/// Environment variable overriding the spatial type schema.
pub const SDO_TYPE_SCHEMA_ENV: &str = "SDO_TYPE_SCHEMA";

/// SQL type names of the geometry object model in the target schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdoTypeNames {
    /// Geometry object type (`SDO_GEOMETRY`).
    pub geometry: String,
    /// Point object type (`SDO_POINT_TYPE`).
    pub point: String,
    /// Element info collection type (`SDO_ELEM_INFO_ARRAY`).
    pub elem_info: String,
    /// Ordinate collection type (`SDO_ORDINATE_ARRAY`).
    pub ordinates: String,
}

impl SdoTypeNames {
    /// Type names qualified with `schema`.
    ///
    /// # Example
    ///
    /// ```
    /// use oracle_sdo_rs::SdoTypeNames;
    ///
    /// let names = SdoTypeNames::with_schema("GIS").unwrap();
    /// assert_eq!(names.geometry, "GIS.SDO_GEOMETRY");
    /// ```
    pub fn with_schema(schema: &str) -> Result<Self> {
        let schema = schema.trim();
        if schema.is_empty() {
            return Err(Error::invalid_config("schema name is empty"));
        }
        if schema.contains('.') || schema.chars().any(char::is_whitespace) {
            return Err(Error::invalid_config(format!(
                "invalid schema name: {}",
                schema
            )));
        }
        let schema = schema.to_ascii_uppercase();
        Ok(Self {
            geometry: format!("{}.SDO_GEOMETRY", schema),
            point: format!("{}.SDO_POINT_TYPE", schema),
            elem_info: format!("{}.SDO_ELEM_INFO_ARRAY", schema),
            ordinates: format!("{}.SDO_ORDINATE_ARRAY", schema),
        })
    }

    /// Type names from the environment.
    ///
    /// Uses `SDO_TYPE_SCHEMA` when set, the `MDSYS` schema otherwise.
    pub fn from_env() -> Result<Self> {
        match std::env::var(SDO_TYPE_SCHEMA_ENV) {
            Ok(schema) => Self::with_schema(&schema),
            Err(_) => Ok(Self::default()),
        }
    }
}

impl Default for SdoTypeNames {
    fn default() -> Self {
        Self {
            geometry: format!("{}.SDO_GEOMETRY", DEFAULT_SDO_SCHEMA),
            point: format!("{}.SDO_POINT_TYPE", DEFAULT_SDO_SCHEMA),
            elem_info: format!("{}.SDO_ELEM_INFO_ARRAY", DEFAULT_SDO_SCHEMA),
            ordinates: format!("{}.SDO_ORDINATE_ARRAY", DEFAULT_SDO_SCHEMA),
        }
    }
}

/// Fully-qualified names of the foreign driver classes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverClassNames {
    /// Base class of all native values.
    pub datum: String,
    /// NUMBER class.
    pub number: String,
    /// ARRAY class.
    pub array: String,
    /// STRUCT class.
    pub structure: String,
    /// STRUCT descriptor class.
    pub struct_descriptor: String,
    /// ARRAY descriptor class.
    pub array_descriptor: String,
}

impl DriverClassNames {
    /// Class names rooted at `package`.
    pub fn with_package(package: &str) -> Self {
        Self {
            datum: format!("{}.Datum", package),
            number: format!("{}.NUMBER", package),
            array: format!("{}.ARRAY", package),
            structure: format!("{}.STRUCT", package),
            struct_descriptor: format!("{}.StructDescriptor", package),
            array_descriptor: format!("{}.ArrayDescriptor", package),
        }
    }
}

impl Default for DriverClassNames {
    fn default() -> Self {
        Self::with_package(DEFAULT_DRIVER_PACKAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_type_names() {
        let names = SdoTypeNames::default();
        assert_eq!(names.geometry, "MDSYS.SDO_GEOMETRY");
        assert_eq!(names.point, "MDSYS.SDO_POINT_TYPE");
        assert_eq!(names.elem_info, "MDSYS.SDO_ELEM_INFO_ARRAY");
        assert_eq!(names.ordinates, "MDSYS.SDO_ORDINATE_ARRAY");
    }

    #[test]
    fn test_with_schema_uppercases() {
        let names = SdoTypeNames::with_schema(" gis ").unwrap();
        assert_eq!(names.ordinates, "GIS.SDO_ORDINATE_ARRAY");
    }

    #[test]
    fn test_with_schema_rejects_bad_names() {
        assert!(matches!(
            SdoTypeNames::with_schema(""),
            Err(Error::InvalidConfig { .. })
        ));
        assert!(matches!(
            SdoTypeNames::with_schema("A.B"),
            Err(Error::InvalidConfig { .. })
        ));
        assert!(matches!(
            SdoTypeNames::with_schema("MY SCHEMA"),
            Err(Error::InvalidConfig { .. })
        ));
    }

    // Tests touching the process environment hold this lock
    static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

    #[test]
    fn test_type_names_from_env() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());

        std::env::remove_var(SDO_TYPE_SCHEMA_ENV);
        assert_eq!(SdoTypeNames::from_env().unwrap(), SdoTypeNames::default());

        std::env::set_var(SDO_TYPE_SCHEMA_ENV, "gis");
        let names = SdoTypeNames::from_env().unwrap();
        assert_eq!(names.geometry, "GIS.SDO_GEOMETRY");
        assert_eq!(names.point, "GIS.SDO_POINT_TYPE");
        assert_eq!(names.elem_info, "GIS.SDO_ELEM_INFO_ARRAY");
        assert_eq!(names.ordinates, "GIS.SDO_ORDINATE_ARRAY");

        std::env::set_var(SDO_TYPE_SCHEMA_ENV, "A.B");
        let result = SdoTypeNames::from_env();
        std::env::remove_var(SDO_TYPE_SCHEMA_ENV);
        assert!(matches!(result, Err(Error::InvalidConfig { .. })));
    }

    #[test]
    fn test_driver_class_names() {
        let names = DriverClassNames::default();
        assert_eq!(names.number, "oracle.sql.NUMBER");
        assert_eq!(names.struct_descriptor, "oracle.sql.StructDescriptor");

        let names = DriverClassNames::with_package("com.example.sql");
        assert_eq!(names.array, "com.example.sql.ARRAY");
    }
}
