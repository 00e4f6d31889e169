//! Error types for SDO geometry encoding.

use thiserror::Error;

/// Result type alias for encoding operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Result type alias for driver-side primitives.
pub type DriverResult<T> = std::result::Result<T, DriverError>;

/// Error type for binding, unwrapping and encoding.
#[derive(Error, Debug)]
pub enum Error {
    /// A foreign class is not exported by the driver module.
    #[error("Class '{class}' not found in driver module")]
    MissingClass { class: String },

    /// A foreign class lacks a required constructor or method overload.
    #[error("Class '{class}' has no {member}")]
    MissingMethod { class: String, member: String },

    /// No native connection could be located behind a connection handle.
    #[error("Problem finding native connection: {message}")]
    ConnectionLookup { message: String },

    /// The driver rejected the construction of a native value.
    #[error("Problem creating {target}")]
    Encoding {
        target: &'static str,
        #[source]
        source: DriverError,
    },

    /// Geometry value is structurally invalid.
    #[error("Invalid geometry: {message}")]
    InvalidGeometry { message: String },

    /// Geometry type code is not a valid DLTT code.
    #[error("Invalid SDO_GTYPE: {code}")]
    InvalidGType { code: i32 },

    /// Invalid configuration value.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl Error {
    /// Create a missing-method error.
    pub fn missing_method(class: impl Into<String>, member: impl Into<String>) -> Self {
        Self::MissingMethod {
            class: class.into(),
            member: member.into(),
        }
    }

    /// Create a connection lookup error.
    pub fn connection_lookup(message: impl Into<String>) -> Self {
        Self::ConnectionLookup {
            message: message.into(),
        }
    }

    /// Wrap a driver rejection raised while creating `target`.
    pub fn encoding(target: &'static str, source: DriverError) -> Self {
        Self::Encoding { target, source }
    }

    /// Create an invalid geometry error.
    pub fn invalid_geometry(message: impl Into<String>) -> Self {
        Self::InvalidGeometry {
            message: message.into(),
        }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}

/// Rejection raised by a driver primitive.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DriverError {
    /// The named SQL type is not known to the connection.
    #[error("Unknown SQL type: {name}")]
    UnknownType { name: String },

    /// A descriptor was requested or used for the wrong kind of type.
    #[error("{type_name} is not {expected}")]
    DescriptorKind {
        type_name: String,
        expected: &'static str,
    },

    /// Attribute count does not match the object type.
    #[error("{type_name} expects {expected} attributes, got {actual}")]
    AttributeCount {
        type_name: String,
        expected: usize,
        actual: usize,
    },

    /// Attribute value does not match the declared attribute type.
    #[error("Attribute {attribute} of {type_name}: expected {expected}, got {actual}")]
    AttributeType {
        type_name: String,
        attribute: String,
        expected: String,
        actual: String,
    },

    /// Collection element does not match the declared element type.
    #[error("Element {index} of {type_name}: expected {expected}, got {actual}")]
    ElementType {
        type_name: String,
        index: usize,
        expected: String,
        actual: String,
    },

    /// Collection holds more elements than its declared limit.
    #[error("{type_name} holds at most {limit} elements, got {len}")]
    CollectionLimit {
        type_name: String,
        limit: u32,
        len: usize,
    },

    /// Value cannot be represented as an Oracle NUMBER.
    #[error("Value out of NUMBER range: {value}")]
    NumberOutOfRange { value: String },

    /// Malformed NUMBER text or wire bytes.
    #[error("Invalid NUMBER: {message}")]
    InvalidNumber { message: String },

    /// The connection does not belong to this driver.
    #[error("Connection is not a {driver} connection")]
    ForeignConnection { driver: String },
}
