//! Descriptors of named SQL object and collection types.
//!
//! A descriptor carries the type-specific shape a driver needs before it can
//! build an instance: the attribute list of an object type, or the element
//! type and limit of a collection type.

use super::datum::Datum;
use std::fmt;

/// Type of an object attribute or collection element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeType {
    /// NUMBER scalar.
    Number,
    /// Named object type.
    Object(String),
    /// Named collection type.
    Collection(String),
}

impl AttributeType {
    /// Check whether `value` is an instance of this type.
    pub fn accepts(&self, value: &Datum) -> bool {
        match (self, value) {
            (AttributeType::Number, Datum::Number(_)) => true,
            (AttributeType::Object(name), Datum::Struct(s)) => s.type_name().eq_ignore_ascii_case(name),
            (AttributeType::Collection(name), Datum::Array(a)) => a.type_name().eq_ignore_ascii_case(name),
            _ => false,
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeType::Number => write!(f, "NUMBER"),
            AttributeType::Object(name) | AttributeType::Collection(name) => write!(f, "{}", name),
        }
    }
}

/// A named attribute of an object type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeDescriptor {
    pub name: String,
    pub attr_type: AttributeType,
}

impl AttributeDescriptor {
    pub fn new(name: impl Into<String>, attr_type: AttributeType) -> Self {
        Self {
            name: name.into(),
            attr_type,
        }
    }
}

/// Shape of a named SQL type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeShape {
    /// Object type with ordered attributes.
    Object { attributes: Vec<AttributeDescriptor> },
    /// VARRAY or nested table.
    Collection {
        element: AttributeType,
        max_elements: Option<u32>,
    },
}

/// Descriptor of a named SQL type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    type_name: String,
    shape: TypeShape,
}

impl Descriptor {
    /// Describe an object type.
    pub fn object(type_name: impl Into<String>, attributes: Vec<AttributeDescriptor>) -> Self {
        Self {
            type_name: type_name.into(),
            shape: TypeShape::Object { attributes },
        }
    }

    /// Describe a collection type.
    pub fn collection(
        type_name: impl Into<String>,
        element: AttributeType,
        max_elements: Option<u32>,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            shape: TypeShape::Collection {
                element,
                max_elements,
            },
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn shape(&self) -> &TypeShape {
        &self.shape
    }

    pub fn is_object(&self) -> bool {
        matches!(self.shape, TypeShape::Object { .. })
    }

    pub fn is_collection(&self) -> bool {
        matches!(self.shape, TypeShape::Collection { .. })
    }

    /// Attributes of an object type, empty for collections.
    pub fn attributes(&self) -> &[AttributeDescriptor] {
        match &self.shape {
            TypeShape::Object { attributes } => attributes,
            TypeShape::Collection { .. } => &[],
        }
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.shape {
            TypeShape::Object { attributes } => {
                write!(f, "{} (", self.type_name)?;
                for (i, attr) in attributes.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{} {}", attr.name, attr.attr_type)?;
                }
                write!(f, ")")
            }
            TypeShape::Collection {
                element,
                max_elements: Some(limit),
            } => write!(f, "{} VARRAY({}) OF {}", self.type_name, limit, element),
            TypeShape::Collection {
                element,
                max_elements: None,
            } => write!(f, "{} TABLE OF {}", self.type_name, element),
        }
    }
}
