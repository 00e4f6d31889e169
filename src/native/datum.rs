//! Native values built by a driver: NUMBER, ARRAY and STRUCT.

use super::number::{decode_oracle_number, encode_double, encode_int};
use crate::error::DriverResult;
use bytes::Bytes;
use std::fmt;

/// Construction path of a NUMBER.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberKind {
    /// Built from an integer.
    Integer,
    /// Built from a double.
    Double,
}

/// An Oracle NUMBER value.
///
/// Numbers built through different paths never compare equal, even when
/// their wire bytes match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NativeNumber {
    kind: NumberKind,
    bytes: Bytes,
}

impl NativeNumber {
    /// Build from an integer.
    pub fn from_int(value: i32) -> DriverResult<Self> {
        Ok(Self {
            kind: NumberKind::Integer,
            bytes: encode_int(value)?,
        })
    }

    /// Build from a finite double.
    pub fn from_double(value: f64) -> DriverResult<Self> {
        Ok(Self {
            kind: NumberKind::Double,
            bytes: encode_double(value)?,
        })
    }

    pub fn kind(&self) -> NumberKind {
        self.kind
    }

    /// Oracle NUMBER wire bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Decimal text of the value.
    pub fn to_decimal_string(&self) -> String {
        // Bytes always come from the encoder
        decode_oracle_number(&self.bytes).unwrap_or_else(|_| "NaN".to_string())
    }

    /// Try to convert to i64.
    pub fn to_i64(&self) -> Option<i64> {
        self.to_decimal_string().parse().ok()
    }

    /// Try to convert to f64.
    pub fn to_f64(&self) -> Option<f64> {
        self.to_decimal_string().parse().ok()
    }
}

impl fmt::Display for NativeNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_decimal_string())
    }
}

/// A collection instance of a named collection type.
#[derive(Debug, Clone, PartialEq)]
pub struct NativeArray {
    type_name: String,
    elements: Vec<Datum>,
}

impl NativeArray {
    /// Create an array. Drivers validate elements against the descriptor first.
    pub fn new(type_name: impl Into<String>, elements: Vec<Datum>) -> Self {
        Self {
            type_name: type_name.into(),
            elements,
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn elements(&self) -> &[Datum] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// An object instance of a named object type.
#[derive(Debug, Clone, PartialEq)]
pub struct NativeStruct {
    type_name: String,
    attributes: Vec<Option<Datum>>,
}

impl NativeStruct {
    /// Create a struct. Drivers validate attributes against the descriptor first.
    pub fn new(type_name: impl Into<String>, attributes: Vec<Option<Datum>>) -> Self {
        Self {
            type_name: type_name.into(),
            attributes,
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Attribute values in declaration order, `None` for NULL.
    pub fn attributes(&self) -> &[Option<Datum>] {
        &self.attributes
    }

    /// Attribute at `index`, `None` when NULL or out of bounds.
    pub fn attribute(&self, index: usize) -> Option<&Datum> {
        self.attributes.get(index).and_then(Option::as_ref)
    }

    /// Whether the attribute at `index` is NULL.
    pub fn is_null(&self, index: usize) -> bool {
        self.attribute(index).is_none()
    }
}

/// Any native value.
#[derive(Debug, Clone, PartialEq)]
pub enum Datum {
    Number(NativeNumber),
    Array(NativeArray),
    Struct(NativeStruct),
}

impl Datum {
    /// Short description of the value's type.
    pub fn type_label(&self) -> String {
        match self {
            Datum::Number(_) => "NUMBER".to_string(),
            Datum::Array(a) => a.type_name().to_string(),
            Datum::Struct(s) => s.type_name().to_string(),
        }
    }

    pub fn as_number(&self) -> Option<&NativeNumber> {
        match self {
            Datum::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&NativeArray> {
        match self {
            Datum::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_struct(&self) -> Option<&NativeStruct> {
        match self {
            Datum::Struct(s) => Some(s),
            _ => None,
        }
    }
}

impl From<NativeNumber> for Datum {
    fn from(n: NativeNumber) -> Self {
        Datum::Number(n)
    }
}

impl From<NativeArray> for Datum {
    fn from(a: NativeArray) -> Self {
        Datum::Array(a)
    }
}

impl From<NativeStruct> for Datum {
    fn from(s: NativeStruct) -> Self {
        Datum::Struct(s)
    }
}

impl fmt::Display for Datum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Datum::Number(n) => write!(f, "{}", n),
            Datum::Array(a) => {
                write!(f, "{}(", a.type_name)?;
                for (i, e) in a.elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", e)?;
                }
                write!(f, ")")
            }
            Datum::Struct(s) => {
                write!(f, "{}(", s.type_name)?;
                for (i, attr) in s.attributes.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    match attr {
                        Some(d) => write!(f, "{}", d)?,
                        None => write!(f, "NULL")?,
                    }
                }
                write!(f, ")")
            }
        }
    }
}
