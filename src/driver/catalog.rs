//! Object type metadata known to a connection.

use crate::config::SdoTypeNames;
use crate::native::{AttributeDescriptor, AttributeType, Descriptor};
use std::collections::HashMap;

/// Maximum length of the SDO VARRAY types.
pub const SDO_VARRAY_LIMIT: u32 = 1_048_576;

/// Named SQL types visible to a connection.
///
/// Names are case-insensitive. A qualified name `SCHEMA.NAME` also answers
/// to `NAME`, like a public synonym, unless another schema registered the
/// same name first.
#[derive(Debug, Clone, Default)]
pub struct TypeCatalog {
    types: HashMap<String, Descriptor>,
    synonyms: HashMap<String, String>,
}

impl TypeCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog holding the four spatial types under `names`.
    pub fn with_sdo_types(names: &SdoTypeNames) -> Self {
        let mut catalog = Self::new();
        let number = |name: &str| AttributeDescriptor::new(name, AttributeType::Number);
        catalog.register(Descriptor::object(
            names.point.clone(),
            vec![number("X"), number("Y"), number("Z")],
        ));
        catalog.register(Descriptor::collection(
            names.elem_info.clone(),
            AttributeType::Number,
            Some(SDO_VARRAY_LIMIT),
        ));
        catalog.register(Descriptor::collection(
            names.ordinates.clone(),
            AttributeType::Number,
            Some(SDO_VARRAY_LIMIT),
        ));
        catalog.register(Descriptor::object(
            names.geometry.clone(),
            vec![
                number("SDO_GTYPE"),
                number("SDO_SRID"),
                AttributeDescriptor::new("SDO_POINT", AttributeType::Object(names.point.clone())),
                AttributeDescriptor::new(
                    "SDO_ELEM_INFO",
                    AttributeType::Collection(names.elem_info.clone()),
                ),
                AttributeDescriptor::new(
                    "SDO_ORDINATES",
                    AttributeType::Collection(names.ordinates.clone()),
                ),
            ],
        ));
        catalog
    }

    /// Register or replace a type.
    pub fn register(&mut self, descriptor: Descriptor) {
        let key = descriptor.type_name().to_ascii_uppercase();
        if let Some((_, short)) = key.rsplit_once('.') {
            self.synonyms
                .entry(short.to_string())
                .or_insert_with(|| key.clone());
        }
        self.types.insert(key, descriptor);
    }

    /// Look up a type by qualified or unqualified name.
    pub fn lookup(&self, name: &str) -> Option<&Descriptor> {
        let key = name.trim().to_ascii_uppercase();
        self.types.get(&key).or_else(|| {
            self.synonyms
                .get(&key)
                .and_then(|qualified| self.types.get(qualified))
        })
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
