//! Encoding of SDO geometries into native STRUCT values.

use crate::config::SdoTypeNames;
use crate::connection::{ConnectionUnwrapper, DbConnection, DelegateChainUnwrapper, NativeConnection};
use crate::driver::{DriverModule, ForeignTypeBinder, TypeBindingSet};
use crate::error::Result;
use crate::geometry::{ElemInfo, Ordinates, SdoGeometry, SdoPayload, SdoPoint};
use crate::native::{Datum, NativeArray, NativeStruct, NativeTypeFactory};
use tracing::{debug, trace};

/// Attribute count of SDO_GEOMETRY.
pub const GEOMETRY_SLOTS: usize = 5;
/// SDO_GTYPE attribute index.
pub const SLOT_GTYPE: usize = 0;
/// SDO_SRID attribute index.
pub const SLOT_SRID: usize = 1;
/// SDO_POINT attribute index.
pub const SLOT_POINT: usize = 2;
/// SDO_ELEM_INFO attribute index.
pub const SLOT_ELEM_INFO: usize = 3;
/// SDO_ORDINATES attribute index.
pub const SLOT_ORDINATES: usize = 4;

/// Attribute count of SDO_POINT_TYPE.
const POINT_SLOTS: usize = 3;

/// Builds native SDO_GEOMETRY values through a [`NativeTypeFactory`].
///
/// Stateless: every call resolves its descriptors and builds fresh values.
#[derive(Debug, Clone)]
pub struct GeometryEncoder<F = TypeBindingSet> {
    factory: F,
    names: SdoTypeNames,
}

impl<F: NativeTypeFactory> GeometryEncoder<F> {
    /// Encoder targeting the `MDSYS` spatial types.
    pub fn new(factory: F) -> Self {
        Self::with_type_names(factory, SdoTypeNames::default())
    }

    /// Encoder targeting the types in `names`.
    pub fn with_type_names(factory: F, names: SdoTypeNames) -> Self {
        Self { factory, names }
    }

    /// Target type names.
    pub fn type_names(&self) -> &SdoTypeNames {
        &self.names
    }

    /// Underlying native type factory.
    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// Encode `geometry` as an SDO_GEOMETRY STRUCT.
    ///
    /// Attributes are `[gtype, srid, point, elem_info, ordinates]`. A point
    /// geometry fills `point` and leaves the arrays NULL; an element geometry
    /// fills both arrays and leaves `point` NULL. `srid` is NULL when unset.
    pub fn encode(
        &self,
        geometry: &SdoGeometry,
        conn: &dyn NativeConnection,
    ) -> Result<NativeStruct> {
        debug!(
            gtype = %geometry.gtype(),
            srid = ?geometry.srid(),
            payload = geometry.payload().kind(),
            "encoding geometry"
        );
        let descriptor = self
            .factory
            .create_struct_descriptor(&self.names.geometry, conn)?;

        let mut attributes: Vec<Option<Datum>> = vec![None; GEOMETRY_SLOTS];
        attributes[SLOT_GTYPE] = Some(self.factory.make_int_number(geometry.gtype().code())?.into());
        if let Some(srid) = geometry.srid() {
            attributes[SLOT_SRID] = Some(self.factory.make_int_number(srid)?.into());
        }

        match geometry.payload() {
            SdoPayload::Point(point) => {
                attributes[SLOT_POINT] = Some(self.encode_point(point, conn)?.into());
            }
            SdoPayload::Elements {
                elem_info,
                ordinates,
            } => {
                attributes[SLOT_ELEM_INFO] =
                    Some(self.encode_elem_info_array(elem_info, conn)?.into());
                attributes[SLOT_ORDINATES] =
                    Some(self.encode_ordinates_array(ordinates, conn)?.into());
            }
        }

        self.factory.make_struct(&descriptor, conn, attributes)
    }

    /// Encode element info as an SDO_ELEM_INFO_ARRAY of integer NUMBERs.
    pub fn encode_elem_info_array(
        &self,
        elem_info: &ElemInfo,
        conn: &dyn NativeConnection,
    ) -> Result<NativeArray> {
        let descriptor = self
            .factory
            .create_array_descriptor(&self.names.elem_info, conn)?;
        let data = elem_info
            .flat_values()
            .map(|v| self.factory.make_int_number(v).map(Datum::from))
            .collect::<Result<Vec<_>>>()?;
        trace!(len = data.len(), "encoded element info");
        self.factory.make_array(&descriptor, conn, data)
    }

    /// Encode ordinates as an SDO_ORDINATE_ARRAY of double NUMBERs.
    pub fn encode_ordinates_array(
        &self,
        ordinates: &Ordinates,
        conn: &dyn NativeConnection,
    ) -> Result<NativeArray> {
        let descriptor = self
            .factory
            .create_array_descriptor(&self.names.ordinates, conn)?;
        let data = ordinates
            .as_slice()
            .iter()
            .map(|&v| self.factory.make_double_number(v).map(Datum::from))
            .collect::<Result<Vec<_>>>()?;
        trace!(len = data.len(), "encoded ordinates");
        self.factory.make_array(&descriptor, conn, data)
    }

    fn encode_point(&self, point: &SdoPoint, conn: &dyn NativeConnection) -> Result<NativeStruct> {
        let descriptor = self.factory.create_struct_descriptor(&self.names.point, conn)?;
        let mut attributes: Vec<Option<Datum>> = vec![None; POINT_SLOTS];
        attributes[0] = Some(self.factory.make_double_number(point.x)?.into());
        attributes[1] = Some(self.factory.make_double_number(point.y)?.into());
        self.factory.make_struct(&descriptor, conn, attributes)
    }
}

/// Encoder front end working on possibly-wrapped connection handles.
///
/// Every operation first locates the native connection through the
/// configured [`ConnectionUnwrapper`].
pub struct SdoTypeFactory<F = TypeBindingSet> {
    encoder: GeometryEncoder<F>,
    unwrapper: Box<dyn ConnectionUnwrapper>,
}

impl SdoTypeFactory<TypeBindingSet> {
    /// Bind the default driver classes in `module`, targeting the `MDSYS`
    /// types and unwrapping connections through their delegate chain.
    pub fn initialize(module: &dyn DriverModule) -> Result<Self> {
        let bindings = ForeignTypeBinder::default().initialize(module)?;
        Ok(Self::new(
            GeometryEncoder::new(bindings),
            DelegateChainUnwrapper::default(),
        ))
    }
}

impl<F: NativeTypeFactory> SdoTypeFactory<F> {
    /// Front end over `encoder`, locating connections with `unwrapper`.
    pub fn new(encoder: GeometryEncoder<F>, unwrapper: impl ConnectionUnwrapper + 'static) -> Self {
        Self {
            encoder,
            unwrapper: Box::new(unwrapper),
        }
    }

    /// Wrapped encoder.
    pub fn encoder(&self) -> &GeometryEncoder<F> {
        &self.encoder
    }

    /// Encode `geometry` as an SDO_GEOMETRY STRUCT.
    pub fn create_struct(
        &self,
        geometry: &SdoGeometry,
        conn: &dyn DbConnection,
    ) -> Result<NativeStruct> {
        let native = self.unwrapper.find(conn)?;
        self.encoder.encode(geometry, native)
    }

    /// Encode element info as an SDO_ELEM_INFO_ARRAY.
    pub fn create_elem_info_array(
        &self,
        elem_info: &ElemInfo,
        conn: &dyn DbConnection,
    ) -> Result<NativeArray> {
        let native = self.unwrapper.find(conn)?;
        self.encoder.encode_elem_info_array(elem_info, native)
    }

    /// Encode ordinates as an SDO_ORDINATE_ARRAY.
    pub fn create_ordinates_array(
        &self,
        ordinates: &Ordinates,
        conn: &dyn DbConnection,
    ) -> Result<NativeArray> {
        let native = self.unwrapper.find(conn)?;
        self.encoder.encode_ordinates_array(ordinates, native)
    }
}
