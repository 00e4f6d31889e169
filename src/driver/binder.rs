//! One-time resolution of the foreign driver primitives.

use super::{
    signature, ArrayConstructorFn, DescriptorFactoryFn, DriverModule, Export, NumberFromDoubleFn,
    NumberFromIntFn, ParamType, StructConstructorFn,
};
use crate::config::DriverClassNames;
use crate::connection::NativeConnection;
use crate::error::{Error, Result};
use crate::native::{
    Datum, Descriptor, NativeArray, NativeNumber, NativeStruct, NativeTypeFactory,
};
use std::fmt;
use tracing::{debug, info};

const CREATE_DESCRIPTOR: &str = "createDescriptor";

/// Resolves the driver primitives needed to build native composite values.
#[derive(Debug, Clone, Default)]
pub struct ForeignTypeBinder {
    classes: DriverClassNames,
}

impl ForeignTypeBinder {
    /// Create a binder looking up `classes`.
    pub fn new(classes: DriverClassNames) -> Self {
        Self { classes }
    }

    /// Class names this binder looks up.
    pub fn classes(&self) -> &DriverClassNames {
        &self.classes
    }

    /// Look up every primitive in `module`.
    ///
    /// Fails on the first missing class or overload, naming it. A symbol
    /// exported with the wrong shape counts as missing.
    pub fn initialize(&self, module: &dyn DriverModule) -> Result<TypeBindingSet> {
        let classes = &self.classes;

        let struct_descriptor_factory = find_descriptor_creator(module, &classes.struct_descriptor)?;
        let array_descriptor_factory = find_descriptor_creator(module, &classes.array_descriptor)?;
        for class in [
            &classes.datum,
            &classes.number,
            &classes.array,
            &classes.structure,
        ] {
            require_class(module, class)?;
        }

        let number_from_int = match find_constructor(module, &classes.number, &[ParamType::Int])? {
            Export::NumberFromInt(f) => f,
            _ => return Err(missing_constructor(&classes.number, &[ParamType::Int])),
        };

        let number_from_double =
            match find_constructor(module, &classes.number, &[ParamType::Double])? {
                Export::NumberFromDouble(f) => f,
                _ => return Err(missing_constructor(&classes.number, &[ParamType::Double])),
            };

        let array_params = [
            ParamType::Class(classes.array_descriptor.clone()),
            ParamType::Connection,
            ParamType::Object,
        ];
        let array_constructor = match find_constructor(module, &classes.array, &array_params)? {
            Export::ArrayConstructor(f) => f,
            _ => return Err(missing_constructor(&classes.array, &array_params)),
        };

        let struct_params = [
            ParamType::Class(classes.struct_descriptor.clone()),
            ParamType::Connection,
            ParamType::ObjectArray,
        ];
        let struct_constructor = match find_constructor(module, &classes.structure, &struct_params)? {
            Export::StructConstructor(f) => f,
            _ => return Err(missing_constructor(&classes.structure, &struct_params)),
        };

        info!(module = module.name(), "foreign driver types bound");
        Ok(TypeBindingSet {
            module_name: module.name().to_string(),
            number_from_int,
            number_from_double,
            array_constructor,
            struct_constructor,
            struct_descriptor_factory,
            array_descriptor_factory,
        })
    }
}

fn require_class(module: &dyn DriverModule, class: &str) -> Result<()> {
    if module.has_class(class) {
        debug!(class, "resolved class");
        Ok(())
    } else {
        Err(Error::MissingClass {
            class: class.to_string(),
        })
    }
}

fn find_constructor(module: &dyn DriverModule, class: &str, params: &[ParamType]) -> Result<Export> {
    let export = module
        .constructor(class, params)
        .ok_or_else(|| missing_constructor(class, params))?;
    debug!(class, constructor = %signature(short_name(class), params), "resolved constructor");
    Ok(export)
}

fn find_descriptor_creator(module: &dyn DriverModule, class: &str) -> Result<DescriptorFactoryFn> {
    require_class(module, class)?;
    let params = [ParamType::String, ParamType::Connection];
    match module.static_method(class, CREATE_DESCRIPTOR, &params) {
        Some(Export::DescriptorFactory(f)) => {
            debug!(class, method = CREATE_DESCRIPTOR, "resolved descriptor factory");
            Ok(f)
        }
        _ => Err(Error::missing_method(
            class,
            format!("method '{}'", signature(CREATE_DESCRIPTOR, &params)),
        )),
    }
}

fn missing_constructor(class: &str, params: &[ParamType]) -> Error {
    Error::missing_method(
        class,
        format!("constructor '{}'", signature(short_name(class), params)),
    )
}

fn short_name(class: &str) -> &str {
    class.rsplit('.').next().unwrap_or(class)
}

/// Resolved driver primitives.
///
/// Immutable after [`ForeignTypeBinder::initialize`]; share it behind an
/// `Arc` across threads.
#[derive(Clone)]
pub struct TypeBindingSet {
    module_name: String,
    number_from_int: NumberFromIntFn,
    number_from_double: NumberFromDoubleFn,
    array_constructor: ArrayConstructorFn,
    struct_constructor: StructConstructorFn,
    struct_descriptor_factory: DescriptorFactoryFn,
    array_descriptor_factory: DescriptorFactoryFn,
}

impl TypeBindingSet {
    /// Name of the driver module the primitives came from.
    pub fn module_name(&self) -> &str {
        &self.module_name
    }
}

impl fmt::Debug for TypeBindingSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeBindingSet")
            .field("module_name", &self.module_name)
            .finish_non_exhaustive()
    }
}

impl NativeTypeFactory for TypeBindingSet {
    fn make_int_number(&self, value: i32) -> Result<NativeNumber> {
        (self.number_from_int)(value).map_err(|e| Error::encoding("NUMBER", e))
    }

    fn make_double_number(&self, value: f64) -> Result<NativeNumber> {
        (self.number_from_double)(value).map_err(|e| Error::encoding("NUMBER", e))
    }

    fn create_struct_descriptor(
        &self,
        name: &str,
        conn: &dyn NativeConnection,
    ) -> Result<Descriptor> {
        (self.struct_descriptor_factory)(name, conn)
            .map_err(|e| Error::encoding("STRUCT descriptor", e))
    }

    fn create_array_descriptor(
        &self,
        name: &str,
        conn: &dyn NativeConnection,
    ) -> Result<Descriptor> {
        (self.array_descriptor_factory)(name, conn)
            .map_err(|e| Error::encoding("ARRAY descriptor", e))
    }

    fn make_array(
        &self,
        descriptor: &Descriptor,
        conn: &dyn NativeConnection,
        data: Vec<Datum>,
    ) -> Result<NativeArray> {
        (self.array_constructor)(descriptor, conn, data).map_err(|e| Error::encoding("ARRAY", e))
    }

    fn make_struct(
        &self,
        descriptor: &Descriptor,
        conn: &dyn NativeConnection,
        attributes: Vec<Option<Datum>>,
    ) -> Result<NativeStruct> {
        (self.struct_constructor)(descriptor, conn, attributes)
            .map_err(|e| Error::encoding("STRUCT", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::ThinDriver;
    use std::sync::Arc;

    /// Module exporting nothing, as when the driver is absent.
    struct EmptyModule;

    impl DriverModule for EmptyModule {
        fn name(&self) -> &str {
            "empty"
        }

        fn has_class(&self, _class: &str) -> bool {
            false
        }

        fn constructor(&self, _class: &str, _params: &[ParamType]) -> Option<Export> {
            None
        }

        fn static_method(&self, _class: &str, _method: &str, _params: &[ParamType]) -> Option<Export> {
            None
        }
    }

    /// Thin driver with the `NUMBER(double)` overload swapped for a wrong export.
    struct NoDoubleNumber(ThinDriver);

    impl DriverModule for NoDoubleNumber {
        fn name(&self) -> &str {
            "no-double"
        }

        fn has_class(&self, class: &str) -> bool {
            self.0.has_class(class)
        }

        fn constructor(&self, class: &str, params: &[ParamType]) -> Option<Export> {
            if params == [ParamType::Double] {
                return Some(Export::NumberFromInt(Arc::new(NativeNumber::from_int)));
            }
            self.0.constructor(class, params)
        }

        fn static_method(&self, class: &str, method: &str, params: &[ParamType]) -> Option<Export> {
            self.0.static_method(class, method, params)
        }
    }

    #[test]
    fn test_initialize_thin_driver() {
        let bindings = ForeignTypeBinder::default()
            .initialize(&ThinDriver::new())
            .unwrap();
        assert_eq!(bindings.module_name(), "oracle-thin");
        let n = bindings.make_int_number(7).unwrap();
        assert_eq!(n.to_i64(), Some(7));
    }

    #[test]
    fn test_initialize_without_driver() {
        let result = ForeignTypeBinder::default().initialize(&EmptyModule);
        match result {
            Err(Error::MissingClass { class }) => {
                assert_eq!(class, "oracle.sql.StructDescriptor")
            }
            other => panic!("Expected MissingClass, got {:?}", other),
        }
    }

    #[test]
    fn test_initialize_wrong_overload_shape() {
        let result = ForeignTypeBinder::default().initialize(&NoDoubleNumber(ThinDriver::new()));
        match result {
            Err(Error::MissingMethod { class, member }) => {
                assert_eq!(class, "oracle.sql.NUMBER");
                assert_eq!(member, "constructor 'NUMBER(double)'");
            }
            other => panic!("Expected MissingMethod, got {:?}", other),
        }
    }

    #[test]
    fn test_initialize_other_package() {
        let binder = ForeignTypeBinder::new(DriverClassNames::with_package("com.example.sql"));
        let result = binder.initialize(&ThinDriver::new());
        assert!(matches!(result, Err(Error::MissingClass { .. })));

        let driver = ThinDriver::with_classes(DriverClassNames::with_package("com.example.sql"));
        assert!(binder.initialize(&driver).is_ok());
    }

    #[test]
    fn test_binding_set_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TypeBindingSet>();
    }
}
