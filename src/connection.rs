//! Connection handles and unwrapping to the native driver connection.
//!
//! Pools, proxies and instrumentation layers may wrap the driver connection
//! any number of times. Descriptor creation only accepts the native
//! connection, so encoding always goes through a [`ConnectionUnwrapper`].

use crate::error::{Error, Result};
use std::any::Any;
use std::sync::Arc;
use tracing::warn;

/// Default number of wrapper layers [`DelegateChainUnwrapper`] walks.
pub const DEFAULT_MAX_UNWRAP_DEPTH: usize = 16;

/// A driver-level connection accepted by descriptor factories.
pub trait NativeConnection: Any {
    /// Name of the driver owning this connection.
    fn driver_name(&self) -> &str;

    /// Downcasting hook for driver primitives.
    fn as_any(&self) -> &dyn Any;
}

/// A connection handle as seen by the statement-binding layer.
pub trait DbConnection {
    /// The handle itself as a native connection, if it is one.
    fn as_native(&self) -> Option<&dyn NativeConnection> {
        None
    }

    /// The connection this handle wraps, if any.
    fn delegate(&self) -> Option<&dyn DbConnection> {
        None
    }
}

impl<C: DbConnection + ?Sized> DbConnection for Box<C> {
    fn as_native(&self) -> Option<&dyn NativeConnection> {
        (**self).as_native()
    }

    fn delegate(&self) -> Option<&dyn DbConnection> {
        (**self).delegate()
    }
}

impl<C: DbConnection + ?Sized> DbConnection for Arc<C> {
    fn as_native(&self) -> Option<&dyn NativeConnection> {
        (**self).as_native()
    }

    fn delegate(&self) -> Option<&dyn DbConnection> {
        (**self).delegate()
    }
}

/// Strategy locating the native connection behind a handle.
pub trait ConnectionUnwrapper: Send + Sync {
    /// Find the native connection, or fail with [`Error::ConnectionLookup`].
    fn find<'c>(&self, conn: &'c dyn DbConnection) -> Result<&'c dyn NativeConnection>;
}

/// Unwrapper following [`DbConnection::delegate`] links.
#[derive(Debug, Clone)]
pub struct DelegateChainUnwrapper {
    max_depth: usize,
}

impl DelegateChainUnwrapper {
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_UNWRAP_DEPTH,
        }
    }

    /// Set how many wrapper layers are followed before giving up.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

impl Default for DelegateChainUnwrapper {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectionUnwrapper for DelegateChainUnwrapper {
    fn find<'c>(&self, conn: &'c dyn DbConnection) -> Result<&'c dyn NativeConnection> {
        let mut current = conn;
        for depth in 0..=self.max_depth {
            if let Some(native) = current.as_native() {
                return Ok(native);
            }
            match current.delegate() {
                Some(next) => current = next,
                None => {
                    return Err(Error::connection_lookup(format!(
                        "no native connection after {} wrapper(s)",
                        depth
                    )))
                }
            }
        }
        warn!(max_depth = self.max_depth, "connection wrapper chain too deep");
        Err(Error::connection_lookup(format!(
            "wrapper chain deeper than {} layers",
            self.max_depth
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Native;

    impl NativeConnection for Native {
        fn driver_name(&self) -> &str {
            "test"
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    impl DbConnection for Native {
        fn as_native(&self) -> Option<&dyn NativeConnection> {
            Some(self)
        }
    }

    struct Wrapper(Box<dyn DbConnection>);

    impl DbConnection for Wrapper {
        fn delegate(&self) -> Option<&dyn DbConnection> {
            Some(&*self.0)
        }
    }

    struct Opaque;

    impl DbConnection for Opaque {}

    fn wrap(levels: usize) -> Box<dyn DbConnection> {
        let mut conn: Box<dyn DbConnection> = Box::new(Native);
        for _ in 0..levels {
            conn = Box::new(Wrapper(conn));
        }
        conn
    }

    #[test]
    fn test_find_native_directly() {
        let conn = Native;
        let found = DelegateChainUnwrapper::new().find(&conn).unwrap();
        assert_eq!(found.driver_name(), "test");
    }

    #[test]
    fn test_find_through_wrappers() {
        let conn = wrap(3);
        let found = DelegateChainUnwrapper::new().find(&*conn).unwrap();
        assert!(found.as_any().downcast_ref::<Native>().is_some());
    }

    #[test]
    fn test_find_fails_without_native() {
        let conn = Wrapper(Box::new(Opaque));
        let result = DelegateChainUnwrapper::new().find(&conn);
        assert!(matches!(result, Err(Error::ConnectionLookup { .. })));
    }

    #[test]
    fn test_find_respects_max_depth() {
        let conn = wrap(4);
        let unwrapper = DelegateChainUnwrapper::new().with_max_depth(3);
        assert!(matches!(
            unwrapper.find(&*conn),
            Err(Error::ConnectionLookup { .. })
        ));
        let unwrapper = DelegateChainUnwrapper::new().with_max_depth(4);
        assert!(unwrapper.find(&*conn).is_ok());
    }
}
