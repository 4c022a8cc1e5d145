//! Producing empty record instances.

use crate::error::{ConstructionError, SchemaError};
use std::any::type_name;
use std::fmt;
use std::sync::Arc;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;
type Construct<R> = Arc<dyn Fn() -> R + Send + Sync>;
type ConstructWithContext<R> = Arc<dyn Fn() -> Result<R, ConstructionError> + Send + Sync>;

/// Creates a fresh record for every mapped line.
///
/// `Standalone` wraps a no-argument constructor. `Contextual` first builds the
/// enclosing context value the record is constructed from, which may fail.
pub enum RecordFactory<R> {
    Standalone(Construct<R>),
    Contextual(ConstructWithContext<R>),
}

impl<R> Clone for RecordFactory<R> {
    fn clone(&self) -> Self {
        match self {
            RecordFactory::Standalone(f) => RecordFactory::Standalone(Arc::clone(f)),
            RecordFactory::Contextual(f) => RecordFactory::Contextual(Arc::clone(f)),
        }
    }
}

impl<R> fmt::Debug for RecordFactory<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordFactory::Standalone(_) => write!(f, "Standalone<{}>", type_name::<R>()),
            RecordFactory::Contextual(_) => write!(f, "Contextual<{}>", type_name::<R>()),
        }
    }
}

impl<R: 'static> RecordFactory<R> {
    pub fn standalone(construct: impl Fn() -> R + Send + Sync + 'static) -> Self {
        RecordFactory::Standalone(Arc::new(construct))
    }

    /// Construct records from a context produced by `make_context` on every call.
    pub fn contextual<C, E, M, B>(make_context: M, build: B) -> Self
    where
        E: Into<BoxError>,
        M: Fn() -> Result<C, E> + Send + Sync + 'static,
        B: Fn(C) -> R + Send + Sync + 'static,
    {
        RecordFactory::Contextual(Arc::new(move || {
            let context =
                make_context().map_err(|e| ConstructionError::new(type_name::<R>(), e))?;
            Ok(build(context))
        }))
    }

    /// Pick the no-argument constructor if there is one, else the contextual one.
    ///
    /// # Errors
    /// [`SchemaError::NoConstructor`] when neither is available.
    pub fn resolve(
        standalone: Option<Self>,
        contextual: Option<Self>,
    ) -> Result<Self, SchemaError> {
        standalone.or(contextual).ok_or(SchemaError::NoConstructor {
            record: type_name::<R>(),
        })
    }

    /// A new, empty record.
    ///
    /// # Errors
    /// The context constructor's failure, for contextual factories.
    pub fn create(&self) -> Result<R, ConstructionError> {
        match self {
            RecordFactory::Standalone(construct) => Ok(construct()),
            RecordFactory::Contextual(construct) => construct(),
        }
    }
}

impl<R: Default + 'static> RecordFactory<R> {
    #[must_use]
    pub fn from_default() -> Self {
        Self::standalone(R::default)
    }
}
