//! Opaque property selectors.
//!
//! A selector is the explicit pair the registry needs: a value-accessor
//! closure plus the statically known dotted property name. Accessors
//! take `&dyn Any` so the consuming change tracker can apply them to
//! instances it only holds behind type erasure; applying a selector to
//! an instance of the wrong type yields `None`.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

type Extractor = Arc<dyn Fn(&dyn Any) -> Option<String> + Send + Sync>;

/// Accessor for an entity's unique-identifier value.
///
/// # Examples
///
/// ```
/// use audit_registry::KeySelector;
///
/// struct Order { id: u64 }
///
/// let key = KeySelector::new("Order.Id", |o: &Order| o.id);
/// let order = Order { id: 42 };
/// assert_eq!(key.extract(&order), Some("42".to_string()));
/// assert_eq!(key.property_name(), "Order.Id");
/// ```
#[derive(Clone)]
pub struct KeySelector {
    name: String,
    extract: Extractor,
}

impl KeySelector {
    /// Creates a selector from a dotted property name and an accessor.
    ///
    /// The accessor's value type only needs `ToString`; the extracted
    /// key is carried as its string rendering.
    pub fn new<T, V, F>(name: impl Into<String>, accessor: F) -> Self
    where
        T: Any,
        V: ToString,
        F: Fn(&T) -> V + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            extract: Arc::new(move |instance| {
                instance.downcast_ref::<T>().map(|t| accessor(t).to_string())
            }),
        }
    }

    /// The human-readable dotted name of the selected property.
    pub fn property_name(&self) -> &str {
        &self.name
    }

    /// Applies the selector to an instance.
    ///
    /// Returns `None` when the instance is not of the selector's type.
    pub fn extract(&self, instance: &dyn Any) -> Option<String> {
        (self.extract)(instance)
    }
}

impl fmt::Debug for KeySelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("KeySelector").field(&self.name).finish()
    }
}

/// Accessor producing a composite string key from several fields of an
/// instance, used when no single property uniquely identifies it.
#[derive(Clone)]
pub struct CompositeKeySelector {
    compose: Extractor,
}

impl CompositeKeySelector {
    /// Creates a composite-key accessor for instances of `T`.
    pub fn new<T, F>(compose: F) -> Self
    where
        T: Any,
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        Self {
            compose: Arc::new(move |instance| instance.downcast_ref::<T>().map(&compose)),
        }
    }

    /// Computes the composite key for an instance.
    ///
    /// Returns `None` when the instance is not of the selector's type.
    pub fn compose(&self, instance: &dyn Any) -> Option<String> {
        (self.compose)(instance)
    }
}

impl fmt::Debug for CompositeKeySelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CompositeKeySelector")
    }
}
