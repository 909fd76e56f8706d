//! Type identity and declared hierarchy.
//!
//! Rust has no runtime subtype reflection, so types that participate in
//! audit resolution declare their hierarchy explicitly through the
//! [`AuditEntity`] trait. A [`TypeToken`] captures a type's identity,
//! namespace, and the transitive closure of its declared supertypes;
//! the resolution engine uses tokens to answer "is `T` assignable to
//! `U`?" the way a reflective runtime would.

use std::any::{Any, TypeId};

/// A type that can participate in audit configuration.
///
/// Implementors declare their place in the entity hierarchy via
/// [`supertypes`](AuditEntity::supertypes): the direct base type and any
/// interfaces/traits the type should be matched through. Wildcard
/// configurations registered on a supertype then apply to this type.
///
/// # Examples
///
/// ```
/// use audit_registry::{AuditEntity, TypeToken};
///
/// struct Document;
/// struct SignedDocument;
///
/// impl AuditEntity for Document {}
///
/// impl AuditEntity for SignedDocument {
///     fn supertypes() -> Vec<TypeToken> {
///         vec![TypeToken::of::<Document>()]
///     }
/// }
///
/// let token = TypeToken::of::<SignedDocument>();
/// assert!(token.is_assignable_to(TypeToken::of::<Document>().id()));
/// ```
pub trait AuditEntity: Any {
    /// The namespace this type belongs to, used by namespace exclusions.
    ///
    /// Defaults to the module path prefix of the Rust type name
    /// (everything before the final `::` segment).
    fn namespace() -> &'static str
    where
        Self: Sized,
    {
        let name = std::any::type_name::<Self>();
        match name.rfind("::") {
            Some(idx) => &name[..idx],
            None => "",
        }
    }

    /// Direct supertypes of this type (base type, implemented interfaces).
    ///
    /// Transitive ancestors are computed by [`TypeToken::of`]; only the
    /// immediate parents need to be listed here. Declarations must be
    /// acyclic: a type listing itself among its (transitive) supertypes
    /// overflows the stack when its token is built.
    fn supertypes() -> Vec<TypeToken>
    where
        Self: Sized,
    {
        Vec::new()
    }
}

/// Runtime identity of an entity type known to the registry.
///
/// Carries the `TypeId`, the full type name, the namespace, and the
/// transitive set of ancestor `TypeId`s. Tokens are built once per type
/// via [`TypeToken::of`] and cloned freely.
#[derive(Debug, Clone)]
pub struct TypeToken {
    id: TypeId,
    name: &'static str,
    namespace: &'static str,
    ancestors: Vec<TypeId>,
}

impl TypeToken {
    /// Builds the token for `T`, flattening its declared supertypes into
    /// the transitive ancestor set.
    pub fn of<T: AuditEntity>() -> Self {
        let mut ancestors = Vec::new();
        for supertype in T::supertypes() {
            if !ancestors.contains(&supertype.id) {
                ancestors.push(supertype.id);
            }
            for ancestor in supertype.ancestors {
                if !ancestors.contains(&ancestor) {
                    ancestors.push(ancestor);
                }
            }
        }
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
            namespace: T::namespace(),
            ancestors,
        }
    }

    /// The type's unique identity.
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// The full Rust type name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The namespace used by namespace exclusions.
    pub fn namespace(&self) -> &'static str {
        self.namespace
    }

    /// Returns `true` when this type is `other` or declares `other`
    /// among its (transitive) supertypes.
    ///
    /// This is the assignability test driving wildcard matching: a
    /// wildcard configuration on `other` applies to this type exactly
    /// when this returns `true`.
    pub fn is_assignable_to(&self, other: TypeId) -> bool {
        self.id == other || self.ancestors.contains(&other)
    }
}

/// Lightweight identity of a type referenced from configuration metadata.
///
/// Used where a configuration only needs to name a type (reference
/// targets, description property types) without hierarchy information.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeRef {
    id: TypeId,
    name: &'static str,
}

impl TypeRef {
    /// Builds the reference for `T`.
    pub fn of<T: Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// The referenced type's identity.
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// The referenced type's full name.
    pub fn name(&self) -> &'static str {
        self.name
    }
}
