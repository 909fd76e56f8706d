//! Exclusion veto for wildcard matching.

use std::any::TypeId;
use std::collections::HashSet;

use crate::entity::TypeToken;

/// Append-only sets of vetoed types and namespaces.
///
/// Consulted only while matching wildcard configurations: an exact
/// registration is always honored regardless of exclusions. Namespace
/// matching is exact string equality, no wildcards.
#[derive(Debug, Default)]
pub(crate) struct ExclusionFilter {
    types: HashSet<TypeId>,
    namespaces: HashSet<String>,
}

impl ExclusionFilter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Adds a type to the excluded set. Idempotent.
    pub(crate) fn exclude_type(&mut self, id: TypeId) {
        self.types.insert(id);
    }

    /// Adds a namespace to the excluded set. Idempotent.
    pub(crate) fn exclude_namespace(&mut self, namespace: impl Into<String>) {
        self.namespaces.insert(namespace.into());
    }

    /// Whether the queried type is vetoed, by identity or by namespace.
    pub(crate) fn is_excluded(&self, query: &TypeToken) -> bool {
        self.types.contains(&query.id()) || self.namespaces.contains(query.namespace())
    }
}
