//! Storage of per-type configuration records.

use std::any::TypeId;

use crate::config::AuditConfiguration;
use crate::entity::TypeToken;
use crate::error::Error;

/// Maps each registered type to its single configuration record.
///
/// Backed by a vector so records keep their registration order; the
/// resolution engine's wildcard reduction depends on that order being
/// deterministic. Registration counts are small, so exact lookup is a
/// linear scan.
#[derive(Debug, Default)]
pub(crate) struct ConfigurationStore {
    configs: Vec<AuditConfiguration>,
}

impl ConfigurationStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Returns the record for the token's type, creating an empty one
    /// if the type was never registered.
    pub(crate) fn get_or_create(&mut self, token: &TypeToken) -> &mut AuditConfiguration {
        let pos = match self.configs.iter().position(|c| c.token().id() == token.id()) {
            Some(pos) => pos,
            None => {
                self.configs.push(AuditConfiguration::new(token.clone()));
                self.configs.len() - 1
            }
        };
        &mut self.configs[pos]
    }

    /// Exact lookup only; no hierarchy reasoning.
    pub(crate) fn get(&self, id: TypeId) -> Option<&AuditConfiguration> {
        self.configs.iter().find(|c| c.token().id() == id)
    }

    /// Exact lookup that fails with [`Error::NotRegistered`] when the
    /// type has no record. Used by operations whose documented
    /// precondition is prior registration.
    pub(crate) fn require_mut(
        &mut self,
        token: &TypeToken,
    ) -> Result<&mut AuditConfiguration, Error> {
        let pos = self
            .configs
            .iter()
            .position(|c| c.token().id() == token.id())
            .ok_or_else(|| Error::NotRegistered {
                type_name: token.name().to_string(),
            })?;
        Ok(&mut self.configs[pos])
    }

    /// All records, in registration order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &AuditConfiguration> {
        self.configs.iter()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.configs.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::AuditEntity;

    struct Order;
    struct Customer;

    impl AuditEntity for Order {}
    impl AuditEntity for Customer {}

    #[test]
    fn get_or_create_is_idempotent() {
        let mut store = ConfigurationStore::new();
        let token = TypeToken::of::<Order>();

        store.get_or_create(&token).is_generic = true;
        let again = store.get_or_create(&token);

        assert!(again.is_generic, "second call must return the same record");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn get_is_exact_only() {
        let mut store = ConfigurationStore::new();
        store.get_or_create(&TypeToken::of::<Order>());

        assert!(store.get(TypeToken::of::<Order>().id()).is_some());
        assert!(store.get(TypeToken::of::<Customer>().id()).is_none());
    }

    #[test]
    fn require_mut_fails_for_unregistered_type() {
        let mut store = ConfigurationStore::new();
        let err = store
            .require_mut(&TypeToken::of::<Customer>())
            .expect_err("Customer was never registered");
        assert!(matches!(err, Error::NotRegistered { type_name } if type_name.contains("Customer")));
    }

    #[test]
    fn iteration_preserves_registration_order() {
        let mut store = ConfigurationStore::new();
        store.get_or_create(&TypeToken::of::<Order>());
        store.get_or_create(&TypeToken::of::<Customer>());

        let names: Vec<_> = store.iter().map(|c| c.token().name()).collect();
        assert!(names[0].contains("Order"));
        assert!(names[1].contains("Customer"));
    }
}
