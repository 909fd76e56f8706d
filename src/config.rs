//! Internal per-type audit configuration records.

use crate::entity::{TypeRef, TypeToken};
use crate::selector::{CompositeKeySelector, KeySelector};

/// A single auditable field: the property name to track and its
/// human-readable description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditFieldDefinition {
    /// Property name of the tracked field
    pub name: String,
    /// Human-readable description recorded alongside changes
    pub description: String,
}

/// A related collection or entity whose changes are tracked through the
/// owning type.
#[derive(Debug, Clone)]
pub struct AuditReferenceEntry {
    /// Name of the collection property holding the references
    pub reference_collection_name: String,
    /// Property on the referenced entity pointing back to the owner
    pub reference_property_name: String,
    /// Property on the referenced entity whose changes are audited
    pub auditable_property_name: String,
    /// The referenced entity type
    pub reference_type: TypeRef,
    /// Type owning the description property
    pub description_property_type: TypeRef,
    /// Property used to describe the reference in audit output
    pub description_property_name: String,
}

/// The audit metadata registered for one exact type.
///
/// At most one record exists per registered type; re-registering merges
/// into the existing record (the key selector is overwritten when one
/// is supplied, field and reference lists accumulate).
#[derive(Debug, Clone)]
pub struct AuditConfiguration {
    token: TypeToken,
    /// Accessor for the unique-identifier value, if declared
    pub entity_key: Option<KeySelector>,
    /// Dotted name of the key property, derived from the selector
    pub entity_key_name: Option<String>,
    /// When `true`, this configuration also matches subtypes
    pub is_generic: bool,
    /// Tracked fields, in declaration order, never deduplicated
    pub audit_fields: Vec<AuditFieldDefinition>,
    /// Tracked references, in declaration order
    pub audit_references: Vec<AuditReferenceEntry>,
    /// Optional composite-key accessor
    pub composite_key: Option<CompositeKeySelector>,
    /// Skip audit entries when no tracked field changed
    pub ignore_if_no_field_changed: bool,
}

impl AuditConfiguration {
    /// Creates an empty configuration for the given type.
    pub(crate) fn new(token: TypeToken) -> Self {
        Self {
            token,
            entity_key: None,
            entity_key_name: None,
            is_generic: false,
            audit_fields: Vec::new(),
            audit_references: Vec::new(),
            composite_key: None,
            ignore_if_no_field_changed: false,
        }
    }

    /// The registered type's identity token.
    pub fn token(&self) -> &TypeToken {
        &self.token
    }

    /// Installs a key selector, deriving the stored key name from it.
    pub(crate) fn set_entity_key(&mut self, key: KeySelector) {
        self.entity_key_name = Some(key.property_name().to_string());
        self.entity_key = Some(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::AuditEntity;

    struct Order {
        id: u64,
    }

    impl AuditEntity for Order {}

    #[test]
    fn new_configuration_is_empty_and_non_generic() {
        let cfg = AuditConfiguration::new(TypeToken::of::<Order>());
        assert!(!cfg.is_generic);
        assert!(cfg.entity_key.is_none());
        assert!(cfg.audit_fields.is_empty());
        assert!(cfg.audit_references.is_empty());
        assert!(!cfg.ignore_if_no_field_changed);
    }

    #[test]
    fn set_entity_key_derives_the_key_name() {
        let mut cfg = AuditConfiguration::new(TypeToken::of::<Order>());
        cfg.set_entity_key(KeySelector::new("Order.Id", |o: &Order| o.id));
        assert_eq!(cfg.entity_key_name.as_deref(), Some("Order.Id"));
        assert!(cfg.entity_key.is_some());
    }
}
