//! The externally consumed resolution result.

use crate::config::{AuditConfiguration, AuditFieldDefinition, AuditReferenceEntry};
use crate::selector::{CompositeKeySelector, KeySelector};

/// The answer the registry gives the change tracker for one type.
///
/// When no configuration matches, `is_auditable` is `false` and every
/// other field is empty or default. That is the designed outcome for
/// unregistered or excluded types, not an error.
#[derive(Debug, Clone, Default)]
pub struct AuditConfigurationEntry {
    /// Whether the queried type should be audited at all
    pub is_auditable: bool,
    /// Accessor for the entity's unique-identifier value
    pub entity_key: Option<KeySelector>,
    /// Dotted name of the key property
    pub entity_key_property_name: Option<String>,
    /// Fields to record, in declaration order
    pub auditable_fields: Vec<AuditFieldDefinition>,
    /// Related collections/entities to track through this type
    pub auditable_references: Vec<AuditReferenceEntry>,
    /// Optional composite-key accessor
    pub composite_key: Option<CompositeKeySelector>,
    /// Skip audit entries when no tracked field changed
    pub ignore_if_no_field_changed: bool,
}

impl AuditConfigurationEntry {
    /// The terminal "do not audit this type" result.
    pub fn not_auditable() -> Self {
        Self::default()
    }

    /// Copies a matched configuration verbatim into an auditable entry.
    pub(crate) fn from_configuration(configuration: &AuditConfiguration) -> Self {
        Self {
            is_auditable: true,
            entity_key: configuration.entity_key.clone(),
            entity_key_property_name: configuration.entity_key_name.clone(),
            auditable_fields: configuration.audit_fields.clone(),
            auditable_references: configuration.audit_references.clone(),
            composite_key: configuration.composite_key.clone(),
            ignore_if_no_field_changed: configuration.ignore_if_no_field_changed,
        }
    }
}
