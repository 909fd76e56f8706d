//! Property tests for the resolution engine.
//!
//! These tests validate resolution invariants over arbitrary profile
//! shapes: a fixed type hierarchy with proptest-driven registration,
//! exclusion, and field declarations.

use audit_registry::{
    AuditBuilder, AuditEntity, AuditProfile, AuditRegistry, KeySelector, TypeToken,
};
use proptest::prelude::*;

// Hierarchy under test: Leaf -> Mid -> Root, plus an unrelated Side
// supertype Leaf also declares.

struct Root;
struct Mid;
struct Side;
struct Leaf {
    id: u64,
}

impl AuditEntity for Root {}
impl AuditEntity for Side {}

impl AuditEntity for Mid {
    fn supertypes() -> Vec<TypeToken> {
        vec![TypeToken::of::<Root>()]
    }
}

impl AuditEntity for Leaf {
    fn supertypes() -> Vec<TypeToken> {
        vec![TypeToken::of::<Mid>(), TypeToken::of::<Side>()]
    }
}

/// Profile whose shape is driven entirely by test inputs.
struct ArbitraryProfile {
    register_root: bool,
    register_mid: bool,
    register_leaf_exact: bool,
    exclude_leaf: bool,
    leaf_fields: Vec<String>,
}

impl AuditProfile for ArbitraryProfile {
    fn configure(&self, audit: &mut AuditBuilder) {
        if self.register_root {
            audit.audit_all_of_type::<Root>(None);
        }
        if self.register_mid {
            audit.audit_all_of_type::<Mid>(None);
        }
        if self.register_leaf_exact {
            let mut handle =
                audit.add_auditable::<Leaf>(Some(KeySelector::new("Leaf.Id", |l: &Leaf| l.id)));
            for field in &self.leaf_fields {
                handle = handle.field(field.clone(), "generated");
            }
        }
        if self.exclude_leaf {
            audit.exclude::<Leaf>();
        }
    }
}

fn arb_field_names() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(prop::string::string_regex("[A-Z][a-z]{2,8}").unwrap(), 0..5)
}

proptest! {
    /// Property: resolution never panics and is deterministic.
    ///
    /// Whatever the profile shape, querying twice yields the same
    /// auditability and the same key name.
    #[test]
    fn proptest_resolution_is_total_and_deterministic(
        register_root in any::<bool>(),
        register_mid in any::<bool>(),
        register_leaf_exact in any::<bool>(),
        exclude_leaf in any::<bool>(),
        leaf_fields in arb_field_names(),
    ) {
        let registry = AuditRegistry::new(ArbitraryProfile {
            register_root,
            register_mid,
            register_leaf_exact,
            exclude_leaf,
            leaf_fields,
        });

        let first = registry.get_configuration::<Leaf>();
        let second = registry.get_configuration::<Leaf>();

        prop_assert_eq!(first.is_auditable, second.is_auditable);
        prop_assert_eq!(
            first.entity_key_property_name.clone(),
            second.entity_key_property_name
        );
    }

    /// Property: the resolution oracle holds for every profile shape.
    ///
    /// Exact registration always wins and ignores exclusions; otherwise
    /// the deepest registered ancestor wins unless the leaf is excluded.
    #[test]
    fn proptest_resolution_matches_the_oracle(
        register_root in any::<bool>(),
        register_mid in any::<bool>(),
        register_leaf_exact in any::<bool>(),
        exclude_leaf in any::<bool>(),
        leaf_fields in arb_field_names(),
    ) {
        let registry = AuditRegistry::new(ArbitraryProfile {
            register_root,
            register_mid,
            register_leaf_exact,
            exclude_leaf,
            leaf_fields: leaf_fields.clone(),
        });

        let entry = registry.get_configuration::<Leaf>();

        if register_leaf_exact {
            prop_assert!(entry.is_auditable, "exact registration always resolves");
            prop_assert_eq!(
                entry.entity_key_property_name.as_deref(),
                Some("Leaf.Id")
            );
            let names: Vec<_> = entry
                .auditable_fields
                .iter()
                .map(|f| f.name.clone())
                .collect();
            prop_assert_eq!(names, leaf_fields, "fields kept in declaration order");
        } else if exclude_leaf {
            prop_assert!(!entry.is_auditable, "excluded leaf never matches a wildcard");
        } else if register_mid || register_root {
            prop_assert!(entry.is_auditable, "a registered ancestor wildcard matches");
            // Wildcards here carry no key selector.
            prop_assert!(entry.entity_key_property_name.is_none());
        } else {
            prop_assert!(!entry.is_auditable, "nothing registered, nothing matches");
        }
    }

    /// Property: types outside the configured hierarchy never resolve,
    /// regardless of the profile shape.
    #[test]
    fn proptest_unrelated_types_never_resolve(
        register_root in any::<bool>(),
        register_mid in any::<bool>(),
        register_leaf_exact in any::<bool>(),
        exclude_leaf in any::<bool>(),
    ) {
        struct Outsider;
        impl AuditEntity for Outsider {}

        let registry = AuditRegistry::new(ArbitraryProfile {
            register_root,
            register_mid,
            register_leaf_exact,
            exclude_leaf,
            leaf_fields: Vec::new(),
        });

        prop_assert!(!registry.get_configuration::<Outsider>().is_auditable);
    }
}
