//! Declarative per-type audit configuration registry.
//!
//! This crate decides, for any entity type, whether instances of that
//! type should be audited and, if so, which fields and relationships to
//! record. It is consumed by an external change tracker that, on every
//! entity mutation, asks the registry for the type's configuration and
//! uses the answer to build audit log entries.
//!
//! # Core Types
//!
//! - [`AuditProfile`]: Trait a configuration author implements to declare
//!   what is auditable
//! - [`AuditRegistry`]: Owns the configuration; lazy one-time setup, then
//!   immutable, lock-free concurrent reads
//! - [`AuditBuilder`]: Mutation contract handed to the profile during setup
//! - [`AuditEntity`]: Declares a type's namespace and supertype hierarchy
//! - [`AuditConfigurationEntry`]: The resolution result the change tracker
//!   consumes
//!
//! Resolution honors an exact registration unconditionally; otherwise the
//! most derived matching wildcard configuration wins, subject to type and
//! namespace exclusions. An unmatched type yields a non-auditable entry,
//! never an error.
//!
//! # Examples
//!
//! ```
//! use audit_registry::{
//!     AuditBuilder, AuditEntity, AuditProfile, AuditRegistry, KeySelector, TypeToken,
//! };
//!
//! struct Document { uid: u64 }
//! struct Contract;
//!
//! impl AuditEntity for Document {}
//! impl AuditEntity for Contract {
//!     fn supertypes() -> Vec<TypeToken> {
//!         vec![TypeToken::of::<Document>()]
//!     }
//! }
//!
//! struct LegalProfile;
//!
//! impl AuditProfile for LegalProfile {
//!     fn configure(&self, audit: &mut AuditBuilder) {
//!         // Wildcard: every kind of document is audited by its uid.
//!         audit
//!             .audit_all_of_type::<Document>(Some(KeySelector::new(
//!                 "Document.Uid",
//!                 |d: &Document| d.uid,
//!             )))
//!             .field("Title", "Document title");
//!     }
//! }
//!
//! let registry = AuditRegistry::new(LegalProfile);
//!
//! // Contract inherits the Document wildcard configuration.
//! let entry = registry.get_configuration::<Contract>();
//! assert!(entry.is_auditable);
//! assert_eq!(entry.entity_key_property_name.as_deref(), Some("Document.Uid"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod builder;
mod config;
mod entity;
mod entry;
mod error;
mod exclusion;
mod registry;
mod resolve;
mod selector;
mod store;

pub use builder::{AuditBuilder, EntityHandle};
pub use config::{AuditConfiguration, AuditFieldDefinition, AuditReferenceEntry};
pub use entity::{AuditEntity, TypeRef, TypeToken};
pub use entry::AuditConfigurationEntry;
pub use error::Error;
pub use registry::{AuditProfile, AuditRegistry};
pub use selector::{CompositeKeySelector, KeySelector};
