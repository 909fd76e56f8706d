//! The mutation contract used by profiles during setup.

use std::collections::HashMap;
use std::marker::PhantomData;

use crate::config::{AuditFieldDefinition, AuditReferenceEntry};
use crate::entity::{AuditEntity, TypeRef, TypeToken};
use crate::error::Error;
use crate::exclusion::ExclusionFilter;
use crate::selector::{CompositeKeySelector, KeySelector};
use crate::store::ConfigurationStore;

/// Accumulates audit configuration during the registry's one-time setup.
///
/// An `AuditBuilder` is handed to [`AuditProfile::configure`] and is the
/// only way configuration ever enters a registry; once setup finishes
/// the resulting state is immutable.
///
/// [`AuditProfile::configure`]: crate::AuditProfile::configure
///
/// # Examples
///
/// ```
/// use audit_registry::{AuditBuilder, AuditEntity, KeySelector};
///
/// struct Order { id: u64, status: String }
/// impl AuditEntity for Order {}
///
/// # fn configure(audit: &mut AuditBuilder) {
/// audit
///     .add_auditable::<Order>(Some(KeySelector::new("Order.Id", |o: &Order| o.id)))
///     .field("Status", "Order status");
/// # }
/// ```
#[derive(Debug)]
pub struct AuditBuilder {
    store: ConfigurationStore,
    exclusions: ExclusionFilter,
}

impl AuditBuilder {
    pub(crate) fn new() -> Self {
        Self {
            store: ConfigurationStore::new(),
            exclusions: ExclusionFilter::new(),
        }
    }

    /// Registers `T` as auditable, or fetches its existing record.
    ///
    /// When a key selector is supplied it replaces any previously set
    /// one; field and reference lists are kept across repeated
    /// registrations.
    pub fn add_auditable<T: AuditEntity>(&mut self, key: Option<KeySelector>) -> EntityHandle<'_, T> {
        let token = TypeToken::of::<T>();
        let configuration = self.store.get_or_create(&token);
        if let Some(key) = key {
            configuration.set_entity_key(key);
        }
        EntityHandle::new(self)
    }

    /// Fetches the handle for an already-registered type.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotRegistered`] when `T` was never registered.
    pub fn get_auditable<T: AuditEntity>(&mut self) -> Result<EntityHandle<'_, T>, Error> {
        let token = TypeToken::of::<T>();
        self.store.require_mut(&token)?;
        Ok(EntityHandle::new(self))
    }

    /// Registers `T` as a wildcard configuration matching `T` and all
    /// its declared subtypes, subject to exclusions.
    pub fn audit_all_of_type<T: AuditEntity>(
        &mut self,
        key: Option<KeySelector>,
    ) -> EntityHandle<'_, T> {
        let token = TypeToken::of::<T>();
        let configuration = self.store.get_or_create(&token);
        if let Some(key) = key {
            configuration.set_entity_key(key);
        }
        configuration.is_generic = true;
        EntityHandle::new(self)
    }

    /// Vetoes `T` during wildcard matching. Idempotent.
    pub fn exclude<T: AuditEntity>(&mut self) {
        self.exclusions.exclude_type(TypeToken::of::<T>().id());
    }

    /// Vetoes an entire namespace during wildcard matching. Idempotent;
    /// matching is exact string equality.
    pub fn exclude_namespace(&mut self, namespace: impl Into<String>) {
        self.exclusions.exclude_namespace(namespace);
    }

    /// Appends a field definition to `T`'s configuration.
    ///
    /// The value-converter map is accepted for forward compatibility and
    /// is not recorded.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotRegistered`] when `T` was never registered.
    pub fn add_auditable_field<T: AuditEntity>(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        _value_converter: Option<HashMap<String, String>>,
    ) -> Result<(), Error> {
        let token = TypeToken::of::<T>();
        let configuration = self.store.require_mut(&token)?;
        configuration.audit_fields.push(AuditFieldDefinition {
            name: name.into(),
            description: description.into(),
        });
        Ok(())
    }

    /// Appends a reference definition to `T`'s configuration.
    ///
    /// Unlike field appends, this implicitly registers `T` (without a
    /// key selector) when it has no configuration yet.
    pub fn add_auditable_reference<T: AuditEntity, TRef: AuditEntity>(
        &mut self,
        reference_collection_name: impl Into<String>,
        reference_property_name: impl Into<String>,
        auditable_property_name: impl Into<String>,
        description_property_type: TypeRef,
        description_property_name: impl Into<String>,
    ) {
        let token = TypeToken::of::<T>();
        let configuration = self.store.get_or_create(&token);
        configuration.audit_references.push(AuditReferenceEntry {
            reference_collection_name: reference_collection_name.into(),
            reference_property_name: reference_property_name.into(),
            auditable_property_name: auditable_property_name.into(),
            reference_type: TypeRef::of::<TRef>(),
            description_property_type,
            description_property_name: description_property_name.into(),
        });
    }

    /// Installs the composite-key accessor on `T`'s configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotRegistered`] when `T` was never registered.
    pub fn add_composite_key<T: AuditEntity>(
        &mut self,
        selector: CompositeKeySelector,
    ) -> Result<(), Error> {
        let token = TypeToken::of::<T>();
        let configuration = self.store.require_mut(&token)?;
        configuration.composite_key = Some(selector);
        Ok(())
    }

    /// Marks `T`'s configuration to skip audit entries when no tracked
    /// field changed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotRegistered`] when `T` was never registered.
    pub fn set_ignore_if_no_field_changed<T: AuditEntity>(&mut self) -> Result<(), Error> {
        let token = TypeToken::of::<T>();
        let configuration = self.store.require_mut(&token)?;
        configuration.ignore_if_no_field_changed = true;
        Ok(())
    }

    pub(crate) fn finish(self) -> (ConfigurationStore, ExclusionFilter) {
        (self.store, self.exclusions)
    }
}

/// Fluent handle over one registered type's configuration.
///
/// Obtained from [`AuditBuilder::add_auditable`],
/// [`AuditBuilder::audit_all_of_type`], or
/// [`AuditBuilder::get_auditable`]. The handle proves the type is
/// registered, so its methods cannot fail.
pub struct EntityHandle<'a, T: AuditEntity> {
    builder: &'a mut AuditBuilder,
    _entity: PhantomData<fn() -> T>,
}

impl<'a, T: AuditEntity> EntityHandle<'a, T> {
    fn new(builder: &'a mut AuditBuilder) -> Self {
        Self {
            builder,
            _entity: PhantomData,
        }
    }

    /// Appends a field definition.
    pub fn field(self, name: impl Into<String>, description: impl Into<String>) -> Self {
        let token = TypeToken::of::<T>();
        self.builder
            .store
            .get_or_create(&token)
            .audit_fields
            .push(AuditFieldDefinition {
                name: name.into(),
                description: description.into(),
            });
        self
    }

    /// Appends a field definition with a value-converter map.
    ///
    /// The converter is accepted for forward compatibility and is not
    /// recorded, matching [`AuditBuilder::add_auditable_field`].
    pub fn field_with_converter(
        self,
        name: impl Into<String>,
        description: impl Into<String>,
        _value_converter: HashMap<String, String>,
    ) -> Self {
        self.field(name, description)
    }

    /// Appends a reference definition to a related entity type.
    pub fn reference<TRef: AuditEntity>(
        self,
        reference_collection_name: impl Into<String>,
        reference_property_name: impl Into<String>,
        auditable_property_name: impl Into<String>,
        description_property_type: TypeRef,
        description_property_name: impl Into<String>,
    ) -> Self {
        let token = TypeToken::of::<T>();
        self.builder
            .store
            .get_or_create(&token)
            .audit_references
            .push(AuditReferenceEntry {
                reference_collection_name: reference_collection_name.into(),
                reference_property_name: reference_property_name.into(),
                auditable_property_name: auditable_property_name.into(),
                reference_type: TypeRef::of::<TRef>(),
                description_property_type,
                description_property_name: description_property_name.into(),
            });
        self
    }

    /// Installs a composite-key accessor computed from the instance.
    pub fn composite_key<F>(self, compose: F) -> Self
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        let token = TypeToken::of::<T>();
        self.builder.store.get_or_create(&token).composite_key =
            Some(CompositeKeySelector::new(compose));
        self
    }

    /// Skips audit entries for this type when no tracked field changed.
    pub fn ignore_if_no_field_changed(self) -> Self {
        let token = TypeToken::of::<T>();
        self.builder
            .store
            .get_or_create(&token)
            .ignore_if_no_field_changed = true;
        self
    }
}
