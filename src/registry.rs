//! Registry lifecycle and the read entrypoint.

use std::sync::OnceLock;

use crate::builder::AuditBuilder;
use crate::entity::{AuditEntity, TypeToken};
use crate::entry::AuditConfigurationEntry;
use crate::exclusion::ExclusionFilter;
use crate::resolve::resolve;
use crate::store::ConfigurationStore;

/// A declarative audit profile.
///
/// A profile describes, through the [`AuditBuilder`] mutation contract,
/// which types are auditable and what to record for each. The registry
/// runs [`configure`](AuditProfile::configure) exactly once, on the
/// first resolution request, and treats the result as immutable.
pub trait AuditProfile: Send + Sync {
    /// Populates the registry's configuration. Called exactly once.
    fn configure(&self, audit: &mut AuditBuilder);
}

struct RegistryState {
    store: ConfigurationStore,
    exclusions: ExclusionFilter,
}

/// The audit configuration registry.
///
/// Owns the configuration built by an [`AuditProfile`] and answers, for
/// any entity type, whether it should be audited and with which key,
/// fields, and references. Construct one per profile at process startup
/// and share it by reference; after the lazy one-time setup, concurrent
/// reads are safe without locking.
///
/// # Examples
///
/// ```
/// use audit_registry::{AuditBuilder, AuditEntity, AuditProfile, AuditRegistry, KeySelector};
///
/// struct Order { id: u64, status: String }
/// impl AuditEntity for Order {}
///
/// struct SalesProfile;
///
/// impl AuditProfile for SalesProfile {
///     fn configure(&self, audit: &mut AuditBuilder) {
///         audit
///             .add_auditable::<Order>(Some(KeySelector::new("Order.Id", |o: &Order| o.id)))
///             .field("Status", "Order status");
///     }
/// }
///
/// let registry = AuditRegistry::new(SalesProfile);
/// let entry = registry.get_configuration::<Order>();
/// assert!(entry.is_auditable);
/// assert_eq!(entry.entity_key_property_name.as_deref(), Some("Order.Id"));
/// ```
pub struct AuditRegistry {
    profile: Box<dyn AuditProfile>,
    state: OnceLock<RegistryState>,
}

impl AuditRegistry {
    /// Creates a registry for the given profile.
    ///
    /// Setup is deferred until the first resolution request (or an
    /// explicit [`ensure_initialized`](AuditRegistry::ensure_initialized)).
    pub fn new(profile: impl AuditProfile + 'static) -> Self {
        Self {
            profile: Box::new(profile),
            state: OnceLock::new(),
        }
    }

    /// Runs the profile's setup now if it has not run yet.
    ///
    /// Safe to call from multiple threads; the profile is run exactly
    /// once even under racing first calls.
    pub fn ensure_initialized(&self) {
        self.state();
    }

    /// Resolves the audit configuration for `T`.
    ///
    /// Never fails: when no exact or wildcard configuration matches, the
    /// returned entry has `is_auditable == false` and empty metadata.
    pub fn get_configuration<T: AuditEntity>(&self) -> AuditConfigurationEntry {
        self.get_configuration_of(&TypeToken::of::<T>())
    }

    /// Resolves the audit configuration for an already-built type token.
    ///
    /// This is the entrypoint for callers holding instances behind type
    /// erasure, which carry their token alongside.
    pub fn get_configuration_of(&self, query: &TypeToken) -> AuditConfigurationEntry {
        let state = self.state();
        match resolve(&state.store, &state.exclusions, query) {
            Some(configuration) => AuditConfigurationEntry::from_configuration(configuration),
            None => AuditConfigurationEntry::not_auditable(),
        }
    }

    fn state(&self) -> &RegistryState {
        self.state.get_or_init(|| {
            tracing::debug!("running one-time audit profile setup");
            let mut builder = AuditBuilder::new();
            self.profile.configure(&mut builder);
            let (store, exclusions) = builder.finish();
            RegistryState { store, exclusions }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct Order {
        id: u64,
    }

    impl AuditEntity for Order {}

    struct CountingProfile {
        runs: Arc<AtomicUsize>,
    }

    impl AuditProfile for CountingProfile {
        fn configure(&self, audit: &mut AuditBuilder) {
            self.runs.fetch_add(1, Ordering::SeqCst);
            audit.add_auditable::<Order>(Some(crate::KeySelector::new("Order.Id", |o: &Order| o.id)));
        }
    }

    #[test]
    fn setup_runs_exactly_once() {
        let runs = Arc::new(AtomicUsize::new(0));
        let registry = AuditRegistry::new(CountingProfile { runs: Arc::clone(&runs) });

        assert_eq!(runs.load(Ordering::SeqCst), 0, "setup is lazy");
        let first = registry.get_configuration::<Order>();
        let second = registry.get_configuration::<Order>();

        assert!(first.is_auditable);
        assert!(second.is_auditable);
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn explicit_initialization_also_counts_as_the_one_run() {
        let runs = Arc::new(AtomicUsize::new(0));
        let registry = AuditRegistry::new(CountingProfile { runs: Arc::clone(&runs) });

        registry.ensure_initialized();
        registry.ensure_initialized();
        registry.get_configuration::<Order>();

        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn racing_first_calls_run_setup_once() {
        let runs = Arc::new(AtomicUsize::new(0));
        let registry = Arc::new(AuditRegistry::new(CountingProfile {
            runs: Arc::clone(&runs),
        }));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || registry.get_configuration::<Order>().is_auditable)
            })
            .collect();

        for handle in handles {
            assert!(handle.join().expect("resolver thread panicked"));
        }
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unmatched_type_yields_the_non_auditable_entry() {
        struct Untracked;
        impl AuditEntity for Untracked {}

        let runs = Arc::new(AtomicUsize::new(0));
        let registry = AuditRegistry::new(CountingProfile { runs });

        let entry = registry.get_configuration::<Untracked>();
        assert!(!entry.is_auditable);
        assert!(entry.auditable_fields.is_empty());
        assert!(entry.auditable_references.is_empty());
    }
}
