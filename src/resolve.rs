//! The configuration resolution engine.

use crate::config::AuditConfiguration;
use crate::entity::TypeToken;
use crate::exclusion::ExclusionFilter;
use crate::store::ConfigurationStore;

/// Finds the single configuration applicable to `query`, if any.
///
/// An exact registration wins unconditionally and is never subject to
/// exclusions. Otherwise the wildcard configurations whose registered
/// type is an ancestor-or-self of `query` compete, provided neither the
/// query type nor its namespace is excluded; the most derived registered
/// type wins.
///
/// When two surviving wildcard configurations sit on unrelated
/// supertypes there is no principled winner. The reduction is performed
/// left-to-right in registration order and keeps the earlier
/// registration, so the outcome is deterministic; an ambiguity warning
/// is emitted so profile authors can disambiguate.
pub(crate) fn resolve<'a>(
    store: &'a ConfigurationStore,
    exclusions: &ExclusionFilter,
    query: &TypeToken,
) -> Option<&'a AuditConfiguration> {
    if let Some(configuration) = store.get(query.id()) {
        tracing::debug!(entity = query.name(), "resolved exact audit configuration");
        return Some(configuration);
    }

    if exclusions.is_excluded(query) {
        tracing::debug!(entity = query.name(), "type excluded from wildcard matching");
        return None;
    }

    let mut best: Option<&AuditConfiguration> = None;
    for candidate in store
        .iter()
        .filter(|c| c.is_generic && query.is_assignable_to(c.token().id()))
    {
        best = Some(match best {
            None => candidate,
            Some(incumbent) => {
                if candidate.token().is_assignable_to(incumbent.token().id()) {
                    // Candidate is the more derived type.
                    candidate
                } else {
                    if !incumbent.token().is_assignable_to(candidate.token().id()) {
                        tracing::warn!(
                            entity = query.name(),
                            kept = incumbent.token().name(),
                            discarded = candidate.token().name(),
                            "ambiguous wildcard configurations on unrelated supertypes; \
                             keeping the first registered"
                        );
                    }
                    incumbent
                }
            }
        });
    }

    match best {
        Some(configuration) => {
            tracing::debug!(
                entity = query.name(),
                matched = configuration.token().name(),
                "resolved wildcard audit configuration"
            );
            Some(configuration)
        }
        None => {
            tracing::debug!(entity = query.name(), "no audit configuration matches");
            None
        }
    }
}
