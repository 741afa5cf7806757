//! Ordered resolver evaluation and the per-parameter resolution event.

use super::descriptor::{ConfigError, ResolverDescriptor, ResolverSpec};
use super::{Resolved, ResolveError};
use crate::action::Action;

/// Carrier for one resolution attempt.
///
/// Created fresh for each unresolved non-primitive parameter, handed to
/// the pre-resolver hooks and then the registry, and discarded once the
/// chain has run.
pub struct ResolutionEvent<'a, R> {
    pub action: &'a Action,
    pub request: &'a R,
    /// Declared type name being materialized.
    pub target: &'a str,
    /// Set once a hook or descriptor resolves the event.
    pub is_resolved: bool,
    pub resolved: Option<Resolved>,
}

impl<'a, R> ResolutionEvent<'a, R> {
    pub fn new(action: &'a Action, request: &'a R, target: &'a str) -> Self {
        Self {
            action,
            request,
            target,
            is_resolved: false,
            resolved: None,
        }
    }

    /// Mark the event resolved with the produced object.
    pub fn mark_resolved(&mut self, value: Resolved) {
        self.resolved = Some(value);
        self.is_resolved = true;
    }
}

/// Ordered, first-match-wins resolver chain.
///
/// Built once at dispatcher startup from registration specs and
/// immutable thereafter; safe for concurrent reads.
pub struct ResolverRegistry<R> {
    descriptors: Vec<ResolverDescriptor<R>>,
}

impl<R> ResolverRegistry<R> {
    /// Build the registry, normalizing and validating every spec.
    ///
    /// Fails on the first invalid spec; a registry containing a broken
    /// descriptor is never constructed.
    pub fn new(specs: impl IntoIterator<Item = ResolverSpec<R>>) -> Result<Self, ConfigError> {
        let descriptors = specs
            .into_iter()
            .map(ResolverSpec::into_descriptor)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { descriptors })
    }

    /// Registry with no rules; every event stays unresolved.
    pub fn empty() -> Self {
        Self {
            descriptors: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Run the chain over the event.
    ///
    /// Descriptors are evaluated in registration order; the first
    /// applicable one resolves the event and stops the scan. When none
    /// applies the event stays unresolved and the caller falls back to
    /// defaults. Resolution failures propagate to the caller, which
    /// applies its transport's wrapping rule.
    pub fn resolve(&self, event: &mut ResolutionEvent<'_, R>) -> Result<(), ResolveError> {
        for descriptor in &self.descriptors {
            if !descriptor.applies_to(&event.action.id, event.target) {
                continue;
            }
            let value = descriptor.run(event.request, event.action)?;
            tracing::debug!(
                target_type = %event.target,
                action = %event.action.id,
                "parameter resolved"
            );
            event.mark_resolved(value);
            break;
        }
        Ok(())
    }
}
