//! Resolver declarations and the registration surface.
//!
//! Registration accepts three shorthand forms ([`ResolverSpec`]); all
//! normalize to an immutable [`ResolverDescriptor`]. Validation happens
//! here, at registration time — a descriptor with no resolution
//! mechanism is a fatal configuration error, never deferred to the
//! first request.

use std::collections::HashSet;

use super::{Resolvable, ResolvableFactory, Resolved, ResolveError, ResolveFn};
use crate::action::Action;

/// Fatal registration-time configuration failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A resolver config carries neither a resolution function nor a
    /// resolvable type.
    #[error("resolver for \"{0}\" declares neither a resolution function nor a resolvable type")]
    NoResolution(String),
}

/// Which actions a descriptor applies to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ActionFilter {
    /// Applies to every action.
    #[default]
    Any,
    /// Applies only to the listed action ids (exact match).
    Only(HashSet<String>),
}

impl ActionFilter {
    pub fn only<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ActionFilter::Only(ids.into_iter().map(Into::into).collect())
    }

    pub fn allows(&self, action_id: &str) -> bool {
        match self {
            ActionFilter::Any => true,
            ActionFilter::Only(ids) => ids.contains(action_id),
        }
    }
}

/// Loose resolver configuration — the explicit registration form.
///
/// At least one of `resolve_fn` / `resolvable` must be present;
/// [`ResolverRegistry::new`](super::ResolverRegistry::new) rejects the
/// config otherwise.
pub struct ResolverConfig<R> {
    /// Declared type name this rule materializes.
    pub target: String,
    pub actions: ActionFilter,
    pub resolve_fn: Option<ResolveFn<R>>,
    pub resolvable: Option<ResolvableFactory<R>>,
}

impl<R> Default for ResolverConfig<R> {
    fn default() -> Self {
        Self {
            target: String::new(),
            actions: ActionFilter::Any,
            resolve_fn: None,
            resolvable: None,
        }
    }
}

/// One registered resolution rule.
///
/// Immutable once built. Construction guarantees a resolution mechanism
/// exists, so resolve time never re-validates.
pub struct ResolverDescriptor<R> {
    target: String,
    actions: ActionFilter,
    resolve_fn: Option<ResolveFn<R>>,
    resolvable: Option<ResolvableFactory<R>>,
}

impl<R> ResolverDescriptor<R> {
    /// Descriptor backed by a direct resolution function.
    pub fn with_fn<F>(target: impl Into<String>, actions: ActionFilter, f: F) -> Self
    where
        F: Fn(&R, &Action, &str) -> Result<Resolved, ResolveError> + Send + Sync + 'static,
    {
        Self {
            target: target.into(),
            actions,
            resolve_fn: Some(Box::new(f)),
            resolvable: None,
        }
    }

    /// Descriptor backed by a resolvable type, instantiated fresh per
    /// resolve call. The target is the type's unqualified name.
    pub fn resolvable<T>(actions: ActionFilter) -> Self
    where
        T: Resolvable<R> + Default + 'static,
    {
        Self {
            target: type_label::<T>().to_string(),
            actions,
            resolve_fn: None,
            resolvable: Some(super::resolvable_factory::<R, T>()),
        }
    }

    fn from_config(config: ResolverConfig<R>) -> Result<Self, ConfigError> {
        if config.resolve_fn.is_none() && config.resolvable.is_none() {
            return Err(ConfigError::NoResolution(config.target));
        }
        Ok(Self {
            target: config.target,
            actions: config.actions,
            resolve_fn: config.resolve_fn,
            resolvable: config.resolvable,
        })
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Whether this rule applies to the given action and target type.
    pub(crate) fn applies_to(&self, action_id: &str, target: &str) -> bool {
        self.actions.allows(action_id) && self.target == target
    }

    /// Run the resolution mechanism. The direct function takes priority
    /// when both are configured.
    pub(crate) fn run(&self, request: &R, action: &Action) -> Result<Resolved, ResolveError> {
        match (&self.resolve_fn, &self.resolvable) {
            (Some(f), _) => f(request, action, &self.target),
            (None, Some(factory)) => factory().resolve(request, action),
            // Unreachable by construction; kept as an error rather than
            // a panic.
            (None, None) => Err(ResolveError::Internal(format!(
                "resolver for \"{}\" has no resolution mechanism",
                self.target
            ))),
        }
    }
}

/// Registration shorthand accepted by
/// [`ResolverRegistry::new`](super::ResolverRegistry::new).
pub enum ResolverSpec<R> {
    /// A bare resolvable type: wildcard actions, target derived from
    /// the type name.
    Bare {
        target: String,
        factory: ResolvableFactory<R>,
    },
    /// Explicit configuration, validated at registration.
    Config(ResolverConfig<R>),
    /// A pre-built descriptor.
    Descriptor(ResolverDescriptor<R>),
}

impl<R> ResolverSpec<R> {
    /// The bare-type form: `ResolverSpec::of::<User>()`.
    pub fn of<T>() -> Self
    where
        T: Resolvable<R> + Default + 'static,
    {
        ResolverSpec::Bare {
            target: type_label::<T>().to_string(),
            factory: super::resolvable_factory::<R, T>(),
        }
    }

    pub(crate) fn into_descriptor(self) -> Result<ResolverDescriptor<R>, ConfigError> {
        match self {
            ResolverSpec::Bare { target, factory } => Ok(ResolverDescriptor {
                target,
                actions: ActionFilter::Any,
                resolve_fn: None,
                resolvable: Some(factory),
            }),
            ResolverSpec::Config(config) => ResolverDescriptor::from_config(config),
            ResolverSpec::Descriptor(descriptor) => Ok(descriptor),
        }
    }
}

impl<R> From<ResolverConfig<R>> for ResolverSpec<R> {
    fn from(config: ResolverConfig<R>) -> Self {
        ResolverSpec::Config(config)
    }
}

impl<R> From<ResolverDescriptor<R>> for ResolverSpec<R> {
    fn from(descriptor: ResolverDescriptor<R>) -> Self {
        ResolverSpec::Descriptor(descriptor)
    }
}

/// Last path segment of a type name; matches how action declarations
/// name resolver targets.
fn type_label<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}
