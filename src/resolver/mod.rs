//! Resolver chain — pluggable rules that materialize domain objects for
//! non-primitive action parameters.
//!
//! A descriptor declares which target type it produces and which actions
//! it applies to; the registry evaluates descriptors in registration
//! order, first match wins. Domain types supply their own resolution
//! logic by implementing [`Resolvable`], or a rule carries a direct
//! resolution function.

pub mod descriptor;
pub mod registry;

pub use descriptor::{
    ActionFilter, ConfigError, ResolverConfig, ResolverDescriptor, ResolverSpec,
};
pub use registry::{ResolutionEvent, ResolverRegistry};

use std::any::Any;

use crate::action::Action;

/// A domain object produced by a resolver.
pub type Resolved = Box<dyn Any + Send + Sync>;

/// Failure raised by a resolution function or [`Resolvable`]
/// implementation.
///
/// `NotFound` and `Forbidden` are client-facing categories the web
/// binder re-raises unchanged; `Internal` means the resolver itself is
/// broken and surfaces as a server fault.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// The referenced domain object does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The caller may not access the referenced domain object.
    #[error("{0}")]
    Forbidden(String),

    /// The resolver itself failed.
    #[error("{0}")]
    Internal(String),
}

impl ResolveError {
    /// Whether this is an already-categorized client-facing failure.
    pub fn is_client_fault(&self) -> bool {
        matches!(self, ResolveError::NotFound(_) | ResolveError::Forbidden(_))
    }
}

/// The capability a domain type implements to supply its own
/// request-based resolution logic.
pub trait Resolvable<R>: Send + Sync {
    /// Materialize the domain object from the current request.
    fn resolve(&self, request: &R, action: &Action) -> Result<Resolved, ResolveError>;
}

/// Direct resolution function form: `(request, action, target type
/// name) -> object`.
pub type ResolveFn<R> =
    Box<dyn Fn(&R, &Action, &str) -> Result<Resolved, ResolveError> + Send + Sync>;

/// Factory producing a fresh [`Resolvable`] instance per resolve call.
pub type ResolvableFactory<R> = Box<dyn Fn() -> Box<dyn Resolvable<R>> + Send + Sync>;

/// Wrap a closure as a boxed resolution function.
pub fn resolve_fn<R, F>(f: F) -> ResolveFn<R>
where
    F: Fn(&R, &Action, &str) -> Result<Resolved, ResolveError> + Send + Sync + 'static,
{
    Box::new(f)
}

/// Wrap a resolvable type as a boxed fresh-instance factory.
pub fn resolvable_factory<R, T>() -> ResolvableFactory<R>
where
    T: Resolvable<R> + Default + 'static,
{
    Box::new(|| Box::new(T::default()))
}

/// Hook run before the registry for each unresolved non-primitive
/// parameter.
///
/// Hooks run in registration order; the first to return `Some` resolves
/// the event and short-circuits both the remaining hooks and the
/// registry. Used for framework-level dependency injection integration;
/// the binder treats hooks as opaque.
pub trait PreResolver<R>: Send + Sync {
    fn pre_resolve(&self, event: &ResolutionEvent<'_, R>) -> Option<Resolved>;
}

impl<R, F> PreResolver<R> for F
where
    F: Fn(&ResolutionEvent<'_, R>) -> Option<Resolved> + Send + Sync,
{
    fn pre_resolve(&self, event: &ResolutionEvent<'_, R>) -> Option<Resolved> {
        self(event)
    }
}
