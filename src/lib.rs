//! Request-time parameter resolution for action dispatchers.
//!
//! Given an incoming request and an action with a declared parameter
//! list, the binder determines the concrete arguments to invoke the
//! handler with. Arguments come from three sources, in priority order:
//! raw request values coerced against the declared type, a pluggable
//! resolver chain for non-primitive parameters, and declared defaults.
//! Missing required parameters are a hard failure.
//!
//! The dispatcher owns a [`Binder`] and delegates to it; the transport
//! that produced the raw parameter set only picks the binding variant
//! ([`Transport`]).
//!
//! ```
//! use bindery::resolver::resolve_fn;
//! use bindery::{
//!     Action, ActionFilter, Binder, ParamSpec, RawParams, RawValue, Resolved,
//!     ResolverConfig, ResolverRegistry, ResolverSpec, Transport, TypeSpec,
//! };
//!
//! struct Request {
//!     user_id: i64,
//! }
//!
//! #[derive(Debug, PartialEq)]
//! struct User {
//!     id: i64,
//! }
//!
//! let registry = ResolverRegistry::new([ResolverSpec::Config(ResolverConfig {
//!     target: "User".into(),
//!     actions: ActionFilter::only(["view", "update"]),
//!     resolve_fn: Some(resolve_fn(|request: &Request, _action, _target| {
//!         Ok(Box::new(User { id: request.user_id }) as Resolved)
//!     })),
//!     resolvable: None,
//! })])
//! .unwrap();
//!
//! let binder = Binder::new(Transport::Web, registry);
//! let action = Action::new(
//!     "view",
//!     vec![
//!         ParamSpec::typed("page", TypeSpec::int()).with_default(1),
//!         ParamSpec::typed("user", TypeSpec::named("User")),
//!     ],
//! );
//!
//! let mut params = RawParams::new();
//! params.insert("page", "3");
//!
//! let args = binder.bind(&action, &Request { user_id: 7 }, params).unwrap();
//! assert_eq!(args[0].as_value(), Some(&RawValue::Int(3)));
//! assert_eq!(args[1].downcast_ref::<User>(), Some(&User { id: 7 }));
//! ```

pub mod action;
pub mod binder;
pub mod coerce;
pub mod params;
pub mod resolver;

pub use action::{Action, ParamSpec, TypeKind, TypeSpec};
pub use binder::{Arg, AuditEntry, AuditValue, BindError, Binder, Transport};
pub use params::{ParamKey, RawParams, RawValue};
pub use resolver::{
    ActionFilter, ConfigError, PreResolver, Resolvable, ResolvableFactory, Resolved,
    ResolveError, ResolveFn, ResolverConfig, ResolverDescriptor, ResolverRegistry,
    ResolverSpec, ResolutionEvent,
};
