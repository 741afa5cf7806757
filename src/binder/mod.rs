//! Parameter binding — walks an action's declared parameter list and
//! produces the argument vector to invoke its handler with.
//!
//! Pure logic, no I/O. Arguments come from three sources, in priority
//! order: raw request values coerced against the declared type, the
//! resolver chain for non-primitive parameters, and declared defaults.
//! The web and console transports share the decision procedure; the
//! differences (positional matching, sequence splitting, error
//! collapsing, residual passthrough) live in the per-transport modules.

mod console;
mod web;

use std::any::Any;
use std::fmt;
use std::sync::OnceLock;

use crate::action::{Action, ParamSpec};
use crate::params::{RawParams, RawValue};
use crate::resolver::{
    PreResolver, ResolutionEvent, Resolved, ResolveError, ResolverRegistry,
};

/// Errors surfaced by [`Binder::bind`].
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum BindError {
    /// A raw value was present but failed coercion. Client-input fault;
    /// binding stops at the first offender.
    #[error("invalid data received for parameter \"{0}\"")]
    MalformedParameter(String),

    /// Required parameters unsatisfiable by any source, listed in
    /// declaration order. Client-input fault, accumulated across the
    /// whole parameter list and reported once.
    #[error("missing required parameters: {}", .0.join(", "))]
    MissingParameters(Vec<String>),

    /// A resolver raised an already-categorized client-facing error;
    /// the web binder re-raises it unchanged.
    #[error(transparent)]
    Resolution(ResolveError),

    /// A resolver failed in an uncategorized way; wrapped as a server
    /// fault carrying the original message (web transport).
    #[error("parameter resolution failed: {0}")]
    ResolverFault(String),

    /// Any resolver failure on the console transport, which reports a
    /// single generic error kind.
    #[error("{0}")]
    CommandFailed(String),
}

impl BindError {
    /// Whether the failure is the client's fault (bad or missing
    /// input) rather than a broken resolver.
    pub fn is_client_fault(&self) -> bool {
        match self {
            BindError::MalformedParameter(_) | BindError::MissingParameters(_) => true,
            BindError::Resolution(e) => e.is_client_fault(),
            BindError::ResolverFault(_) | BindError::CommandFailed(_) => false,
        }
    }
}

/// Transport kind the owning dispatcher exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    /// Named raw parameters, strict scalar coercion.
    Web,
    /// Positional-then-named matching, comma-separated sequences,
    /// residual passthrough.
    Console,
}

/// One bound argument in the final argument vector.
pub enum Arg {
    /// A coerced raw value or declared default.
    Value(RawValue),
    /// A resolver-produced domain object.
    Object(Resolved),
}

impl Arg {
    /// The bound value, when this argument came from the raw set or a
    /// default.
    pub fn as_value(&self) -> Option<&RawValue> {
        match self {
            Arg::Value(value) => Some(value),
            Arg::Object(_) => None,
        }
    }

    /// Take ownership of a resolved object as its concrete type.
    pub fn downcast<T: Any>(self) -> Option<Box<T>> {
        match self {
            Arg::Object(object) => object.downcast().ok(),
            Arg::Value(_) => None,
        }
    }

    /// Borrow a resolved object as its concrete type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Arg::Object(object) => object.downcast_ref(),
            Arg::Value(_) => None,
        }
    }
}

impl fmt::Debug for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Arg::Object(_) => f.write_str("Object(..)"),
        }
    }
}

/// Audit record of how one parameter was satisfied.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditEntry {
    pub name: String,
    pub value: AuditValue,
}

/// What the audit records: the bound value for raw-matched and
/// defaulted parameters, a description for resolved objects — never
/// the object itself.
#[derive(Debug, Clone, PartialEq)]
pub enum AuditValue {
    Bound(RawValue),
    Resolved(String),
}

/// The parameter binder a dispatcher owns and delegates to.
///
/// Generic over the request type `R`, which the core never inspects —
/// it is only handed through to resolvers.
pub struct Binder<R> {
    transport: Transport,
    registry: ResolverRegistry<R>,
    pre_resolvers: Vec<Box<dyn PreResolver<R>>>,
    /// Audit of the first completed bind. First writer wins; later
    /// binds never overwrite it.
    requested: OnceLock<Vec<AuditEntry>>,
}

impl<R> Binder<R> {
    pub fn new(transport: Transport, registry: ResolverRegistry<R>) -> Self {
        Self {
            transport,
            registry,
            pre_resolvers: Vec::new(),
            requested: OnceLock::new(),
        }
    }

    /// Append a pre-resolver hook; hooks run in registration order
    /// before the registry.
    pub fn with_pre_resolver(mut self, hook: impl PreResolver<R> + 'static) -> Self {
        self.pre_resolvers.push(Box::new(hook));
        self
    }

    pub fn transport(&self) -> Transport {
        self.transport
    }

    /// Bind `params` to `action`'s declared parameter list, dispatching
    /// on the transport this binder was built for.
    pub fn bind(
        &self,
        action: &Action,
        request: &R,
        params: RawParams,
    ) -> Result<Vec<Arg>, BindError> {
        match self.transport {
            Transport::Web => web::bind(self, action, request, params),
            Transport::Console => console::bind(self, action, request, params),
        }
    }

    /// Audit trail of the first completed bind, if any bind has
    /// completed yet.
    pub fn requested_params(&self) -> Option<&[AuditEntry]> {
        self.requested.get().map(Vec::as_slice)
    }

    /// Run the pre-resolver hooks and then the registry for one
    /// unresolved non-primitive parameter. `None` means nothing
    /// applied and the caller falls back to defaults.
    fn resolve_param(
        &self,
        action: &Action,
        request: &R,
        target: &str,
    ) -> Result<Option<Resolved>, ResolveError> {
        let mut event = ResolutionEvent::new(action, request, target);
        for hook in &self.pre_resolvers {
            if let Some(value) = hook.pre_resolve(&event) {
                event.mark_resolved(value);
                break;
            }
        }
        if !event.is_resolved {
            self.registry.resolve(&mut event)?;
        }
        Ok(event.resolved)
    }

    /// First-writer-wins audit store.
    fn record_requested(&self, audit: Vec<AuditEntry>) {
        let _ = self.requested.set(audit);
    }
}

/// Default-or-missing tail of the per-parameter decision procedure,
/// shared by both transports.
fn fall_back(
    param: &ParamSpec,
    args: &mut Vec<Arg>,
    audit: &mut Vec<AuditEntry>,
    missing: &mut Vec<String>,
) {
    if let Some(default) = &param.default {
        audit.push(AuditEntry {
            name: param.name.clone(),
            value: AuditValue::Bound(default.clone()),
        });
        args.push(Arg::Value(default.clone()));
    } else {
        missing.push(param.name.clone());
    }
}

/// Audit description for a resolved parameter.
fn resolved_description(target: &str, name: &str) -> String {
    format!("resolved {target} for \"{name}\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::TypeSpec;
    use crate::resolver::{ActionFilter, ResolverDescriptor, ResolverSpec};

    struct Req;

    fn user_registry() -> ResolverRegistry<Req> {
        ResolverRegistry::new([ResolverSpec::Descriptor(ResolverDescriptor::with_fn(
            "User",
            ActionFilter::Any,
            |_req: &Req, _action, _target| Ok(Box::new("user-object".to_string()) as Resolved),
        ))])
        .unwrap()
    }

    fn view_action() -> Action {
        Action::new(
            "view",
            vec![
                ParamSpec::typed("id", TypeSpec::int()),
                ParamSpec::typed("user", TypeSpec::named("User")),
            ],
        )
    }

    // -- Entry point dispatch --

    #[test]
    fn transport_is_fixed_at_construction() {
        let binder = Binder::new(Transport::Web, user_registry());
        assert_eq!(binder.transport(), Transport::Web);
    }

    #[test]
    fn web_and_console_share_the_decision_procedure() {
        let action = view_action();

        let web = Binder::new(Transport::Web, user_registry());
        let args = web
            .bind(&action, &Req, RawParams::from_named([("id", "3")]))
            .unwrap();
        assert_eq!(args[0].as_value(), Some(&RawValue::Int(3)));
        assert_eq!(args[1].downcast_ref::<String>().unwrap(), "user-object");

        let console = Binder::new(Transport::Console, user_registry());
        let args = console
            .bind(&action, &Req, RawParams::from_positional(["3"]))
            .unwrap();
        // Console performs no scalar validation coercion.
        assert_eq!(args[0].as_value(), Some(&RawValue::Str("3".into())));
        assert_eq!(args[1].downcast_ref::<String>().unwrap(), "user-object");
    }

    // -- Pre-resolver hooks --

    #[test]
    fn pre_resolver_short_circuits_registry() {
        let binder = Binder::new(Transport::Web, user_registry()).with_pre_resolver(
            |event: &ResolutionEvent<'_, Req>| {
                (event.target == "User").then(|| Box::new(42u32) as Resolved)
            },
        );

        let args = binder
            .bind(&view_action(), &Req, RawParams::from_named([("id", "1")]))
            .unwrap();
        // The hook resolved the parameter; the registry's string object
        // was never produced.
        assert_eq!(args[1].downcast_ref::<u32>(), Some(&42));
    }

    #[test]
    fn hooks_run_in_registration_order() {
        let binder = Binder::new(Transport::Web, ResolverRegistry::empty())
            .with_pre_resolver(|_event: &ResolutionEvent<'_, Req>| {
                Some(Box::new(1u32) as Resolved)
            })
            .with_pre_resolver(|_event: &ResolutionEvent<'_, Req>| {
                Some(Box::new(2u32) as Resolved)
            });

        let args = binder
            .bind(&view_action(), &Req, RawParams::from_named([("id", "1")]))
            .unwrap();
        assert_eq!(args[1].downcast_ref::<u32>(), Some(&1));
    }

    // -- Write-once audit --

    #[test]
    fn requested_params_set_by_first_bind_only() {
        let binder = Binder::new(Transport::Web, user_registry());
        assert!(binder.requested_params().is_none());

        binder
            .bind(&view_action(), &Req, RawParams::from_named([("id", "1")]))
            .unwrap();
        let first: Vec<_> = binder.requested_params().unwrap().to_vec();
        assert_eq!(
            first[0],
            AuditEntry {
                name: "id".into(),
                value: AuditValue::Bound(RawValue::Int(1)),
            }
        );
        assert_eq!(
            first[1],
            AuditEntry {
                name: "user".into(),
                value: AuditValue::Resolved("resolved User for \"user\"".into()),
            }
        );

        binder
            .bind(&view_action(), &Req, RawParams::from_named([("id", "99")]))
            .unwrap();
        assert_eq!(binder.requested_params().unwrap(), first.as_slice());
    }

    #[test]
    fn failed_bind_does_not_populate_audit() {
        let binder = Binder::new(Transport::Web, ResolverRegistry::empty());
        let action = Action::new("view", vec![ParamSpec::typed("id", TypeSpec::int())]);
        let err = binder.bind(&action, &Req, RawParams::new()).unwrap_err();
        assert_eq!(err, BindError::MissingParameters(vec!["id".into()]));
        assert!(binder.requested_params().is_none());
    }

    // -- Error classification --

    #[test]
    fn client_fault_classification() {
        assert!(BindError::MalformedParameter("x".into()).is_client_fault());
        assert!(BindError::MissingParameters(vec!["x".into()]).is_client_fault());
        assert!(BindError::Resolution(ResolveError::NotFound("gone".into())).is_client_fault());
        assert!(!BindError::ResolverFault("broken".into()).is_client_fault());
        assert!(!BindError::CommandFailed("broken".into()).is_client_fault());
    }

    #[test]
    fn missing_parameters_message_joins_names() {
        let err = BindError::MissingParameters(vec!["a".into(), "b".into()]);
        assert_eq!(
            err.to_string(),
            "missing required parameters: a, b"
        );
    }
}
