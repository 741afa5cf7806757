//! Web transport binding — named matching with strict scalar coercion.

use super::{Arg, AuditEntry, AuditValue, BindError, Binder};
use crate::action::Action;
use crate::coerce::coerce;
use crate::params::RawParams;

/// Bind in web order: raw named match with coercion, resolver chain for
/// named types, declared default, else missing.
///
/// A failed coercion aborts immediately naming the parameter; missing
/// parameters are accumulated and reported once after the whole list
/// has been walked.
pub(super) fn bind<R>(
    binder: &Binder<R>,
    action: &Action,
    request: &R,
    mut params: RawParams,
) -> Result<Vec<Arg>, BindError> {
    let mut args = Vec::with_capacity(action.params.len());
    let mut audit = Vec::with_capacity(action.params.len());
    let mut missing = Vec::new();

    for param in &action.params {
        if let Some(raw) = params.take_named(&param.name) {
            let value = coerce(param.ty.as_ref(), raw)
                .map_err(|_| BindError::MalformedParameter(param.name.clone()))?;
            audit.push(AuditEntry {
                name: param.name.clone(),
                value: AuditValue::Bound(value.clone()),
            });
            args.push(Arg::Value(value));
        } else if let Some(target) = param.target_type() {
            match binder.resolve_param(action, request, target) {
                Ok(Some(object)) => {
                    audit.push(AuditEntry {
                        name: param.name.clone(),
                        value: AuditValue::Resolved(super::resolved_description(
                            target,
                            &param.name,
                        )),
                    });
                    args.push(Arg::Object(object));
                }
                Ok(None) => super::fall_back(param, &mut args, &mut audit, &mut missing),
                Err(e) if e.is_client_fault() => return Err(BindError::Resolution(e)),
                Err(e) => return Err(BindError::ResolverFault(e.to_string())),
            }
        } else {
            super::fall_back(param, &mut args, &mut audit, &mut missing);
        }
    }

    if !missing.is_empty() {
        tracing::debug!(action = %action.id, params = ?missing, "missing required parameters");
        return Err(BindError::MissingParameters(missing));
    }

    binder.record_requested(audit);
    Ok(args)
}
