//! Console transport binding — positional matching, comma-separated
//! sequences, residual passthrough for variadic handlers.

use std::sync::LazyLock;

use regex::Regex;

use super::{Arg, AuditEntry, AuditValue, BindError, Binder};
use crate::action::Action;
use crate::params::{RawParams, RawValue};

/// Comma separator with optional surrounding whitespace.
static COMMA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*,\s*").expect("literal pattern"));

/// Bind in console order: positional index first, then name, as raw key
/// candidates. Scalars undergo no validation coercion; only sequence
/// declarations are coerced (split on comma, `""` is the empty
/// sequence). Unconsumed raw params are appended to the argument vector
/// in their residual order.
pub(super) fn bind<R>(
    binder: &Binder<R>,
    action: &Action,
    request: &R,
    mut params: RawParams,
) -> Result<Vec<Arg>, BindError> {
    let mut args = Vec::with_capacity(action.params.len());
    let mut audit = Vec::with_capacity(action.params.len());
    let mut missing = Vec::new();

    for (index, param) in action.params.iter().enumerate() {
        let raw = params
            .take_index(index)
            .or_else(|| params.take_named(&param.name));
        if let Some(raw) = raw {
            let value = if param.is_array() {
                split_sequence(raw)
            } else {
                raw
            };
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
                // The console transport reports one generic error kind
                // regardless of the resolver's category.
                Err(e) => return Err(BindError::CommandFailed(e.to_string())),
            }
        } else {
            super::fall_back(param, &mut args, &mut audit, &mut missing);
        }
    }

    if !missing.is_empty() {
        tracing::debug!(action = %action.id, params = ?missing, "missing required arguments");
        return Err(BindError::MissingParameters(missing));
    }

    args.extend(params.into_residual().map(|(_, value)| Arg::Value(value)));

    binder.record_requested(audit);
    Ok(args)
}

/// Console sequence coercion: sequences pass through, `""` and null
/// read as the empty sequence, other strings split on comma, remaining
/// scalars wrap.
fn split_sequence(raw: RawValue) -> RawValue {
    match raw {
        RawValue::List(items) => RawValue::List(items),
        RawValue::Null => RawValue::List(Vec::new()),
        RawValue::Str(s) if s.is_empty() => RawValue::List(Vec::new()),
        RawValue::Str(s) => RawValue::List(
            COMMA
                .split(&s)
                .map(|piece| RawValue::Str(piece.to_string()))
                .collect(),
        ),
        scalar => RawValue::List(vec![scalar]),
    }
}
