//! Type-directed coercion of raw values against declared parameter
//! types.
//!
//! Pure functions, no I/O. Conversion is permissive about input shape
//! (surrounding whitespace, common boolean tokens) but strict about the
//! result: a value that does not fully convert is invalid, never a
//! partial parse.

use crate::action::{TypeKind, TypeSpec};
use crate::params::RawValue;

/// Verdict for a raw value that cannot satisfy the declared type.
///
/// Always a client-input fault; the binder reports it as a malformed
/// parameter naming the offender.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Invalid;

/// Coerce `raw` against the declared type.
///
/// Rules, in order:
/// - no declared type: the value passes through unchanged
/// - array declarations accept anything (see [`into_list`])
/// - a sequence cannot bind to a scalar declaration
/// - builtin scalar declarations validate-convert; an empty string with
///   a nullable non-string declaration reads as null (the string kind
///   keeps the empty string verbatim, for compatibility with untyped
///   string handling)
/// - named types take the raw value as-is; resolution only runs when no
///   raw value matched at all
pub fn coerce(declared: Option<&TypeSpec>, raw: RawValue) -> Result<RawValue, Invalid> {
    let Some(spec) = declared else {
        return Ok(raw);
    };

    match &spec.kind {
        TypeKind::Array => Ok(into_list(raw)),
        _ if raw.is_list() => Err(Invalid),
        TypeKind::Named(_) => Ok(raw),
        TypeKind::Int => scalar(spec, raw, to_int),
        TypeKind::Float => scalar(spec, raw, to_float),
        TypeKind::Bool => scalar(spec, raw, to_bool),
        TypeKind::Str => scalar(spec, raw, Ok),
    }
}

/// Shared null and empty-string handling for builtin scalar
/// declarations, then the kind-specific conversion.
fn scalar(
    spec: &TypeSpec,
    raw: RawValue,
    convert: impl FnOnce(RawValue) -> Result<RawValue, Invalid>,
) -> Result<RawValue, Invalid> {
    match raw {
        RawValue::Null if spec.nullable => Ok(RawValue::Null),
        RawValue::Null => Err(Invalid),
        RawValue::Str(s) if s.is_empty() && spec.nullable && spec.kind != TypeKind::Str => {
            Ok(RawValue::Null)
        }
        other => convert(other),
    }
}

/// Array declarations accept anything: sequences pass through, null
/// reads as the empty sequence, scalars wrap.
fn into_list(raw: RawValue) -> RawValue {
    match raw {
        RawValue::List(items) => RawValue::List(items),
        RawValue::Null => RawValue::List(Vec::new()),
        scalar => RawValue::List(vec![scalar]),
    }
}

fn to_int(raw: RawValue) -> Result<RawValue, Invalid> {
    match raw {
        RawValue::Int(i) => Ok(RawValue::Int(i)),
        RawValue::Float(f)
            if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 =>
        {
            Ok(RawValue::Int(f as i64))
        }
        RawValue::Str(s) => s
            .trim()
            .parse::<i64>()
            .map(RawValue::Int)
            .map_err(|_| Invalid),
        _ => Err(Invalid),
    }
}

fn to_float(raw: RawValue) -> Result<RawValue, Invalid> {
    let parsed = match raw {
        RawValue::Float(f) => f,
        RawValue::Int(i) => i as f64,
        RawValue::Str(s) => s.trim().parse::<f64>().map_err(|_| Invalid)?,
        _ => return Err(Invalid),
    };
    if parsed.is_finite() {
        Ok(RawValue::Float(parsed))
    } else {
        Err(Invalid)
    }
}

fn to_bool(raw: RawValue) -> Result<RawValue, Invalid> {
    match raw {
        RawValue::Bool(b) => Ok(RawValue::Bool(b)),
        RawValue::Int(1) => Ok(RawValue::Bool(true)),
        RawValue::Int(0) => Ok(RawValue::Bool(false)),
        RawValue::Str(s) => match s.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "on" | "yes" => Ok(RawValue::Bool(true)),
            "" | "0" | "false" | "off" | "no" => Ok(RawValue::Bool(false)),
            _ => Err(Invalid),
        },
        _ => Err(Invalid),
    }
}
