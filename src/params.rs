//! Raw request parameters — the untyped key→value set binding consumes.
//!
//! The transport extracts these from the incoming request (query string,
//! body, argv) before binding starts. Keys are consumed as the binder
//! matches them; the residual order of unconsumed entries is preserved
//! so the console variant can pass extras through to variadic handlers.

use serde::{Deserialize, Serialize};

/// An untyped parameter value as handed over by the transport.
///
/// Serialized untagged, so a deserialized JSON query or body map yields
/// raw values directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<RawValue>),
}

impl RawValue {
    pub fn is_list(&self) -> bool {
        matches!(self, RawValue::List(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, RawValue::Null)
    }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        RawValue::Bool(value)
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        RawValue::Int(value)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Float(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Str(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Str(value)
    }
}

impl From<Vec<RawValue>> for RawValue {
    fn from(items: Vec<RawValue>) -> Self {
        RawValue::List(items)
    }
}

/// Key of one raw parameter: positional index (console) or name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamKey {
    Index(usize),
    Name(String),
}

impl From<usize> for ParamKey {
    fn from(index: usize) -> Self {
        ParamKey::Index(index)
    }
}

impl From<&str> for ParamKey {
    fn from(name: &str) -> Self {
        ParamKey::Name(name.to_string())
    }
}

impl From<String> for ParamKey {
    fn from(name: String) -> Self {
        ParamKey::Name(name)
    }
}

/// The raw parameter set extracted from one request.
///
/// Insertion-ordered. Lookups are linear scans — parameter sets are
/// small.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawParams {
    entries: Vec<(ParamKey, RawValue)>,
}

impl RawParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a named set, as a web transport would.
    pub fn from_named<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<RawValue>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(k, v)| (ParamKey::Name(k.into()), v.into()))
                .collect(),
        }
    }

    /// Build a positional set, as a console transport would.
    pub fn from_positional<V>(values: impl IntoIterator<Item = V>) -> Self
    where
        V: Into<RawValue>,
    {
        Self {
            entries: values
                .into_iter()
                .enumerate()
                .map(|(i, v)| (ParamKey::Index(i), v.into()))
                .collect(),
        }
    }

    pub fn insert(&mut self, key: impl Into<ParamKey>, value: impl Into<RawValue>) {
        self.entries.push((key.into(), value.into()));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove and return the value stored under `key`, keeping the
    /// order of the remaining entries.
    pub fn take(&mut self, key: &ParamKey) -> Option<RawValue> {
        let position = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(position).1)
    }

    /// Remove and return the value stored under a name key.
    pub fn take_named(&mut self, name: &str) -> Option<RawValue> {
        let position = self
            .entries
            .iter()
            .position(|(k, _)| matches!(k, ParamKey::Name(n) if n == name))?;
        Some(self.entries.remove(position).1)
    }

    /// Remove and return the value stored under a positional key.
    pub fn take_index(&mut self, index: usize) -> Option<RawValue> {
        let position = self
            .entries
            .iter()
            .position(|(k, _)| matches!(k, ParamKey::Index(i) if *i == index))?;
        Some(self.entries.remove(position).1)
    }

    /// Drain the unconsumed entries in their residual order.
    pub fn into_residual(self) -> impl Iterator<Item = (ParamKey, RawValue)> {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- Take semantics --

    #[test]
    fn take_named_consumes_the_key() {
        let mut params = RawParams::from_named([("a", "1"), ("b", "2")]);
        assert_eq!(params.take_named("a"), Some(RawValue::Str("1".into())));
        assert_eq!(params.take_named("a"), None);
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn take_index_ignores_names() {
        let mut params = RawParams::new();
        params.insert(0usize, "first");
        params.insert("0", "named-zero");
        assert_eq!(params.take_index(0), Some(RawValue::Str("first".into())));
        assert_eq!(params.take_index(0), None);
        assert_eq!(params.take_named("0"), Some(RawValue::Str("named-zero".into())));
    }

    #[test]
    fn residual_order_preserved_after_takes() {
        let mut params = RawParams::new();
        params.insert(0usize, "x");
        params.insert("extra", "y");
        params.insert("more", "z");
        params.take_index(0);
        let residual: Vec<_> = params.into_residual().collect();
        assert_eq!(
            residual,
            vec![
                (ParamKey::Name("extra".into()), RawValue::Str("y".into())),
                (ParamKey::Name("more".into()), RawValue::Str("z".into())),
            ]
        );
    }

    // -- Serde interop --

    #[test]
    fn raw_value_from_json_scalars() {
        let value: RawValue = serde_json::from_str("42").unwrap();
        assert_eq!(value, RawValue::Int(42));
        let value: RawValue = serde_json::from_str("\"abc\"").unwrap();
        assert_eq!(value, RawValue::Str("abc".into()));
        let value: RawValue = serde_json::from_str("null").unwrap();
        assert_eq!(value, RawValue::Null);
        let value: RawValue = serde_json::from_str("true").unwrap();
        assert_eq!(value, RawValue::Bool(true));
    }

    #[test]
    fn raw_value_from_json_array() {
        let value: RawValue = serde_json::from_str(r#"["a", 1]"#).unwrap();
        assert_eq!(
            value,
            RawValue::List(vec![RawValue::Str("a".into()), RawValue::Int(1)])
        );
    }

    #[test]
    fn raw_value_round_trips_untagged() {
        let value = RawValue::List(vec![RawValue::Int(1), RawValue::Str("x".into())]);
        let encoded = serde_json::to_string(&value).unwrap();
        assert_eq!(encoded, r#"[1,"x"]"#);
        let decoded: RawValue = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, value);
    }
}
