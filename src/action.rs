//! Action declarations — the introspectable parameter list the binder
//! walks.
//!
//! An action is external input to the core: the dispatcher owns it, the
//! binder only reads it. The serde derives let declarative action tables
//! be loaded from configuration.

use serde::{Deserialize, Serialize};

use crate::params::RawValue;

/// A single dispatchable handler with a declared parameter list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// Dispatch identifier, matched against resolver action filters.
    pub id: String,
    /// Declared parameters, in handler declaration order.
    pub params: Vec<ParamSpec>,
}

impl Action {
    pub fn new(id: impl Into<String>, params: Vec<ParamSpec>) -> Self {
        Self {
            id: id.into(),
            params,
        }
    }
}

/// One declared handler parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamSpec {
    pub name: String,
    /// Declared type; `None` for untyped parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ty: Option<TypeSpec>,
    /// Default value, if the declaration carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<RawValue>,
}

impl ParamSpec {
    /// An untyped parameter.
    pub fn untyped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: None,
            default: None,
        }
    }

    /// A parameter with a declared type.
    pub fn typed(name: impl Into<String>, ty: TypeSpec) -> Self {
        Self {
            name: name.into(),
            ty: Some(ty),
            default: None,
        }
    }

    pub fn with_default(mut self, value: impl Into<RawValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// The resolver target, when the declared type is a named type.
    pub fn target_type(&self) -> Option<&str> {
        self.ty.as_ref().and_then(|ty| ty.kind.named())
    }

    pub fn is_array(&self) -> bool {
        matches!(
            self.ty.as_ref().map(|ty| &ty.kind),
            Some(TypeKind::Array)
        )
    }
}

/// A declared parameter type: a kind plus whether null is admitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeSpec {
    pub kind: TypeKind,
    #[serde(default)]
    pub nullable: bool,
}

impl TypeSpec {
    pub fn new(kind: TypeKind) -> Self {
        Self {
            kind,
            nullable: false,
        }
    }

    pub fn int() -> Self {
        Self::new(TypeKind::Int)
    }

    pub fn float() -> Self {
        Self::new(TypeKind::Float)
    }

    pub fn bool() -> Self {
        Self::new(TypeKind::Bool)
    }

    pub fn str() -> Self {
        Self::new(TypeKind::Str)
    }

    pub fn array() -> Self {
        Self::new(TypeKind::Array)
    }

    /// A named class/interface type, resolved through the resolver chain
    /// when no raw value matches.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(TypeKind::Named(name.into()))
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }
}

/// The kind of a declared parameter type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Int,
    Float,
    Bool,
    Str,
    Array,
    /// A non-builtin named type.
    Named(String),
}

impl TypeKind {
    /// The target type name, when this is a named kind.
    pub fn named(&self) -> Option<&str> {
        match self {
            TypeKind::Named(name) => Some(name),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_type_only_for_named_kinds() {
        let user = ParamSpec::typed("user", TypeSpec::named("User"));
        assert_eq!(user.target_type(), Some("User"));

        let page = ParamSpec::typed("page", TypeSpec::int());
        assert_eq!(page.target_type(), None);

        let free = ParamSpec::untyped("free");
        assert_eq!(free.target_type(), None);
    }

    #[test]
    fn default_attaches_to_spec() {
        let spec = ParamSpec::typed("page", TypeSpec::int()).with_default(1);
        assert_eq!(spec.default, Some(RawValue::Int(1)));
    }

    #[test]
    fn action_table_deserializes() {
        let action: Action = serde_json::from_str(
            r#"{
                "id": "view",
                "params": [
                    {"name": "id", "ty": {"kind": "int", "nullable": false}},
                    {"name": "user", "ty": {"kind": {"named": "User"}, "nullable": false}},
                    {"name": "page", "default": 1}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(action.id, "view");
        assert_eq!(action.params.len(), 3);
        assert_eq!(action.params[1].target_type(), Some("User"));
        assert_eq!(action.params[2].default, Some(RawValue::Int(1)));
    }
}
