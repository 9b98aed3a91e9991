//! Document ingestion: JSON and YAML into config trees
//!
//! Single-document conversion only; composing trees from multiple sources is
//! a collaborator concern. Mapping keys keep document order, which is the
//! order the engine later visits fields in.

use crate::meta::TypeTag;
use crate::node::{Mapping, Node, Sequence};
use crate::value::Value;

/// Errors converting documents into config trees
#[derive(Debug, thiserror::Error)]
pub enum NodeError {
    /// Malformed JSON input
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed YAML input
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Mapping key that is not a string
    #[error("mapping keys must be strings, got {found}")]
    NonStringKey { found: String },
}

impl Node {
    /// Parse a JSON document into a config tree
    ///
    /// # Errors
    /// Returns [`NodeError::Json`] on malformed input.
    pub fn from_json_str(input: &str) -> Result<Self, NodeError> {
        let value: serde_json::Value = serde_json::from_str(input)?;
        Ok(Self::from(value))
    }

    /// Parse a YAML document into a config tree
    ///
    /// A YAML local tag on a mapping or sequence (e.g. `!widgets.Panel`)
    /// becomes the container's object-type tag.
    ///
    /// # Errors
    /// Returns [`NodeError::Yaml`] on malformed input and
    /// [`NodeError::NonStringKey`] for non-string mapping keys.
    pub fn from_yaml_str(input: &str) -> Result<Self, NodeError> {
        let value: serde_yaml::Value = serde_yaml::from_str(input)?;
        Self::from_yaml(value)
    }

    /// Convert a parsed YAML value into a config tree
    ///
    /// # Errors
    /// Returns [`NodeError::NonStringKey`] for non-string mapping keys.
    pub fn from_yaml(value: serde_yaml::Value) -> Result<Self, NodeError> {
        match value {
            serde_yaml::Value::Null => Ok(Self::null()),
            serde_yaml::Value::Bool(b) => Ok(Self::Value(Value::Bool(b))),
            serde_yaml::Value::Number(n) => Ok(Self::Value(number_from_yaml(&n))),
            serde_yaml::Value::String(s) => Ok(Self::Value(Value::Str(s))),
            serde_yaml::Value::Sequence(items) => {
                let seq: Result<Sequence, NodeError> =
                    items.into_iter().map(Self::from_yaml).collect();
                Ok(Self::Sequence(seq?))
            }
            serde_yaml::Value::Mapping(mapping) => {
                let mut out = Mapping::new();
                for (key, val) in mapping {
                    let serde_yaml::Value::String(key) = key else {
                        return Err(NodeError::NonStringKey {
                            found: yaml_kind(&key).to_string(),
                        });
                    };
                    out.insert(key, Self::from_yaml(val)?);
                }
                Ok(Self::Mapping(out))
            }
            serde_yaml::Value::Tagged(tagged) => {
                let tagged = *tagged;
                let tag = tagged.tag.to_string();
                let tag = tag.trim_start_matches('!');
                let mut node = Self::from_yaml(tagged.value)?;
                match &mut node {
                    Self::Mapping(m) => m.set_tag(Some(TypeTag::new(tag))),
                    Self::Sequence(s) => s.set_tag(Some(TypeTag::new(tag))),
                    Self::Value(_) => {}
                }
                Ok(node)
            }
        }
    }
}

impl From<serde_json::Value> for Node {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::null(),
            serde_json::Value::Bool(b) => Self::Value(Value::Bool(b)),
            serde_json::Value::Number(n) => Self::Value(number_from_json(&n)),
            serde_json::Value::String(s) => Self::Value(Value::Str(s)),
            serde_json::Value::Array(items) => {
                Self::Sequence(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => {
                let mut out = Mapping::new();
                for (key, val) in map {
                    out.insert(key, Self::from(val));
                }
                Self::Mapping(out)
            }
        }
    }
}

fn number_from_json(n: &serde_json::Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::Int(i)
    } else {
        n.as_f64().map_or(Value::Null, Value::Float)
    }
}

fn number_from_yaml(n: &serde_yaml::Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::Int(i)
    } else {
        n.as_f64().map_or(Value::Null, Value::Float)
    }
}

fn yaml_kind(value: &serde_yaml::Value) -> &'static str {
    match value {
        serde_yaml::Value::Null => "null",
        serde_yaml::Value::Bool(_) => "bool",
        serde_yaml::Value::Number(_) => "number",
        serde_yaml::Value::String(_) => "string",
        serde_yaml::Value::Sequence(_) => "sequence",
        serde_yaml::Value::Mapping(_) => "mapping",
        serde_yaml::Value::Tagged(_) => "tagged value",
    }
}
