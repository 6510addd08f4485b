#[cfg(test)]
#[path = "json_node_test.rs"]
mod tests;

use serde_json::Value;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScalarKind {
    Null,
    String,
    Number,
    Boolean,
}

/// Display tree for an arbitrary JSON value. Built once per response so the
/// renderer only ever matches on variants instead of inspecting `Value`s.
#[derive(Clone, Debug, PartialEq)]
pub enum JsonNode {
    Scalar { kind: ScalarKind, text: String },
    EmptySequence,
    EmptyMapping,
    Sequence(Vec<JsonNode>),
    Mapping(Vec<(String, JsonNode)>),
}

impl JsonNode {
    pub fn from_value(value: &Value) -> JsonNode {
        match value {
            Value::Null => {
                return JsonNode::Scalar {
                    kind: ScalarKind::Null,
                    text: "null".to_string(),
                };
            }
            Value::String(text) => {
                return JsonNode::Scalar {
                    kind: ScalarKind::String,
                    text: format!("\"{text}\""),
                };
            }
            Value::Number(num) => {
                return JsonNode::Scalar {
                    kind: ScalarKind::Number,
                    text: num.to_string(),
                };
            }
            Value::Bool(flag) => {
                return JsonNode::Scalar {
                    kind: ScalarKind::Boolean,
                    text: flag.to_string(),
                };
            }
            Value::Array(items) => {
                if items.is_empty() {
                    return JsonNode::EmptySequence;
                }

                return JsonNode::Sequence(items.iter().map(JsonNode::from_value).collect());
            }
            Value::Object(map) => {
                if map.is_empty() {
                    return JsonNode::EmptyMapping;
                }

                return JsonNode::Mapping(
                    map.iter()
                        .map(|(key, val)| return (key.to_string(), JsonNode::from_value(val)))
                        .collect(),
                );
            }
        }
    }

    /// Scalars and empty markers fit on the same line as their key.
    pub fn is_inline(&self) -> bool {
        return !matches!(self, JsonNode::Sequence(_) | JsonNode::Mapping(_));
    }

    #[cfg(test)]
    pub fn keys(&self) -> Vec<&str> {
        if let JsonNode::Mapping(entries) = self {
            return entries.iter().map(|(key, _)| return key.as_str()).collect();
        }

        return vec![];
    }
}
