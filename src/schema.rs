//! Response schema for schema-constrained generation.
//!
//! A [`SchemaNode`] describes the shape the model must produce. It serializes to the
//! OpenAPI-subset dialect the generation endpoint accepts (`"type": "OBJECT"` and friends),
//! keeping object properties in declaration order.

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::sync::OnceLock;

/// Recursive description of an expected output shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaNode {
    Object {
        properties: Vec<(String, SchemaNode)>,
        required: Vec<String>,
    },
    Array {
        items: Box<SchemaNode>,
    },
    String,
}

impl SchemaNode {
    /// Object node requiring every listed property.
    pub fn object<I, K>(properties: I) -> Self
    where
        I: IntoIterator<Item = (K, SchemaNode)>,
        K: Into<String>,
    {
        let properties: Vec<(String, SchemaNode)> = properties
            .into_iter()
            .map(|(name, node)| (name.into(), node))
            .collect();
        let required = properties.iter().map(|(name, _)| name.clone()).collect();
        SchemaNode::Object {
            properties,
            required,
        }
    }

    pub fn array(items: SchemaNode) -> Self {
        SchemaNode::Array {
            items: Box::new(items),
        }
    }

    pub fn string() -> Self {
        SchemaNode::String
    }

    pub fn kind(&self) -> &'static str {
        match self {
            SchemaNode::Object { .. } => "OBJECT",
            SchemaNode::Array { .. } => "ARRAY",
            SchemaNode::String => "STRING",
        }
    }

    /// Child node of an object property.
    pub fn property(&self, name: &str) -> Option<&SchemaNode> {
        match self {
            SchemaNode::Object { properties, .. } => properties
                .iter()
                .find(|(field, _)| field == name)
                .map(|(_, node)| node),
            _ => None,
        }
    }

    /// Required field names of an object node; empty for other kinds.
    pub fn required(&self) -> &[String] {
        match self {
            SchemaNode::Object { required, .. } => required.as_slice(),
            _ => &[],
        }
    }

    /// Item node of an array.
    pub fn items(&self) -> Option<&SchemaNode> {
        match self {
            SchemaNode::Array { items } => Some(items.as_ref()),
            _ => None,
        }
    }

    /// Check that every required name exists in its object's properties, recursively.
    ///
    /// Returns the dotted path of the first offending field.
    pub fn validate(&self) -> Result<(), String> {
        self.validate_at("$")
    }

    fn validate_at(&self, path: &str) -> Result<(), String> {
        match self {
            SchemaNode::Object {
                properties,
                required,
            } => {
                for name in required {
                    if !properties.iter().any(|(field, _)| field == name) {
                        return Err(format!(
                            "{}: required field '{}' has no property definition",
                            path, name
                        ));
                    }
                }
                for (field, node) in properties {
                    node.validate_at(&format!("{}.{}", path, field))?;
                }
                Ok(())
            }
            SchemaNode::Array { items } => items.validate_at(&format!("{}[]", path)),
            SchemaNode::String => Ok(()),
        }
    }
}

struct OrderedProperties<'a>(&'a [(String, SchemaNode)]);

impl Serialize for OrderedProperties<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, node) in self.0 {
            map.serialize_entry(name, node)?;
        }
        map.end()
    }
}

struct RequiredNames<'a>(&'a [String]);

impl Serialize for RequiredNames<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for name in self.0 {
            seq.serialize_element(name)?;
        }
        seq.end()
    }
}

impl Serialize for SchemaNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SchemaNode::Object {
                properties,
                required,
            } => {
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry("type", self.kind())?;
                map.serialize_entry("properties", &OrderedProperties(properties))?;
                map.serialize_entry("required", &RequiredNames(required))?;
                map.end()
            }
            SchemaNode::Array { items } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", self.kind())?;
                map.serialize_entry("items", items.as_ref())?;
                map.end()
            }
            SchemaNode::String => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("type", self.kind())?;
                map.end()
            }
        }
    }
}

/// The lesson plan response schema. Built once on first use.
pub fn lesson_plan_schema() -> &'static SchemaNode {
    static SCHEMA: OnceLock<SchemaNode> = OnceLock::new();
    SCHEMA.get_or_init(build_lesson_plan_schema)
}

fn build_lesson_plan_schema() -> SchemaNode {
    let slide = SchemaNode::object([
        ("title", SchemaNode::string()),
        ("content", SchemaNode::string()),
    ]);
    let quiz_item = SchemaNode::object([
        ("question", SchemaNode::string()),
        ("options", SchemaNode::array(SchemaNode::string())),
        ("answer", SchemaNode::string()),
    ]);
    let homework = SchemaNode::object([
        ("title", SchemaNode::string()),
        ("description", SchemaNode::string()),
    ]);

    SchemaNode::object([
        ("title", SchemaNode::string()),
        (
            "learning_objectives",
            SchemaNode::array(SchemaNode::string()),
        ),
        ("slides", SchemaNode::array(slide)),
        ("quiz", SchemaNode::array(quiz_item)),
        ("homework", homework),
    ])
}
