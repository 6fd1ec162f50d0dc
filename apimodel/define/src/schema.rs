//! Documentation schema trees.
//!
//! A [`SchemaNode`] is the OpenAPI-like projection of a field tree. It carries
//! only what documentation needs: a name, a type label, a description, which
//! properties are required, and the element shape for arrays.

use serde::{Deserialize, Serialize};

/// Type label given to anything that is not a known scalar.
pub const OBJECT_LABEL: &str = "Object";

/// One node of a projected schema.
///
/// Properties keep declaration order, and `required` lists property names in
/// the same order without duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaNode {
    pub name: String,
    /// Documentation type label (`String`, `Number`, `Boolean`, `Date`, `Object`).
    pub node_type: String,
    pub description: String,
    pub required: Vec<String>,
    pub properties: Vec<SchemaNode>,
    /// Element schema when this node describes an array.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub array_item: Option<Box<SchemaNode>>,
}

impl SchemaNode {
    /// Creates a leaf node with no properties.
    pub fn new(
        name: impl Into<String>,
        node_type: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            node_type: node_type.into(),
            description: description.into(),
            required: Vec::new(),
            properties: Vec::new(),
            array_item: None,
        }
    }

    /// Creates an empty object node.
    pub fn object(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, OBJECT_LABEL, description)
    }

    /// Appends a property, recording it as required when asked.
    pub fn push_property(&mut self, property: SchemaNode, required: bool) {
        if required && !self.required.contains(&property.name) {
            self.required.push(property.name.clone());
        }
        self.properties.push(property);
    }

    pub fn property(&self, name: &str) -> Option<&SchemaNode> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn is_array(&self) -> bool {
        self.array_item.is_some()
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }
}
