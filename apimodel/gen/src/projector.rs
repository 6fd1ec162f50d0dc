//! Projection of field trees into documentation schemas.

use apimodel_define::{Endpoint, Field, SchemaNode};

use crate::types::doc_type;

/// Projects one field and its children.
///
/// An array field becomes a wrapper whose `array_item` describes one element;
/// the element carries the children. Required child names are collected in
/// declaration order.
///
/// ## Examples
///
/// ```
/// use apimodel_define::Field;
/// use apimodel_gen::projector::project;
///
/// let mut items = Field::new("items", "[]Item", "[]struct").nested();
/// items.add_child(Field::new("sku", "str", "string"));
///
/// let node = project(&items);
/// let item = node.array_item.as_deref().unwrap();
/// assert_eq!(item.properties[0].node_type, "String");
/// assert_eq!(item.required, vec!["sku"]);
/// ```
pub fn project(field: &Field) -> SchemaNode {
    let label = doc_type(field.element_type());
    if field.is_array {
        let mut wrapper = SchemaNode::new(&field.name, label, &field.comment);
        wrapper.array_item = Some(Box::new(project_element(field, label)));
        wrapper
    } else {
        project_element(field, label)
    }
}

fn project_element(field: &Field, label: &str) -> SchemaNode {
    let mut node = SchemaNode::new(&field.name, label, &field.comment);
    for child in &field.children {
        node.push_property(project(child), child.required);
    }
    node
}

/// Projects a list of top-level fields as one object.
pub fn project_model(name: &str, description: &str, fields: &[Field]) -> SchemaNode {
    let mut node = SchemaNode::object(name, description);
    for field in fields {
        node.push_property(project(field), field.required);
    }
    node
}

/// Schema of an endpoint's request model.
pub fn request_schema(endpoint: &Endpoint) -> SchemaNode {
    project_model(
        &endpoint.request_model_name(),
        &endpoint.comment,
        &endpoint.request_fields,
    )
}

/// Schema of an endpoint's response model.
pub fn response_schema(endpoint: &Endpoint) -> SchemaNode {
    project_model(
        &endpoint.response_model_name(),
        &endpoint.comment,
        &endpoint.response_fields,
    )
}
