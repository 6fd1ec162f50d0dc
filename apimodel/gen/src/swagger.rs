//! Swagger 2.0 documents.
//!
//! Builds an API description from a compiled model. Every endpoint gets a
//! request definition and a response definition; the `200` response wraps the
//! response definition in the document's response envelope.
//!
//! When an endpoint declares no response fields, the builder can fall back to
//! the response keys its handler fills in, read from the group kit file.

use std::collections::BTreeMap;

use apimodel_define::{ApiModel, Endpoint, Field};
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::errors::{CompileError, Result};
use crate::kit::{FsReader, KitCache, KitLayout, KitResponse, SourceReader, declared_responses};
use crate::types::swagger_type;

/// Header written above generated YAML documents.
pub const GENERATED_HEADER: &str = "# Code generated by apimodel. DO NOT EDIT.";

const JSON_CONTENT_TYPE: &str = "application/json";

/// A Swagger 2.0 document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwaggerDocument {
    pub swagger: String,
    pub info: Info,
    pub host: String,
    #[serde(rename = "basePath")]
    pub base_path: String,
    pub schemes: Vec<String>,
    pub tags: Vec<Tag>,
    /// Path -> lowercase method -> operation.
    pub paths: BTreeMap<String, BTreeMap<String, Operation>>,
    pub definitions: BTreeMap<String, Schema>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Info {
    pub title: String,
    pub description: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tag {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Operation {
    pub tags: Vec<String>,
    pub summary: String,
    pub description: String,
    #[serde(rename = "operationId")]
    pub operation_id: String,
    pub consumes: Vec<String>,
    pub produces: Vec<String>,
    pub parameters: Vec<Parameter>,
    pub responses: BTreeMap<String, Response>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
    pub name: String,
    /// `query` or `body`.
    #[serde(rename = "in")]
    pub location: String,
    pub description: String,
    pub required: bool,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub param_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Schema>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    pub description: String,
    pub schema: Schema,
}

/// A JSON schema fragment.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Schema {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, Schema>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
}

impl Schema {
    pub fn typed(schema_type: &str) -> Self {
        Self {
            schema_type: Some(schema_type.to_string()),
            ..Self::default()
        }
    }

    /// A `$ref` to a named definition.
    pub fn definition_ref(name: &str) -> Self {
        Self {
            reference: Some(format!("#/definitions/{name}")),
            ..Self::default()
        }
    }

    fn described(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    fn add_property(&mut self, name: &str, schema: Schema, required: bool) {
        if required && !self.required.iter().any(|r| r == name) {
            self.required.push(name.to_string());
        }
        self.properties.insert(name.to_string(), schema);
    }
}

impl SwaggerDocument {
    /// Looks up the operation for a path and lowercase method.
    pub fn operation(&self, path: &str, method: &str) -> Option<&Operation> {
        self.paths.get(path)?.get(method)
    }

    /// YAML rendering, prefixed with the generated-code header.
    pub fn to_yaml(&self) -> Result<String> {
        let body = serde_yaml::to_string(self).map_err(|e| CompileError::Serialize(e.to_string()))?;
        Ok(format!("{GENERATED_HEADER}\n{body}"))
    }

    /// Pretty-printed JSON rendering.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| CompileError::Serialize(e.to_string()))
    }
}

/// Builds a [`SwaggerDocument`] from a model.
///
/// ## Examples
///
/// ```
/// use apimodel_gen::{compile, CompileOptions};
/// use apimodel_gen::swagger::SwaggerBuilder;
///
/// let model = compile("root api v2\nuser\n    login POST\n        name str\n", &CompileOptions::default()).unwrap();
/// let doc = SwaggerBuilder::new(&model).build().unwrap();
///
/// assert_eq!(doc.base_path, "/api/v2");
/// assert!(doc.operation("/user/login", "post").is_some());
/// assert!(doc.definitions.contains_key("ReqUserLogin"));
/// ```
pub struct SwaggerBuilder<'a, R: SourceReader = FsReader> {
    model: &'a ApiModel,
    kits: Option<(&'a mut KitCache<R>, &'a KitLayout)>,
}

impl<'a> SwaggerBuilder<'a, FsReader> {
    pub fn new(model: &'a ApiModel) -> Self {
        Self { model, kits: None }
    }
}

impl<'a, R: SourceReader> SwaggerBuilder<'a, R> {
    /// Uses kit files as the response source for endpoints without
    /// response fields.
    pub fn with_kits<K: SourceReader>(
        self,
        cache: &'a mut KitCache<K>,
        layout: &'a KitLayout,
    ) -> SwaggerBuilder<'a, K> {
        SwaggerBuilder {
            model: self.model,
            kits: Some((cache, layout)),
        }
    }

    #[instrument(skip_all, fields(prefix = %self.model.prefix, version = %self.model.version))]
    pub fn build(mut self) -> Result<SwaggerDocument> {
        let model = self.model;
        let meta = model.meta();
        let mut doc = SwaggerDocument {
            swagger: "2.0".to_string(),
            info: Info {
                title: meta.title.clone(),
                description: meta.description.clone(),
                version: meta.server_version.clone(),
            },
            host: meta.api_server.clone(),
            base_path: model.base_path(),
            schemes: vec!["https".to_string()],
            tags: model
                .groups
                .iter()
                .map(|group| Tag {
                    name: group.name.clone(),
                    description: group.comment.clone(),
                })
                .collect(),
            paths: BTreeMap::new(),
            definitions: BTreeMap::new(),
        };

        for endpoint in model.endpoints() {
            let path = endpoint.group_path();
            if doc.paths.contains_key(&path) {
                return Err(CompileError::Conflict { kind: "path", name: path });
            }

            let request = object_schema(&endpoint.request_fields).described(&endpoint.comment);
            insert_definition(&mut doc, endpoint.request_model_name(), request)?;

            let payload = self.payload_schema(endpoint)?;
            insert_definition(&mut doc, endpoint.response_model_name(), payload)?;

            let operations = endpoint
                .method
                .verbs()
                .iter()
                .map(|verb| (verb.to_string(), self.operation(endpoint, verb)))
                .collect();
            debug!(path = %path, method = %endpoint.method, "Swagger path");
            doc.paths.insert(path, operations);
        }

        info!(
            paths = doc.paths.len(),
            definitions = doc.definitions.len(),
            "Built swagger document"
        );
        Ok(doc)
    }

    fn payload_schema(&mut self, endpoint: &Endpoint) -> Result<Schema> {
        if !endpoint.response_fields.is_empty() {
            return Ok(object_schema(&endpoint.response_fields));
        }
        let Some((cache, layout)) = self.kits.as_mut() else {
            return Ok(Schema::typed("object"));
        };
        let responses = declared_responses(endpoint, &mut **cache, *layout)?;
        let mut schema = Schema::typed("object");
        for response in &responses {
            schema.add_property(&response.name, kit_response_schema(response), true);
        }
        Ok(schema)
    }

    fn operation(&self, endpoint: &Endpoint, verb: &str) -> Operation {
        let parameters = if verb == "post" {
            vec![Parameter {
                name: "body".to_string(),
                location: "body".to_string(),
                description: endpoint.comment.clone(),
                required: true,
                param_type: None,
                items: None,
                schema: Some(Schema::definition_ref(&endpoint.request_model_name())),
            }]
        } else {
            endpoint.request_fields.iter().map(query_parameter).collect()
        };

        let payload = Schema::definition_ref(&endpoint.response_model_name());
        let schema = if endpoint.protocol.raw_response() {
            payload
        } else {
            self.envelope(payload)
        };
        let mut responses = BTreeMap::new();
        responses.insert(
            "200".to_string(),
            Response {
                description: "OK".to_string(),
                schema,
            },
        );

        Operation {
            tags: vec![endpoint.group.clone()],
            summary: endpoint.api_name(),
            description: endpoint.comment.clone(),
            operation_id: endpoint.full_name(),
            consumes: vec![JSON_CONTENT_TYPE.to_string()],
            produces: vec![endpoint.protocol.produces().to_string()],
            parameters,
            responses,
        }
    }

    fn envelope(&self, payload: Schema) -> Schema {
        let envelope = &self.model.meta().response_envelope;
        let mut schema = Schema::typed("object");
        for field in &envelope.fields {
            let property = if *field == envelope.data_field {
                payload.clone()
            } else {
                Schema::default()
            };
            schema.add_property(field, property, true);
        }
        if !envelope.fields.contains(&envelope.data_field) {
            schema.add_property(&envelope.data_field, payload, true);
        }
        schema
    }
}

fn insert_definition(doc: &mut SwaggerDocument, name: String, schema: Schema) -> Result<()> {
    if doc.definitions.contains_key(&name) {
        return Err(CompileError::Conflict {
            kind: "definition",
            name,
        });
    }
    doc.definitions.insert(name, schema);
    Ok(())
}

fn object_schema(fields: &[Field]) -> Schema {
    let mut schema = Schema::typed("object");
    for field in fields {
        schema.add_property(&field.name, field_schema(field), field.required);
    }
    schema
}

fn field_schema(field: &Field) -> Schema {
    let title = field.nested_type_name().map(str::to_string);
    if field.is_array {
        let item = if field.is_nested {
            object_schema(&field.children)
        } else {
            Schema::typed(swagger_type(field.element_type()))
        };
        return Schema {
            items: Some(Box::new(Schema { title, ..item })),
            ..Schema::typed("array").described(&field.comment)
        };
    }
    if field.is_nested {
        return Schema {
            title,
            ..object_schema(&field.children).described(&field.comment)
        };
    }
    Schema::typed(swagger_type(&field.resolved_type)).described(&field.comment)
}

fn query_parameter(field: &Field) -> Parameter {
    Parameter {
        name: field.name.clone(),
        location: "query".to_string(),
        description: field.comment.clone(),
        required: field.required,
        param_type: Some(swagger_type(&field.resolved_type).to_string()),
        items: field
            .is_array
            .then(|| Schema::typed(swagger_type(field.element_type()))),
        schema: None,
    }
}

fn kit_response_schema(response: &KitResponse) -> Schema {
    let element = if response.type_object.is_empty() {
        Schema::typed(swagger_type(&response.value_type))
    } else {
        Schema {
            title: Some(response.type_object.clone()),
            ..Schema::typed("object")
        }
    };
    if response.is_array {
        Schema {
            items: Some(Box::new(element)),
            ..Schema::typed("array").described(&response.comment)
        }
    } else {
        element.described(&response.comment)
    }
}

/// Builds a Swagger document without kit files.
pub fn swagger_document(model: &ApiModel) -> Result<SwaggerDocument> {
    SwaggerBuilder::new(model).build()
}
