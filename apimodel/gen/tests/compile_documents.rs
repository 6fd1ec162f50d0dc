//! End-to-end compilation of DSL documents.

use std::path::PathBuf;

use apimodel_define::{Field, HttpMethod, Protocol};
use apimodel_gen::{CompileError, CompileOptions, Dialect, compile, compile_file};
use proptest::prelude::*;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn v4(source: &str) -> Result<apimodel_define::ApiModel, CompileError> {
    compile(source, &CompileOptions::default())
}

fn assert_leaf_fields_have_no_children(fields: &[Field]) {
    for field in fields {
        if !field.is_nested {
            assert!(field.children.is_empty(), "{} has children", field.name);
        }
        assert_leaf_fields_have_no_children(&field.children);
    }
}

#[test]
fn user_create_scenario() {
    let source = "\
root myapi v1
user # user module
    create POST userAuth json # create a user
        - req
        name str true # user name
        age int false # user age
        - resp
        id int true # new id
";
    let model = v4(source).unwrap();

    assert_eq!(model.groups.len(), 1);
    let group = &model.groups[0];
    assert_eq!(group.name, "user");
    assert_eq!(group.comment, "user module");
    assert_eq!(group.endpoints.len(), 1);

    let create = &group.endpoints[0];
    assert_eq!(create.name, "create");
    assert_eq!(create.method, HttpMethod::Post);
    assert_eq!(create.auth.as_deref(), Some("userAuth"));
    assert_eq!(create.protocol, Protocol::Json);
    assert_eq!(create.comment, "create a user");

    assert_eq!(create.request_fields.len(), 2);
    let name = &create.request_fields[0];
    assert_eq!((name.name.as_str(), name.resolved_type.as_str()), ("name", "string"));
    assert!(name.required);
    let age = &create.request_fields[1];
    assert_eq!((age.name.as_str(), age.resolved_type.as_str()), ("age", "int64"));
    assert!(!age.required);

    assert_eq!(create.response_fields.len(), 1);
    let id = &create.response_fields[0];
    assert_eq!((id.name.as_str(), id.resolved_type.as_str()), ("id", "int64"));
    assert!(id.required);
    assert_eq!(id.comment, "new id");
}

#[test]
fn nested_object_scenario() {
    let source = "\
root myapi
user
    update POST
        address addr
            city str true
";
    let model = v4(source).unwrap();
    let update = model.find_endpoint("user", "update").unwrap();

    let address = &update.request_fields[0];
    assert_eq!(address.name, "address");
    assert!(address.is_nested);
    assert_eq!(address.children.len(), 1);
    assert_eq!(address.children[0].name, "city");
}

#[test]
fn alias_scenario() {
    let source = "root myapi\nuser\n    info\n        - alias: a,b,c\n";
    let model = v4(source).unwrap();
    assert_eq!(model.find_endpoint("user", "info").unwrap().aliases, vec!["a", "b", "c"]);
}

#[test]
fn fixture_document_compiles() {
    let model = compile_file(&fixture("shop.api"), &CompileOptions::default()).unwrap();

    assert_eq!(model.prefix, "shop");
    assert_eq!(model.version, "v2");
    assert_eq!(model.endpoint_count(), 6);

    let meta = model.meta();
    assert_eq!(meta.title, "Shop");
    assert_eq!(meta.api_server, "api.shop.test");
    assert_eq!(meta.auth_map.len(), 2);
    assert_eq!(meta.response_envelope.fields, vec!["code", "data", "message"]);

    let update = model.find_endpoint("user", "profile.update").unwrap();
    let names: Vec<&str> = update.request_fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["nickname", "address", "tags"]);
    let address = &update.request_fields[1];
    let children: Vec<&str> = address.children.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(children, vec!["city", "geo", "zip"]);
    assert_eq!(address.children[1].children.len(), 2);
    assert_eq!(update.request_fields[2].resolved_type, "[]string");

    let list = model.find_endpoint("order", "list").unwrap();
    assert_eq!(list.method, HttpMethod::Any);
    let items = &list.response_fields[0];
    assert!(items.is_array && items.is_nested);
    assert_eq!(items.children[1].resolved_type, "int32");
    assert_eq!(list.response_fields[1].name, "total");

    let assets = model.find_endpoint("order", "assets.*").unwrap();
    assert!(assets.is_wildcard());
    assert_eq!(assets.protocol, Protocol::RespRaw);

    let info = model.find_endpoint("user", "info").unwrap();
    assert_eq!(info.aliases, vec!["/legacy/user/info", "/me"]);

    for endpoint in model.endpoints() {
        assert_leaf_fields_have_no_children(&endpoint.request_fields);
        assert_leaf_fields_have_no_children(&endpoint.response_fields);
    }
}

#[test]
fn display_output_compiles_to_the_same_tree() {
    let model = compile_file(&fixture("shop.api"), &CompileOptions::default()).unwrap();
    let again = v4(&model.to_string()).unwrap();

    assert_eq!(again.groups.len(), model.groups.len());
    for (a, b) in model.endpoints().zip(again.endpoints()) {
        assert_eq!(a.name, b.name);
        assert_eq!(a.method, b.method);
        assert_eq!(a.request_fields.len(), b.request_fields.len());
        assert_eq!(a.response_fields.len(), b.response_fields.len());
        assert_eq!(a.aliases, b.aliases);
    }
}

#[test]
fn wildcard_and_envelope_are_v4_only() {
    let wildcard = "root a\nweb\n    files.*\n";
    assert!(v4(wildcard).is_ok());
    let err = compile(wildcard, &CompileOptions::for_dialect(Dialect::V1)).unwrap_err();
    assert!(err.to_string().contains("files.*"));

    let envelope = "root a\n- resp: fields=code,data in=data\n";
    let model = v4(envelope).unwrap();
    assert_eq!(model.meta().response_envelope.fields, vec!["code", "data"]);
    assert!(compile(envelope, &CompileOptions::for_dialect(Dialect::V1)).is_err());
}

#[test]
fn deep_field_without_open_ancestor_is_named() {
    let source = "\
root a
user
    update
        name str
            first str
";
    let err = v4(source).unwrap_err();
    assert_eq!(err.line(), Some(5));
    assert!(err.to_string().contains("no nested field open at depth 2"));
}

#[test]
fn errors_carry_the_raw_line() {
    let source = "root a\nuser\n    create POST none xml\n";
    let err = v4(source).unwrap_err();
    let text = err.to_string();
    assert!(text.contains("line 3"));
    assert!(text.contains("    create POST none xml"));
}

#[test]
fn v1_dialect_compiles_plain_documents() {
    let source = "root a v3\nuser\n    login POST\n        name str\n";
    let model = compile(source, &CompileOptions::for_dialect(Dialect::V1)).unwrap();
    assert_eq!(model.version, "v3");
    assert_eq!(model.endpoint_count(), 1);
}

fn valid_document() -> &'static str {
    "root a\nuser\n    create POST\n        name str true\n        address Addr\n            city str\n"
}

proptest! {
    #[test]
    fn misaligned_lines_always_fail(extra in 1usize..4, body in "[a-z]{1,8}( str)?") {
        let source = format!("root a\nuser\n{}{}\n", " ".repeat(4 + extra), body);
        let err = v4(&source).unwrap_err();
        prop_assert!(err.is_grammar());
        prop_assert_eq!(err.line(), Some(3));
    }

    #[test]
    fn any_grammar_error_means_no_model(line in 2usize..6) {
        let mut lines: Vec<String> = valid_document().lines().map(str::to_string).collect();
        lines[line].insert(0, ' ');
        let source = lines.join("\n");
        prop_assert!(v4(&source).is_err());
    }
}
