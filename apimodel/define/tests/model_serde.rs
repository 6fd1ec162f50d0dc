//! Serialization of compiled models.

use apimodel_define::prelude::*;
use serde_json::json;

fn account_model() -> ApiModel {
    let mut address = Field::new("address", "Address", "struct").nested();
    address.add_child(Field::new("city", "str", "string").with_comment("city name"));

    let mut register = Endpoint::new("user.register", "account");
    register.method = HttpMethod::Post;
    register.auth = Some("userAuth".to_string());
    register.protocol = Protocol::RespRaw;
    register.request_fields.push(
        Field::new("email", "str", "string").with_validation("email"),
    );
    register.request_fields.push(address);

    let mut account = Group::new("account");
    account.endpoints.push(register);

    let mut model = ApiModel::new("shop", "v2");
    model.groups.push(account);
    model.meta.title = "Shop".to_string();
    model
}

#[test]
fn model_round_trips_through_json() {
    let model = account_model();
    let text = serde_json::to_string(&model).unwrap();
    let back: ApiModel = serde_json::from_str(&text).unwrap();
    assert_eq!(back, model);
}

#[test]
fn enums_serialize_with_dsl_spelling() {
    let model = account_model();
    let value = serde_json::to_value(&model).unwrap();
    let endpoint = &value["groups"][0]["endpoints"][0];

    assert_eq!(endpoint["method"], json!("POST"));
    assert_eq!(endpoint["protocol"], json!("respRaw"));
    assert_eq!(endpoint["auth"], json!("userAuth"));
}

#[test]
fn nested_children_survive_serialization() {
    let value = serde_json::to_value(account_model()).unwrap();
    let address = &value["groups"][0]["endpoints"][0]["request_fields"][1];

    assert_eq!(address["is_nested"], json!(true));
    assert_eq!(address["children"][0]["name"], json!("city"));
    assert_eq!(address["children"][0]["comment"], json!("city name"));
}

#[test]
fn derived_names_for_dotted_names_in_group() {
    let model = account_model();
    let endpoint = model.find_endpoint("account", "user.register").unwrap();

    assert_eq!(endpoint.handler_name(), "UserRegisterApi");
    assert_eq!(endpoint.request_model_name(), "ReqAccountUserRegister");
    assert_eq!(
        endpoint.route_path(&model.prefix, &model.version),
        "/shop/v2/account/user/register"
    );
}
