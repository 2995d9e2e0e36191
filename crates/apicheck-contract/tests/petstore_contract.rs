//! Integration test: contract checks against the Swagger Petstore document
//! in `tests/fixtures/`.

use std::path::PathBuf;

use apicheck_contract::{
    format_validation_errors, ContractError, ContractValidator, OpenApiSpec, ValidateOptions,
};
use serde_json::{json, Value};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn petstore() -> ContractValidator {
    let spec = OpenApiSpec::from_path(&fixture("petstore.json")).expect("petstore fixture loads");
    ContractValidator::new(spec)
}

fn valid_pet() -> Value {
    json!({
        "id": 10,
        "category": {"id": 1, "name": "Dogs"},
        "name": "doggie",
        "photoUrls": ["https://example.com/dog.png"],
        "tags": [{"id": 0, "name": "friendly"}],
        "status": "available"
    })
}

// =========================================================================
// Loading
// =========================================================================

#[test]
fn json_fixture_loads_metadata() {
    let v = petstore();
    assert_eq!(v.spec().version(), Some("2.0"));
    assert_eq!(v.spec().title(), Some("Swagger Petstore"));
    assert_eq!(v.spec().info.version.as_deref(), Some("1.0.7"));
}

#[test]
fn yaml_fixture_loads_with_numeric_status_keys() {
    let spec = OpenApiSpec::from_path(&fixture("petstore.yaml")).unwrap();
    let v = ContractValidator::new(spec);
    assert!(v.validate_endpoint_exists("/pet/{petId}", "get").valid);
    let r = v.validate_operation_response(
        "/pet/{petId}",
        "get",
        "200",
        &json!({"name": "doggie", "photoUrls": []}),
    );
    assert!(r.valid, "{:?}", r.errors);
}

#[test]
fn spec_written_to_disk_round_trips_through_loader() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("swagger.yml");
    std::fs::write(
        &path,
        "swagger: '2.0'\npaths:\n  /health:\n    get:\n      responses: {}\n",
    )
    .unwrap();
    let v = ContractValidator::new(OpenApiSpec::from_path(&path).unwrap());
    assert_eq!(v.get_endpoint_paths(), vec!["/health"]);
    assert!(v.get_schema_names().is_empty());
}

// =========================================================================
// Endpoint and definition lookups
// =========================================================================

#[test]
fn existing_endpoint_and_method() {
    let v = petstore();
    let r = v.validate_endpoint_exists("/pet", "post");
    assert!(r.valid);
    assert!(r.errors.is_empty());
    assert!(r.warnings.is_empty());
}

#[test]
fn missing_endpoint_names_path() {
    let v = petstore();
    let r = v.validate_endpoint_exists_get("/missing");
    assert!(!r.valid);
    assert_eq!(r.errors, vec!["Endpoint '/missing' not found"]);
}

#[test]
fn missing_method_is_upper_cased() {
    let v = petstore();
    let r = v.validate_endpoint_exists("/pet", "patch");
    assert!(!r.valid);
    assert_eq!(r.errors.len(), 1);
    assert!(r.errors[0].contains("'PATCH'"), "{}", r.errors[0]);
    assert!(r.errors[0].contains("'/pet'"), "{}", r.errors[0]);
}

#[test]
fn endpoint_paths_in_document_order() {
    let v = petstore();
    assert_eq!(
        v.get_endpoint_paths(),
        vec![
            "/pet",
            "/pet/findByStatus",
            "/pet/{petId}",
            "/store/inventory",
            "/store/order",
            "/store/order/{orderId}",
            "/user/{username}",
        ]
    );
}

#[test]
fn schema_names_in_document_order() {
    let v = petstore();
    assert_eq!(
        v.get_schema_names(),
        vec!["ApiResponse", "Category", "Pet", "Tag", "Order", "User"]
    );
    assert!(v.validate_schema_exists("Pet").valid);
    assert!(!v.validate_schema_exists("Dog").valid);
}

#[test]
fn get_schema_on_spec_without_definitions_is_fatal() {
    let spec = OpenApiSpec::from_value(json!({"swagger": "2.0", "paths": {}})).unwrap();
    let v = ContractValidator::new(spec);
    assert!(matches!(v.get_schema("Pet"), Err(ContractError::NoDefinitions)));
    assert!(petstore().get_schema("Dog").unwrap().is_none());
}

// =========================================================================
// Response validation
// =========================================================================

#[test]
fn complete_pet_is_valid() {
    let r = petstore().validate_response(&valid_pet(), "Pet");
    assert!(r.valid, "{}", format_validation_errors(&r));
    assert_eq!(format_validation_errors(&r), "");
}

#[test]
fn missing_required_field_strict_and_lenient() {
    let v = petstore();
    let mut pet = valid_pet();
    pet.as_object_mut().unwrap().remove("name");

    let strict = v.validate_response_against_schema(&pet, "Pet", ValidateOptions::default());
    assert!(!strict.valid);
    assert_eq!(strict.errors, vec!["Required field 'name' is missing from response"]);
    assert!(strict.warnings.is_empty());

    let lenient = v.validate_response_against_schema(&pet, "Pet", ValidateOptions::lenient());
    assert!(lenient.valid);
    assert!(lenient.errors.is_empty());
    assert_eq!(lenient.warnings, vec!["Required field 'name' is missing from response"]);
}

#[test]
fn type_mismatch_mentions_field_and_expected_type() {
    let mut pet = valid_pet();
    pet["id"] = json!("not-a-number");
    let r = petstore().validate_response(&pet, "Pet");
    assert!(!r.valid);
    assert_eq!(
        r.errors,
        vec!["Field 'id' has type 'string' but schema expects 'integer' (value: \"not-a-number\")"]
    );
}

#[test]
fn enum_violation_lists_allowed_values() {
    let mut pet = valid_pet();
    pet["status"] = json!("invalid-status");
    let r = petstore().validate_response(&pet, "Pet");
    assert_eq!(r.errors.len(), 1);
    assert!(r.errors[0].contains("'invalid-status'"));
    assert!(r.errors[0].ends_with("[available, pending, sold]"), "{}", r.errors[0]);
}

#[test]
fn array_item_ref_errors_are_prefixed() {
    let mut pet = valid_pet();
    pet["tags"] = json!([{"id": 1}]);
    let r = petstore().validate_response(&pet, "Pet");
    assert_eq!(r.errors.len(), 1);
    assert!(r.errors[0].starts_with("tags[0]:"), "{}", r.errors[0]);
    assert_eq!(r.errors[0], "tags[0]: Required field 'name' is missing from response");
}

#[test]
fn array_item_type_errors_name_index() {
    let mut pet = valid_pet();
    pet["photoUrls"] = json!(["ok", 42]);
    let r = petstore().validate_response(&pet, "Pet");
    assert_eq!(
        r.errors,
        vec!["photoUrls[1] has type 'integer' but schema expects 'string'"]
    );
}

#[test]
fn nested_ref_errors_are_not_prefixed() {
    let mut pet = valid_pet();
    pet["category"] = json!({"id": "one"});
    let r = petstore().validate_response(&pet, "Pet");
    assert_eq!(
        r.errors,
        vec!["Field 'id' has type 'string' but schema expects 'integer' (value: \"one\")"]
    );
}

#[test]
fn undeclared_properties_are_ignored() {
    let mut pet = valid_pet();
    pet["nickname"] = json!("rex");
    pet["owner"] = json!({"anything": [1, 2, 3]});
    assert!(petstore().validate_response(&pet, "Pet").valid);
}

#[test]
fn lenient_warnings_propagate_through_item_refs() {
    let mut pet = valid_pet();
    pet["tags"] = json!([{"name": "a"}, {"id": 2}]);
    let r = petstore().validate_response_against_schema(&pet, "Pet", ValidateOptions::lenient());
    assert!(r.valid);
    assert_eq!(
        r.warnings,
        vec!["tags[1]: Required field 'name' is missing from response"]
    );
}

#[test]
fn find_by_status_checks_each_element() {
    let v = petstore();
    let body = json!([valid_pet(), {"name": "cat", "photoUrls": [], "status": "lost"}]);
    let r = v.validate_operation_response("/pet/findByStatus", "GET", "200", &body);
    assert_eq!(r.errors.len(), 1);
    assert!(r.errors[0].starts_with("[1]: Field 'status'"), "{}", r.errors[0]);

    let r = v.validate_operation_response("/pet/findByStatus", "get", "200", &json!({}));
    assert_eq!(
        r.errors,
        vec!["Response has type 'object' but schema expects 'array'"]
    );
}

#[test]
fn report_formatting() {
    let mut pet = valid_pet();
    pet["id"] = json!(1.5);
    pet.as_object_mut().unwrap().remove("photoUrls");
    let r = petstore().validate_response(&pet, "Pet");
    let report = format_validation_errors(&r);
    assert!(report.starts_with("Validation errors:\n"), "{report}");
    assert_eq!(report.lines().count(), 3);
    assert!(report.contains("Required field 'photoUrls'"));
    assert!(report.contains("has type 'number'"));
}

#[test]
fn repeated_calls_are_identical() {
    let v = petstore();
    let mut pet = valid_pet();
    pet["tags"] = json!([{}, {"name": 3}]);
    let first = v.validate_response(&pet, "Pet");
    let second = v.validate_response(&pet, "Pet");
    assert_eq!(first, second);
    assert_eq!(v.spec(), petstore().spec());
}
