use std::sync::Arc;

use super::{ParamValue, UrlGenerator, UrlGeneratorError};
use crate::collection::RouteCollection;
use crate::handler::{HandlerRequest, HandlerResponse, RequestHandler};

struct NullHandler;

impl RequestHandler for NullHandler {
    fn handle(&self, _req: HandlerRequest) -> HandlerResponse {
        HandlerResponse::default()
    }
}

fn generator_with(pattern: &str, name: &str) -> UrlGenerator {
    let mut collection = RouteCollection::new();
    collection.get(pattern, name, Arc::new(NullHandler), Vec::new());
    UrlGenerator::new(collection.build().unwrap())
}

#[test]
fn param_value_stringifies_plain_decimal() {
    assert_eq!(ParamValue::from(1).to_string(), "1");
    assert_eq!(ParamValue::from(-42).to_string(), "-42");
    assert_eq!(ParamValue::from(1_000_000i64).to_string(), "1000000");
    assert_eq!(ParamValue::from("sample").to_string(), "sample");
}

#[test]
fn unknown_route_error_message_names_the_route() {
    let generator = UrlGenerator::new(RouteCollection::new().build().unwrap());
    let err = generator.generate_path("user", &[], &[]).unwrap_err();
    assert!(matches!(err, UrlGeneratorError::UnknownRoute { .. }));
    assert_eq!(err.to_string(), "Missing route: \"user\"");
}

#[test]
fn missing_parameter_error_message_names_route_and_parameter() {
    let generator = generator_with("/user/{id:\\d+}", "user");
    let err = generator.generate_path("user", &[], &[]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Missing parameter \"id\" while path generation for route: \"user\""
    );
}

#[test]
fn invalid_parameter_error_message_carries_value_and_constraint() {
    let generator = generator_with("/user/{id:\\d+}", "user");
    let err = generator
        .generate_path("user", &[("id", "abc".into())], &[])
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Parameter \"id\" with value \"abc\" does not match \"\\d+\""
    );
}

#[test]
fn default_constraint_appears_in_invalid_value_errors() {
    let generator = generator_with("/user/{name}", "user");
    let err = generator
        .generate_path("user", &[("name", "a/b".into())], &[])
        .unwrap_err();
    match err {
        UrlGeneratorError::InvalidParameterValue { constraint, .. } => {
            assert_eq!(constraint, "[^/]+");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn bad_pattern_surfaces_as_pattern_error_on_first_use() {
    let generator = generator_with("/user/{id", "user");
    let err = generator.generate_path("user", &[], &[]).unwrap_err();
    assert!(matches!(err, UrlGeneratorError::Pattern(_)));
}

#[test]
fn query_pairs_are_percent_encoded() {
    let generator = generator_with("/search", "search");
    let path = generator
        .generate_path("search", &[("q", "a b&c".into())], &[])
        .unwrap();
    assert_eq!(path, "/search?q=a%20b%26c");
}
