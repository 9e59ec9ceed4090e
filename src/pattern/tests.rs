use super::{compile, parse, PatternError, Token};

fn literal(text: &str) -> Token {
    Token::Literal(text.to_string())
}

fn placeholder(name: &str, constraint: Option<&str>) -> Token {
    Token::Placeholder {
        name: name.to_string(),
        constraint: constraint.map(str::to_string),
    }
}

#[test]
fn parses_plain_literal() {
    let tokens = parse("/hello").unwrap();
    assert_eq!(tokens, vec![literal("/hello")]);
}

#[test]
fn parses_placeholder_without_constraint() {
    let tokens = parse("/hello/{name}").unwrap();
    assert_eq!(tokens, vec![literal("/hello/"), placeholder("name", None)]);
}

#[test]
fn parses_placeholder_with_constraint() {
    let tokens = parse("/users/{id:\\d+}").unwrap();
    assert_eq!(
        tokens,
        vec![literal("/users/"), placeholder("id", Some("\\d+"))]
    );
}

#[test]
fn parses_constraint_with_braced_repetition() {
    let tokens = parse("/year/{year:\\d{4}}").unwrap();
    assert_eq!(
        tokens,
        vec![literal("/year/"), placeholder("year", Some("\\d{4}"))]
    );
}

#[test]
fn parses_optional_group() {
    let tokens = parse("/user/{id:\\d+}[/{name}]").unwrap();
    assert_eq!(
        tokens,
        vec![
            literal("/user/"),
            placeholder("id", Some("\\d+")),
            Token::Optional(vec![literal("/"), placeholder("name", None)]),
        ]
    );
}

#[test]
fn parses_nested_optional_groups() {
    let tokens = parse("/archive[/{year:\\d{4}}[/{month:\\d{2}}]]").unwrap();
    assert_eq!(
        tokens,
        vec![
            literal("/archive"),
            Token::Optional(vec![
                literal("/"),
                placeholder("year", Some("\\d{4}")),
                Token::Optional(vec![literal("/"), placeholder("month", Some("\\d{2}"))]),
            ]),
        ]
    );
}

#[test]
fn parse_is_deterministic() {
    let pattern = "/user/{id:\\d+}[/{name}[/{extra}]]";
    assert_eq!(parse(pattern).unwrap(), parse(pattern).unwrap());
}

#[test]
fn rejects_unclosed_optional_group() {
    assert!(matches!(
        parse("/user[/{id}"),
        Err(PatternError::UnbalancedOptional { .. })
    ));
}

#[test]
fn rejects_stray_closing_bracket() {
    assert!(matches!(
        parse("/user/{id}]"),
        Err(PatternError::UnbalancedOptional { .. })
    ));
}

#[test]
fn rejects_empty_optional_group() {
    assert!(matches!(
        parse("/user[]"),
        Err(PatternError::EmptyOptional { .. })
    ));
}

#[test]
fn rejects_unterminated_placeholder() {
    assert!(matches!(
        parse("/user/{id"),
        Err(PatternError::MalformedPlaceholder { .. })
    ));
}

#[test]
fn rejects_placeholder_without_name() {
    assert!(matches!(
        parse("/user/{}"),
        Err(PatternError::MalformedPlaceholder { .. })
    ));
    assert!(matches!(
        parse("/user/{:\\d+}"),
        Err(PatternError::MalformedPlaceholder { .. })
    ));
}

#[test]
fn rejects_placeholder_with_empty_constraint() {
    assert!(matches!(
        parse("/user/{id:}"),
        Err(PatternError::MalformedPlaceholder { .. })
    ));
}

#[test]
fn rejects_name_starting_with_digit() {
    assert!(matches!(
        parse("/user/{1id}"),
        Err(PatternError::MalformedPlaceholder { .. })
    ));
}

#[test]
fn rejects_duplicate_placeholder_names() {
    let err = parse("/user/{id}/friend/{id}").unwrap_err();
    match err {
        PatternError::DuplicatePlaceholder { name, .. } => assert_eq!(name, "id"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn rejects_duplicate_name_inside_optional_group() {
    assert!(matches!(
        parse("/user/{id}[/{id}]"),
        Err(PatternError::DuplicatePlaceholder { .. })
    ));
}

#[test]
fn compiles_to_anchored_regex() {
    let compiled = compile("/hello/{name:[a-z]+}").unwrap();
    assert!(compiled.regex().is_match("/hello/test"));
    assert!(!compiled.regex().is_match("/hello/TEST"));
    assert!(!compiled.regex().is_match("/hello/test/more"));
    assert!(!compiled.regex().is_match("prefix/hello/test"));
    assert_eq!(compiled.placeholders(), ["name"]);
}

#[test]
fn compiled_regex_escapes_literal_metacharacters() {
    let compiled = compile("/v1.0/items").unwrap();
    assert!(compiled.regex().is_match("/v1.0/items"));
    assert!(!compiled.regex().is_match("/v1x0/items"));
}

#[test]
fn compiled_optional_group_matches_both_forms() {
    let compiled = compile("/user/{id:\\d+}[/{name}]").unwrap();
    let caps = compiled.regex().captures("/user/1").unwrap();
    assert_eq!(caps.name("id").unwrap().as_str(), "1");
    assert!(caps.name("name").is_none());

    let caps = compiled.regex().captures("/user/1/sample").unwrap();
    assert_eq!(caps.name("id").unwrap().as_str(), "1");
    assert_eq!(caps.name("name").unwrap().as_str(), "sample");
}

#[test]
fn compiled_default_constraint_rejects_slash() {
    let compiled = compile("/hello/{name}").unwrap();
    assert!(compiled.regex().is_match("/hello/test"));
    assert!(!compiled.regex().is_match("/hello/test/extra"));
    assert!(!compiled.regex().is_match("/hello/"));
}

#[test]
fn compiled_exposes_anchored_constraints() {
    let compiled = compile("/user/{id:\\d+}").unwrap();
    let constraint = compiled.constraint("id").unwrap();
    assert!(constraint.is_match("123"));
    assert!(!constraint.is_match("123abc"));
    assert!(!constraint.is_match("abc"));
}

#[test]
fn compile_rejects_invalid_constraint_regex() {
    let err = compile("/user/{id:[}").unwrap_err();
    match err {
        PatternError::InvalidConstraint { name, .. } => assert_eq!(name, "id"),
        other => panic!("unexpected error: {other:?}"),
    }
}
