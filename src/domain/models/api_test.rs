use super::GenerateError;

const URL: &str = "http://localhost:8000/api/backend/plan/generate-agent/";

#[test]
fn it_surfaces_detail_verbatim() {
    let err = GenerateError::from_error_body(URL, 500, r#"{"detail": "LLM quota exceeded"}"#);
    assert_eq!(
        err,
        GenerateError::Server {
            status: 500,
            detail: "LLM quota exceeded".to_string(),
        }
    );
    assert_eq!(err.to_string(), "LLM quota exceeded");
    assert!(!err.is_connectivity());
}

#[test]
fn it_joins_field_errors() {
    let err = GenerateError::from_error_body(
        URL,
        400,
        r#"{"training_days": ["Selected days (2) must equal days_per_week (3)."], "seed": "A valid integer is required."}"#,
    );

    insta::assert_snapshot!(err.to_string(), @r###"
    training_days: Selected days (2) must equal days_per_week (3).
    seed: A valid integer is required.
    "###);
}

#[test]
fn it_falls_back_without_detail() {
    let err = GenerateError::from_error_body(URL, 502, "[]");
    assert_eq!(err, GenerateError::Rejected { status: 502 });
    assert_eq!(
        err.to_string(),
        "Something went wrong while generating the workout plan. (HTTP 502)"
    );

    let err = GenerateError::from_error_body(URL, 500, "{}");
    assert_eq!(err, GenerateError::Rejected { status: 500 });
}

#[test]
fn it_treats_unparseable_bodies_as_connectivity_failures() {
    let err = GenerateError::from_error_body(URL, 502, "<html>Bad Gateway</html>");
    assert!(err.is_connectivity());
    assert_eq!(
        err.to_string(),
        format!("Unable to connect to the plan service at {URL}. Make sure the backend server is running and reachable.")
    );
}

#[test]
fn it_ignores_empty_details() {
    let err = GenerateError::from_error_body(URL, 500, r#"{"detail": ""}"#);
    assert_eq!(err, GenerateError::Rejected { status: 500 });

    let err = GenerateError::from_error_body(URL, 500, r#"{"detail": null}"#);
    assert_eq!(err, GenerateError::Rejected { status: 500 });
    assert_eq!(
        err.to_string(),
        "Something went wrong while generating the workout plan. (HTTP 500)"
    );
}

#[test]
fn it_joins_messages_for_one_field() {
    let err = GenerateError::from_error_body(
        URL,
        400,
        r#"{"detail": null, "height": ["Ensure this value is greater than or equal to 0.", "Not a number."]}"#,
    );

    assert_eq!(
        err.to_string(),
        "height: Ensure this value is greater than or equal to 0.; Not a number."
    );
}
