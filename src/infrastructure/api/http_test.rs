use anyhow::bail;
use anyhow::Result;
use mockito::Matcher;
use serde_json::json;
use serde_json::Value;
use test_utils::plan_response_fixture;

use super::HttpPlanApi;
use crate::domain::models::FormState;
use crate::domain::models::GenerateError;
use crate::domain::models::PlanApi;
use crate::domain::models::RequestPayload;
use crate::domain::models::Weekday;

const ENDPOINT: &str = "/api/backend/plan/generate-agent/";

impl HttpPlanApi {
    fn with_url(url: String) -> HttpPlanApi {
        return HttpPlanApi {
            url,
            endpoint: ENDPOINT.to_string(),
            timeout: 200,
        };
    }
}

fn payload() -> Result<RequestPayload> {
    let mut form = FormState::default();
    form.goal_text = "Tăng cơ".to_string();
    form.set_days_per_week(3);
    form.select_training_days(&[Weekday::Mon, Weekday::Wed, Weekday::Fri]);
    form.height = "180".to_string();

    return Ok(RequestPayload::build(&form)?);
}

#[test]
fn it_joins_url_and_endpoint() {
    let api = HttpPlanApi {
        url: "http://localhost:8000/".to_string(),
        endpoint: "api/plan/".to_string(),
        timeout: 200,
    };

    assert_eq!(api.generate_url(), "http://localhost:8000/api/plan/");
}

#[tokio::test]
async fn it_successfully_health_checks() {
    let mut server = mockito::Server::new_async().await;
    let mock = server.mock("GET", "/").with_status(200).create_async().await;

    let api = HttpPlanApi::with_url(server.url());
    let res = api.health_check().await;

    assert!(res.is_ok());
    mock.assert_async().await;
}

#[tokio::test]
async fn it_treats_any_status_as_reachable() {
    let mut server = mockito::Server::new_async().await;
    let mock = server.mock("GET", "/").with_status(404).create_async().await;

    let api = HttpPlanApi::with_url(server.url());
    let res = api.health_check().await;

    assert!(res.is_ok());
    mock.assert_async().await;
}

#[tokio::test]
async fn it_fails_health_checks_when_nothing_listens() {
    let api = HttpPlanApi::with_url("http://127.0.0.1:1".to_string());
    let res = api.health_check().await;

    assert_eq!(
        res.unwrap_err().to_string(),
        "Unable to connect to the plan service at http://127.0.0.1:1. Make sure the backend server is running and reachable."
    );
}

#[tokio::test]
async fn it_posts_the_payload() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", ENDPOINT)
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "goal_text": "Tăng cơ",
            "days_per_week": 3,
            "session_minutes": 60,
            "height": 180.0,
            "training_days": ["mon", "wed", "fri"],
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(plan_response_fixture())
        .create_async()
        .await;

    let api = HttpPlanApi::with_url(server.url());
    let res = api.generate(&payload()?).await?;

    let expected: Value = serde_json::from_str(plan_response_fixture())?;
    assert_eq!(res, expected);
    mock.assert_async().await;

    return Ok(());
}

#[tokio::test]
async fn it_surfaces_server_detail() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", ENDPOINT)
        .with_status(500)
        .with_body(r#"{"detail": "Planner crashed"}"#)
        .create_async()
        .await;

    let api = HttpPlanApi::with_url(server.url());
    let res = api.generate(&payload()?).await;

    assert_eq!(
        res,
        Err(GenerateError::Server {
            status: 500,
            detail: "Planner crashed".to_string(),
        })
    );
    mock.assert_async().await;

    return Ok(());
}

#[tokio::test]
async fn it_surfaces_field_errors() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", ENDPOINT)
        .with_status(400)
        .with_body(r#"{"training_days": ["Selected days (2) must equal days_per_week (3)."]}"#)
        .create_async()
        .await;

    let api = HttpPlanApi::with_url(server.url());
    let err = match api.generate(&payload()?).await {
        Ok(_) => bail!("expected an error"),
        Err(err) => err,
    };

    insta::assert_snapshot!(err.to_string(), @"training_days: Selected days (2) must equal days_per_week (3).");
    mock.assert_async().await;

    return Ok(());
}

#[tokio::test]
async fn it_falls_back_to_a_generic_message() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", ENDPOINT)
        .with_status(503)
        .with_body("{}")
        .create_async()
        .await;

    let api = HttpPlanApi::with_url(server.url());
    let res = api.generate(&payload()?).await;

    assert_eq!(res, Err(GenerateError::Rejected { status: 503 }));
    mock.assert_async().await;

    return Ok(());
}

#[tokio::test]
async fn it_treats_html_error_pages_as_connectivity_failures() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", ENDPOINT)
        .with_status(502)
        .with_body("<html><body>Bad Gateway</body></html>")
        .create_async()
        .await;

    let api = HttpPlanApi::with_url(server.url());
    let err = match api.generate(&payload()?).await {
        Ok(_) => bail!("expected an error"),
        Err(err) => err,
    };

    assert!(err.is_connectivity());
    assert!(err.to_string().contains(&server.url()));
    mock.assert_async().await;

    return Ok(());
}

#[tokio::test]
async fn it_rejects_unparseable_success_bodies() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", ENDPOINT)
        .with_status(200)
        .with_body("not json")
        .create_async()
        .await;

    let api = HttpPlanApi::with_url(server.url());
    let res = api.generate(&payload()?).await;

    assert!(matches!(res, Err(GenerateError::MalformedResponse { .. })));
    mock.assert_async().await;

    return Ok(());
}

#[tokio::test]
async fn it_reports_unreachable_services() -> Result<()> {
    let api = HttpPlanApi::with_url("http://127.0.0.1:1".to_string());
    let res = api.generate(&payload()?).await;

    match res {
        Err(GenerateError::Unreachable { url, .. }) => {
            assert_eq!(url, "http://127.0.0.1:1/api/backend/plan/generate-agent/");
        }
        _ => bail!("expected an unreachable error"),
    }

    return Ok(());
}
