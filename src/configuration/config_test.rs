use anyhow::Result;

use super::validate;
use super::Config;
use super::ConfigKey;
use crate::application::cli;

#[test]
fn it_serializes_to_valid_toml() {
    let res = Config::serialize_default(cli::build());
    let toml_res = res.parse::<toml_edit::Document>();
    assert!(toml_res.is_ok());

    insta::assert_snapshot!(res, @r###"
    # Time to wait in milliseconds before timing out when doing a health check against the plan service.
    api-health-check-timeout = 1000

    # Base URL of the plan service.
    api-url = "http://localhost:8000"

    # Path of the plan generation endpoint, relative to api-url.
    endpoint = "/api/backend/plan/generate-agent/"
    "###);
}

#[test]
fn it_validates_api_urls() {
    assert!(validate(ConfigKey::ApiURL, "http://localhost:8000").is_ok());
    assert!(validate(ConfigKey::ApiURL, "https://plans.example.com/base").is_ok());
    assert!(validate(ConfigKey::ApiURL, "localhost:8000").is_err());
    assert!(validate(ConfigKey::ApiURL, "ftp://example.com").is_err());
    assert!(validate(ConfigKey::ApiHealthCheckTimeout, "soon").is_err());
}

#[tokio::test]
async fn it_loads_config_from_file() -> Result<()> {
    let matches =
        cli::build().try_get_matches_from(vec!["liftplan", "-c", "./config.example.toml"])?;
    Config::load(vec![&matches]).await?;
    return Ok(());
}

#[tokio::test]
async fn it_fails_to_loads_config_from_file() -> Result<()> {
    let matches =
        cli::build().try_get_matches_from(vec!["liftplan", "-c", "./test/bad-config.toml"])?;
    let res = Config::load(vec![&matches]).await;
    assert!(res.is_err());
    return Ok(());
}
