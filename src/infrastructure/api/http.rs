#[cfg(test)]
#[path = "http_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::GenerateError;
use crate::domain::models::PlanApi;
use crate::domain::models::RequestPayload;

/// Plan service client. One POST per submission with no retries or timeout,
/// generation can legitimately take a long time.
pub struct HttpPlanApi {
    url: String,
    endpoint: String,
    timeout: u64,
}

impl HttpPlanApi {
    pub fn from_config() -> Result<HttpPlanApi> {
        return Ok(HttpPlanApi {
            url: Config::get(ConfigKey::ApiURL),
            endpoint: Config::get(ConfigKey::Endpoint),
            timeout: Config::get(ConfigKey::ApiHealthCheckTimeout).parse::<u64>()?,
        });
    }

    pub fn generate_url(&self) -> String {
        let endpoint = self.endpoint.trim_start_matches('/');
        return format!("{}/{endpoint}", self.url.trim_end_matches('/'));
    }
}

#[async_trait]
impl PlanApi for HttpPlanApi {
    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        let res = reqwest::Client::new()
            .get(&self.url)
            .timeout(Duration::from_millis(self.timeout))
            .send()
            .await;

        // Any response at all means something is listening.
        if let Err(err) = res {
            tracing::error!(error = ?err, url = self.url, "plan service is not reachable");
            bail!(
                "Unable to connect to the plan service at {}. Make sure the backend server is running and reachable.",
                self.url
            );
        }

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn generate(&self, payload: &RequestPayload) -> Result<Value, GenerateError> {
        let url = self.generate_url();
        tracing::debug!(url, payload = ?payload, "requesting plan");

        let res = reqwest::Client::new()
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(|err| {
                return GenerateError::Unreachable {
                    url: url.to_string(),
                    reason: err.to_string(),
                };
            })?;

        let status = res.status();
        let body = res.text().await.map_err(|err| {
            return GenerateError::MalformedResponse {
                url: url.to_string(),
                reason: err.to_string(),
            };
        })?;

        if !status.is_success() {
            tracing::error!(status = status.as_u16(), body, "plan request rejected");
            return Err(GenerateError::from_error_body(&url, status.as_u16(), &body));
        }

        let value = serde_json::from_str::<Value>(&body).map_err(|err| {
            return GenerateError::MalformedResponse {
                url: url.to_string(),
                reason: err.to_string(),
            };
        })?;

        tracing::debug!(status = status.as_u16(), "plan generated");
        return Ok(value);
    }
}
