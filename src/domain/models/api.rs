#[cfg(test)]
#[path = "api_test.rs"]
mod tests;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use super::display_value;
use super::is_truthy;
use super::RequestPayload;

pub const FALLBACK_ERROR_MESSAGE: &str = "Something went wrong while generating the workout plan.";

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GenerateError {
    #[error("Unable to connect to the plan service at {url}. Make sure the backend server is running and reachable.")]
    Unreachable { url: String, reason: String },

    #[error("Unable to connect to the plan service at {url}. Make sure the backend server is running and reachable.")]
    MalformedResponse { url: String, reason: String },

    #[error("{detail}")]
    Server { status: u16, detail: String },

    #[error("{} (HTTP {status})", FALLBACK_ERROR_MESSAGE)]
    Rejected { status: u16 },
}

impl GenerateError {
    /// Classifies the body of a non-success response. The service reports
    /// failures as `{"detail": "..."}`, request validation failures as
    /// `{"field": ["message", ...]}`. Each field gets its own line.
    pub fn from_error_body(url: &str, status: u16, body: &str) -> GenerateError {
        let parsed = serde_json::from_str::<Value>(body);
        if let Err(err) = parsed {
            return GenerateError::MalformedResponse {
                url: url.to_string(),
                reason: format!("HTTP {status}: {err}"),
            };
        }

        if let Ok(Value::Object(map)) = parsed {
            if let Some(detail) = map.get("detail") {
                if is_truthy(detail) {
                    return GenerateError::Server {
                        status,
                        detail: display_value(detail),
                    };
                }
            }

            let field_errors = map
                .iter()
                .filter(|(key, _)| return key.as_str() != "detail")
                .map(|(key, value)| {
                    let messages = match value {
                        Value::Array(items) => items
                            .iter()
                            .map(display_value)
                            .collect::<Vec<String>>()
                            .join("; "),
                        _ => display_value(value),
                    };

                    return format!("{key}: {messages}");
                })
                .collect::<Vec<String>>();

            if !field_errors.is_empty() {
                return GenerateError::Server {
                    status,
                    detail: field_errors.join("\n"),
                };
            }
        }

        return GenerateError::Rejected { status };
    }

    pub fn is_connectivity(&self) -> bool {
        return matches!(
            self,
            GenerateError::Unreachable { .. } | GenerateError::MalformedResponse { .. }
        );
    }
}

#[async_trait]
pub trait PlanApi {
    /// Called at startup to let the user know early when the plan service can't
    /// be reached. Any HTTP response counts as reachable.
    async fn health_check(&self) -> Result<()>;

    /// Submits one payload and returns the raw JSON response on success.
    async fn generate(&self, payload: &RequestPayload) -> Result<Value, GenerateError>;
}

pub type PlanApiBox = Box<dyn PlanApi + Send + Sync>;
