use super::RequestPayload;

pub enum Action {
    CopyToClipboard(String),
    GeneratePlan(RequestPayload),
    HealthCheck(),
}
