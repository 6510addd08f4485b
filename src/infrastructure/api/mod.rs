pub mod http;

use anyhow::Result;

use crate::domain::models::PlanApiBox;

pub struct ApiManager {}

impl ApiManager {
    pub fn get() -> Result<PlanApiBox> {
        return Ok(Box::new(http::HttpPlanApi::from_config()?));
    }
}
