#[cfg(test)]
#[path = "payload_test.rs"]
mod tests;

use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::Experience;
use super::FormState;
use super::Measurement;
use super::Sex;
use super::ValidationError;
use super::Weekday;
use super::DAYS_PER_WEEK_MAX;
use super::DAYS_PER_WEEK_MIN;
use super::SESSION_MINUTES_MAX;
use super::SESSION_MINUTES_MIN;

/// The JSON body sent to the plan generation endpoint. Optional keys are left out
/// entirely when unset, the service treats a missing key and `null` differently.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RequestPayload {
    pub goal_text: String,
    pub days_per_week: u8,
    pub session_minutes: u16,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sex: Option<Sex>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience: Option<Experience>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equipment: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waist: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hip: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chest: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub training_days: Option<Vec<Weekday>>,
}

/// Blank, unparseable and non-finite input all count as "not provided".
pub fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(num) = trimmed.parse::<f64>() {
        if num.is_finite() {
            return Some(num);
        }
    }

    return None;
}

fn measurement(form: &FormState, field: Measurement) -> Result<Option<f64>, ValidationError> {
    let text = form.measurement(field);
    if let Some(num) = parse_number(text) {
        if num < 0.0 {
            return Err(ValidationError::Negative {
                field: field.key(),
                value: text.trim().to_string(),
            });
        }

        return Ok(Some(num));
    }

    return Ok(None);
}

fn check_range(field: &'static str, value: i64, min: i64, max: i64) -> Result<(), ValidationError> {
    if value < min || value > max {
        return Err(ValidationError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }

    return Ok(());
}

impl RequestPayload {
    /// Snapshots the form into a payload. This is the single place where the form
    /// is validated, nothing is sent when it fails.
    pub fn build(form: &FormState) -> Result<RequestPayload, ValidationError> {
        let goal_text = form.goal_text.trim().to_string();
        if goal_text.is_empty() {
            return Err(ValidationError::EmptyGoal);
        }

        check_range(
            "days_per_week",
            form.days_per_week.into(),
            DAYS_PER_WEEK_MIN.into(),
            DAYS_PER_WEEK_MAX.into(),
        )?;
        check_range(
            "session_minutes",
            form.session_minutes.into(),
            SESSION_MINUTES_MIN.into(),
            SESSION_MINUTES_MAX.into(),
        )?;

        let training_days = form.training_days();
        if !training_days.is_empty() && training_days.len() != form.days_per_week as usize {
            return Err(ValidationError::TrainingDaysMismatch {
                selected: training_days.len(),
                days_per_week: form.days_per_week,
            });
        }

        let mut equipment = None;
        if !form.equipment.trim().is_empty() {
            equipment = Some(form.equipment.trim().to_string());
        }

        let mut payload = RequestPayload {
            goal_text,
            days_per_week: form.days_per_week,
            session_minutes: form.session_minutes,
            sex: form.sex,
            experience: form.experience,
            equipment,
            height: measurement(form, Measurement::Height)?,
            weight: measurement(form, Measurement::Weight)?,
            waist: measurement(form, Measurement::Waist)?,
            hip: measurement(form, Measurement::Hip)?,
            chest: measurement(form, Measurement::Chest)?,
            seed: parse_number(&form.seed).map(|num| return num.trunc() as i64),
            training_days: None,
        };

        if !training_days.is_empty() {
            payload.training_days = Some(training_days.to_vec());
        }

        return Ok(payload);
    }
}
