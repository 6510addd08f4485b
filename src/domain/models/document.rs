#[cfg(test)]
#[path = "document_test.rs"]
mod tests;

use serde_json::Map;
use serde_json::Value;

use super::JsonNode;

pub const PLAN_KEYS: [&str; 5] = ["goal", "days_per_week", "session_minutes", "split", "days"];
pub const DOCUMENT_KEYS: [&str; 5] = ["request_id", "warnings", "issues", "plan", "audit"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Warning,
    Issue,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ImageRef {
    Remote(String),
    Unavailable(String),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExerciseView {
    pub title: Option<String>,
    pub image: Option<ImageRef>,
    pub exercise_id: Option<String>,
    pub sets: Option<String>,
    pub reps: Option<String>,
    pub rest_sec: Option<String>,
    pub muscle_groups: Vec<String>,
    pub notes: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExerciseEntry {
    Structured(ExerciseView),
    Generic(JsonNode),
}

#[derive(Clone, Debug, PartialEq)]
pub struct DayView {
    pub label: String,
    pub exercises: Vec<ExerciseEntry>,
    /// Set when the day itself is not an object.
    pub body: Option<JsonNode>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct StructuredPlan {
    pub goal: Option<String>,
    pub days_per_week: Option<String>,
    pub session_minutes: Option<String>,
    pub split: Option<String>,
    pub days: Vec<DayView>,
    pub other_fields: Option<JsonNode>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum PlanView {
    Text(String),
    Structured(StructuredPlan),
    Preformatted(String),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Region {
    RequestId(String),
    Notices(NoticeLevel, Vec<String>),
    Plan(PlanView),
    Audit(JsonNode),
    ExtraFields(JsonNode),
    Generic(JsonNode),
    RawJson(String),
}

/// A server response broken down into the regions shown to the user. Building a
/// document never fails, fields with an unexpected shape fall back to a generic
/// display and the raw response is always the last region.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    pub regions: Vec<Region>,
}

/// Mirrors how the service's own web client decides whether a field is worth
/// showing: `null`, `false`, `0` and `""` are all treated as absent.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => return false,
        Value::Bool(flag) => return *flag,
        Value::Number(num) => return num.as_f64().map(|e| return e != 0.0).unwrap_or(true),
        Value::String(text) => return !text.is_empty(),
        Value::Array(_) | Value::Object(_) => return true,
    }
}

pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => return text.to_string(),
        _ => return value.to_string(),
    }
}

pub fn pretty_json(value: &Value) -> String {
    return serde_json::to_string_pretty(value).unwrap_or_else(|_| return value.to_string());
}

/// Warnings and issues come back either as plain strings or as error objects.
pub fn notice_text(value: &Value) -> String {
    if let Value::Object(map) = value {
        for key in ["detail", "message"] {
            if let Some(field) = map.get(key) {
                if is_truthy(field) {
                    return display_value(field);
                }
            }
        }

        return value.to_string();
    }

    return display_value(value);
}

fn truthy_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    if let Some(value) = map.get(key) {
        if is_truthy(value) {
            return Some(display_value(value));
        }
    }

    return None;
}

fn present_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    if let Some(value) = map.get(key) {
        if !value.is_null() {
            return Some(display_value(value));
        }
    }

    return None;
}

fn image_ref(map: &Map<String, Value>) -> Option<ImageRef> {
    let raw = truthy_field(map, "image_url")?;
    if let Ok(parsed) = url::Url::parse(raw.trim()) {
        if ["http", "https"].contains(&parsed.scheme()) {
            return Some(ImageRef::Remote(raw.trim().to_string()));
        }
    }

    return Some(ImageRef::Unavailable(raw));
}

fn muscle_groups(map: &Map<String, Value>) -> Vec<String> {
    match map.get("muscle_groups") {
        Some(Value::Array(groups)) => {
            return groups.iter().map(display_value).collect();
        }
        Some(value) if is_truthy(value) => return vec![display_value(value)],
        _ => return vec![],
    }
}

fn exercise_entry(value: &Value) -> ExerciseEntry {
    if let Value::Object(map) = value {
        return ExerciseEntry::Structured(ExerciseView {
            title: truthy_field(map, "title"),
            image: image_ref(map),
            exercise_id: present_field(map, "exercise_id"),
            sets: present_field(map, "sets"),
            reps: present_field(map, "reps"),
            rest_sec: present_field(map, "rest_sec"),
            muscle_groups: muscle_groups(map),
            notes: truthy_field(map, "notes"),
        });
    }

    return ExerciseEntry::Generic(JsonNode::from_value(value));
}

fn day_view(idx: usize, value: &Value) -> DayView {
    let fallback_label = format!("Day {}", idx + 1);

    if let Value::Object(map) = value {
        let mut exercises = vec![];
        if let Some(Value::Array(items)) = map.get("exercises") {
            exercises = items.iter().map(exercise_entry).collect();
        }

        return DayView {
            label: truthy_field(map, "day").unwrap_or(fallback_label),
            exercises,
            body: None,
        };
    }

    return DayView {
        label: fallback_label,
        exercises: vec![],
        body: Some(JsonNode::from_value(value)),
    };
}

fn unrecognised_fields(map: &Map<String, Value>, known: &[&str]) -> Option<JsonNode> {
    let extra = map
        .iter()
        .filter(|(key, _)| return !known.contains(&key.as_str()))
        .map(|(key, value)| return (key.to_string(), value.clone()))
        .collect::<Map<String, Value>>();

    if extra.is_empty() {
        return None;
    }

    return Some(JsonNode::from_value(&Value::Object(extra)));
}

impl StructuredPlan {
    pub fn from_map(map: &Map<String, Value>) -> StructuredPlan {
        let mut days = vec![];
        if let Some(Value::Array(items)) = map.get("days") {
            days = items
                .iter()
                .enumerate()
                .map(|(idx, day)| return day_view(idx, day))
                .collect();
        }

        return StructuredPlan {
            goal: truthy_field(map, "goal"),
            days_per_week: truthy_field(map, "days_per_week"),
            session_minutes: truthy_field(map, "session_minutes"),
            split: truthy_field(map, "split"),
            days,
            other_fields: unrecognised_fields(map, &PLAN_KEYS),
        };
    }
}

impl PlanView {
    pub fn from_value(value: &Value) -> PlanView {
        match value {
            Value::String(text) => return PlanView::Text(text.to_string()),
            Value::Object(map) => return PlanView::Structured(StructuredPlan::from_map(map)),
            _ => return PlanView::Preformatted(pretty_json(value)),
        }
    }
}

fn notices(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => return items.iter().map(notice_text).collect(),
        _ if is_truthy(value) => return vec![notice_text(value)],
        _ => return vec![],
    }
}

impl Document {
    pub fn from_value(value: &Value) -> Document {
        let mut regions = vec![];

        if let Value::Object(map) = value {
            if let Some(request_id) = truthy_field(map, "request_id") {
                regions.push(Region::RequestId(request_id));
            }

            for (key, level) in [
                ("warnings", NoticeLevel::Warning),
                ("issues", NoticeLevel::Issue),
            ] {
                if let Some(field) = map.get(key) {
                    let items = notices(field);
                    if !items.is_empty() {
                        regions.push(Region::Notices(level, items));
                    }
                }
            }

            if let Some(plan) = map.get("plan") {
                if is_truthy(plan) {
                    regions.push(Region::Plan(PlanView::from_value(plan)));
                }
            }

            if let Some(audit) = map.get("audit") {
                if is_truthy(audit) {
                    regions.push(Region::Audit(JsonNode::from_value(audit)));
                }
            }

            if let Some(extra) = unrecognised_fields(map, &DOCUMENT_KEYS) {
                regions.push(Region::ExtraFields(extra));
            }
        } else {
            regions.push(Region::Generic(JsonNode::from_value(value)));
        }

        regions.push(Region::RawJson(pretty_json(value)));

        return Document { regions };
    }

    #[cfg(test)]
    pub fn plan(&self) -> Option<&PlanView> {
        return self.regions.iter().find_map(|region| {
            if let Region::Plan(plan) = region {
                return Some(plan);
            }
            return None;
        });
    }
}
