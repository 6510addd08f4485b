use anyhow::Result;
use serde_json::json;
use serde_json::Value;
use test_utils::plan_response_fixture;

use super::is_truthy;
use super::notice_text;
use super::Document;
use super::ExerciseEntry;
use super::ImageRef;
use super::NoticeLevel;
use super::PlanView;
use super::Region;
use crate::domain::models::JsonNode;

fn fixture() -> Result<Value> {
    return Ok(serde_json::from_str(plan_response_fixture())?);
}

fn structured(doc: &Document) -> &super::StructuredPlan {
    match doc.plan() {
        Some(PlanView::Structured(plan)) => return plan,
        _ => panic!("Expected a structured plan"),
    }
}

#[test]
fn it_orders_regions() -> Result<()> {
    let doc = Document::from_value(&fixture()?);
    let kinds = doc
        .regions
        .iter()
        .map(|region| {
            return match region {
                Region::RequestId(_) => "request_id",
                Region::Notices(NoticeLevel::Warning, _) => "warnings",
                Region::Notices(NoticeLevel::Issue, _) => "issues",
                Region::Plan(_) => "plan",
                Region::Audit(_) => "audit",
                Region::ExtraFields(_) => "extra",
                Region::Generic(_) => "generic",
                Region::RawJson(_) => "raw",
            };
        })
        .collect::<Vec<_>>();

    // Empty issues are not shown.
    assert_eq!(kinds, vec!["request_id", "warnings", "plan", "audit", "raw"]);

    return Ok(());
}

#[test]
fn it_reads_the_structured_plan() -> Result<()> {
    let doc = Document::from_value(&fixture()?);
    let plan = structured(&doc);

    assert_eq!(plan.goal.as_deref(), Some("hypertrophy"));
    assert_eq!(plan.days_per_week.as_deref(), Some("2"));
    assert_eq!(plan.session_minutes.as_deref(), Some("60"));
    assert_eq!(plan.split.as_deref(), Some("upper_lower"));
    assert_eq!(plan.days.len(), 2);
    assert_eq!(plan.days[0].label, "mon");
    assert_eq!(plan.days[0].exercises.len(), 2);
    assert_eq!(
        plan.other_fields.as_ref().map(|node| return node.keys()),
        Some(vec!["progression", "deload_week"])
    );

    match &plan.days[0].exercises[0] {
        ExerciseEntry::Structured(exercise) => {
            assert_eq!(exercise.title.as_deref(), Some("Barbell Bench Press"));
            assert_eq!(exercise.exercise_id.as_deref(), Some("101"));
            assert_eq!(exercise.reps.as_deref(), Some("6-8"));
            assert_eq!(exercise.rest_sec.as_deref(), Some("120"));
            assert_eq!(exercise.muscle_groups, vec!["chest", "triceps"]);
            assert_eq!(
                exercise.image,
                Some(ImageRef::Remote(
                    "https://cdn.example.com/exercises/101.jpg".to_string()
                ))
            );
        }
        _ => panic!("Expected a structured exercise"),
    }

    match &plan.days[0].exercises[1] {
        ExerciseEntry::Structured(exercise) => {
            assert_eq!(exercise.notes, None);
            assert!(exercise.muscle_groups.is_empty());
            assert_eq!(
                exercise.image,
                Some(ImageRef::Unavailable("not a url".to_string()))
            );
        }
        _ => panic!("Expected a structured exercise"),
    }

    return Ok(());
}

#[test]
fn it_reads_notices_from_strings_and_objects() -> Result<()> {
    let doc = Document::from_value(&fixture()?);
    assert!(doc.regions.contains(&Region::Notices(
        NoticeLevel::Warning,
        vec!["Missing height data".to_string(), "Seed ignored".to_string()]
    )));

    return Ok(());
}

#[test]
fn it_picks_notice_text() {
    assert_eq!(notice_text(&json!("plain")), "plain");
    assert_eq!(notice_text(&json!({"detail": "d", "message": "m"})), "d");
    assert_eq!(notice_text(&json!({"detail": "", "message": "m"})), "m");
    assert_eq!(notice_text(&json!({"code": 1})), r#"{"code":1}"#);
    assert_eq!(notice_text(&json!(3)), "3");
    assert_eq!(notice_text(&json!(null)), "null");
}

#[test]
fn it_keeps_free_text_plans() {
    let doc = Document::from_value(&json!({"plan": "Free text plan"}));
    assert_eq!(
        doc.regions,
        vec![
            Region::Plan(PlanView::Text("Free text plan".to_string())),
            Region::RawJson("{\n  \"plan\": \"Free text plan\"\n}".to_string()),
        ]
    );
}

#[test]
fn it_preformats_other_plan_shapes() {
    let doc = Document::from_value(&json!({"plan": [1, 2]}));
    assert_eq!(
        doc.plan(),
        Some(&PlanView::Preformatted("[\n  1,\n  2\n]".to_string()))
    );
}

#[test]
fn it_tolerates_partial_plans() {
    let doc = Document::from_value(&json!({
        "plan": {
            "days": [
                "rest",
                {"exercises": "none"},
                {"day": "", "exercises": [7, {"title": null}]}
            ]
        }
    }));

    let plan = structured(&doc);
    assert_eq!(plan.goal, None);
    assert_eq!(plan.other_fields, None);
    assert_eq!(plan.days[0].label, "Day 1");
    assert_eq!(plan.days[0].body, Some(JsonNode::from_value(&json!("rest"))));
    assert!(plan.days[1].exercises.is_empty());
    assert_eq!(plan.days[2].label, "Day 3");
    assert_eq!(
        plan.days[2].exercises[0],
        ExerciseEntry::Generic(JsonNode::from_value(&json!(7)))
    );
    assert_eq!(
        plan.days[2].exercises[1],
        ExerciseEntry::Structured(Default::default())
    );
}

#[test]
fn it_collects_unrecognised_top_level_fields() {
    let doc = Document::from_value(&json!({"plan": "x", "model": "v2", "elapsed_ms": 812}));
    assert!(doc.regions.contains(&Region::ExtraFields(JsonNode::from_value(
        &json!({"model": "v2", "elapsed_ms": 812})
    ))));
}

#[test]
fn it_renders_non_object_documents_generically() {
    for value in [json!(null), json!("oops"), json!([]), json!(12)] {
        let doc = Document::from_value(&value);
        assert_eq!(doc.regions.len(), 2);
        assert_eq!(doc.regions[0], Region::Generic(JsonNode::from_value(&value)));
        assert!(matches!(doc.regions[1], Region::RawJson(_)));
    }
}

#[test]
fn it_always_ends_with_the_raw_response() {
    for value in [
        json!({}),
        json!({"plan": null, "warnings": null, "audit": 0}),
        json!({"warnings": "single warning"}),
    ] {
        let doc = Document::from_value(&value);
        assert!(matches!(doc.regions.last(), Some(Region::RawJson(_))));
    }
}

#[test]
fn it_treats_falsy_values_as_absent() {
    assert!(!is_truthy(&json!(null)));
    assert!(!is_truthy(&json!(false)));
    assert!(!is_truthy(&json!(0)));
    assert!(!is_truthy(&json!(0.0)));
    assert!(!is_truthy(&json!("")));
    assert!(is_truthy(&json!([])));
    assert!(is_truthy(&json!({})));
    assert!(is_truthy(&json!("0")));
}
