pub fn plan_response_fixture() -> &'static str {
    return r#"
{
  "request_id": "7f3c2a4e-91d1-4b7a-9d55-2f0c8e1a6b10",
  "plan": {
    "goal": "hypertrophy",
    "days_per_week": 2,
    "session_minutes": 60,
    "split": "upper_lower",
    "days": [
      {
        "day": "mon",
        "exercises": [
          {
            "exercise_id": 101,
            "title": "Barbell Bench Press",
            "sets": 4,
            "reps": "6-8",
            "rest_sec": 120,
            "muscle_groups": ["chest", "triceps"],
            "notes": "Keep shoulder blades pinned.",
            "image_url": "https://cdn.example.com/exercises/101.jpg"
          },
          {
            "exercise_id": 205,
            "title": "Seated Cable Row",
            "sets": 3,
            "reps": "10-12",
            "rest_sec": 90,
            "muscle_groups": [],
            "image_url": "not a url"
          }
        ]
      },
      {
        "day": "thu",
        "exercises": [
          {
            "exercise_id": 310,
            "sets": 3,
            "reps": 10
          }
        ]
      }
    ],
    "progression": {"weekly_load_increase_pct": 2.5},
    "deload_week": 5
  },
  "warnings": ["Missing height data", {"code": "W02", "detail": "Seed ignored"}],
  "issues": [],
  "audit": {"retrieval": {"candidates": 42, "filters": []}, "cache_hit": false}
}
"#
    .trim();
}
