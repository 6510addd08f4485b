use anyhow::Result;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;

use super::FormView;
use crate::domain::models::FormField;
use crate::domain::models::FormState;
use crate::domain::models::Sex;
use crate::domain::models::Weekday;
use crate::domain::services::plain_text;

#[test]
fn it_renders_default_form() {
    let form = FormState::default();
    let lines = FormView::as_lines(&form, Some(FormField::Height), Weekday::Mon, false);

    let expected = r#"
  Days per week    ◂ 4 ▸
  Session minutes  ◂ 60 min ▸
  Training days     Mon   Tue   Wed   Thu   Fri   Sat   Sun   auto schedule
  Sex              ◂ not set ▸
  Experience       ◂ not set ▸
› Height (cm)      █
  Weight (kg)      not set
  Waist (cm)       not set
  Hip (cm)         not set
  Chest (cm)       not set
  Seed             not set
  Equipment        not set

  [ Generate workout plan ]"#
        .trim_start_matches('\n');

    assert_eq!(plain_text(&lines), expected);
}

#[test]
fn it_renders_selected_days_and_values() -> Result<()> {
    let mut form = FormState::default();
    form.set_days_per_week(3);
    form.toggle_training_day(Weekday::Mon)?;
    form.toggle_training_day(Weekday::Wed)?;
    form.sex = Some(Sex::Female);
    form.height = "180.5".to_string();
    form.equipment = "dumbbells".to_string();

    let lines = FormView::as_lines(&form, Some(FormField::TrainingDays), Weekday::Wed, false);

    let expected = r#"
  Days per week    ◂ 3 ▸
  Session minutes  ◂ 60 min ▸
› Training days    [Mon]  Tue  [Wed]  Thu   Fri   Sat   Sun   2/3 selected
  Sex              ◂ female ▸
  Experience       ◂ not set ▸
  Height (cm)      180.5
  Weight (kg)      not set
  Waist (cm)       not set
  Hip (cm)         not set
  Chest (cm)       not set
  Seed             not set
  Equipment        dumbbells"#
        .trim_start_matches('\n');

    assert!(plain_text(&lines).starts_with(expected));

    let cursor = lines[2]
        .spans
        .iter()
        .find(|span| return span.content == "[Wed]")
        .map(|span| return span.style);
    assert_eq!(
        cursor,
        Some(
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::REVERSED)
        )
    );

    return Ok(());
}

#[test]
fn it_dims_submit_without_a_goal() {
    let form = FormState::default();
    let lines = FormView::as_lines(&form, Some(FormField::Submit), Weekday::Mon, false);

    let submit = lines.last().unwrap();
    assert_eq!(submit.spans[1].content, "[ Generate workout plan ]");
    assert_eq!(submit.spans[1].style, Style::default().fg(Color::DarkGray));
}

#[test]
fn it_shows_progress_while_waiting() {
    let mut form = FormState::default();
    form.goal_text = "Get stronger".to_string();

    let lines = FormView::as_lines(&form, None, Weekday::Mon, true);
    assert_eq!(plain_text(&lines[lines.len() - 1..]), "  [ Generating... ]");
}

#[test]
fn it_describes_keys_for_the_focused_field() {
    insta::assert_snapshot!(
        plain_text(&[FormView::hints(Some(FormField::Seed))]),
        @"type a value · ↑/↓ fields · Ctrl+G generate"
    );
    insta::assert_snapshot!(
        plain_text(&[FormView::hints(Some(FormField::Sex))]),
        @"←/→ change · ↑/↓ fields · Ctrl+G generate"
    );
}
