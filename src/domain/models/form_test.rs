use super::FormState;
use super::Measurement;
use crate::domain::models::Experience;
use crate::domain::models::Sex;
use crate::domain::models::ValidationError;
use crate::domain::models::Weekday;

fn form_with_days(days_per_week: u8, days: &[Weekday]) -> FormState {
    let mut form = FormState::default();
    form.set_days_per_week(days_per_week);
    for day in days {
        form.toggle_training_day(*day).unwrap();
    }

    return form;
}

#[test]
fn it_defaults_to_an_auto_schedule() {
    let form = FormState::default();
    assert_eq!(form.days_per_week, 4);
    assert_eq!(form.session_minutes, 60);
    assert!(form.is_auto_schedule());
}

mod toggle_training_day {
    use super::*;

    #[test]
    fn it_adds_days_in_selection_order() {
        let form = form_with_days(3, &[Weekday::Fri, Weekday::Mon]);
        assert_eq!(form.training_days(), &[Weekday::Fri, Weekday::Mon]);
    }

    #[test]
    fn it_removes_selected_days() {
        let mut form = form_with_days(3, &[Weekday::Mon, Weekday::Wed, Weekday::Fri]);
        form.toggle_training_day(Weekday::Wed).unwrap();
        assert_eq!(form.training_days(), &[Weekday::Mon, Weekday::Fri]);
    }

    #[test]
    fn it_refuses_days_beyond_capacity() {
        let mut form = form_with_days(2, &[Weekday::Mon, Weekday::Thu]);
        let res = form.toggle_training_day(Weekday::Sat);

        assert_eq!(
            res,
            Err(ValidationError::TrainingDaysCapacity { days_per_week: 2 })
        );
        assert_eq!(form.training_days(), &[Weekday::Mon, Weekday::Thu]);
        assert_eq!(
            res.unwrap_err().to_string(),
            "You are choosing days manually. The number of selected days must equal 2."
        );
    }

    #[test]
    fn it_allows_removal_at_capacity() {
        let mut form = form_with_days(2, &[Weekday::Mon, Weekday::Thu]);
        assert!(form.toggle_training_day(Weekday::Mon).is_ok());
        assert_eq!(form.training_days(), &[Weekday::Thu]);
    }
}

mod set_days_per_week {
    use super::*;

    #[test]
    fn it_truncates_longer_selections_keeping_order() {
        let mut form = form_with_days(
            5,
            &[
                Weekday::Sat,
                Weekday::Mon,
                Weekday::Wed,
                Weekday::Tue,
                Weekday::Sun,
            ],
        );

        for days_per_week in (1..=4).rev() {
            form.set_days_per_week(days_per_week);
            assert_eq!(form.training_days().len(), days_per_week as usize);
        }

        assert_eq!(form.training_days(), &[Weekday::Sat]);
    }

    #[test]
    fn it_keeps_shorter_selections() {
        let mut form = form_with_days(3, &[Weekday::Tue, Weekday::Thu]);
        form.set_days_per_week(6);
        assert_eq!(form.training_days(), &[Weekday::Tue, Weekday::Thu]);
    }

    #[test]
    fn it_truncates_when_stepping_down() {
        let mut form = form_with_days(3, &[Weekday::Mon, Weekday::Wed, Weekday::Fri]);
        form.step_days_per_week(false);
        assert_eq!(form.days_per_week, 2);
        assert_eq!(form.training_days(), &[Weekday::Mon, Weekday::Wed]);
    }

    #[test]
    fn it_clamps_steps_to_the_week() {
        let mut form = FormState::default();
        for _ in 0..10 {
            form.step_days_per_week(true);
        }
        assert_eq!(form.days_per_week, 7);

        for _ in 0..10 {
            form.step_days_per_week(false);
        }
        assert_eq!(form.days_per_week, 1);
    }
}

#[test]
fn it_clamps_session_minutes() {
    let mut form = FormState::default();
    for _ in 0..100 {
        form.step_session_minutes(true);
    }
    assert_eq!(form.session_minutes, 240);

    for _ in 0..100 {
        form.step_session_minutes(false);
    }
    assert_eq!(form.session_minutes, 10);
}

#[test]
fn it_clears_training_days() {
    let mut form = form_with_days(2, &[Weekday::Mon]);
    form.clear_training_days();
    assert!(form.is_auto_schedule());
}

#[test]
fn it_selects_training_days_without_duplicates() {
    let mut form = FormState::default();
    form.select_training_days(&[Weekday::Wed, Weekday::Mon, Weekday::Wed]);
    assert_eq!(form.training_days(), &[Weekday::Wed, Weekday::Mon]);
}

#[test]
fn it_cycles_through_options() {
    let mut form = FormState::default();
    form.cycle_sex(true);
    assert_eq!(form.sex, Some(Sex::Male));
    form.cycle_sex(true);
    assert_eq!(form.sex, Some(Sex::Female));
    form.cycle_sex(true);
    assert_eq!(form.sex, None);

    form.cycle_experience(false);
    assert_eq!(form.experience, Some(Experience::Advanced));
}

#[test]
fn it_edits_measurements() {
    let mut form = FormState::default();
    form.measurement_mut(Measurement::Waist).push_str("81.5");
    assert_eq!(form.waist, "81.5");
    assert_eq!(form.measurement(Measurement::Waist), "81.5");
    assert_eq!(Measurement::Waist.key(), "waist");
}
