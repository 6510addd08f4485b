#[cfg(test)]
#[path = "form_test.rs"]
mod tests;

use super::cycle_option;
use super::Experience;
use super::Sex;
use super::ValidationError;
use super::Weekday;

pub const DAYS_PER_WEEK_MIN: u8 = 1;
pub const DAYS_PER_WEEK_MAX: u8 = 7;
pub const SESSION_MINUTES_MIN: u16 = 10;
pub const SESSION_MINUTES_MAX: u16 = 240;
pub const SESSION_MINUTES_STEP: u16 = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Measurement {
    Height,
    Weight,
    Waist,
    Hip,
    Chest,
}

impl Measurement {
    pub fn all() -> [Measurement; 5] {
        return [
            Measurement::Height,
            Measurement::Weight,
            Measurement::Waist,
            Measurement::Hip,
            Measurement::Chest,
        ];
    }

    pub fn key(&self) -> &'static str {
        match self {
            Measurement::Height => return "height",
            Measurement::Weight => return "weight",
            Measurement::Waist => return "waist",
            Measurement::Hip => return "hip",
            Measurement::Chest => return "chest",
        }
    }
}

/// Everything the user can edit before submitting. Numeric inputs other than the
/// schedule are kept as typed so a half-written value never gets rejected while
/// editing, they are only coerced when the payload gets built.
#[derive(Clone, Debug, PartialEq)]
pub struct FormState {
    pub goal_text: String,
    pub days_per_week: u8,
    pub session_minutes: u16,
    pub sex: Option<Sex>,
    pub experience: Option<Experience>,
    pub equipment: String,
    pub height: String,
    pub weight: String,
    pub waist: String,
    pub hip: String,
    pub chest: String,
    pub seed: String,
    training_days: Vec<Weekday>,
}

impl Default for FormState {
    fn default() -> FormState {
        return FormState {
            goal_text: "".to_string(),
            days_per_week: 4,
            session_minutes: 60,
            sex: None,
            experience: None,
            equipment: "".to_string(),
            height: "".to_string(),
            weight: "".to_string(),
            waist: "".to_string(),
            hip: "".to_string(),
            chest: "".to_string(),
            seed: "".to_string(),
            training_days: vec![],
        };
    }
}

impl FormState {
    pub fn training_days(&self) -> &[Weekday] {
        return &self.training_days;
    }

    pub fn is_auto_schedule(&self) -> bool {
        return self.training_days.is_empty();
    }

    /// Changes the weekly session count. A manual selection longer than the new
    /// count keeps its first `days_per_week` entries.
    pub fn set_days_per_week(&mut self, days_per_week: u8) {
        self.days_per_week = days_per_week;
        self.training_days.truncate(days_per_week as usize);
    }

    pub fn step_days_per_week(&mut self, forward: bool) {
        let next = if forward {
            self.days_per_week.saturating_add(1)
        } else {
            self.days_per_week.saturating_sub(1)
        };

        self.set_days_per_week(next.clamp(DAYS_PER_WEEK_MIN, DAYS_PER_WEEK_MAX));
    }

    pub fn step_session_minutes(&mut self, forward: bool) {
        let next = if forward {
            self.session_minutes.saturating_add(SESSION_MINUTES_STEP)
        } else {
            self.session_minutes.saturating_sub(SESSION_MINUTES_STEP)
        };

        self.session_minutes = next.clamp(SESSION_MINUTES_MIN, SESSION_MINUTES_MAX);
    }

    /// Selects or unselects a day. Adding a day once the selection already holds
    /// `days_per_week` entries is refused and leaves the selection untouched.
    pub fn toggle_training_day(&mut self, day: Weekday) -> Result<(), ValidationError> {
        if let Some(idx) = self.training_days.iter().position(|e| return *e == day) {
            self.training_days.remove(idx);
            return Ok(());
        }

        if self.days_per_week > 0 && self.training_days.len() >= self.days_per_week as usize {
            return Err(ValidationError::TrainingDaysCapacity {
                days_per_week: self.days_per_week,
            });
        }

        self.training_days.push(day);
        return Ok(());
    }

    /// Replaces the selection wholesale, dropping repeated days. No capacity check
    /// happens here, a mismatch is reported when the payload is built.
    pub fn select_training_days(&mut self, days: &[Weekday]) {
        self.training_days = vec![];
        for day in days {
            if !self.training_days.contains(day) {
                self.training_days.push(*day);
            }
        }
    }

    pub fn clear_training_days(&mut self) {
        self.training_days = vec![];
    }

    pub fn cycle_sex(&mut self, forward: bool) {
        self.sex = cycle_option(self.sex, forward);
    }

    pub fn cycle_experience(&mut self, forward: bool) {
        self.experience = cycle_option(self.experience, forward);
    }

    pub fn measurement(&self, measurement: Measurement) -> &str {
        match measurement {
            Measurement::Height => return &self.height,
            Measurement::Weight => return &self.weight,
            Measurement::Waist => return &self.waist,
            Measurement::Hip => return &self.hip,
            Measurement::Chest => return &self.chest,
        }
    }

    pub fn measurement_mut(&mut self, measurement: Measurement) -> &mut String {
        match measurement {
            Measurement::Height => return &mut self.height,
            Measurement::Weight => return &mut self.weight,
            Measurement::Waist => return &mut self.waist,
            Measurement::Hip => return &mut self.hip,
            Measurement::Chest => return &mut self.chest,
        }
    }
}
