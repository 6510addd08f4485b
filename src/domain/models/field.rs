use strum::EnumIter;
use strum::IntoEnumIterator;

use super::Measurement;

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter)]
pub enum FormField {
    GoalText,
    DaysPerWeek,
    SessionMinutes,
    TrainingDays,
    Sex,
    Experience,
    Height,
    Weight,
    Waist,
    Hip,
    Chest,
    Seed,
    Equipment,
    Submit,
}

impl FormField {
    pub fn label(&self) -> &'static str {
        match self {
            FormField::GoalText => return "Goal",
            FormField::DaysPerWeek => return "Days per week",
            FormField::SessionMinutes => return "Session minutes",
            FormField::TrainingDays => return "Training days",
            FormField::Sex => return "Sex",
            FormField::Experience => return "Experience",
            FormField::Height => return "Height (cm)",
            FormField::Weight => return "Weight (kg)",
            FormField::Waist => return "Waist (cm)",
            FormField::Hip => return "Hip (cm)",
            FormField::Chest => return "Chest (cm)",
            FormField::Seed => return "Seed",
            FormField::Equipment => return "Equipment",
            FormField::Submit => return "Generate workout plan",
        }
    }

    pub fn next(&self) -> FormField {
        let fields = FormField::iter().collect::<Vec<_>>();
        let idx = fields.iter().position(|e| return e == self).unwrap_or(0);
        return fields[(idx + 1) % fields.len()];
    }

    pub fn prev(&self) -> FormField {
        let fields = FormField::iter().collect::<Vec<_>>();
        let idx = fields.iter().position(|e| return e == self).unwrap_or(0);
        return fields[(idx + fields.len() - 1) % fields.len()];
    }

    pub fn measurement(&self) -> Option<Measurement> {
        match self {
            FormField::Height => return Some(Measurement::Height),
            FormField::Weight => return Some(Measurement::Weight),
            FormField::Waist => return Some(Measurement::Waist),
            FormField::Hip => return Some(Measurement::Hip),
            FormField::Chest => return Some(Measurement::Chest),
            _ => return None,
        }
    }

    /// Fields edited by typing characters.
    pub fn is_text(&self) -> bool {
        return self.measurement().is_some()
            || matches!(self, FormField::Seed | FormField::Equipment);
    }
}
