use thiserror::Error;

/// Local problems with the form. None of these ever reach the network, they are
/// shown next to the form as advisories.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Describe your training goal before generating a plan.")]
    EmptyGoal,

    #[error("{field} must be between {min} and {max}, got {value}.")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("{field} must be zero or greater, got {value}.")]
    Negative { field: &'static str, value: String },

    #[error("Selected training days ({selected}) must equal days per week ({days_per_week}).")]
    TrainingDaysMismatch { selected: usize, days_per_week: u8 },

    #[error("You are choosing days manually. The number of selected days must equal {days_per_week}.")]
    TrainingDaysCapacity { days_per_week: u8 },
}
