use std::fmt;
use thiserror::Error;

/// Form fields in the order they are laid out (and checked).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Room,
    Date,
    Department,
    Attendees,
    StartTime,
    EndTime,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Room,
        Field::Date,
        Field::Department,
        Field::Attendees,
        Field::StartTime,
        Field::EndTime,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Field::Room => "Room",
            Field::Date => "Date",
            Field::Department => "Department",
            Field::Attendees => "Attendees",
            Field::StartTime => "Start time",
            Field::EndTime => "End time",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TimeRangeError {
    #[error("start time / end time missing")]
    Missing,
    #[error("start time must be before end time")]
    NotIncreasing,
}

/// Submit-time validation failures. `Display` is the text shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("please fill in every field")]
    MissingField(Field),
    #[error("please enter a valid attendee count")]
    InvalidAttendeeCount,
    #[error("attendee count exceeds room capacity ({capacity} people)")]
    CapacityExceeded { capacity: u32 },
    #[error(transparent)]
    InvalidTimeRange(#[from] TimeRangeError),
}

impl ValidationError {
    /// The field the user should look at to fix this error.
    pub fn field(&self) -> Field {
        match self {
            ValidationError::MissingField(f) => *f,
            ValidationError::InvalidAttendeeCount
            | ValidationError::CapacityExceeded { .. } => Field::Attendees,
            ValidationError::InvalidTimeRange(TimeRangeError::Missing) => Field::StartTime,
            ValidationError::InvalidTimeRange(TimeRangeError::NotIncreasing) => Field::EndTime,
        }
    }
}
